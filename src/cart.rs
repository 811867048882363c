//! Cart
//!
//! The [`CartStore`] is the single source of truth for what the customer intends
//! to buy. It never renders anything itself; callers read [`CartStore::items`]
//! and [`CartStore::total`] after each mutation and hand them to a renderer.

use std::fmt;

use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use thiserror::Error;
use tracing::debug;

use crate::money::{Price, PriceError, format_price, format_total, parse_shelf_price};

/// Errors related to cart mutations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    /// Confirm was requested with nothing in the cart.
    #[error("cart is empty")]
    EmptyCart,

    /// A product name was empty or whitespace.
    #[error("product name is empty")]
    EmptyName,

    /// A raw price could not be read.
    #[error(transparent)]
    MalformedPrice(#[from] PriceError),

    /// A price's currency differs from the cart currency (price currency, cart currency).
    #[error("price has currency {0}, but cart has currency {1}")]
    CurrencyMismatch(&'static str, &'static str),

    /// Adding the item would overflow the order total.
    #[error("order total would overflow")]
    TotalOverflow,
}

/// Whether the cart currently holds anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartState {
    /// No line items.
    Empty,

    /// At least one line item.
    HasItems,
}

/// One product entry in the cart with its accumulated quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    name: String,
    unit_price: Price,
    quantity: u32,
}

impl LineItem {
    /// Product name, unique within the cart.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Price recorded on the first add of this name.
    pub fn unit_price(&self) -> &Price {
        &self.unit_price
    }

    /// Number of times this name has been added.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// `unit_price × quantity`.
    pub fn line_total(&self) -> Price {
        Money::from_minor(
            self.unit_minor().saturating_mul(i64::from(self.quantity)),
            self.unit_price.currency(),
        )
    }

    /// Display form used by the cart panel and order summaries, e.g. `Milk Tea - $60 x2`.
    pub fn display(&self) -> String {
        format!(
            "{} - {} x{}",
            self.name,
            format_price(&self.unit_price),
            self.quantity
        )
    }

    fn unit_minor(&self) -> i64 {
        self.unit_price.to_minor_units()
    }
}

/// A line of a confirmed order.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryLine {
    /// Product name
    pub name: String,

    /// Unit price
    pub unit_price: Price,

    /// Quantity ordered
    pub quantity: u32,
}

/// What was ordered, captured at confirmation time.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSummary {
    lines: SmallVec<[SummaryLine; 8]>,
    total: Price,
}

impl OrderSummary {
    /// Lines in first-add order.
    pub fn lines(&self) -> &[SummaryLine] {
        &self.lines
    }

    /// Order total.
    pub fn total(&self) -> &Price {
        &self.total
    }

    /// Compact item list, e.g. `Milk Tea x2, Coffee x1`.
    pub fn item_list(&self) -> String {
        self.lines
            .iter()
            .map(|line| format!("{} x{}", line.name, line.quantity))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Item list with unit prices, e.g. `Milk Tea - $60 x2, Coffee - $70 x1`.
    pub fn details(&self) -> String {
        self.lines
            .iter()
            .map(|line| {
                format!(
                    "{} - {} x{}",
                    line.name,
                    format_price(&line.unit_price),
                    line.quantity
                )
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for OrderSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Order confirmed! Details: {}. {}",
            self.details(),
            format_total(&self.total)
        )
    }
}

/// Cart
#[derive(Debug, Clone)]
pub struct CartStore {
    items: Vec<LineItem>,
    currency: &'static Currency,
}

impl CartStore {
    /// Create an empty cart priced in `currency`.
    pub fn new(currency: &'static Currency) -> Self {
        CartStore {
            items: Vec::new(),
            currency,
        }
    }

    /// Add one unit of `name` to the cart.
    ///
    /// A name already in the cart has its quantity incremented; its recorded unit
    /// price is left as it was on the first add, whatever `unit_price` is now.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the name is blank, the price is negative or in
    /// another currency, or the new total would not fit in minor units. The cart
    /// is unchanged on error.
    pub fn add_to_order(&mut self, name: &str, unit_price: Price) -> Result<(), CartError> {
        let name = name.trim();

        if name.is_empty() {
            return Err(CartError::EmptyName);
        }

        if unit_price.to_minor_units() < 0 {
            return Err(PriceError::Negative(format_price(&unit_price)).into());
        }

        let price_currency = unit_price.currency();

        if price_currency != self.currency {
            return Err(CartError::CurrencyMismatch(
                price_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        let existing = self.items.iter().position(|item| item.name == name);

        let increment = existing
            .and_then(|index| self.items.get(index))
            .map_or_else(|| unit_price.to_minor_units(), LineItem::unit_minor);

        self.total_minor()
            .checked_add(increment)
            .ok_or(CartError::TotalOverflow)?;

        match existing.and_then(|index| self.items.get_mut(index)) {
            Some(item) => {
                item.quantity = item
                    .quantity
                    .checked_add(1)
                    .ok_or(CartError::TotalOverflow)?;

                debug!(name, quantity = item.quantity, "incremented line item");
            }
            None => {
                self.items.push(LineItem {
                    name: name.to_string(),
                    unit_price,
                    quantity: 1,
                });

                debug!(name, price = %format_price(&unit_price), "added line item");
            }
        }

        Ok(())
    }

    /// Add one unit of `name` using a price as displayed on a menu card (e.g. `"₱150"`).
    ///
    /// # Errors
    ///
    /// Returns [`CartError::MalformedPrice`] if the text is not a non-negative
    /// amount, plus anything [`CartStore::add_to_order`] returns.
    pub fn add_shelf_priced(&mut self, name: &str, shelf_price: &str) -> Result<(), CartError> {
        let unit_price = parse_shelf_price(shelf_price, self.currency)?;

        self.add_to_order(name, unit_price)
    }

    /// Sum of `unit_price × quantity` over every line; zero when empty.
    pub fn total(&self) -> Price {
        Money::from_minor(self.total_minor(), self.currency)
    }

    /// Finalise the order: capture a summary and empty the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::EmptyCart`] and leaves the cart untouched when there
    /// is nothing to confirm.
    pub fn confirm_order(&mut self) -> Result<OrderSummary, CartError> {
        if self.items.is_empty() {
            return Err(CartError::EmptyCart);
        }

        let total = self.total();

        let lines = self
            .items
            .drain(..)
            .map(|item| SummaryLine {
                name: item.name,
                unit_price: item.unit_price,
                quantity: item.quantity,
            })
            .collect();

        Ok(OrderSummary { lines, total })
    }

    /// Discard every line item. Safe to call on an empty cart.
    pub fn cancel_order(&mut self) {
        self.items.clear();
    }

    /// Line items in first-add order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Find the line for a product name.
    pub fn get(&self, name: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.name == name)
    }

    /// Current state of the cart.
    pub fn state(&self) -> CartState {
        if self.items.is_empty() {
            CartState::Empty
        } else {
            CartState::HasItems
        }
    }

    /// Get the number of distinct products in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the currency of the cart.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    fn total_minor(&self) -> i64 {
        // Adds are rejected before the total can overflow, so saturation never
        // changes the result.
        self.items.iter().fold(0_i64, |acc, item| {
            acc.saturating_add(item.unit_minor().saturating_mul(i64::from(item.quantity)))
        })
    }
}
