//! Catalog Fixtures

use rusty_money::{Money, iso::Currency};
use serde::Deserialize;

use crate::{
    catalog::{CatalogError, Product},
    money::parse_price,
};

/// Wrapper for a menu in YAML
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Currency code every product must be priced in (e.g., "PHP")
    pub currency: String,

    /// Tabs in display order
    pub tabs: Vec<TabFixture>,
}

/// Tab Fixture
#[derive(Debug, Deserialize)]
pub struct TabFixture {
    /// Tab id used by navigation (e.g., "milktea")
    pub id: String,

    /// Heading shown above the product list
    pub title: String,

    /// Products listed under this tab
    #[serde(default)]
    pub products: Vec<ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product name
    pub name: String,

    /// Short description shown on the card
    #[serde(default)]
    pub description: String,

    /// Product price (e.g., "150 PHP")
    pub price: String,

    /// Image reference
    #[serde(default)]
    pub image: String,
}

impl ProductFixture {
    /// Convert into a [`Product`], checking the price is in the menu currency.
    ///
    /// # Errors
    ///
    /// Returns an error if the price cannot be parsed or is in another currency.
    pub fn into_product(self, currency: &'static Currency) -> Result<Product, CatalogError> {
        let (minor_units, price_currency) = parse_price(&self.price)?;

        if price_currency != currency {
            return Err(CatalogError::CurrencyMismatch(
                currency.iso_alpha_code.to_string(),
                price_currency.iso_alpha_code.to_string(),
            ));
        }

        Ok(Product {
            name: self.name,
            description: self.description,
            price: Money::from_minor(minor_units, currency),
            image: self.image,
        })
    }
}
