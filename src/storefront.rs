//! Storefront
//!
//! Routes inbound commands (tab selection, adds, chat, confirm/cancel) to the
//! [`CartStore`] and [`ChatDispatcher`], then pushes the resulting state out
//! through the [`Renderer`] and [`NotificationChannel`] seams.
//!
//! Time only moves when [`Storefront::advance`] or [`Storefront::advance_to`] is
//! called. Chat replies are shown after the configured latency; notifications
//! hide after the configured duration unless a newer one replaced them.

use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    cart::{CartError, CartStore, OrderSummary},
    catalog::{Catalog, CatalogError, Product, ProductKey},
    chat::{BotResponseTable, ChatDispatcher, Speaker},
    config::StorefrontConfig,
    money::{Price, parse_shelf_price},
    render::{MenuView, NotificationChannel, Renderer},
    timers::Timers,
};

/// Shown when confirming with nothing in the cart.
pub const EMPTY_ORDER_MESSAGE: &str = "Your order is empty!";

/// Shown after the cart is cleared by a cancel.
pub const CANCELED_MESSAGE: &str = "Your order has been canceled.";

/// Errors surfaced by storefront commands. None of them are fatal; each one has
/// already been reported to the customer by the time it is returned.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// A cart operation was rejected.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// A catalog lookup failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// No product at this position in the current tab.
    #[error("no product at position {0} on the current menu")]
    NoSuchProduct(usize),
}

/// An inbound command from the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show a menu tab.
    SelectTab(String),

    /// Add a product by name with its price as displayed (e.g. `"₱150"`).
    AddToOrder {
        /// Product name
        name: String,

        /// Displayed price text
        price: String,
    },

    /// Add the product at this position in the current tab.
    AddFromMenu(usize),

    /// Send a chat message to the order assistant.
    SendChatMessage(String),

    /// Confirm the order.
    ConfirmOrder,

    /// Cancel the order.
    CancelOrder,

    /// Show or hide the chat panel.
    ToggleChat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TimerEvent {
    BotReply(String),
    HideNotification(u64),
}

/// Storefront
#[derive(Debug)]
pub struct Storefront<R, N> {
    catalog: Catalog,
    cart: CartStore,
    chat: ChatDispatcher,
    config: StorefrontConfig,
    timers: Timers<TimerEvent>,
    active_tab: String,
    menu: Vec<ProductKey>,
    chat_visible: bool,
    notification: Option<String>,
    notification_generation: u64,
    renderer: R,
    notifier: N,
}

impl<R: Renderer, N: NotificationChannel> Storefront<R, N> {
    /// Open a storefront: renders the configured initial tab and the empty cart.
    pub fn new(catalog: Catalog, config: StorefrontConfig, renderer: R, notifier: N) -> Self {
        Self::with_responses(
            catalog,
            config,
            BotResponseTable::standard(),
            renderer,
            notifier,
        )
    }

    /// Open a storefront whose assistant answers from `responses`.
    pub fn with_responses(
        catalog: Catalog,
        config: StorefrontConfig,
        responses: BotResponseTable,
        renderer: R,
        notifier: N,
    ) -> Self {
        let cart = CartStore::new(catalog.currency());
        let initial_tab = config.initial_tab.clone();

        let mut storefront = Self {
            catalog,
            cart,
            chat: ChatDispatcher::new(responses),
            config,
            timers: Timers::new(),
            active_tab: String::new(),
            menu: Vec::new(),
            chat_visible: false,
            notification: None,
            notification_generation: 0,
            renderer,
            notifier,
        };

        // An unknown initial tab still renders the placeholder; nothing else to do.
        if storefront.select_tab(&initial_tab).is_err() {
            warn!(tab = %initial_tab, "initial tab is not in the catalog");
        }

        storefront.refresh_cart();
        storefront
    }

    /// Apply a command. Failures are reported to the customer and logged, then
    /// returned for callers that want them.
    ///
    /// # Errors
    ///
    /// Returns the [`StorefrontError`] of the underlying operation.
    pub fn dispatch(&mut self, command: Command) -> Result<(), StorefrontError> {
        debug!(?command, "dispatching command");

        let result = match command {
            Command::SelectTab(tab_id) => self.select_tab(&tab_id),
            Command::AddToOrder { name, price } => self.add_shelf_priced(&name, &price),
            Command::AddFromMenu(index) => self.add_from_menu(index),
            Command::SendChatMessage(text) => {
                self.send_chat_message(&text);
                Ok(())
            }
            Command::ConfirmOrder => self.confirm_order().map(|_summary| ()),
            Command::CancelOrder => {
                self.cancel_order();
                Ok(())
            }
            Command::ToggleChat => {
                self.toggle_chat();
                Ok(())
            }
        };

        if let Err(error) = &result {
            warn!(%error, "command rejected");
        }

        result
    }

    /// Show a menu tab. Unknown ids render the "no content" placeholder.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownTab`] after rendering the placeholder.
    pub fn select_tab(&mut self, tab_id: &str) -> Result<(), StorefrontError> {
        tab_id.clone_into(&mut self.active_tab);

        let Some(category) = self.catalog.category(tab_id) else {
            self.menu.clear();
            self.renderer.render_menu(tab_id, MenuView::Placeholder);

            return Err(CatalogError::UnknownTab(tab_id.to_string()).into());
        };

        let products: Vec<&Product> = category
            .product_keys()
            .iter()
            .filter_map(|&key| self.catalog.product(key))
            .collect();

        category.product_keys().clone_into(&mut self.menu);

        self.renderer.render_menu(
            tab_id,
            MenuView::Products {
                category,
                products: &products,
            },
        );

        debug!(tab = tab_id, products = products.len(), "tab selected");

        Ok(())
    }

    /// Add one unit of a product at a known price.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Cart`] if the cart rejects the add; the cart is unchanged.
    pub fn add_to_order(&mut self, name: &str, unit_price: Price) -> Result<(), StorefrontError> {
        match self.cart.add_to_order(name, unit_price) {
            Ok(()) => {
                self.refresh_cart();
                Ok(())
            }
            Err(error) => {
                self.notify(format!("Could not add {name}: {error}"));
                Err(error.into())
            }
        }
    }

    /// Add one unit of a product using its displayed price text.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::MalformedPrice`] for unreadable or negative prices,
    /// plus anything [`Storefront::add_to_order`] returns.
    pub fn add_shelf_priced(&mut self, name: &str, price: &str) -> Result<(), StorefrontError> {
        match parse_shelf_price(price, self.cart.currency()) {
            Ok(unit_price) => self.add_to_order(name, unit_price),
            Err(error) => {
                let error = CartError::from(error);
                self.notify(format!("Could not add {name}: {error}"));
                Err(error.into())
            }
        }
    }

    /// Add the product at `index` in the tab currently shown.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::NoSuchProduct`] if the position is empty
    /// (including when the placeholder is shown).
    pub fn add_from_menu(&mut self, index: usize) -> Result<(), StorefrontError> {
        let product = self
            .menu
            .get(index)
            .and_then(|&key| self.catalog.product(key))
            .map(|product| (product.name.clone(), product.price));

        let Some((name, price)) = product else {
            let error = StorefrontError::NoSuchProduct(index);
            let position = index.saturating_add(1);
            self.notify(format!(
                "Could not add item #{position}: not on the current menu"
            ));
            return Err(error);
        };

        self.add_to_order(&name, price)
    }

    /// Send a message to the order assistant.
    ///
    /// The message is echoed at once and the reply is shown after the configured
    /// latency. Blank input is ignored and returns `None`.
    pub fn send_chat_message(&mut self, text: &str) -> Option<String> {
        let reply = self.chat.handle(text, &self.cart)?;

        self.renderer.render_chat_turn(text, Speaker::User);

        let due = self
            .timers
            .schedule(self.config.chat_reply_delay(), TimerEvent::BotReply(reply.clone()));

        debug!(due_ms = due.as_millis(), "bot reply scheduled");

        Some(reply)
    }

    /// Confirm the order, reporting the summary and emptying the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::EmptyCart`] with the cart untouched when nothing has been added.
    pub fn confirm_order(&mut self) -> Result<OrderSummary, StorefrontError> {
        match self.cart.confirm_order() {
            Ok(summary) => {
                info!(
                    lines = summary.lines().len(),
                    total_minor = summary.total().to_minor_units(),
                    "order confirmed"
                );

                self.notify(summary.to_string());
                self.refresh_cart();

                Ok(summary)
            }
            Err(error) => {
                self.notify(EMPTY_ORDER_MESSAGE.to_string());
                Err(error.into())
            }
        }
    }

    /// Empty the cart. Always succeeds, even when already empty.
    pub fn cancel_order(&mut self) {
        info!(lines = self.cart.len(), "order canceled");

        self.cart.cancel_order();
        self.refresh_cart();
        self.notify(CANCELED_MESSAGE.to_string());
    }

    /// Flip chat panel visibility. Returns the new visibility.
    pub fn toggle_chat(&mut self) -> bool {
        self.chat_visible = !self.chat_visible;
        self.renderer.set_chat_visible(self.chat_visible);
        self.chat_visible
    }

    /// Let `by` pass and fire whatever falls due.
    pub fn advance(&mut self, by: Duration) {
        let due = self.timers.advance(by);
        self.fire(due);
    }

    /// Move the clock to `at` (never backwards) and fire whatever falls due.
    pub fn advance_to(&mut self, at: Duration) {
        let due = self.timers.advance_to(at);
        self.fire(due);
    }

    fn fire(&mut self, due: Vec<TimerEvent>) {
        for event in due {
            match event {
                TimerEvent::BotReply(text) => {
                    debug!("bot reply delivered");
                    self.renderer.render_chat_turn(&text, Speaker::Bot);
                }
                TimerEvent::HideNotification(generation) => {
                    if generation == self.notification_generation
                        && self.notification.take().is_some()
                    {
                        self.notifier.hide();
                    }
                }
            }
        }
    }

    fn notify(&mut self, message: String) {
        self.notification_generation = self.notification_generation.wrapping_add(1);
        self.notifier.show(&message);
        self.notification = Some(message);

        self.timers.schedule(
            self.config.notification_duration(),
            TimerEvent::HideNotification(self.notification_generation),
        );
    }

    fn refresh_cart(&mut self) {
        self.renderer
            .render_cart(self.cart.items(), &self.cart.total());
    }

    /// The cart.
    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// The order assistant.
    pub fn chat(&self) -> &ChatDispatcher {
        &self.chat
    }

    /// The menu.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Settings in effect.
    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// Id of the tab last selected, known or not.
    pub fn active_tab(&self) -> &str {
        &self.active_tab
    }

    /// Products of the tab currently shown; empty when the placeholder is up.
    pub fn menu(&self) -> Vec<&Product> {
        self.menu
            .iter()
            .filter_map(|&key| self.catalog.product(key))
            .collect()
    }

    /// Whether the chat panel is open.
    pub fn is_chat_visible(&self) -> bool {
        self.chat_visible
    }

    /// The notification currently showing.
    pub fn notification(&self) -> Option<&str> {
        self.notification.as_deref()
    }

    /// Time elapsed on the storefront clock.
    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    /// When the next deferred update is due.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    /// Number of assistant replies still waiting to be shown.
    pub fn pending_replies(&self) -> usize {
        self.timers
            .pending()
            .filter(|event| matches!(event, TimerEvent::BotReply(_)))
            .count()
    }

    /// The renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// The notification channel.
    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}
