//! Rendering seams
//!
//! The storefront never draws anything itself. After each state change it hands
//! the new state to a [`Renderer`] and, for transient messages, a
//! [`NotificationChannel`]. Tests substitute [`NoopRenderer`] or a recording fake.

use crate::{
    cart::LineItem,
    catalog::{Category, Product},
    chat::Speaker,
    money::Price,
};

/// Text shown in place of a product list for a tab that does not exist.
pub const NO_CONTENT: &str = "No content available";

/// What to show in the menu area after a tab is selected.
#[derive(Debug, Clone, Copy)]
pub enum MenuView<'a> {
    /// A known tab and its products, in display order.
    Products {
        /// The tab being shown.
        category: &'a Category,

        /// Its products.
        products: &'a [&'a Product],
    },

    /// The requested tab does not exist.
    Placeholder,
}

/// Draws menu, cart and chat state.
pub trait Renderer {
    /// Show the product list for `tab_id`.
    fn render_menu(&mut self, tab_id: &str, view: MenuView<'_>);

    /// Show the cart lines and total.
    fn render_cart(&mut self, items: &[LineItem], total: &Price);

    /// Append one chat message.
    fn render_chat_turn(&mut self, text: &str, speaker: Speaker);

    /// Show or hide the chat panel.
    fn set_chat_visible(&mut self, _visible: bool) {}
}

/// Transient, auto-dismissing message surface.
pub trait NotificationChannel {
    /// Display `message`, replacing whatever is showing.
    fn show(&mut self, message: &str);

    /// Dismiss the current message.
    fn hide(&mut self);
}

/// Renderer that draws nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRenderer;

impl Renderer for NoopRenderer {
    fn render_menu(&mut self, _tab_id: &str, _view: MenuView<'_>) {}

    fn render_cart(&mut self, _items: &[LineItem], _total: &Price) {}

    fn render_chat_turn(&mut self, _text: &str, _speaker: Speaker) {}
}

impl NotificationChannel for NoopRenderer {
    fn show(&mut self, _message: &str) {}

    fn hide(&mut self) {}
}
