//! Console rendering
//!
//! Terminal implementations of the rendering seams. Tables are drawn with
//! `tabled`; write failures are logged and otherwise ignored, since a broken
//! terminal must not take the cart down with it.

use std::io;

use tabled::{builder::Builder, settings::Style};
use tracing::warn;

use crate::{
    cart::LineItem,
    chat::Speaker,
    money::{Price, format_price, format_total},
    render::{MenuView, NO_CONTENT, NotificationChannel, Renderer},
};

/// Draws menu, cart and chat to a writer.
#[derive(Debug)]
pub struct ConsoleRenderer<W> {
    out: W,
}

impl<W: io::Write> ConsoleRenderer<W> {
    /// Create a renderer writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the renderer and return its writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) {
        if let Err(error) = writeln!(self.out, "{text}") {
            warn!(%error, "failed to write to console");
        }
    }
}

/// Build the menu table (or placeholder) for a tab.
pub fn menu_table(view: MenuView<'_>) -> String {
    match view {
        MenuView::Products { category, products } => {
            let mut builder = Builder::default();
            builder.push_record(["#", "Product", "Description", "Price"]);

            for (index, product) in products.iter().enumerate() {
                builder.push_record([
                    index.saturating_add(1).to_string(),
                    product.name.clone(),
                    product.description.clone(),
                    format_price(&product.price),
                ]);
            }

            let mut table = builder.build();
            table.with(Style::rounded());

            format!("{}\n{table}", category.title())
        }
        MenuView::Placeholder => NO_CONTENT.to_string(),
    }
}

/// Build the cart table with its total footer.
pub fn cart_table(items: &[LineItem], total: &Price) -> String {
    if items.is_empty() {
        return format!("(cart is empty)\n{}", format_total(total));
    }

    let mut builder = Builder::default();
    builder.push_record(["Item", "Price", "Qty", "Line Total"]);

    for item in items {
        builder.push_record([
            item.name().to_string(),
            format_price(item.unit_price()),
            format!("x{}", item.quantity()),
            format_price(&item.line_total()),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());

    format!("{table}\n{}", format_total(total))
}

impl<W: io::Write> Renderer for ConsoleRenderer<W> {
    fn render_menu(&mut self, tab_id: &str, view: MenuView<'_>) {
        let text = format!("[{tab_id}]\n{}", menu_table(view));
        self.emit(&text);
    }

    fn render_cart(&mut self, items: &[LineItem], total: &Price) {
        let text = cart_table(items, total);
        self.emit(&text);
    }

    fn render_chat_turn(&mut self, text: &str, speaker: Speaker) {
        let prefix = match speaker {
            Speaker::User => "you",
            Speaker::Bot => "assistant",
        };

        self.emit(&format!("{prefix}> {text}"));
    }

    fn set_chat_visible(&mut self, visible: bool) {
        self.emit(if visible {
            "Order Assistant (type `chat <message>`)"
        } else {
            "Order Assistant closed"
        });
    }
}

/// Prints notifications as banner lines.
#[derive(Debug)]
pub struct ConsoleNotifier<W> {
    out: W,
    showing: bool,
}

impl<W: io::Write> ConsoleNotifier<W> {
    /// Create a notifier writing to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out,
            showing: false,
        }
    }

    /// Whether a notification is currently up.
    pub fn is_showing(&self) -> bool {
        self.showing
    }

    /// Consume the notifier and return its writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: io::Write> NotificationChannel for ConsoleNotifier<W> {
    fn show(&mut self, message: &str) {
        self.showing = true;

        if let Err(error) = writeln!(self.out, "** {message} **") {
            warn!(%error, "failed to write notification");
        }
    }

    fn hide(&mut self) {
        self.showing = false;
    }
}
