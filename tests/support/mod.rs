//! Shared test fakes.

#![expect(
    dead_code,
    reason = "each test crate uses a different subset of the helpers"
)]

use kiosk::{
    cart::LineItem,
    catalog::Catalog,
    chat::Speaker,
    config::StorefrontConfig,
    money::{Price, format_total},
    render::{MenuView, NotificationChannel, Renderer},
    storefront::Storefront,
};

pub const DINER_MENU: &str = r"
currency: USD
tabs:
  - id: mains
    title: Mains
    products:
      - name: Burger
        description: Quarter pounder
        price: 100 USD
        image: burger.jpg
  - id: drinks
    title: Drinks
    products:
      - name: Milk Tea
        price: 60 USD
      - name: Coffee
        price: 70 USD
";

/// One call made on the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Menu {
        tab: String,
        products: Option<Vec<String>>,
    },
    Cart {
        lines: Vec<String>,
        total: String,
    },
    Chat {
        text: String,
        speaker: Speaker,
    },
    ChatVisible(bool),
}

#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub calls: Vec<Rendered>,
}

impl RecordingRenderer {
    pub fn last_cart(&self) -> Option<(&[String], &str)> {
        self.calls.iter().rev().find_map(|call| match call {
            Rendered::Cart { lines, total } => Some((lines.as_slice(), total.as_str())),
            _ => None,
        })
    }

    pub fn last_menu(&self) -> Option<(&str, Option<&[String]>)> {
        self.calls.iter().rev().find_map(|call| match call {
            Rendered::Menu { tab, products } => Some((tab.as_str(), products.as_deref())),
            _ => None,
        })
    }

    pub fn chat(&self) -> Vec<(Speaker, &str)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Rendered::Chat { text, speaker } => Some((*speaker, text.as_str())),
                _ => None,
            })
            .collect()
    }

    pub fn cart_renders(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, Rendered::Cart { .. }))
            .count()
    }
}

impl Renderer for RecordingRenderer {
    fn render_menu(&mut self, tab_id: &str, view: MenuView<'_>) {
        let products = match view {
            MenuView::Products { products, .. } => Some(
                products
                    .iter()
                    .map(|product| product.name.clone())
                    .collect(),
            ),
            MenuView::Placeholder => None,
        };

        self.calls.push(Rendered::Menu {
            tab: tab_id.to_string(),
            products,
        });
    }

    fn render_cart(&mut self, items: &[LineItem], total: &Price) {
        self.calls.push(Rendered::Cart {
            lines: items.iter().map(LineItem::display).collect(),
            total: format_total(total),
        });
    }

    fn render_chat_turn(&mut self, text: &str, speaker: Speaker) {
        self.calls.push(Rendered::Chat {
            text: text.to_string(),
            speaker,
        });
    }

    fn set_chat_visible(&mut self, visible: bool) {
        self.calls.push(Rendered::ChatVisible(visible));
    }
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub shown: Vec<String>,
    pub hides: usize,
    pub visible: Option<String>,
}

impl NotificationChannel for RecordingNotifier {
    fn show(&mut self, message: &str) {
        self.shown.push(message.to_string());
        self.visible = Some(message.to_string());
    }

    fn hide(&mut self) {
        self.hides += 1;
        self.visible = None;
    }
}

pub type TestStorefront = Storefront<RecordingRenderer, RecordingNotifier>;

pub fn diner(initial_tab: &str) -> Result<TestStorefront, kiosk::catalog::CatalogError> {
    let config = StorefrontConfig {
        initial_tab: initial_tab.to_string(),
        ..StorefrontConfig::default()
    };

    Ok(Storefront::new(
        Catalog::from_yaml_str(DINER_MENU)?,
        config,
        RecordingRenderer::default(),
        RecordingNotifier::default(),
    ))
}
