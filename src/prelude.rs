//! Kiosk prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{CartError, CartState, CartStore, LineItem, OrderSummary, SummaryLine},
    catalog::{Catalog, CatalogError, Category, Product, ProductKey},
    chat::{BotResponseTable, ChatDispatcher, ChatTurn, Reply, Speaker},
    config::{ConfigError, StorefrontConfig},
    console::{ConsoleNotifier, ConsoleRenderer},
    money::{Price, PriceError, format_price, format_total, parse_shelf_price},
    render::{MenuView, NoopRenderer, NotificationChannel, Renderer},
    storefront::{Command, Storefront, StorefrontError},
    timers::Timers,
};
