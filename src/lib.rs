//! Kiosk
//!
//! Kiosk is the order-taking core of a storefront menu: a tabbed product catalog,
//! a cart that accumulates line items and totals, and a scripted order assistant
//! that answers from a table of canned replies.
//!
//! Nothing here draws to a screen. A [`storefront::Storefront`] mutates state
//! and then calls out through the [`render::Renderer`] and
//! [`render::NotificationChannel`] traits, so any front end (or a test fake)
//! can sit on top.

pub mod cart;
pub mod catalog;
pub mod chat;
pub mod config;
pub mod console;
pub mod money;
pub mod prelude;
pub mod render;
pub mod storefront;
pub mod timers;
