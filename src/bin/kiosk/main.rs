//! Kiosk terminal storefront

use std::io;

use anyhow::Result;
use clap::Parser;
use kiosk::{
    catalog::Catalog,
    config::StorefrontConfig,
    console::{ConsoleNotifier, ConsoleRenderer},
    storefront::Storefront,
};
use tracing::info;

mod args;
mod logging;
mod repl;

use args::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(&cli.logging)?;

    let config = match &cli.config {
        Some(path) => StorefrontConfig::load(path)?,
        None => StorefrontConfig::default(),
    };

    let catalog = match &cli.catalog {
        Some(path) => Catalog::load(path)?,
        None => Catalog::bundled()?,
    };

    info!(
        tabs = catalog.tabs().count(),
        products = catalog.len(),
        currency = catalog.currency().iso_alpha_code,
        "storefront opening"
    );

    let mut storefront = Storefront::new(
        catalog,
        config,
        ConsoleRenderer::new(io::stdout()),
        ConsoleNotifier::new(io::stdout()),
    );

    repl::run(&mut storefront, io::stdin().lock(), io::stdout())?;

    info!(
        orders_pending = storefront.cart().len(),
        "storefront closing"
    );

    Ok(())
}
