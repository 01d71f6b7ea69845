//! Cart commands.
//!
//! # Environment Variables
//!
//! See `fanzon_cart::config` for `FANZON_*` settings.

use std::path::Path;

use chrono::Utc;
use fanzon_cart::checkout::LineIssue;
use fanzon_cart::{Cart, CartStorage, notify};
use fanzon_core::ProductId;
use tracing::info;

use super::{TerminalSink, open_cart};
use crate::catalog::Catalog;
use crate::error::CliError;

/// Print every line and the totals.
///
/// # Errors
///
/// Returns an error if the configuration is invalid.
pub fn show() -> Result<(), CliError> {
    let cart = open_cart()?;
    print_cart(&cart);

    let stale = cart.stale_lines(Utc::now());
    if !stale.is_empty() {
        info!(
            "{} line(s) have old product data, run `fanzon cart checkout` to refresh",
            stale.len()
        );
    }
    Ok(())
}

/// Snapshot `product_id` from the catalog and add it.
///
/// # Errors
///
/// Returns an error if the product is unknown or the cart refuses the change.
pub fn add(catalog_path: &Path, product_id: &str, quantity: u32) -> Result<(), CliError> {
    let catalog = Catalog::load(catalog_path)?;
    let product = catalog.product(product_id)?.snapshot(Utc::now());

    let mut cart = open_cart()?;
    notify::report(&mut TerminalSink, cart.add_to_cart(product, quantity))?;
    print_cart(&cart);
    Ok(())
}

/// Set a line's quantity.
///
/// # Errors
///
/// Returns an error if the cart refuses the change.
pub fn update(product_id: &str, quantity: u32) -> Result<(), CliError> {
    let mut cart = open_cart()?;
    let id = ProductId::new(product_id);
    notify::report(&mut TerminalSink, cart.update_quantity(&id, quantity))?;
    print_cart(&cart);
    Ok(())
}

/// Drop a line.
///
/// # Errors
///
/// Returns an error if the configuration is invalid.
pub fn remove(product_id: &str) -> Result<(), CliError> {
    let mut cart = open_cart()?;
    let event = cart.remove_from_cart(&ProductId::new(product_id));
    notify::report(&mut TerminalSink, Ok(event))?;
    print_cart(&cart);
    Ok(())
}

/// Drop every line.
///
/// # Errors
///
/// Returns an error if the configuration is invalid.
pub fn clear() -> Result<(), CliError> {
    let mut cart = open_cart()?;
    let event = cart.clear_cart();
    notify::report(&mut TerminalSink, Ok(event))?;
    Ok(())
}

/// Revalidate against the catalog, report differences and apply them.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded.
pub fn checkout(catalog_path: &Path) -> Result<(), CliError> {
    let catalog = Catalog::load(catalog_path)?;
    let mut cart = open_cart()?;

    let revalidation = cart.revalidate(&catalog, Utc::now());
    if revalidation.is_clean() {
        info!("All lines match the catalog");
    }

    for check in revalidation.problems() {
        for issue in &check.issues {
            match issue {
                LineIssue::Unavailable => info!("{}: no longer listed", check.title),
                LineIssue::OutOfStock => info!("{}: out of stock", check.title),
                LineIssue::StockReduced { available } => info!(
                    "{}: only {available} left, you have {}",
                    check.title, check.quantity
                ),
                // Surfaced by the event `apply_revalidation` emits.
                LineIssue::PriceChanged { .. } => {}
            }
        }
    }

    for event in cart.apply_revalidation(&revalidation) {
        notify::report(&mut TerminalSink, Ok(event))?;
    }
    print_cart(&cart);
    Ok(())
}

fn print_cart<S: CartStorage>(cart: &Cart<S>) {
    if cart.is_empty() {
        info!("Your cart is empty");
        return;
    }

    for line in cart.lines() {
        info!(
            "{} x{} @ {} = {}",
            line.product.title,
            line.quantity,
            line.product.unit_price(),
            line.line_total()
        );
    }

    let summary = cart.summary();
    info!("Items:    {}", summary.item_count);
    info!("Subtotal: {}", summary.subtotal);
    info!("Shipping: {}", summary.shipping_fee);
    info!("Total:    {}", summary.total);
}
