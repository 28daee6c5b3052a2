//! Cart commands.

use std::path::Path;

use storecart_core::{Catalog, ProductId, QuantityUpdate};
use storecart_storefront::{StorefrontConfig, StorefrontError, view};
use tracing::{info, warn};

use super::{emit, open_store};

/// Render the cart and badge without changing anything.
pub fn show(config: &StorefrontConfig) {
    let store = open_store(config, Catalog::default());
    emit(&view::render_cart(store.cart(), &store.price_format()));
    emit(&view::render_badge(store.badge()));
}

/// Add `quantity` units of product `id`.
///
/// Unknown products and non-positive quantities leave the cart unchanged.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded.
pub fn add(
    config: &StorefrontConfig,
    catalog_path: &Path,
    id: ProductId,
    quantity: i64,
) -> storecart_storefront::Result<()> {
    let catalog = super::catalog(catalog_path)?;
    let mut store = open_store(config, catalog);
    if store.add(id, quantity) {
        info!(%id, quantity, "Added to cart");
    } else {
        warn!(%id, quantity, "Nothing added: unknown product or non-positive quantity");
    }
    Ok(())
}

/// Remove the line item at `index`.
///
/// # Errors
///
/// Returns `BadRequest` if there is no line item at `index`.
pub fn remove(config: &StorefrontConfig, index: usize) -> storecart_storefront::Result<()> {
    let mut store = open_store(config, Catalog::default());
    match store.remove(index) {
        Some(item) => {
            info!(index, id = %item.id, "Removed from cart");
            Ok(())
        }
        None => Err(no_line_item(index)),
    }
}

/// Add `delta` to the quantity at `index`, removing the line item at zero.
///
/// # Errors
///
/// Returns `BadRequest` if there is no line item at `index`.
pub fn update(config: &StorefrontConfig, index: usize, delta: i64) -> storecart_storefront::Result<()> {
    let mut store = open_store(config, Catalog::default());
    match store.update_quantity(index, delta) {
        QuantityUpdate::Updated(quantity) => {
            info!(index, quantity, "Quantity updated");
            Ok(())
        }
        QuantityUpdate::Removed(item) => {
            info!(index, id = %item.id, "Quantity reached zero, removed from cart");
            Ok(())
        }
        QuantityUpdate::Missing => Err(no_line_item(index)),
    }
}

/// Empty the cart.
pub fn clear(config: &StorefrontConfig) {
    let mut store = open_store(config, Catalog::default());
    store.clear();
    info!("Cart cleared");
}

fn no_line_item(index: usize) -> StorefrontError {
    StorefrontError::BadRequest(format!("no line item at position {index}"))
}
