//! Product grid.

use std::path::Path;

use storecart_storefront::{StorefrontConfig, view};

use super::emit;

/// Render the catalog.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded.
pub fn list(config: &StorefrontConfig, catalog_path: &Path) -> storecart_storefront::Result<()> {
    let catalog = super::catalog(catalog_path)?;
    if catalog.is_empty() {
        tracing::info!(path = %catalog_path.display(), "Catalog has no products");
    }
    emit(&view::render_product_grid(&catalog, &config.price_format));
    Ok(())
}
