//! Integration tests for storecart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p storecart-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_flow` - Store operations end to end over file storage
//! - `snapshot_compat` - Legacy and future snapshot handling
//! - `checkout` - Checkout preconditions and deep links
//!
//! Shared fixtures live here.

use storecart_core::{Catalog, Price, Product, ProductId};

/// The three-product page used across the integration tests.
///
/// # Panics
///
/// Never panics: the fixture products are valid.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn sample_catalog() -> Catalog {
    Catalog::new(vec![
        Product::new(ProductId::new(1), "Remera", Price::from_cents(1000), "remera.jpg"),
        Product::new(ProductId::new(2), "Buzo", Price::from_cents(2550), "buzo.jpg"),
        Product::new(ProductId::new(3), "Campera", Price::from_cents(150_000), "campera.jpg"),
    ])
    .unwrap()
}
