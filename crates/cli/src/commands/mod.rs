//! Subcommand implementations.
//!
//! Every command opens the file-backed cart store, runs one operation and
//! exits. Re-rendering after a mutation is driven by a store subscription,
//! not by the commands themselves.

use std::path::Path;

use storecart_core::Catalog;
use storecart_storefront::catalog::load_catalog;
use storecart_storefront::storage::FileStorage;
use storecart_storefront::{CartBadge, CartStore, StorefrontConfig, view};

pub mod cart;
pub mod checkout;
pub mod products;

/// Print rendered output for the shopper.
#[allow(clippy::print_stdout)]
pub fn emit(text: &str) {
    if !text.is_empty() {
        println!("{text}");
    }
}

/// Print a blocking notification for the shopper.
#[allow(clippy::print_stderr)]
pub fn notify(message: &str) {
    eprintln!("⚠ {message}");
}

/// Open the cart store for this invocation, with the cart view subscribed.
pub fn open_store(config: &StorefrontConfig, catalog: Catalog) -> CartStore<FileStorage> {
    let storage = FileStorage::new(&config.data_dir);
    let mut store = CartStore::open_with(storage, catalog, config.store_options());

    let format = store.price_format();
    store.subscribe(move |_, cart| {
        emit(&view::render_cart(cart, &format));
        emit(&view::render_badge(CartBadge::new(cart.count())));
    });
    store
}

/// Load the page catalog.
fn catalog(path: &Path) -> storecart_storefront::Result<Catalog> {
    Ok(load_catalog(path)?)
}
