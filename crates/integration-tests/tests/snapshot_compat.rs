//! Snapshot compatibility: legacy arrays, current envelopes, future versions.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::fs;

use storecart_core::{Price, ProductId};
use storecart_integration_tests::sample_catalog;
use storecart_storefront::CartStore;
use storecart_storefront::snapshot::{self, SNAPSHOT_VERSION, SnapshotError};
use storecart_storefront::storage::{FileStorage, MemoryStorage};
use tempfile::tempdir;

const LEGACY: &str = r#"[
    {"id": 1, "name": "Remera", "price": 10, "image": "remera.jpg", "quantity": 2},
    {"id": 3, "name": "Campera", "price": 1500.5, "image": "campera.jpg", "quantity": 1}
]"#;

#[test]
fn test_legacy_array_loads() {
    let mut storage = MemoryStorage::new();
    storage.insert("shoppingCart", LEGACY);

    let store = CartStore::open(storage, sample_catalog());
    assert_eq!(store.cart().len(), 2);
    assert_eq!(store.cart().items()[1].price, Price::from_cents(150_050));
    assert_eq!(store.total(), "1.520,50");
}

#[test]
fn test_legacy_array_upgraded_on_write() {
    let mut storage = MemoryStorage::new();
    storage.insert("shoppingCart", LEGACY);

    let mut store = CartStore::open(&mut storage, sample_catalog());
    store.add(ProductId::new(1), 1);
    drop(store);

    let raw: serde_json::Value = serde_json::from_str(storage.get("shoppingCart").unwrap()).unwrap();
    assert_eq!(raw["version"], SNAPSHOT_VERSION);
    assert_eq!(raw["items"][0]["quantity"], 3);
    assert_eq!(raw["items"][0]["price"], 10.0);
}

#[test]
fn test_future_version_starts_empty() {
    let mut storage = MemoryStorage::new();
    let future = format!(r#"{{"version": {}, "items": []}}"#, SNAPSHOT_VERSION + 1);
    storage.insert("shoppingCart", future.clone());

    assert!(matches!(
        snapshot::decode(&future),
        Err(SnapshotError::UnsupportedVersion { found }) if found == SNAPSHOT_VERSION + 1
    ));
    let store = CartStore::open(storage, sample_catalog());
    assert!(store.cart().is_empty());
}

#[test]
fn test_corrupt_file_starts_empty() {
    let dir = tempdir().unwrap();
    let storage = FileStorage::new(dir.path());
    fs::write(storage.path_for("shoppingCart"), "{not json").unwrap();

    let mut store = CartStore::open(storage, sample_catalog());
    assert!(store.cart().is_empty());

    store.add(ProductId::new(2), 1);
    let reopened = CartStore::open(FileStorage::new(dir.path()), sample_catalog());
    assert_eq!(reopened.count(), 1);
}

#[test]
fn test_normalizes_on_load() {
    let raw = r#"[
        {"id": 1, "name": "Remera", "price": 10, "image": "remera.jpg", "quantity": 1},
        {"id": 2, "name": "Buzo", "price": 25.5, "image": "buzo.jpg", "quantity": 0},
        {"id": 1, "name": "Remera", "price": 10, "image": "remera.jpg", "quantity": 2}
    ]"#;

    let cart = snapshot::decode(raw).unwrap();
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.items()[0].quantity, 3);
}
