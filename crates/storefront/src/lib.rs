//! storecart Storefront library.
//!
//! The cart side of a small storefront page: a [`cart::CartStore`] holding
//! the shopper's line items, persisted as a versioned snapshot after every
//! change, with change notifications for whatever renders it and a
//! messaging deep link for checkout.
//!
//! # Modules
//!
//! - [`cart`] - The cart store, change events and badge state
//! - [`snapshot`] - Versioned snapshot encoding and tolerant loading
//! - [`storage`] - String-keyed storage backends (memory, files)
//! - [`checkout`] - Order validation, summary and deep link
//! - [`catalog`] - Loading page catalogs from YAML/JSON
//! - [`view`] - Plain-text rendering for terminal front-ends
//! - [`config`] - Environment configuration
//! - [`error`] - Unified error type

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod snapshot;
pub mod storage;
pub mod view;

pub use cart::{CartBadge, CartEvent, CartStore, CartStoreOptions, SubscriptionId};
pub use config::StorefrontConfig;
pub use error::{Result, StorefrontError};
