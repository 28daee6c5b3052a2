//! storecart Core - Shared types library.
//!
//! This crate provides the domain types used across all storecart components:
//! - `storefront` - Cart store, snapshot persistence, checkout and rendering
//! - `cli` - Terminal front-end driving the cart store
//!
//! # Architecture
//!
//! The core crate contains only types and pure cart logic - no I/O, no
//! storage access, no logging. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product ids, prices, line items, the cart and the catalog

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
