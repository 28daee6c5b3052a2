//! Core types for storecart.
//!
//! This module provides type-safe wrappers for the storefront's domain
//! concepts and the cart mutation rules that operate on them.

pub mod cart;
pub mod catalog;
pub mod id;
pub mod price;
pub mod product;

pub use cart::{Cart, CartLineItem, QuantityUpdate};
pub use catalog::{Catalog, CatalogError};
pub use id::{ProductId, ProductIdError};
pub use price::{LocaleError, Price, PriceFormat};
pub use product::Product;
