//! Unified error handling.
//!
//! Provides a unified `StorefrontError` type for front-ends that drive the
//! cart store. Shopper-facing checkout notifications are kept apart from
//! operational failures via [`StorefrontError::is_user_facing`].

use thiserror::Error;

use crate::catalog::CatalogLoadError;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::snapshot::SnapshotError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog file could not be loaded.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogLoadError),

    /// Storage backend failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Snapshot could not be encoded or decoded.
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    /// Checkout was refused.
    #[error("{0}")]
    Checkout(#[from] CheckoutError),

    /// Invalid input from the front-end.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl StorefrontError {
    /// Whether the message is meant for the shopper rather than the logs.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        match self {
            Self::Checkout(err) => err.is_precondition(),
            Self::BadRequest(_) => true,
            _ => false,
        }
    }
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;
