//! Versioned cart snapshot.
//!
//! # Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "saved_at": "2026-10-17T12:00:00Z",
//!   "items": [
//!     {"id": 1, "name": "Remera", "price": 10.0, "image": "remera.jpg", "quantity": 2}
//!   ]
//! }
//! ```
//!
//! Snapshots written by the legacy page script are a bare array of line
//! items with no envelope. Those are read as version 0 and rewritten in the
//! current format on the next save.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use storecart_core::Cart;
use thiserror::Error;
use tracing::{debug, warn};

use crate::storage::{SnapshotStorage, StorageError};

/// Schema version written by [`encode`].
pub const SNAPSHOT_VERSION: u64 = 1;

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "shoppingCart";

/// Errors that can occur while reading or writing a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The stored text is not a valid snapshot.
    #[error("Malformed cart snapshot: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The snapshot was written by a newer schema.
    #[error("Unsupported cart snapshot version {found} (newest known is {SNAPSHOT_VERSION})")]
    UnsupportedVersion {
        /// Version found in the snapshot.
        found: u64,
    },

    /// The snapshot is neither an array nor a versioned envelope.
    #[error("Cart snapshot has an unexpected shape")]
    UnexpectedShape,

    /// The storage backend failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

#[derive(Serialize)]
struct Envelope<'a> {
    version: u64,
    saved_at: DateTime<Utc>,
    items: &'a Cart,
}

#[derive(Deserialize)]
struct StoredEnvelope {
    items: Cart,
}

/// Serialize `cart` as a current-version snapshot.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn encode(cart: &Cart) -> Result<String, SnapshotError> {
    let envelope = Envelope {
        version: SNAPSHOT_VERSION,
        saved_at: Utc::now(),
        items: cart,
    };
    Ok(serde_json::to_string(&envelope)?)
}

/// Parse a snapshot of any known version.
///
/// Line items are normalized on the way in: zero quantities are dropped and
/// repeated product ids merged.
///
/// # Errors
///
/// Returns an error if the text is not JSON, has an unknown shape, or was
/// written by a newer schema version.
pub fn decode(raw: &str) -> Result<Cart, SnapshotError> {
    let value: Value = serde_json::from_str(raw)?;
    match value {
        Value::Array(_) => Ok(serde_json::from_value(value)?),
        Value::Object(ref fields) => {
            let version = fields
                .get("version")
                .and_then(Value::as_u64)
                .ok_or(SnapshotError::UnexpectedShape)?;
            if version > SNAPSHOT_VERSION {
                return Err(SnapshotError::UnsupportedVersion { found: version });
            }
            let envelope: StoredEnvelope = serde_json::from_value(value)?;
            Ok(envelope.items)
        }
        _ => Err(SnapshotError::UnexpectedShape),
    }
}

/// Load the cart stored under `key`.
///
/// Never fails: missing data yields an empty cart, and unreadable or
/// unparsable data is logged and also yields an empty cart.
pub fn load_cart(storage: &impl SnapshotStorage, key: &str) -> Cart {
    let raw = match storage.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key, "No stored cart, starting empty");
            return Cart::new();
        }
        Err(e) => {
            warn!(key, error = %e, "Failed to read stored cart, starting empty");
            return Cart::new();
        }
    };

    match decode(&raw) {
        Ok(cart) => {
            debug!(key, items = cart.len(), "Loaded stored cart");
            cart
        }
        Err(e) => {
            warn!(key, error = %e, "Failed to parse stored cart, starting empty");
            Cart::new()
        }
    }
}

/// Write `cart` under `key` as a current-version snapshot.
///
/// # Errors
///
/// Returns an error if serialization or the storage write fails.
pub fn save_cart(
    storage: &mut impl SnapshotStorage,
    key: &str,
    cart: &Cart,
) -> Result<(), SnapshotError> {
    let encoded = encode(cart)?;
    storage.write(key, &encoded)?;
    Ok(())
}
