//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `STORECART_DATA_DIR` - Directory for stored snapshots (default: .storecart)
//! - `STORECART_STORAGE_KEY` - Snapshot key; ASCII letters, digits, `-`, `_` (default: shoppingCart)
//! - `STORECART_CATALOG` - Catalog file, YAML or JSON (default: catalog.yaml)
//! - `STORECART_LOCALE` - Price format locale, `es-AR` or `en-US` (default: es-AR)
//! - `STORECART_CHECKOUT_URL` - Messaging service base URL (default: <https://wa.me>)
//!
//! ## Required for checkout
//! - `STORECART_CHECKOUT_RECIPIENT` - Recipient appended to the checkout URL

use std::path::PathBuf;

use storecart_core::PriceFormat;
use thiserror::Error;
use url::Url;

use crate::cart::CartStoreOptions;
use crate::checkout::CheckoutSettings;
use crate::snapshot::DEFAULT_STORAGE_KEY;
use crate::storage::is_portable_key;

const DATA_DIR: &str = "STORECART_DATA_DIR";
const STORAGE_KEY: &str = "STORECART_STORAGE_KEY";
const CATALOG: &str = "STORECART_CATALOG";
const LOCALE: &str = "STORECART_LOCALE";
const CHECKOUT_URL: &str = "STORECART_CHECKOUT_URL";
const CHECKOUT_RECIPIENT: &str = "STORECART_CHECKOUT_RECIPIENT";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Root directory for file-backed snapshots
    pub data_dir: PathBuf,
    /// Key the cart snapshot is stored under
    pub storage_key: String,
    /// Catalog file for the current page
    pub catalog_path: PathBuf,
    /// Price rendering locale
    pub price_format: PriceFormat,
    /// Messaging service base URL
    pub checkout_url: Url,
    /// Messaging recipient, if checkout is enabled
    pub checkout_recipient: Option<String>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let storage_key = get_or(STORAGE_KEY, DEFAULT_STORAGE_KEY);
        if storage_key.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                STORAGE_KEY.to_string(),
                "must not be empty".to_string(),
            ));
        }
        if !is_portable_key(&storage_key) {
            return Err(ConfigError::InvalidEnvVar(
                STORAGE_KEY.to_string(),
                "may only contain ASCII letters, digits, '-' and '_'".to_string(),
            ));
        }

        let price_format = PriceFormat::for_locale(&get_or(LOCALE, "es-AR"))
            .map_err(|e| ConfigError::InvalidEnvVar(LOCALE.to_string(), e.to_string()))?;

        let checkout_url = Url::parse(&get_or(CHECKOUT_URL, "https://wa.me"))
            .map_err(|e| ConfigError::InvalidEnvVar(CHECKOUT_URL.to_string(), e.to_string()))?;
        if checkout_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidEnvVar(
                CHECKOUT_URL.to_string(),
                "must be a hierarchical URL such as https://wa.me".to_string(),
            ));
        }

        let checkout_recipient = lookup(CHECKOUT_RECIPIENT)
            .map(|value| validate_recipient(&value))
            .transpose()?;

        Ok(Self {
            data_dir: PathBuf::from(get_or(DATA_DIR, ".storecart")),
            storage_key,
            catalog_path: PathBuf::from(get_or(CATALOG, "catalog.yaml")),
            price_format,
            checkout_url,
            checkout_recipient,
        })
    }

    /// Options for opening the cart store.
    #[must_use]
    pub fn store_options(&self) -> CartStoreOptions {
        CartStoreOptions {
            storage_key: self.storage_key.clone(),
            price_format: self.price_format,
        }
    }

    /// Checkout link settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if no recipient is configured.
    pub fn checkout_settings(&self) -> Result<CheckoutSettings, ConfigError> {
        let recipient = self
            .checkout_recipient
            .clone()
            .ok_or_else(|| ConfigError::MissingEnvVar(CHECKOUT_RECIPIENT.to_string()))?;
        Ok(CheckoutSettings {
            base_url: self.checkout_url.clone(),
            recipient,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Normalize a recipient: trimmed, a leading `+` dropped, no separators.
fn validate_recipient(value: &str) -> Result<String, ConfigError> {
    let recipient = value.trim().trim_start_matches('+');
    if recipient.is_empty() {
        return Err(ConfigError::InvalidEnvVar(
            CHECKOUT_RECIPIENT.to_string(),
            "must not be empty".to_string(),
        ));
    }
    if recipient.chars().any(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#')) {
        return Err(ConfigError::InvalidEnvVar(
            CHECKOUT_RECIPIENT.to_string(),
            "must be a single path segment".to_string(),
        ));
    }
    Ok(recipient.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.data_dir, PathBuf::from(".storecart"));
        assert_eq!(config.storage_key, "shoppingCart");
        assert_eq!(config.catalog_path, PathBuf::from("catalog.yaml"));
        assert_eq!(config.price_format, PriceFormat::ES_AR);
        assert_eq!(config.checkout_url.as_str(), "https://wa.me/");
        assert!(config.checkout_recipient.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = StorefrontConfig::from_lookup(lookup(&[
            ("STORECART_DATA_DIR", "/var/lib/storecart"),
            ("STORECART_STORAGE_KEY", "cartV2"),
            ("STORECART_CATALOG", "pages/remeras.json"),
            ("STORECART_LOCALE", "en-US"),
            ("STORECART_CHECKOUT_URL", "https://api.example.com/send"),
            ("STORECART_CHECKOUT_RECIPIENT", " +5493415646850 "),
        ]))
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/var/lib/storecart"));
        assert_eq!(config.store_options().storage_key, "cartV2");
        assert_eq!(config.price_format, PriceFormat::EN_US);
        assert_eq!(config.checkout_recipient.as_deref(), Some("5493415646850"));
        assert_eq!(
            config.checkout_settings().unwrap().base_url.as_str(),
            "https://api.example.com/send"
        );
    }

    #[test]
    fn test_storage_key_must_be_portable() {
        for key in ["shopping Cart", "../cart", "cart.json", "   "] {
            let result = StorefrontConfig::from_lookup(lookup(&[("STORECART_STORAGE_KEY", key)]));
            assert!(
                matches!(&result, Err(ConfigError::InvalidEnvVar(var, _)) if var == "STORECART_STORAGE_KEY"),
                "{key:?} accepted"
            );
        }
    }

    #[test]
    fn test_invalid_locale() {
        let result = StorefrontConfig::from_lookup(lookup(&[("STORECART_LOCALE", "xx-YY")]));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(key, _)) if key == "STORECART_LOCALE"));
    }

    #[test]
    fn test_invalid_checkout_url() {
        let result = StorefrontConfig::from_lookup(lookup(&[("STORECART_CHECKOUT_URL", "not a url")]));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));

        let result =
            StorefrontConfig::from_lookup(lookup(&[("STORECART_CHECKOUT_URL", "mailto:shop@example.com")]));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_invalid_recipient() {
        let result = StorefrontConfig::from_lookup(lookup(&[("STORECART_CHECKOUT_RECIPIENT", "a/b")]));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));

        let result = StorefrontConfig::from_lookup(lookup(&[("STORECART_CHECKOUT_RECIPIENT", "  ")]));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_checkout_settings_require_recipient() {
        let config = StorefrontConfig::from_lookup(lookup(&[])).unwrap();
        assert!(matches!(
            config.checkout_settings(),
            Err(ConfigError::MissingEnvVar(key)) if key == "STORECART_CHECKOUT_RECIPIENT"
        ));
    }
}
