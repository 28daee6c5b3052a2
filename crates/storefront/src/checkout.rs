//! Checkout through a messaging deep link.
//!
//! There is no payment step. Checkout validates the order form, writes a
//! plain-text order summary and wraps it in a link of the form
//! `https://wa.me/<recipient>?text=<summary>`. Opening the link is up to
//! the front-end.

use storecart_core::{Cart, PriceFormat};
use thiserror::Error;
use url::Url;

/// A failed checkout precondition, or an unusable link base.
///
/// The `Display` text of the precondition variants is the notification shown
/// to the shopper.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// Nothing to order.
    #[error("Tu carrito está vacío.")]
    EmptyCart,

    /// No payment method was chosen.
    #[error("Por favor, selecciona una forma de pago.")]
    MissingPaymentMethod,

    /// The shipping address is blank.
    #[error("Por favor, ingresa tu dirección de envío.")]
    MissingAddress,

    /// The configured messaging URL cannot carry a recipient path.
    #[error("Checkout URL cannot be a base: {0}")]
    InvalidBaseUrl(Url),
}

impl CheckoutError {
    /// Whether this is a shopper-facing precondition rather than a
    /// configuration problem.
    #[must_use]
    pub const fn is_precondition(&self) -> bool {
        !matches!(self, Self::InvalidBaseUrl(_))
    }
}

/// Order form filled in by the shopper.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutForm {
    /// Shipping address as typed.
    pub address: String,
    /// Selected payment method label, if any.
    pub payment_method: Option<String>,
}

impl CheckoutForm {
    /// Create a form.
    #[must_use]
    pub fn new(address: impl Into<String>, payment_method: Option<String>) -> Self {
        Self {
            address: address.into(),
            payment_method,
        }
    }
}

/// Where checkout links point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSettings {
    /// Messaging service base URL (e.g. `https://wa.me`).
    pub base_url: Url,
    /// Recipient appended as the final path segment.
    pub recipient: String,
}

/// A ready-to-open checkout link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutLink {
    /// Deep link with the summary in the `text` query parameter.
    pub url: Url,
    /// The order summary, unencoded.
    pub summary: String,
}

/// Validate the form against `cart` and build the checkout link.
///
/// # Errors
///
/// Returns the first failed precondition, checked in order: empty cart,
/// missing payment method, blank address. Returns
/// [`CheckoutError::InvalidBaseUrl`] if the base URL cannot take a path.
pub fn build_checkout(
    cart: &Cart,
    form: &CheckoutForm,
    format: &PriceFormat,
    settings: &CheckoutSettings,
) -> Result<CheckoutLink, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    let payment_method = form
        .payment_method
        .as_deref()
        .map(str::trim)
        .filter(|method| !method.is_empty())
        .ok_or(CheckoutError::MissingPaymentMethod)?;
    let address = form.address.trim();
    if address.is_empty() {
        return Err(CheckoutError::MissingAddress);
    }

    let summary = order_summary(cart, address, payment_method, format);
    let url = deep_link(settings, &summary)?;
    Ok(CheckoutLink { url, summary })
}

/// Plain-text order summary sent to the shop.
#[must_use]
pub fn order_summary(cart: &Cart, address: &str, payment_method: &str, format: &PriceFormat) -> String {
    let mut lines = vec!["¡Hola! Quisiera hacer el siguiente pedido:".to_string(), String::new()];
    lines.extend(cart.iter().map(|item| {
        format!(
            "- {} (x{}) - {}",
            item.name,
            item.quantity,
            format.display(item.line_total())
        )
    }));
    lines.push(String::new());
    lines.push(format!("*Dirección de envío: {address}*"));
    lines.push(format!("*Forma de pago: {payment_method}*"));
    lines.push(String::new());
    lines.push(format!("*Total: {}*", format.display(cart.total())));
    lines.join("\n")
}

fn deep_link(settings: &CheckoutSettings, text: &str) -> Result<Url, CheckoutError> {
    let mut url = settings.base_url.clone();
    url.path_segments_mut()
        .map_err(|()| CheckoutError::InvalidBaseUrl(settings.base_url.clone()))?
        .pop_if_empty()
        .push(&settings.recipient);
    url.set_query(Some(&format!("text={}", urlencoding::encode(text))));
    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use storecart_core::{Price, Product, ProductId};

    fn settings() -> CheckoutSettings {
        CheckoutSettings {
            base_url: Url::parse("https://wa.me").unwrap(),
            recipient: "5493415646850".to_string(),
        }
    }

    fn cart() -> Cart {
        let mut cart = Cart::new();
        cart.add(
            &Product::new(ProductId::new(1), "Remera", Price::from_cents(1000), "remera.jpg"),
            2,
        );
        cart.add(
            &Product::new(ProductId::new(2), "Campera", Price::from_cents(150_000), "campera.jpg"),
            1,
        );
        cart
    }

    fn form() -> CheckoutForm {
        CheckoutForm::new("Av. Pellegrini 1234", Some("Transferencia".to_string()))
    }

    #[test]
    fn test_empty_cart_fails_first() {
        let result = build_checkout(&Cart::new(), &CheckoutForm::default(), &PriceFormat::ES_AR, &settings());
        assert_eq!(result, Err(CheckoutError::EmptyCart));
        assert_eq!(CheckoutError::EmptyCart.to_string(), "Tu carrito está vacío.");
    }

    #[test]
    fn test_missing_payment_method() {
        let mut form = form();
        form.payment_method = None;
        let result = build_checkout(&cart(), &form, &PriceFormat::ES_AR, &settings());
        assert_eq!(result, Err(CheckoutError::MissingPaymentMethod));

        form.payment_method = Some("  ".to_string());
        let result = build_checkout(&cart(), &form, &PriceFormat::ES_AR, &settings());
        assert_eq!(result, Err(CheckoutError::MissingPaymentMethod));
    }

    #[test]
    fn test_blank_address() {
        let mut form = form();
        form.address = " \t ".to_string();
        let result = build_checkout(&cart(), &form, &PriceFormat::ES_AR, &settings());
        assert_eq!(result, Err(CheckoutError::MissingAddress));
    }

    #[test]
    fn test_summary_lists_items_and_total() {
        let summary = order_summary(&cart(), "Av. Pellegrini 1234", "Efectivo", &PriceFormat::ES_AR);
        assert!(summary.starts_with("¡Hola! Quisiera hacer el siguiente pedido:\n\n"));
        assert!(summary.contains("- Remera (x2) - $20,00\n"));
        assert!(summary.contains("- Campera (x1) - $1.500,00\n"));
        assert!(summary.contains("*Dirección de envío: Av. Pellegrini 1234*"));
        assert!(summary.contains("*Forma de pago: Efectivo*"));
        assert!(summary.ends_with("*Total: $1.520,00*"));
    }

    #[test]
    fn test_link_encodes_summary() {
        let link = build_checkout(&cart(), &form(), &PriceFormat::ES_AR, &settings()).unwrap();

        assert_eq!(link.url.host_str(), Some("wa.me"));
        assert_eq!(link.url.path(), "/5493415646850");
        let text = link
            .url
            .query_pairs()
            .find(|(key, _)| key == "text")
            .map(|(_, value)| value.into_owned())
            .unwrap();
        assert_eq!(text, link.summary);
        assert!(!link.url.as_str().contains(' '));
    }

    #[test]
    fn test_base_url_with_path() {
        let settings = CheckoutSettings {
            base_url: Url::parse("https://api.example.com/send/").unwrap(),
            recipient: "shop".to_string(),
        };
        let link = build_checkout(&cart(), &form(), &PriceFormat::ES_AR, &settings).unwrap();
        assert_eq!(link.url.path(), "/send/shop");
    }

    #[test]
    fn test_cannot_be_base_url() {
        let settings = CheckoutSettings {
            base_url: Url::parse("mailto:shop@example.com").unwrap(),
            recipient: "x".to_string(),
        };
        let result = build_checkout(&cart(), &form(), &PriceFormat::ES_AR, &settings);
        assert!(matches!(result, Err(CheckoutError::InvalidBaseUrl(_))));
        assert!(!result.unwrap_err().is_precondition());
    }
}
