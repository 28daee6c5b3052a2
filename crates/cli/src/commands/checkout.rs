//! Checkout command.

use storecart_core::Catalog;
use storecart_storefront::StorefrontConfig;
use storecart_storefront::checkout::{CheckoutError, CheckoutForm, CheckoutLink};
use tracing::info;

use super::{emit, open_store};

/// Validate the order and print the summary and messaging link.
///
/// The cart is left as it is; the shop confirms the order over the chat.
///
/// # Errors
///
/// Returns an error if no recipient is configured or a checkout
/// precondition fails (empty cart, no payment method, blank address).
pub fn checkout(
    config: &StorefrontConfig,
    address: String,
    payment: Option<String>,
) -> storecart_storefront::Result<()> {
    let store = open_store(config, Catalog::default());
    let form = CheckoutForm::new(address, payment);

    // An empty cart is reported ahead of a missing recipient.
    if store.cart().is_empty() {
        return Err(CheckoutError::EmptyCart.into());
    }
    let settings = config.checkout_settings()?;
    let link = store.checkout(&form, &settings)?;

    info!(items = store.cart().len(), "Checkout link ready");
    emit(&checkout_message(&link));
    Ok(())
}

/// Summary, a blank line, then the link to open.
fn checkout_message(link: &CheckoutLink) -> String {
    format!(
        "{}\n\nAbrí este enlace para enviar tu pedido:\n{}",
        link.summary, link.url
    )
}
