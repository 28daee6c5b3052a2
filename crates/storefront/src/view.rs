//! Plain-text rendering of the catalog and cart.
//!
//! Terminal front-ends print these directly; other front-ends can use them
//! as reference output.

use storecart_core::{Cart, Catalog, PriceFormat};

use crate::cart::CartBadge;

/// Text shown in place of the cart listing when the cart is empty.
pub const EMPTY_CART_MESSAGE: &str = "Tu carrito está vacío.";

/// One card per product: id, name, price and image URL.
#[must_use]
pub fn render_product_grid(catalog: &Catalog, format: &PriceFormat) -> String {
    catalog
        .iter()
        .map(|product| {
            format!(
                "[{}] {}\n    {}\n    {}",
                product.id,
                product.name,
                format.display(product.price),
                product.image
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Cart listing with positions, quantities and line totals, then the total.
///
/// Positions start at 0 and match the indices accepted by the cart store.
#[must_use]
pub fn render_cart(cart: &Cart, format: &PriceFormat) -> String {
    if cart.is_empty() {
        return format!(
            "{EMPTY_CART_MESSAGE}\nTotal: {}",
            format.display(storecart_core::Price::ZERO)
        );
    }

    let mut lines: Vec<String> = cart
        .iter()
        .enumerate()
        .map(|(index, item)| {
            format!(
                "{index}. {} - {} x{}",
                item.name,
                format.display(item.line_total()),
                item.quantity
            )
        })
        .collect();
    lines.push(format!("Total: {}", format.display(cart.total())));
    lines.join("\n")
}

/// Cart badge text; empty when the badge is hidden.
#[must_use]
pub fn render_badge(badge: CartBadge) -> String {
    if badge.visible {
        format!("🛒 {}", badge.count)
    } else {
        String::new()
    }
}
