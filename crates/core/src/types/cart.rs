//! Cart line items and the mutation rules that keep them consistent.
//!
//! A [`Cart`] holds at most one [`CartLineItem`] per product id, in the
//! order the products were first added, and never holds a line item with a
//! quantity of zero. Every constructor and mutation preserves both rules,
//! including deserialization.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;
use super::product::Product;

/// A product plus the quantity of it currently in the cart.
///
/// The product fields are copied at add-time; the stored price stays
/// authoritative for this line even if the catalog changes later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// Product identifier.
    pub id: ProductId,
    /// Product name at add-time.
    pub name: String,
    /// Unit price at add-time.
    pub price: Price,
    /// Product image URL.
    pub image: String,
    /// Units in the cart, always at least 1.
    pub quantity: u32,
}

impl CartLineItem {
    /// Build a line item from a catalog product.
    #[must_use]
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            quantity,
        }
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// Result of [`Cart::update_quantity`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuantityUpdate {
    /// The line item now has this quantity.
    Updated(u32),
    /// The quantity dropped to zero or below and the line item was removed.
    Removed(CartLineItem),
    /// No line item at that position.
    Missing,
}

/// Ordered sequence of line items, one per product id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CartLineItem>", into = "Vec<CartLineItem>")]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from raw line items.
    ///
    /// Zero-quantity entries are dropped. Repeated ids are merged into the
    /// first occurrence, summing quantities and keeping its price.
    #[must_use]
    pub fn from_items(items: impl IntoIterator<Item = CartLineItem>) -> Self {
        let mut merged: Vec<CartLineItem> = Vec::new();
        for item in items {
            if item.quantity == 0 {
                continue;
            }
            if let Some(existing) = merged.iter_mut().find(|m| m.id == item.id) {
                existing.quantity = existing.quantity.saturating_add(item.quantity);
            } else {
                merged.push(item);
            }
        }
        Self { items: merged }
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Iterate over line items in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, CartLineItem> {
        self.items.iter()
    }

    /// Number of distinct line items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart holds no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Line item at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&CartLineItem> {
        self.items.get(index)
    }

    /// Position of the line item for `id`, if any.
    #[must_use]
    pub fn position(&self, id: ProductId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Sum of price times quantity over all line items.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// Sum of quantities over all line items.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Add `quantity` units of `product`.
    ///
    /// Increments the existing line item for the product or appends a new
    /// one. Returns `false` and leaves the cart untouched when `quantity` is
    /// zero.
    pub fn add(&mut self, product: &Product, quantity: u32) -> bool {
        if quantity == 0 {
            return false;
        }
        match self.items.iter_mut().find(|item| item.id == product.id) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(quantity);
            }
            None => self.items.push(CartLineItem::from_product(product, quantity)),
        }
        true
    }

    /// Remove and return the line item at `index`.
    pub fn remove(&mut self, index: usize) -> Option<CartLineItem> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Add `delta` to the quantity of the line item at `index`.
    ///
    /// A resulting quantity of zero or less removes the line item.
    pub fn update_quantity(&mut self, index: usize, delta: i64) -> QuantityUpdate {
        let Some(current) = self.items.get(index).map(|item| item.quantity) else {
            return QuantityUpdate::Missing;
        };
        let next = i64::from(current).saturating_add(delta);
        if next <= 0 {
            return self
                .remove(index)
                .map_or(QuantityUpdate::Missing, QuantityUpdate::Removed);
        }
        let quantity = u32::try_from(next).unwrap_or(u32::MAX);
        if let Some(item) = self.items.get_mut(index) {
            item.quantity = quantity;
        }
        QuantityUpdate::Updated(quantity)
    }

    /// Remove every line item.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl From<Vec<CartLineItem>> for Cart {
    fn from(items: Vec<CartLineItem>) -> Self {
        Self::from_items(items)
    }
}

impl From<Cart> for Vec<CartLineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartLineItem;
    type IntoIter = std::slice::Iter<'a, CartLineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
