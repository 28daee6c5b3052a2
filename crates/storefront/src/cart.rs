//! The cart store.
//!
//! [`CartStore`] owns the cart for one storefront page. Every mutation
//! follows the same sequence: apply the change to the in-memory [`Cart`],
//! write a snapshot to storage, then notify subscribers. A failed write is
//! logged and the in-memory change stands.
//!
//! # Example
//!
//! ```
//! use storecart_core::{Catalog, Price, Product, ProductId};
//! use storecart_storefront::cart::CartStore;
//! use storecart_storefront::storage::MemoryStorage;
//!
//! let catalog = Catalog::new(vec![Product::new(
//!     ProductId::new(1),
//!     "Remera",
//!     Price::from_cents(1000),
//!     "remera.jpg",
//! )])
//! .unwrap();
//!
//! let mut store = CartStore::open(MemoryStorage::new(), catalog);
//! store.subscribe(|event, cart| println!("{event:?}: {} items", cart.count()));
//!
//! store.add(ProductId::new(1), 2);
//! assert_eq!(store.total(), "20,00");
//!
//! store.update_quantity(0, -2);
//! assert!(store.cart().is_empty());
//! ```

use std::fmt;

use storecart_core::{Cart, CartLineItem, Catalog, Price, PriceFormat, ProductId, QuantityUpdate};
use tracing::{debug, instrument, warn};

use crate::checkout::{self, CheckoutError, CheckoutForm, CheckoutLink, CheckoutSettings};
use crate::snapshot::{self, DEFAULT_STORAGE_KEY};
use crate::storage::SnapshotStorage;

/// What a mutation did, passed to subscribers along with the updated cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// Units of a product were added.
    Added {
        /// Product added.
        product_id: ProductId,
        /// Units added by this call.
        quantity: u32,
    },
    /// A line item was removed, directly or by dropping to zero units.
    Removed {
        /// Position the line item had.
        index: usize,
        /// The removed line item.
        item: CartLineItem,
    },
    /// A line item's quantity changed and it is still in the cart.
    QuantityChanged {
        /// Position of the line item.
        index: usize,
        /// New quantity.
        quantity: u32,
    },
    /// The cart was emptied.
    Cleared,
}

/// Badge state for the cart icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartBadge {
    /// Total units in the cart.
    pub count: u64,
    /// Whether the badge should be shown at all.
    pub visible: bool,
}

impl CartBadge {
    /// Badge for a cart holding `count` units; hidden when empty.
    #[must_use]
    pub const fn new(count: u64) -> Self {
        Self {
            count,
            visible: count > 0,
        }
    }
}

/// Handle returned by [`CartStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&CartEvent, &Cart)>;

/// Options for [`CartStore::open_with`].
#[derive(Debug, Clone)]
pub struct CartStoreOptions {
    /// Key the snapshot is stored under.
    pub storage_key: String,
    /// Format used by [`CartStore::total`] and checkout summaries.
    pub price_format: PriceFormat,
}

impl Default for CartStoreOptions {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            price_format: PriceFormat::default(),
        }
    }
}

/// Cart state for one storefront page, with persistence and change
/// notifications.
pub struct CartStore<S> {
    storage: S,
    storage_key: String,
    catalog: Catalog,
    price_format: PriceFormat,
    cart: Cart,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl<S: SnapshotStorage> CartStore<S> {
    /// Open a store with the default storage key and price format, loading
    /// any stored cart.
    pub fn open(storage: S, catalog: Catalog) -> Self {
        Self::open_with(storage, catalog, CartStoreOptions::default())
    }

    /// Open a store with explicit options, loading any stored cart.
    pub fn open_with(storage: S, catalog: Catalog, options: CartStoreOptions) -> Self {
        let cart = snapshot::load_cart(&storage, &options.storage_key);
        Self {
            storage,
            storage_key: options.storage_key,
            catalog,
            price_format: options.price_format,
            cart,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Reload the cart from storage, discarding the in-memory state.
    ///
    /// Missing or unreadable snapshots yield an empty cart. Subscribers are
    /// not notified.
    pub fn load(&mut self) -> &Cart {
        self.cart = snapshot::load_cart(&self.storage, &self.storage_key);
        &self.cart
    }

    /// Current cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Catalog products can be added from.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Storage backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Key the snapshot is stored under.
    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Format used for totals and checkout summaries.
    #[must_use]
    pub const fn price_format(&self) -> PriceFormat {
        self.price_format
    }

    /// Add `quantity` units of a catalog product.
    ///
    /// Unknown products and non-positive quantities are ignored. Returns
    /// whether the cart changed.
    #[instrument(skip(self), fields(key = %self.storage_key))]
    pub fn add(&mut self, product_id: ProductId, quantity: i64) -> bool {
        if quantity <= 0 {
            debug!("Ignoring non-positive quantity");
            return false;
        }
        let Some(product) = self.catalog.find(product_id) else {
            debug!("Ignoring product not in catalog");
            return false;
        };
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if !self.cart.add(product, quantity) {
            return false;
        }
        self.commit(&CartEvent::Added {
            product_id,
            quantity,
        });
        true
    }

    /// Add a single unit of a catalog product.
    pub fn add_one(&mut self, product_id: ProductId) -> bool {
        self.add(product_id, 1)
    }

    /// Remove the line item at `index`.
    ///
    /// An out-of-range index changes nothing and notifies nobody.
    #[instrument(skip(self), fields(key = %self.storage_key))]
    pub fn remove(&mut self, index: usize) -> Option<CartLineItem> {
        let Some(item) = self.cart.remove(index) else {
            debug!("No line item at index");
            return None;
        };
        self.commit(&CartEvent::Removed {
            index,
            item: item.clone(),
        });
        Some(item)
    }

    /// Add `delta` to the quantity of the line item at `index`.
    ///
    /// Dropping to zero or below removes the line item. An out-of-range
    /// index changes nothing and notifies nobody.
    #[instrument(skip(self), fields(key = %self.storage_key))]
    pub fn update_quantity(&mut self, index: usize, delta: i64) -> QuantityUpdate {
        let outcome = self.cart.update_quantity(index, delta);
        match &outcome {
            QuantityUpdate::Updated(quantity) => self.commit(&CartEvent::QuantityChanged {
                index,
                quantity: *quantity,
            }),
            QuantityUpdate::Removed(item) => self.commit(&CartEvent::Removed {
                index,
                item: item.clone(),
            }),
            QuantityUpdate::Missing => debug!("No line item at index"),
        }
        outcome
    }

    /// Empty the cart.
    #[instrument(skip(self), fields(key = %self.storage_key))]
    pub fn clear(&mut self) {
        self.cart.clear();
        self.commit(&CartEvent::Cleared);
    }

    /// Exact sum of price times quantity.
    #[must_use]
    pub fn total_amount(&self) -> Price {
        self.cart.total()
    }

    /// Cart total with two decimals in the store's locale (`1.234,50`).
    #[must_use]
    pub fn total(&self) -> String {
        self.price_format.format(self.cart.total())
    }

    /// Total units in the cart.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.cart.count()
    }

    /// Badge state for the current cart.
    #[must_use]
    pub fn badge(&self) -> CartBadge {
        CartBadge::new(self.count())
    }

    /// Register a callback run after every mutation.
    ///
    /// Callbacks run synchronously, in registration order.
    pub fn subscribe(&mut self, callback: impl FnMut(&CartEvent, &Cart) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Drop a subscription. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }

    /// Build the checkout deep link for the current cart.
    ///
    /// Leaves the cart untouched whether or not the preconditions hold.
    ///
    /// # Errors
    ///
    /// Returns the first failed precondition: empty cart, no payment method,
    /// or blank shipping address.
    pub fn checkout(
        &self,
        form: &CheckoutForm,
        settings: &CheckoutSettings,
    ) -> Result<CheckoutLink, CheckoutError> {
        checkout::build_checkout(&self.cart, form, &self.price_format, settings)
    }

    fn commit(&mut self, event: &CartEvent) {
        if let Err(e) = snapshot::save_cart(&mut self.storage, &self.storage_key, &self.cart) {
            warn!(key = %self.storage_key, error = %e, "Failed to persist cart");
        }
        debug!(?event, items = self.cart.len(), "Cart updated");
        for (_, subscriber) in &mut self.subscribers {
            subscriber(event, &self.cart);
        }
    }
}

impl<S> fmt::Debug for CartStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("storage_key", &self.storage_key)
            .field("catalog_len", &self.catalog.len())
            .field("cart", &self.cart)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}
