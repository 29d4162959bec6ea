//! The persisted cart store.

use std::fmt;

use bazaar_cache::{Cache, Store};

use crate::cart::{CartPricing, CartState, PricingRules};
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;

/// Slot key the cart is kept under unless configured otherwise.
pub const DEFAULT_CART_KEY: &str = "cart";

/// Handle returned by [`CartStore::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// The operation that produced a [`CartEvent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartChange {
    /// Units added to a product's entry.
    Added { product_id: ProductId, quantity: i64 },
    /// A product's quantity was set. No-op when the product was absent.
    QuantitySet { product_id: ProductId, quantity: i64 },
    /// A product's entry was removed, or was already absent.
    Removed { product_id: ProductId },
    /// Every entry was removed.
    Cleared,
}

/// Derived cart values sent to subscribers after each operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartEvent {
    pub change: CartChange,
    /// Total units in the cart.
    pub item_count: i64,
    pub subtotal: Money,
    /// Distinct products in the cart.
    pub unique_items: usize,
}

type Subscriber = Box<dyn FnMut(&CartEvent)>;

/// Owns a [`CartState`], keeps it in a durable slot, and tells subscribers
/// about every change.
///
/// Single writer, synchronous: each operation applies, persists and notifies
/// before returning. The slot is read once, in [`CartStore::open`].
///
/// # Example
///
/// ```rust
/// use bazaar_cache::{Cache, MemoryStore};
/// use bazaar_commerce::cart::{CartStore, DEFAULT_CART_KEY};
/// use bazaar_commerce::catalog::Catalog;
///
/// let catalog = Catalog::builtin().unwrap();
/// let mut cart = CartStore::open(Cache::new(MemoryStore::new()), DEFAULT_CART_KEY);
///
/// let headphones = catalog.product_by_id("p1").unwrap();
/// cart.add_to_cart(headphones, 2).unwrap();
/// assert_eq!(cart.item_count(), 2);
/// ```
pub struct CartStore<S: Store> {
    cache: Cache<S>,
    key: String,
    state: CartState,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl<S: Store> CartStore<S> {
    /// Open the cart kept under `key`.
    ///
    /// A missing slot yields an empty cart. So does an unreadable or
    /// unparseable one, after logging a warning; the failure never reaches
    /// the caller.
    pub fn open(cache: Cache<S>, key: impl Into<String>) -> Self {
        let key = key.into();
        let state = match cache.get::<CartState>(&key) {
            Ok(Some(state)) => {
                tracing::info!(
                    key = %key,
                    items = state.item_count(),
                    products = state.unique_item_count(),
                    "restored cart"
                );
                state
            }
            Ok(None) => {
                tracing::debug!(key = %key, "no saved cart, starting empty");
                CartState::new()
            }
            Err(error) => {
                tracing::warn!(key = %key, %error, "failed to restore cart, starting empty");
                CartState::new()
            }
        };

        Self {
            cache,
            key,
            state,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Add `quantity` units of `product` (see [`CartState::add`]).
    pub fn add_to_cart(&mut self, product: &Product, quantity: i64) -> Result<(), CommerceError> {
        self.state.add(product, quantity)?;
        tracing::debug!(product_id = %product.id, quantity, "added to cart");
        self.commit(CartChange::Added {
            product_id: product.id.clone(),
            quantity,
        });
        Ok(())
    }

    /// Set a product's quantity; zero or less removes it. Returns whether
    /// the product was in the cart.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> Result<bool, CommerceError> {
        let found = self.state.update_quantity(product_id, quantity)?;
        tracing::debug!(product_id, quantity, found, "updated cart quantity");
        let product_id = ProductId::new(product_id);
        let change = if quantity <= 0 {
            CartChange::Removed { product_id }
        } else {
            CartChange::QuantitySet {
                product_id,
                quantity,
            }
        };
        self.commit(change);
        Ok(found)
    }

    /// Add one unit of a product already in the cart. Returns whether it was
    /// in the cart.
    pub fn increment(&mut self, product_id: &str) -> Result<bool, CommerceError> {
        match self.state.get(product_id).map(|e| e.quantity) {
            Some(quantity) => self.update_quantity(product_id, quantity.saturating_add(1)),
            None => self.update_quantity(product_id, 1),
        }
    }

    /// Take one unit away, removing the entry when it reaches zero. Returns
    /// whether the product was in the cart.
    pub fn decrement(&mut self, product_id: &str) -> Result<bool, CommerceError> {
        let quantity = self.state.get(product_id).map_or(0, |e| e.quantity);
        self.update_quantity(product_id, quantity - 1)
    }

    /// Remove a product. Returns whether it was in the cart.
    pub fn remove_from_cart(&mut self, product_id: &str) -> bool {
        let removed = self.state.remove(product_id);
        tracing::debug!(product_id, removed, "removed from cart");
        self.commit(CartChange::Removed {
            product_id: ProductId::new(product_id),
        });
        removed
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.state.clear();
        tracing::debug!("cleared cart");
        self.commit(CartChange::Cleared);
    }

    /// Register an observer called after every operation.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&CartEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Drop an observer. Returns whether it was subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let len_before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() < len_before
    }

    /// Current contents.
    pub fn state(&self) -> &CartState {
        &self.state
    }

    pub fn item_count(&self) -> i64 {
        self.state.item_count()
    }

    pub fn subtotal(&self) -> Money {
        self.state.subtotal()
    }

    /// Order summary under `rules`.
    pub fn pricing(&self, rules: &PricingRules) -> Result<CartPricing, CommerceError> {
        CartPricing::calculate(&self.state, rules)
    }

    /// Slot key this cart persists under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Persist, then notify.
    fn commit(&mut self, change: CartChange) {
        self.persist();

        let event = CartEvent {
            change,
            item_count: self.state.item_count(),
            subtotal: self.state.subtotal(),
            unique_items: self.state.unique_item_count(),
        };
        for (_, subscriber) in &mut self.subscribers {
            subscriber(&event);
        }
    }

    /// The in-memory cart stays authoritative when the write fails.
    fn persist(&self) {
        if let Err(error) = self.cache.set(&self.key, &self.state) {
            tracing::warn!(key = %self.key, %error, "failed to persist cart");
        }
    }
}

impl<S: Store> fmt::Debug for CartStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("key", &self.key)
            .field("state", &self.state)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
