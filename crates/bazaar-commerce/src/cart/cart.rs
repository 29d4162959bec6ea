//! Cart state and entry types.

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Deserializer, Serialize};

/// Maximum quantity allowed per entry.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// The contents of a cart: an ordered list of entries, at most one per
/// product id, every quantity in `1..=MAX_QUANTITY_PER_ITEM`, every price in
/// one currency.
///
/// Serializes as a bare JSON array of `{"product": ..., "quantity": n}`.
/// Deserializing normalizes the input (see [`CartState::from_entries`]), so a
/// restored cart upholds the same invariants as one built through [`add`].
///
/// [`add`]: CartState::add
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CartState {
    entries: Vec<CartEntry>,
}

impl CartState {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from untrusted entries.
    ///
    /// Entries with a non-positive quantity are dropped, entries sharing a
    /// product id are merged (keeping the first snapshot), quantities are
    /// capped at [`MAX_QUANTITY_PER_ITEM`], and entries priced in a currency
    /// other than the first kept entry's are dropped.
    pub fn from_entries(entries: impl IntoIterator<Item = CartEntry>) -> Self {
        let mut state = Self::new();
        for entry in entries {
            state.merge_entry(entry);
        }
        state
    }

    /// Add `quantity` units of `product`.
    ///
    /// Increments the existing entry for the product, or appends a new entry
    /// holding a snapshot of `product`. Rejected requests leave the cart
    /// untouched.
    pub fn add(&mut self, product: &Product, quantity: i64) -> Result<(), CommerceError> {
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        if let Some(currency) = self.currency() {
            if product.price.currency != currency {
                return Err(CommerceError::CurrencyMismatch {
                    expected: currency.code().to_string(),
                    got: product.price.currency.code().to_string(),
                });
            }
        }

        if let Some(existing) = self.entry_mut(product.id.as_str()) {
            let new_quantity = existing.quantity.saturating_add(quantity);
            if new_quantity > MAX_QUANTITY_PER_ITEM {
                return Err(CommerceError::QuantityExceedsLimit(
                    new_quantity,
                    MAX_QUANTITY_PER_ITEM,
                ));
            }
            existing.quantity = new_quantity;
            return Ok(());
        }

        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }
        self.entries.push(CartEntry::new(product.clone(), quantity));
        Ok(())
    }

    /// Set an entry's quantity.
    ///
    /// A quantity of zero or less removes the entry. Returns whether an entry
    /// for `product_id` existed.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> Result<bool, CommerceError> {
        if quantity <= 0 {
            return Ok(self.remove(product_id));
        }
        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }
        match self.entry_mut(product_id) {
            Some(entry) => {
                entry.quantity = quantity;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove the entry for `product_id`. Returns whether one was removed.
    pub fn remove(&mut self, product_id: &str) -> bool {
        let len_before = self.entries.len();
        self.entries.retain(|e| e.product.id != *product_id);
        self.entries.len() < len_before
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Fold another cart into this one.
    ///
    /// Quantities for products in both carts add up, capped at
    /// [`MAX_QUANTITY_PER_ITEM`]; other entries append in order.
    pub fn merge(&mut self, other: CartState) {
        for entry in other.entries {
            self.merge_entry(entry);
        }
    }

    fn merge_entry(&mut self, entry: CartEntry) {
        if entry.quantity <= 0 {
            tracing::debug!(
                product_id = %entry.product.id,
                quantity = entry.quantity,
                "dropping non-positive cart entry"
            );
            return;
        }
        if let Some(currency) = self.currency() {
            if entry.product.price.currency != currency {
                tracing::debug!(
                    product_id = %entry.product.id,
                    "dropping cart entry in foreign currency"
                );
                return;
            }
        }
        if let Some(existing) = self.entry_mut(entry.product.id.as_str()) {
            existing.quantity = existing
                .quantity
                .saturating_add(entry.quantity)
                .min(MAX_QUANTITY_PER_ITEM);
        } else {
            let quantity = entry.quantity.min(MAX_QUANTITY_PER_ITEM);
            self.entries.push(CartEntry { quantity, ..entry });
        }
    }

    /// Total units across all entries.
    pub fn item_count(&self) -> i64 {
        self.entries.iter().map(|e| e.quantity).sum()
    }

    /// Sum of snapshot price times quantity. Zero in the default currency for
    /// an empty cart.
    pub fn subtotal(&self) -> Money {
        let currency = self.currency().unwrap_or_default();
        Money::saturating_sum(self.entries.iter().map(CartEntry::line_total), currency)
    }

    /// Number of distinct products.
    pub fn unique_item_count(&self) -> usize {
        self.entries.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Get the entry for a product.
    pub fn get(&self, product_id: &str) -> Option<&CartEntry> {
        self.entries.iter().find(|e| e.product.id == *product_id)
    }

    /// Currency of the cart's prices, `None` while empty.
    pub fn currency(&self) -> Option<Currency> {
        self.entries.first().map(|e| e.product.price.currency)
    }

    fn entry_mut(&mut self, product_id: &str) -> Option<&mut CartEntry> {
        self.entries.iter_mut().find(|e| e.product.id == *product_id)
    }
}

impl<'de> Deserialize<'de> for CartState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<CartEntry>::deserialize(deserializer).map(CartState::from_entries)
    }
}

/// One product in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartEntry {
    /// Copy of the product taken when it was first added. Later catalog
    /// changes do not reach it.
    pub product: Product,
    /// Units in the cart.
    pub quantity: i64,
}

impl CartEntry {
    pub fn new(product: Product, quantity: i64) -> Self {
        Self { product, quantity }
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product.id
    }

    /// Snapshot price times quantity.
    pub fn line_total(&self) -> Money {
        self.product.price.saturating_multiply(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd(cents: i64) -> Money {
        Money::new(cents, Currency::USD)
    }

    fn product(id: &str, cents: i64) -> Product {
        Product::new(id, format!("Product {id}"), usd(cents), "misc")
    }

    fn ids(cart: &CartState) -> Vec<&str> {
        cart.entries().iter().map(|e| e.product.id.as_str()).collect()
    }

    #[test]
    fn test_cart_creation() {
        let cart = CartState::new();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.subtotal(), Money::zero(Currency::INR));
        assert_eq!(cart.currency(), None);
    }

    #[test]
    fn test_add_same_item_increases_quantity() {
        let mut cart = CartState::new();
        let p1 = product("p1", 1000);
        cart.add(&p1, 1).unwrap();
        cart.add(&p1, 2).unwrap();

        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.get("p1").unwrap().quantity, 3);
    }

    #[test]
    fn test_new_entries_append() {
        let mut cart = CartState::new();
        cart.add(&product("b", 100), 1).unwrap();
        cart.add(&product("a", 100), 1).unwrap();
        cart.add(&product("b", 100), 1).unwrap();
        assert_eq!(ids(&cart), ["b", "a"]);
    }

    #[test]
    fn test_invalid_quantity_rejected() {
        let mut cart = CartState::new();
        for quantity in [0, -3] {
            let result = cart.add(&product("p1", 1000), quantity);
            assert!(matches!(result, Err(CommerceError::InvalidQuantity(q)) if q == quantity));
        }
        assert!(cart.is_empty());
    }

    #[test]
    fn test_quantity_limit() {
        let mut cart = CartState::new();
        let p1 = product("p1", 1000);
        assert!(cart.add(&p1, MAX_QUANTITY_PER_ITEM + 1).is_err());
        assert!(cart.is_empty());

        cart.add(&p1, MAX_QUANTITY_PER_ITEM).unwrap();
        assert!(matches!(
            cart.add(&p1, 1),
            Err(CommerceError::QuantityExceedsLimit(..))
        ));
        assert_eq!(cart.item_count(), MAX_QUANTITY_PER_ITEM);

        assert!(cart.update_quantity("p1", MAX_QUANTITY_PER_ITEM + 1).is_err());
    }

    #[test]
    fn test_foreign_currency_rejected() {
        let mut cart = CartState::new();
        cart.add(&product("p1", 1000), 1).unwrap();

        let euro = Product::new("e1", "Euro thing", Money::new(500, Currency::EUR), "misc");
        assert!(matches!(
            cart.add(&euro, 1),
            Err(CommerceError::CurrencyMismatch { .. })
        ));
        assert_eq!(cart.unique_item_count(), 1);
    }

    #[test]
    fn test_update_quantity_is_absolute() {
        let mut cart = CartState::new();
        cart.add(&product("p1", 1000), 4).unwrap();

        assert!(cart.update_quantity("p1", 2).unwrap());
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_update_non_positive_removes() {
        let mut cart = CartState::new();
        cart.add(&product("p1", 1000), 1).unwrap();
        cart.add(&product("p2", 1000), 1).unwrap();

        assert!(cart.update_quantity("p1", 0).unwrap());
        assert!(cart.update_quantity("p2", -5).unwrap());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_absent_is_noop() {
        let mut cart = CartState::new();
        cart.add(&product("p1", 1000), 1).unwrap();
        let before = cart.clone();

        assert!(!cart.update_quantity("zzz", 5).unwrap());
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_item() {
        let mut cart = CartState::new();
        cart.add(&product("p1", 1000), 1).unwrap();
        let before = cart.clone();

        assert!(!cart.remove("zzz"));
        assert_eq!(cart, before);

        assert!(cart.remove("p1"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_subtotal_uses_snapshot_price() {
        let mut cart = CartState::new();
        let mut p1 = product("p1", 1000);
        cart.add(&p1, 2).unwrap();

        // A later price change in the catalog reaches neither the snapshot
        // nor a subsequent add of the same product.
        p1.price = usd(5000);
        cart.add(&p1, 1).unwrap();

        assert_eq!(cart.get("p1").unwrap().product.price, usd(1000));
        assert_eq!(cart.subtotal(), usd(3000));
    }

    #[test]
    fn test_pricing_sums() {
        let mut cart = CartState::new();
        cart.add(&product("a", 1000), 2).unwrap();
        cart.add(&product("b", 2000), 1).unwrap();

        assert_eq!(cart.subtotal(), usd(4000));
        assert_eq!(cart.get("a").unwrap().line_total(), usd(2000));
    }

    #[test]
    fn test_merge_adds_and_caps() {
        let mut mine = CartState::new();
        mine.add(&product("a", 100), MAX_QUANTITY_PER_ITEM - 1).unwrap();

        let mut theirs = CartState::new();
        theirs.add(&product("a", 100), 5).unwrap();
        theirs.add(&product("b", 100), 2).unwrap();

        mine.merge(theirs);
        assert_eq!(ids(&mine), ["a", "b"]);
        assert_eq!(mine.get("a").unwrap().quantity, MAX_QUANTITY_PER_ITEM);
        assert_eq!(mine.get("b").unwrap().quantity, 2);
    }

    #[test]
    fn test_from_entries_normalizes() {
        let cart = CartState::from_entries([
            CartEntry::new(product("a", 100), 2),
            CartEntry::new(product("b", 100), 0),
            CartEntry::new(product("a", 999), 3),
            CartEntry::new(product("c", 100), -1),
            CartEntry::new(
                Product::new("e", "Euro", Money::new(100, Currency::EUR), "misc"),
                1,
            ),
        ]);

        assert_eq!(ids(&cart), ["a"]);
        let entry = cart.get("a").unwrap();
        assert_eq!(entry.quantity, 5);
        assert_eq!(entry.product.price, usd(100));
    }

    #[test]
    fn test_serialized_shape_is_bare_array() {
        let mut cart = CartState::new();
        cart.add(&product("p1", 1000), 2).unwrap();

        let value = serde_json::to_value(&cart).unwrap();
        let entries = value.as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["quantity"], 2);
        assert_eq!(entries[0]["product"]["id"], "p1");

        let back: CartState = serde_json::from_value(value).unwrap();
        assert_eq!(back, cart);
    }

    #[test]
    fn test_deserialize_normalizes_duplicates() {
        let mut cart = CartState::new();
        cart.add(&product("p1", 1000), 2).unwrap();
        let entry = serde_json::to_value(&cart.entries()[0]).unwrap();

        let json = serde_json::Value::Array(vec![entry.clone(), entry]);
        let restored: CartState = serde_json::from_value(json).unwrap();
        assert_eq!(restored.unique_item_count(), 1);
        assert_eq!(restored.item_count(), 4);
    }
}
