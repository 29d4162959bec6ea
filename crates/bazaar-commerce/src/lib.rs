//! Catalog, cart and pricing logic for the Bazaar storefront.
//!
//! - **Catalog**: products, reviews, categories, featured selection
//! - **Cart**: cart state, the persisted [`CartStore`](cart::CartStore), order summary
//! - **Search**: listing filters and sort orders
//!
//! # Example
//!
//! ```rust
//! use bazaar_cache::{Cache, MemoryStore};
//! use bazaar_commerce::prelude::*;
//!
//! let catalog = Catalog::builtin().unwrap();
//! let mut cart = CartStore::open(Cache::new(MemoryStore::new()), DEFAULT_CART_KEY);
//!
//! for product in catalog.featured_products(DEFAULT_FEATURED_LIMIT) {
//!     cart.add_to_cart(product, 1).unwrap();
//! }
//!
//! let pricing = cart.pricing(&PricingRules::default()).unwrap();
//! println!("Total: {}", pricing.grand_total);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod search;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Catalog, Category, Product, Review, DEFAULT_FEATURED_LIMIT};

    // Cart
    pub use crate::cart::{
        CartChange, CartEntry, CartEvent, CartPricing, CartState, CartStore, LineItemPricing,
        PricingRules, SubscriptionId, DEFAULT_CART_KEY, MAX_QUANTITY_PER_ITEM,
    };

    // Search
    pub use crate::search::{Filter, ProductQuery, SortOption};
}
