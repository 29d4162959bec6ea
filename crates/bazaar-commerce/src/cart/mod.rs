//! Shopping cart module.
//!
//! Contains the cart state reducer, the persisted store that owns it, and
//! order summary pricing.

mod cart;
mod pricing;
mod store;

pub use cart::{CartEntry, CartState, MAX_QUANTITY_PER_ITEM};
pub use pricing::{CartPricing, LineItemPricing, PricingRules};
pub use store::{CartChange, CartEvent, CartStore, SubscriptionId, DEFAULT_CART_KEY};
