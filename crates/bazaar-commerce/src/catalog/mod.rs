//! Product catalog module.
//!
//! Contains product, review and category records and the read-only
//! [`Catalog`] that serves them.

mod catalog;
mod category;
mod product;

pub use catalog::{Catalog, DEFAULT_FEATURED_LIMIT};
pub use category::{is_url_safe_slug, Category};
pub use product::{Product, Review, MAX_RATING};
