//! Product search module.
//!
//! Filtering and sorting for the product listing.

mod filter;
mod query;

pub use filter::Filter;
pub use query::{ProductQuery, SortOption};
