//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront operations.
///
/// Lookups that miss (unknown product id, unknown category slug) are not
/// errors; they return `None`.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Two catalog records share an identifier that must be unique.
    #[error("Duplicate {kind}: {id}")]
    Duplicate { kind: &'static str, id: String },

    /// A product names a category that is not in the catalog.
    #[error("Product {product_id} references unknown category {category}")]
    UnknownCategory { product_id: String, category: String },

    /// Catalog data violates a record invariant.
    #[error("Invalid catalog data: {0}")]
    InvalidCatalog(String),

    /// Cache error.
    #[error("Cache error: {0}")]
    CacheError(#[from] bazaar_cache::CacheError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Reading catalog data from disk failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
