//! Type-safe durable key-value slots for the Bazaar storefront.
//!
//! Provides a small API for keeping JSON-serialized values under named keys,
//! with interchangeable backends:
//!
//! - [`MemoryStore`]: process-local, for tests and ephemeral sessions
//! - [`FileStore`]: one JSON file per key under a data directory
//!
//! # Example
//!
//! ```rust
//! use bazaar_cache::{Cache, MemoryStore};
//!
//! let cache = Cache::new(MemoryStore::new());
//! cache.set("greeting", &vec!["hello".to_string()]).unwrap();
//!
//! let value: Option<Vec<String>> = cache.get("greeting").unwrap();
//! assert_eq!(value, Some(vec!["hello".to_string()]));
//! ```

mod error;
mod kv;
mod store;

pub use error::CacheError;
pub use kv::Cache;
pub use store::{FileStore, MemoryStore, Store};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, MemoryStore, Store};
}
