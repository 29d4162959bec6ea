//! Key-value cache wrapper with automatic serialization.

use crate::{CacheError, Store};
use serde::{de::DeserializeOwned, Serialize};

/// Type-safe cache over a raw byte [`Store`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
#[derive(Debug, Clone)]
pub struct Cache<S> {
    store: S,
}

impl<S: Store> Cache<S> {
    /// Wrap a store backend.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist, and
    /// [`CacheError::SerializeError`] if the stored bytes do not decode as `T`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let entries: Option<Vec<CartEntry>> = cache.get("cart")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.read(key)? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a value in the cache, replacing any previous value.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.store.write(key, &bytes)
    }

    /// Delete a value from the cache. Deleting a missing key is not an error.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.remove(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.store.read(key)?.is_some())
    }

    /// Get all keys in the cache, sorted.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        let mut keys = self.store.keys()?;
        keys.sort();
        Ok(keys)
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Line {
        sku: String,
        quantity: i64,
    }

    #[test]
    fn test_set_then_get() {
        let cache = Cache::new(MemoryStore::new());
        let lines = vec![Line {
            sku: "p1".into(),
            quantity: 2,
        }];
        cache.set("cart", &lines).unwrap();

        let loaded: Option<Vec<Line>> = cache.get("cart").unwrap();
        assert_eq!(loaded, Some(lines));
    }

    #[test]
    fn test_missing_key_is_none() {
        let cache = Cache::new(MemoryStore::new());
        let loaded: Option<Vec<Line>> = cache.get("cart").unwrap();
        assert!(loaded.is_none());
        assert!(!cache.exists("cart").unwrap());
    }

    #[test]
    fn test_corrupt_value_is_serialize_error() {
        let store = MemoryStore::new();
        store.write("cart", b"{not json").unwrap();
        let cache = Cache::new(store);

        let result: Result<Option<Vec<Line>>, _> = cache.get("cart");
        assert!(matches!(result, Err(CacheError::SerializeError(_))));
    }

    #[test]
    fn test_incompatible_shape_is_serialize_error() {
        let cache = Cache::new(MemoryStore::new());
        cache.set("cart", &serde_json::json!({"items": 3})).unwrap();

        let result: Result<Option<Vec<Line>>, _> = cache.get("cart");
        assert!(result.is_err());
    }

    #[test]
    fn test_delete_and_keys() {
        let cache = Cache::new(MemoryStore::new());
        cache.set("b", &1).unwrap();
        cache.set("a", &2).unwrap();
        assert_eq!(cache.keys().unwrap(), vec!["a", "b"]);

        cache.delete("a").unwrap();
        cache.delete("missing").unwrap();
        assert_eq!(cache.keys().unwrap(), vec!["b"]);
    }
}
