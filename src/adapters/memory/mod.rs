//! In-memory adapter: Session-scoped implementation of `KeyValueStore`.
//!
//! Contents live as long as the process, which is the lifetime of a
//! calculator session.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use super::StorageError;
use crate::ports::{KeyValueStore, StoreScope};

/// Session store backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<String, String>>,
    scope: Option<StoreScope>,
}

impl MemoryStore {
    /// Create an empty session-scoped store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store reporting `scope`.
    ///
    /// Used in tests to stand in for the local store.
    #[must_use]
    pub fn with_scope(scope: StoreScope) -> Self {
        Self {
            items: Mutex::new(HashMap::new()),
            scope: Some(scope),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.items.lock().map_err(|_| StorageError::LockPoisoned)
    }

    /// Number of stored keys.
    ///
    /// # Errors
    /// Returns error if the lock is poisoned.
    pub fn len(&self) -> Result<usize, StorageError> {
        Ok(self.lock()?.len())
    }

    /// Whether the store holds no keys.
    ///
    /// # Errors
    /// Returns error if the lock is poisoned.
    pub fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.lock()?.is_empty())
    }
}

impl KeyValueStore for MemoryStore {
    type Error = StorageError;

    fn scope(&self) -> StoreScope {
        self.scope.unwrap_or(StoreScope::Session)
    }

    fn get_item(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), Self::Error> {
        self.lock()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.scope(), StoreScope::Session);
        assert!(store.get_item("history").expect("Should read").is_none());

        store.set_item("history", "[]").expect("Should write");
        assert_eq!(
            store.get_item("history").expect("Should read").as_deref(),
            Some("[]")
        );

        store.remove_item("history").expect("Should remove");
        assert!(store.is_empty().expect("Should check"));
    }

    #[test]
    fn test_remove_only_touches_its_key_and_scope_override() {
        let store = MemoryStore::with_scope(StoreScope::Local);
        store.set_item("a", "1").expect("Should write");
        store.set_item("b", "2").expect("Should write");
        assert_eq!(store.len().expect("Should count"), 2);

        store.remove_item("a").expect("Should remove");
        assert_eq!(store.len().expect("Should count"), 1);
        assert_eq!(store.get_item("b").expect("Should read").as_deref(), Some("2"));
        assert_eq!(store.scope(), StoreScope::Local);
    }
}
