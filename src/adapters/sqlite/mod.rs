//! SQLite adapter: Local-scoped implementation of `KeyValueStore`.
//!
//! Keeps one row per key in a `kv_store` table. This is where history from
//! earlier releases lives, so it doubles as the legacy migration source.
//!
//! # Mutex Behavior
//!
//! The connection is protected by a `Mutex`. A poisoned mutex surfaces as
//! `StorageError::LockPoisoned` instead of a panic.
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension};

use crate::ports::{KeyValueStore, StoreScope};

/// Error type for storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Storage lock poisoned")]
    LockPoisoned,
}

/// SQLite storage adapter.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the database at `path`.
    ///
    /// # Errors
    /// Returns error if database cannot be opened or initialized.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Create an in-memory SQLite database (for testing).
    ///
    /// # Errors
    /// Returns error if database cannot be created.
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<(), StorageError> {
        let conn = self.lock()?;

        conn.execute_batch(
            r"
            CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            ",
        )?;

        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn.lock().map_err(|_| StorageError::LockPoisoned)
    }

    /// Number of stored keys.
    ///
    /// # Errors
    /// Returns error if the query fails.
    pub fn count(&self) -> Result<usize, StorageError> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM kv_store", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }
}

impl KeyValueStore for SqliteStore {
    type Error = StorageError;

    fn scope(&self) -> StoreScope {
        StoreScope::Local
    }

    fn get_item(&self, key: &str) -> Result<Option<String>, Self::Error> {
        let conn = self.lock()?;

        let value = conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        let conn = self.lock()?;
        let now = chrono::Utc::now().to_rfc3339();

        conn.execute(
            r"
            INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            ",
            params![key, value, now],
        )?;

        tracing::debug!("Stored {} bytes under '{}'", value.len(), key);
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), Self::Error> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
        tracing::debug!("Removed '{}' from local store", key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_roundtrip() {
        let store = SqliteStore::in_memory().expect("Should create db");

        assert!(store.get_item("history").expect("Should read").is_none());

        store.set_item("history", "[]").expect("Should write");
        assert_eq!(
            store.get_item("history").expect("Should read").as_deref(),
            Some("[]")
        );

        store.set_item("history", "[1]").expect("Should overwrite");
        assert_eq!(
            store.get_item("history").expect("Should read").as_deref(),
            Some("[1]")
        );
        assert_eq!(store.count().expect("Should count"), 1);

        store.remove_item("history").expect("Should remove");
        assert!(store.get_item("history").expect("Should read").is_none());

        // Removing again is fine.
        store.remove_item("history").expect("Should remove");
    }

    #[test]
    fn test_remove_only_touches_its_key() {
        let store = SqliteStore::in_memory().expect("Should create db");
        store.set_item("a", "1").expect("Should write");
        store.set_item("b", "2").expect("Should write");

        store.remove_item("a").expect("Should remove");
        assert_eq!(store.count().expect("Should count"), 1);
        assert_eq!(store.get_item("b").expect("Should read").as_deref(), Some("2"));
        assert_eq!(store.scope(), StoreScope::Local);
    }

    #[test]
    fn test_persists_across_connections() {
        let path = std::env::temp_dir().join(format!(
            "bmitrack-sqlite-test-{}.db",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        {
            let store = SqliteStore::new(&path).expect("Should open db");
            store.set_item("history", "[]").expect("Should write");
        }

        let reopened = SqliteStore::new(&path).expect("Should reopen db");
        assert_eq!(
            reopened.get_item("history").expect("Should read").as_deref(),
            Some("[]")
        );

        drop(reopened);
        let _ = std::fs::remove_file(&path);
    }
}
