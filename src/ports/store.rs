//! Storage port: Trait for string key-value stores.
//!
//! Mirrors the browser storage contract the history was originally kept in:
//! one string value per string key, no transactions.

/// Lifetime scope of a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreScope {
    /// Lives for the current process only.
    Session,
    /// Persists across runs.
    Local,
}

impl std::fmt::Display for StoreScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Session => write!(f, "session"),
            Self::Local => write!(f, "local"),
        }
    }
}

/// Trait for key-value string storage.
pub trait KeyValueStore: Send + Sync {
    /// Error type for storage operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Scope of this store, used for logging.
    fn scope(&self) -> StoreScope;

    /// Read the value stored under `key`.
    ///
    /// # Returns
    /// `None` if the key is absent.
    ///
    /// # Errors
    /// Returns error if the backend fails.
    fn get_item(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns error if the backend fails.
    fn set_item(&self, key: &str, value: &str) -> Result<(), Self::Error>;

    /// Remove `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    /// Returns error if the backend fails.
    fn remove_item(&self, key: &str) -> Result<(), Self::Error>;
}
