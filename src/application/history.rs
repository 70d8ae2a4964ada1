//! History service: Loads, migrates and persists saved results.
//!
//! The current history lives in the session store. Values found in the
//! legacy (local) store are migrated once: the canonical array is written to
//! the session store and the legacy entry is removed.

use std::sync::Arc;

use crate::adapters::codec;
use crate::adapters::StorageError;
use crate::domain::{BmiResult, History, HistoryRecord};
use crate::ports::{KeyValueStore, StoreScope};
use crate::BmiError;

/// Key the history is stored under in both stores.
pub const HISTORY_STORAGE_KEY: &str = "history";

/// Raw value found by `load`, and where it came from.
struct StoredValue {
    raw: Option<String>,
    scope: StoreScope,
    from_session: bool,
    legacy_present: bool,
}

/// Service owning the in-memory history and its persistence.
pub struct HistoryService<S, L>
where
    S: KeyValueStore,
    L: KeyValueStore,
{
    session: Arc<S>,
    legacy: Option<Arc<L>>,
    key: String,
    history: History,
    loaded: bool,
}

impl<S, L> HistoryService<S, L>
where
    S: KeyValueStore,
    L: KeyValueStore,
    S::Error: Into<StorageError>,
    L::Error: Into<StorageError>,
{
    /// Create a service over `session`, migrating from `legacy` if given.
    pub fn new(session: Arc<S>, legacy: Option<Arc<L>>, max_len: usize) -> Self {
        Self {
            session,
            legacy,
            key: HISTORY_STORAGE_KEY.to_string(),
            history: History::new(max_len),
            loaded: false,
        }
    }

    /// Use a different storage key.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Load history from storage.
    ///
    /// Never fails: unreadable or malformed data is logged and the history
    /// starts empty. Malformed session data is overwritten with the empty
    /// list; a malformed legacy entry is left in place. A successful load
    /// writes the canonical form back to the session store and then drops
    /// any legacy entry.
    pub fn load(&mut self) -> &[HistoryRecord] {
        self.loaded = true;

        let stored = match self.read_stored() {
            Ok(stored) => stored,
            Err(e) => {
                tracing::error!("Failed to read history, starting empty: {}", e);
                self.history.clear();
                return self.history.records();
            }
        };

        let records = match stored.raw.as_deref().map(codec::decode).transpose() {
            Ok(records) => records.unwrap_or_default(),
            Err(e) => {
                tracing::error!(
                    "Malformed history in {} store, starting empty: {}",
                    stored.scope,
                    e
                );
                self.history.clear();
                if stored.from_session {
                    if let Err(e) = self.save() {
                        tracing::warn!("Failed to reset malformed history: {}", e);
                    }
                }
                return self.history.records();
            }
        };

        tracing::debug!("Decoded {} stored history records", records.len());
        self.history.replace(records);

        if let Err(e) = self.save() {
            tracing::warn!("Failed to write canonical history: {}", e);
            return self.history.records();
        }

        if stored.legacy_present {
            self.drop_legacy();
        }

        self.history.records()
    }

    /// Read the stored value. The session value wins over the legacy one.
    fn read_stored(&self) -> Result<StoredValue, BmiError> {
        let session_raw = self
            .session
            .get_item(&self.key)
            .map_err(|e| BmiError::Storage(e.into()))?;

        let legacy_raw = match &self.legacy {
            Some(store) => store
                .get_item(&self.key)
                .map_err(|e| BmiError::Storage(e.into()))?
                .map(|raw| (store.scope(), raw)),
            None => None,
        };

        let legacy_present = legacy_raw.is_some();
        let from_session = session_raw.is_some();
        let (scope, raw) = match (session_raw, legacy_raw) {
            (Some(raw), _) => (self.session.scope(), Some(raw)),
            (None, Some((scope, raw))) => (scope, Some(raw)),
            (None, None) => (self.session.scope(), None),
        };

        Ok(StoredValue {
            raw,
            scope,
            from_session,
            legacy_present,
        })
    }

    fn drop_legacy(&self) {
        let Some(store) = &self.legacy else {
            return;
        };

        match store.remove_item(&self.key) {
            Ok(()) => tracing::info!(
                "Migrated {} history records from {} store to {} store",
                self.history.len(),
                store.scope(),
                self.session.scope()
            ),
            Err(e) => {
                let e: StorageError = e.into();
                tracing::warn!("Failed to remove legacy history entry: {}", e);
            }
        }
    }

    fn ensure_loaded(&mut self) {
        if !self.loaded {
            self.load();
        }
    }

    /// Persist the current history to the session store.
    ///
    /// # Errors
    /// Returns error if encoding or the store write fails.
    pub fn save(&self) -> Result<(), BmiError> {
        let encoded = codec::encode(self.history.records())?;
        self.session
            .set_item(&self.key, &encoded)
            .map_err(|e| BmiError::Storage(e.into()))
    }

    /// Save `result` as the newest record.
    ///
    /// The record is kept in memory even if persisting fails.
    ///
    /// # Errors
    /// Returns error if persisting fails.
    pub fn add(&mut self, result: BmiResult) -> Result<HistoryRecord, BmiError> {
        self.ensure_loaded();

        let record = HistoryRecord::new(result);
        self.history.add(record.clone());
        self.save()?;

        tracing::debug!("Saved history record {}", record.id);
        Ok(record)
    }

    /// Delete the record with `id`. Unknown ids leave history untouched.
    ///
    /// # Errors
    /// Returns error if persisting fails.
    pub fn remove(&mut self, id: &str) -> Result<bool, BmiError> {
        self.ensure_loaded();

        if !self.history.remove(id) {
            return Ok(false);
        }

        self.save()?;
        Ok(true)
    }

    /// Delete every record and the stored entry.
    ///
    /// # Errors
    /// Returns error if the store removal fails.
    pub fn clear(&mut self) -> Result<(), BmiError> {
        self.ensure_loaded();

        self.history.clear();
        self.session
            .remove_item(&self.key)
            .map_err(|e| BmiError::Storage(e.into()))?;

        tracing::info!("Cleared history");
        Ok(())
    }

    /// Records, newest first.
    #[must_use]
    pub fn records(&self) -> &[HistoryRecord] {
        self.history.records()
    }

    #[must_use]
    pub fn max_len(&self) -> usize {
        self.history.max_len()
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
}
