//! Calculator session: current result plus the history it can be saved to.

use crate::adapters::StorageError;
use crate::domain::{self, BmiResult, HistoryRecord};
use crate::ports::KeyValueStore;
use crate::BmiError;

use super::history::HistoryService;

/// Component-local state of one calculator session.
///
/// Holds the most recent result; persistence goes through the owned
/// [`HistoryService`].
pub struct Calculator<S, L>
where
    S: KeyValueStore,
    L: KeyValueStore,
{
    result: Option<BmiResult>,
    history: HistoryService<S, L>,
}

impl<S, L> Calculator<S, L>
where
    S: KeyValueStore,
    L: KeyValueStore,
    S::Error: Into<StorageError>,
    L::Error: Into<StorageError>,
{
    pub fn new(history: HistoryService<S, L>) -> Self {
        Self {
            result: None,
            history,
        }
    }

    /// Load saved history (initial lifecycle step).
    pub fn load_history(&mut self) -> &[HistoryRecord] {
        self.history.load()
    }

    /// Compute from the given inputs, replacing the current result.
    ///
    /// Invalid input clears any previously shown result.
    pub fn calculate(&mut self, height: &str, weight: &str) -> Option<&BmiResult> {
        self.result = domain::compute(height, weight);

        match &self.result {
            Some(result) => tracing::debug!("Calculated BMI in band {}", result.band()),
            None => tracing::debug!("Input rejected, result cleared"),
        }

        self.result.as_ref()
    }

    #[must_use]
    pub fn result(&self) -> Option<&BmiResult> {
        self.result.as_ref()
    }

    pub fn clear_result(&mut self) {
        self.result = None;
    }

    /// Save the current result to history. Without a result this is a no-op.
    ///
    /// # Errors
    /// Returns error if persisting fails.
    pub fn save_result(&mut self) -> Result<Option<HistoryRecord>, BmiError> {
        let Some(result) = self.result.clone() else {
            return Ok(None);
        };

        self.history.add(result).map(Some)
    }

    /// Delete one saved record.
    ///
    /// # Errors
    /// Returns error if persisting fails.
    pub fn delete_record(&mut self, id: &str) -> Result<bool, BmiError> {
        self.history.remove(id)
    }

    /// Delete all saved records.
    ///
    /// # Errors
    /// Returns error if the store removal fails.
    pub fn clear_history(&mut self) -> Result<(), BmiError> {
        self.history.clear()
    }

    #[must_use]
    pub fn history(&self) -> &[HistoryRecord] {
        self.history.records()
    }

    #[must_use]
    pub fn history_max_len(&self) -> usize {
        self.history.max_len()
    }
}
