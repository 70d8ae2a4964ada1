//! Capped, most-recent-first list of saved records.

use super::record::HistoryRecord;

/// Default maximum number of saved records.
pub const DEFAULT_MAX_HISTORY: usize = 15;

/// Ordered history, newest first. Never holds more than `max_len` records;
/// the oldest entries are dropped first.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    records: Vec<HistoryRecord>,
    max_len: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY)
    }
}

impl History {
    /// Create an empty history. A cap of zero is raised to one.
    #[must_use]
    pub fn new(max_len: usize) -> Self {
        Self {
            records: Vec::new(),
            max_len: max_len.max(1),
        }
    }

    /// Create a history from records already in newest-first order.
    #[must_use]
    pub fn from_records(records: Vec<HistoryRecord>, max_len: usize) -> Self {
        let mut history = Self::new(max_len);
        history.replace(records);
        history
    }

    /// Replace the contents, truncating to the cap.
    pub fn replace(&mut self, mut records: Vec<HistoryRecord>) {
        records.truncate(self.max_len);
        self.records = records;
    }

    /// Prepend a record, dropping the oldest entries past the cap.
    pub fn add(&mut self, record: HistoryRecord) {
        self.records.insert(0, record);
        self.records.truncate(self.max_len);
    }

    /// Remove the record with `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        self.records.len() != before
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    #[must_use]
    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&HistoryRecord> {
        self.records.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn max_len(&self) -> usize {
        self.max_len
    }
}
