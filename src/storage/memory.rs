//! In-memory storage adapter.

use crate::core::{BoxError, TransitionRecord};
use crate::storage::Storage;
use std::sync::Mutex;

/// Storage backed by an in-process, per-instance transition log.
///
/// One `InMemoryStorage` serves one machine instance (the subject argument
/// is ignored), which matches how machines bind exactly one subject to one
/// storage handle. The log lives behind a `Mutex` so the adapter satisfies
/// the `Send + Sync` expectations of shared definitions, but it provides no
/// durability — it exists for tests and as the reference adapter.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    records: Mutex<Vec<TransitionRecord>>,
}

impl InMemoryStorage {
    /// Create an empty transition log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records in the log.
    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<Sub> Storage<Sub> for InMemoryStorage {
    fn last(&self, _subject: &Sub) -> Result<Option<TransitionRecord>, BoxError> {
        let records = self
            .records
            .lock()
            .map_err(|_| BoxError::from("transition log mutex poisoned"))?;
        Ok(records.last().cloned())
    }

    fn create(
        &self,
        _subject: &Sub,
        to_state: &str,
        metadata: Option<serde_json::Value>,
    ) -> Result<TransitionRecord, BoxError> {
        let record = TransitionRecord::new(to_state, metadata);
        let mut records = self
            .records
            .lock()
            .map_err(|_| BoxError::from("transition log mutex poisoned"))?;
        records.push(record.clone());
        Ok(record)
    }

    fn history(&self, _subject: &Sub) -> Result<Vec<TransitionRecord>, BoxError> {
        let records = self
            .records
            .lock()
            .map_err(|_| BoxError::from("transition log mutex poisoned"))?;
        Ok(records.clone())
    }
}
