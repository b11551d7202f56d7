//! The storage collaborator contract.
//!
//! The engine delegates all durability to a [`Storage`] implementation: it
//! asks for the last transition record to derive the current state, appends
//! a record on each successful transition, and reads the full history back.
//! Storage errors are opaque to the engine and propagate unchanged.

mod memory;

pub use memory::InMemoryStorage;

use crate::core::{BoxError, TransitionRecord};

/// Durable store of transition records for a subject.
///
/// Implementations own the records. If the host needs "at most one winning
/// transition" under concurrent writers, the adapter must provide that
/// atomicity (a uniqueness constraint, compare-and-swap, or similar); the
/// engine itself does not.
pub trait Storage<Sub> {
    /// The most recent transition record for the subject, if any.
    fn last(&self, subject: &Sub) -> Result<Option<TransitionRecord>, BoxError>;

    /// Durably append a new transition record.
    fn create(
        &self,
        subject: &Sub,
        to_state: &str,
        metadata: Option<serde_json::Value>,
    ) -> Result<TransitionRecord, BoxError>;

    /// All transition records for the subject, oldest first.
    fn history(&self, subject: &Sub) -> Result<Vec<TransitionRecord>, BoxError>;
}
