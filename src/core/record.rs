//! Transition records produced by the storage collaborator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Durable record of one successful transition.
///
/// Records are owned and persisted by the storage collaborator; the engine
/// only requests their creation and reads the resulting sequence back. The
/// most recent record's `to_state` is the subject's current state.
///
/// # Example
///
/// ```rust
/// use waypoint::TransitionRecord;
/// use serde_json::json;
///
/// let record = TransitionRecord::new("approved", Some(json!({ "by": "reviewer" })));
/// assert_eq!(record.to_state, "approved");
/// assert!(record.metadata.is_some());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Unique identifier for this record.
    pub id: Uuid,
    /// The state the subject transitioned into.
    pub to_state: String,
    /// Opaque payload supplied by the caller at transition time.
    pub metadata: Option<serde_json::Value>,
    /// When the transition was recorded.
    pub recorded_at: DateTime<Utc>,
}

impl TransitionRecord {
    /// Create a record stamped with a fresh id and the current time.
    pub fn new(to_state: impl Into<String>, metadata: Option<serde_json::Value>) -> Self {
        Self {
            id: Uuid::new_v4(),
            to_state: to_state.into(),
            metadata,
            recorded_at: Utc::now(),
        }
    }
}
