//! The runtime transition engine.

use crate::builder::MachineDef;
use crate::core::{Callback, Guard, TransitionRecord};
use crate::engine::error::TransitionError;
use crate::storage::Storage;
use std::fmt;
use std::sync::Arc;

/// A machine instance: one subject bound to one definition and one storage
/// collaborator.
///
/// The instance itself holds no state beyond those references. The subject's
/// current state is always derived from the most recent transition record in
/// storage (falling back to the declared initial state), never cached, so
/// storage remains the single source of truth even when other writers exist.
///
/// The engine performs no locking; concurrent transition attempts for the
/// same subject must be serialized by the caller or by the storage layer.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use waypoint::{DefinitionBuilder, InMemoryStorage, Machine};
///
/// let def = DefinitionBuilder::new()
///     .state("approved")
///     .initial_state("pending")?
///     .transition("pending", ["approved"])?
///     .build()?;
///
/// let machine = Machine::new(Arc::new(def), (), InMemoryStorage::new());
/// assert_eq!(machine.current_state()?, "pending");
///
/// machine.transition_to("approved", None)?;
/// assert_eq!(machine.current_state()?, "approved");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Machine<Sub, St> {
    definition: Arc<MachineDef<Sub>>,
    subject: Sub,
    storage: St,
}

impl<Sub, St: Storage<Sub>> Machine<Sub, St> {
    /// Bind a subject to a definition and a storage collaborator.
    pub fn new(definition: Arc<MachineDef<Sub>>, subject: Sub, storage: St) -> Self {
        Self {
            definition,
            subject,
            storage,
        }
    }

    /// The subject this machine drives.
    pub fn subject(&self) -> &Sub {
        &self.subject
    }

    /// The shared definition this machine was configured with.
    pub fn definition(&self) -> &MachineDef<Sub> {
        &self.definition
    }

    /// The subject's current state, derived from storage.
    ///
    /// Returns the target state of the most recent transition record, or
    /// the declared initial state if the subject has never transitioned.
    /// Always a fresh query.
    pub fn current_state(&self) -> Result<String, TransitionError> {
        let last = self
            .storage
            .last(&self.subject)
            .map_err(TransitionError::Storage)?;
        Ok(match last {
            Some(record) => record.to_state,
            None => self.definition.initial_state().to_string(),
        })
    }

    /// Whether a transition to `target` would currently be allowed.
    ///
    /// Runs the full validation (guards and graph edge) without committing
    /// anything. Rule rejections come back as `Ok(false)`; storage failures
    /// propagate as `Err`.
    pub fn can_transition_to(&self, target: &str) -> Result<bool, TransitionError> {
        let from = self.current_state()?;
        match self.validate(&from, target) {
            Ok(()) => Ok(true),
            Err(err) if err.is_rejection() => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Transition the subject to `target`, recording `metadata` with it.
    ///
    /// The pipeline, in order:
    /// 1. derive the current state from storage;
    /// 2. run every matching guard in registration order — the first veto
    ///    aborts with [`TransitionError::GuardFailed`] before anything else
    ///    runs;
    /// 3. verify the graph permits (current, target), else
    ///    [`TransitionError::InvalidTransition`];
    /// 4. run matching before-callbacks in registration order — an error
    ///    aborts before any storage write (callbacks that already ran are
    ///    not rolled back);
    /// 5. ask storage to create the transition record;
    /// 6. run matching after-callbacks in registration order. The record is
    ///    already durable at this point, so an error here propagates but
    ///    the transition stands.
    ///
    /// Returns the resulting current state, re-derived from storage.
    pub fn transition_to(
        &self,
        target: &str,
        metadata: Option<serde_json::Value>,
    ) -> Result<String, TransitionError> {
        let from = self.current_state()?;
        self.validate(&from, target)?;

        for callback in self.definition.before_callbacks_for(&from, target) {
            callback
                .run(&self.subject)
                .map_err(TransitionError::CallbackFailed)?;
        }

        self.storage
            .create(&self.subject, target, metadata)
            .map_err(TransitionError::Storage)?;

        for callback in self.definition.after_callbacks_for(&from, target) {
            callback
                .run(&self.subject)
                .map_err(TransitionError::CallbackFailed)?;
        }

        self.current_state()
    }

    /// Non-throwing form of [`transition_to`](Self::transition_to).
    ///
    /// Returns `Ok(None)` when the transition rules forbid the attempt
    /// (invalid edge or guard veto). Storage and callback failures stay
    /// `Err`; callers needing the rejection reason use the strict form.
    pub fn try_transition_to(
        &self,
        target: &str,
        metadata: Option<serde_json::Value>,
    ) -> Result<Option<String>, TransitionError> {
        match self.transition_to(target, metadata) {
            Ok(state) => Ok(Some(state)),
            Err(err) if err.is_rejection() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// The subject's full transition history, oldest first.
    /// Pass-through to storage, no caching.
    pub fn history(&self) -> Result<Vec<TransitionRecord>, TransitionError> {
        self.storage
            .history(&self.subject)
            .map_err(TransitionError::Storage)
    }

    /// The guards that would run for a (from, to) attempt.
    pub fn guards_for(&self, from: &str, to: &str) -> Vec<&Guard<Sub>> {
        self.definition.guards_for(from, to)
    }

    /// The before-callbacks that would run for a (from, to) attempt.
    pub fn before_callbacks_for(&self, from: &str, to: &str) -> Vec<&Callback<Sub>> {
        self.definition.before_callbacks_for(from, to)
    }

    /// The after-callbacks that would run for a (from, to) attempt.
    pub fn after_callbacks_for(&self, from: &str, to: &str) -> Vec<&Callback<Sub>> {
        self.definition.after_callbacks_for(from, to)
    }

    /// Guards first, in registration order, then the graph-edge check.
    /// Both must pass; the first failure is the one reported.
    fn validate(&self, from: &str, to: &str) -> Result<(), TransitionError> {
        for guard in self.definition.guards_for(from, to) {
            if !guard.check(&self.subject) {
                return Err(TransitionError::GuardFailed {
                    from: from.to_string(),
                    to: to.to_string(),
                });
            }
        }

        if !self.definition.permits(from, to) {
            return Err(TransitionError::InvalidTransition {
                from: from.to_string(),
                to: to.to_string(),
            });
        }

        Ok(())
    }
}

impl<Sub: fmt::Debug, St> fmt::Debug for Machine<Sub, St> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("definition", &self.definition)
            .field("subject", &self.subject)
            .finish()
    }
}
