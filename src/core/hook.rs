//! Guard and callback entries.
//!
//! Guards are pure boolean predicates that may veto a transition before it
//! happens. Callbacks are side-effecting actions that run immediately before
//! or after a transition is durably recorded. Both carry a [`HookScope`]
//! limiting which (from, to) pairs they fire for, and both are evaluated in
//! the order they were registered.

use crate::core::scope::HookScope;
use std::fmt;

/// Opaque error type carried by callbacks and the storage collaborator.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Pure predicate that decides whether a transition may proceed.
///
/// A guard returning `false` vetoes the transition; no callbacks run and
/// nothing is persisted. Guards must not have side effects.
///
/// # Example
///
/// ```rust
/// use waypoint::{Guard, HookScope};
///
/// struct Order {
///     amount: u32,
/// }
///
/// let guard = Guard::new(
///     HookScope::new("pending", "approved"),
///     |order: &Order| order.amount < 1_000,
/// );
///
/// assert!(guard.check(&Order { amount: 250 }));
/// assert!(!guard.check(&Order { amount: 5_000 }));
/// ```
pub struct Guard<Sub> {
    scope: HookScope,
    predicate: Box<dyn Fn(&Sub) -> bool + Send + Sync>,
}

impl<Sub> Guard<Sub> {
    /// Create a guard from a scope and a pure predicate.
    pub fn new<F>(scope: HookScope, predicate: F) -> Self
    where
        F: Fn(&Sub) -> bool + Send + Sync + 'static,
    {
        Self {
            scope,
            predicate: Box::new(predicate),
        }
    }

    /// The (from, to) scope this guard was registered under.
    pub fn scope(&self) -> &HookScope {
        &self.scope
    }

    /// Evaluate the predicate against the subject.
    pub fn check(&self, subject: &Sub) -> bool {
        (self.predicate)(subject)
    }
}

impl<Sub> fmt::Debug for Guard<Sub> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").field("scope", &self.scope).finish()
    }
}

/// Side-effecting hook run before or after a transition is recorded.
///
/// A callback signals failure by returning an error, which aborts the
/// transition when it happens before the storage write. The engine performs
/// no rollback of callbacks that already ran; actions should be idempotent
/// or tolerant of partial execution.
pub struct Callback<Sub> {
    scope: HookScope,
    action: Box<dyn Fn(&Sub) -> Result<(), BoxError> + Send + Sync>,
}

impl<Sub> Callback<Sub> {
    /// Create a callback from a scope and an action.
    pub fn new<F>(scope: HookScope, action: F) -> Self
    where
        F: Fn(&Sub) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        Self {
            scope,
            action: Box::new(action),
        }
    }

    /// The (from, to) scope this callback was registered under.
    pub fn scope(&self) -> &HookScope {
        &self.scope
    }

    /// Invoke the action with the subject.
    pub fn run(&self, subject: &Sub) -> Result<(), BoxError> {
        (self.action)(subject)
    }
}

impl<Sub> fmt::Debug for Callback<Sub> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("scope", &self.scope)
            .finish()
    }
}
