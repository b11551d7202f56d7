//! The immutable machine definition.

use crate::builder::machine::DefinitionBuilder;
use crate::core::{Callback, Guard};
use std::collections::HashMap;
use std::fmt;

/// Immutable configuration of one machine type: the declared states, the
/// successor map, and the ordered guard/callback registries.
///
/// A definition is built once by [`DefinitionBuilder`] and then shared
/// (typically behind an `Arc`) by every machine instance. It is read-only
/// after `build()`, so configuration can be constructed per test case
/// without any process-wide mutable state.
pub struct MachineDef<Sub> {
    pub(crate) states: Vec<String>,
    pub(crate) initial: String,
    pub(crate) successors: HashMap<String, Vec<String>>,
    pub(crate) guards: Vec<Guard<Sub>>,
    pub(crate) before_callbacks: Vec<Callback<Sub>>,
    pub(crate) after_callbacks: Vec<Callback<Sub>>,
}

impl<Sub> MachineDef<Sub> {
    /// Start declaring a new machine type.
    pub fn builder() -> DefinitionBuilder<Sub> {
        DefinitionBuilder::new()
    }

    /// The declared initial state.
    pub fn initial_state(&self) -> &str {
        &self.initial
    }

    /// All declared states, in declaration order.
    pub fn states(&self) -> &[String] {
        &self.states
    }

    /// Whether `name` was declared as a state.
    pub fn is_declared(&self, name: &str) -> bool {
        self.states.iter().any(|s| s == name)
    }

    /// The allowed targets out of `from`, in declaration order.
    /// Empty if `from` is terminal or undeclared.
    pub fn successors_from(&self, from: &str) -> &[String] {
        self.successors.get(from).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether the graph permits a transition from `from` to `to`.
    pub fn permits(&self, from: &str, to: &str) -> bool {
        self.successors_from(from).iter().any(|s| s == to)
    }

    /// The guards whose scope applies to (from, to), in registration order.
    pub fn guards_for(&self, from: &str, to: &str) -> Vec<&Guard<Sub>> {
        self.guards
            .iter()
            .filter(|g| g.scope().applies_to(from, to))
            .collect()
    }

    /// The before-callbacks whose scope applies to (from, to), in
    /// registration order.
    pub fn before_callbacks_for(&self, from: &str, to: &str) -> Vec<&Callback<Sub>> {
        Self::select(&self.before_callbacks, from, to)
    }

    /// The after-callbacks whose scope applies to (from, to), in
    /// registration order.
    pub fn after_callbacks_for(&self, from: &str, to: &str) -> Vec<&Callback<Sub>> {
        Self::select(&self.after_callbacks, from, to)
    }

    fn select<'a>(callbacks: &'a [Callback<Sub>], from: &str, to: &str) -> Vec<&'a Callback<Sub>> {
        callbacks
            .iter()
            .filter(|c| c.scope().applies_to(from, to))
            .collect()
    }
}

impl<Sub> fmt::Debug for MachineDef<Sub> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MachineDef")
            .field("states", &self.states)
            .field("initial", &self.initial)
            .field("successors", &self.successors)
            .field("guards", &self.guards.len())
            .field("before_callbacks", &self.before_callbacks.len())
            .field("after_callbacks", &self.after_callbacks.len())
            .finish()
    }
}
