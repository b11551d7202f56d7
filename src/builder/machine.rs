//! Fluent builder for machine definitions.

use crate::builder::definition::MachineDef;
use crate::builder::error::DefinitionError;
use crate::core::{BoxError, Callback, Guard, HookScope, StatePattern};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Builder for [`MachineDef`], validating every declaration immediately.
///
/// States must be declared before any transition, guard, or callback refers
/// to them; a declaration that references an unknown state or an impossible
/// hook scope fails on the spot rather than at runtime.
///
/// # Example
///
/// ```rust
/// use waypoint::{DefinitionBuilder, StatePattern};
///
/// struct Order {
///     amount: u32,
/// }
///
/// let def = DefinitionBuilder::new()
///     .state("approved")
///     .state("rejected")
///     .initial_state("pending")?
///     .transition("pending", ["approved", "rejected"])?
///     .guard("pending", "approved", |order: &Order| order.amount < 1_000)?
///     .before(StatePattern::Any, "rejected", |_order| Ok(()))?
///     .build()?;
///
/// assert_eq!(def.initial_state(), "pending");
/// # Ok::<(), waypoint::DefinitionError>(())
/// ```
pub struct DefinitionBuilder<Sub> {
    states: Vec<String>,
    initial: Option<String>,
    successors: HashMap<String, Vec<String>>,
    targets: HashSet<String>,
    guards: Vec<Guard<Sub>>,
    before_callbacks: Vec<Callback<Sub>>,
    after_callbacks: Vec<Callback<Sub>>,
}

impl<Sub> DefinitionBuilder<Sub> {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            initial: None,
            successors: HashMap::new(),
            targets: HashSet::new(),
            guards: Vec::new(),
            before_callbacks: Vec::new(),
            after_callbacks: Vec::new(),
        }
    }

    /// Declare a state. Declaring the same name twice is harmless.
    pub fn state(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.states.contains(&name) {
            self.states.push(name);
        }
        self
    }

    /// Declare a state and mark it as the initial state.
    ///
    /// Fails with [`DefinitionError::InitialStateRedefined`] if an initial
    /// state was already set.
    pub fn initial_state(mut self, name: impl Into<String>) -> Result<Self, DefinitionError> {
        let name = name.into();
        if let Some(existing) = &self.initial {
            return Err(DefinitionError::InitialStateRedefined {
                existing: existing.clone(),
                new: name,
            });
        }
        self.initial = Some(name.clone());
        Ok(self.state(name))
    }

    /// Declare that `from` may transition to each state in `to`.
    ///
    /// Every referenced state must already be declared. Declaring the same
    /// `from` twice is cumulative: the new targets are appended to the
    /// existing successor list, never replacing it.
    pub fn transition<I>(
        mut self,
        from: impl Into<String>,
        to: I,
    ) -> Result<Self, DefinitionError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let from = from.into();
        let targets: Vec<String> = to.into_iter().map(Into::into).collect();

        self.require_declared(&from)?;
        for target in &targets {
            self.require_declared(target)?;
        }

        for target in &targets {
            self.targets.insert(target.clone());
        }
        self.successors.entry(from).or_default().extend(targets);
        Ok(self)
    }

    /// Register a guard scoped to (from, to).
    ///
    /// Guards run in registration order on every transition attempt whose
    /// (from, to) pair matches the scope; the first returning `false` vetoes
    /// the attempt.
    pub fn guard<F>(
        mut self,
        from: impl Into<StatePattern>,
        to: impl Into<StatePattern>,
        predicate: F,
    ) -> Result<Self, DefinitionError>
    where
        F: Fn(&Sub) -> bool + Send + Sync + 'static,
    {
        let scope = HookScope::new(from, to);
        self.validate_scope(&scope)?;
        self.guards.push(Guard::new(scope, predicate));
        Ok(self)
    }

    /// Register a callback that runs before matching transitions are
    /// recorded. An error from it aborts the transition before any
    /// storage write.
    pub fn before<F>(
        mut self,
        from: impl Into<StatePattern>,
        to: impl Into<StatePattern>,
        action: F,
    ) -> Result<Self, DefinitionError>
    where
        F: Fn(&Sub) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        let scope = HookScope::new(from, to);
        self.validate_scope(&scope)?;
        self.before_callbacks.push(Callback::new(scope, action));
        Ok(self)
    }

    /// Register a callback that runs after matching transitions have been
    /// durably recorded.
    pub fn after<F>(
        mut self,
        from: impl Into<StatePattern>,
        to: impl Into<StatePattern>,
        action: F,
    ) -> Result<Self, DefinitionError>
    where
        F: Fn(&Sub) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        let scope = HookScope::new(from, to);
        self.validate_scope(&scope)?;
        self.after_callbacks.push(Callback::new(scope, action));
        Ok(self)
    }

    /// Finish the declaration and produce the immutable definition.
    pub fn build(self) -> Result<MachineDef<Sub>, DefinitionError> {
        let initial = self.initial.ok_or(DefinitionError::MissingInitialState)?;
        Ok(MachineDef {
            states: self.states,
            initial,
            successors: self.successors,
            guards: self.guards,
            before_callbacks: self.before_callbacks,
            after_callbacks: self.after_callbacks,
        })
    }

    fn require_declared(&self, name: &str) -> Result<(), DefinitionError> {
        if self.states.iter().any(|s| s == name) {
            Ok(())
        } else {
            Err(DefinitionError::UndeclaredState(name.to_string()))
        }
    }

    /// Reject hook scopes that could never fire.
    ///
    /// Checks run in a fixed order: state existence first, then the
    /// terminal-from and unentered-to reachability checks, and the
    /// pair-is-a-real-edge check only when both sides are named.
    fn validate_scope(&self, scope: &HookScope) -> Result<(), DefinitionError> {
        if scope.from == StatePattern::Any && scope.to == StatePattern::Any {
            return Ok(());
        }

        if let Some(from) = scope.from.as_named() {
            self.require_declared(from)?;
        }
        if let Some(to) = scope.to.as_named() {
            self.require_declared(to)?;
        }

        if let Some(from) = scope.from.as_named() {
            let has_edges = self.successors.get(from).is_some_and(|s| !s.is_empty());
            if !has_edges {
                return Err(DefinitionError::HookFromTerminalState(from.to_string()));
            }
        }

        if let Some(to) = scope.to.as_named() {
            if !self.targets.contains(to) {
                return Err(DefinitionError::HookIntoUnenteredState(to.to_string()));
            }
        }

        if let (Some(from), Some(to)) = (scope.from.as_named(), scope.to.as_named()) {
            let is_edge = self
                .successors
                .get(from)
                .is_some_and(|s| s.iter().any(|t| t == to));
            if !is_edge {
                return Err(DefinitionError::UnknownEdge {
                    from: from.to_string(),
                    to: to.to_string(),
                });
            }
        }

        Ok(())
    }
}

impl<Sub> Default for DefinitionBuilder<Sub> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Sub> fmt::Debug for DefinitionBuilder<Sub> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefinitionBuilder")
            .field("states", &self.states)
            .field("initial", &self.initial)
            .field("successors", &self.successors)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reviewed_graph() -> DefinitionBuilder<()> {
        DefinitionBuilder::new()
            .state("approved")
            .state("rejected")
            .initial_state("pending")
            .unwrap()
            .transition("pending", ["approved", "rejected"])
            .unwrap()
    }

    #[test]
    fn build_requires_an_initial_state() {
        let result = DefinitionBuilder::<()>::new().state("pending").build();
        assert!(matches!(result, Err(DefinitionError::MissingInitialState)));
    }

    #[test]
    fn second_initial_state_is_rejected() {
        let result = DefinitionBuilder::<()>::new()
            .initial_state("pending")
            .unwrap()
            .initial_state("approved");

        assert!(matches!(
            result,
            Err(DefinitionError::InitialStateRedefined { existing, new })
                if existing == "pending" && new == "approved"
        ));
    }

    #[test]
    fn transition_rejects_undeclared_from() {
        let result = DefinitionBuilder::<()>::new()
            .state("approved")
            .transition("pending", ["approved"]);

        assert!(matches!(
            result,
            Err(DefinitionError::UndeclaredState(name)) if name == "pending"
        ));
    }

    #[test]
    fn transition_rejects_undeclared_target() {
        let result = DefinitionBuilder::<()>::new()
            .initial_state("pending")
            .unwrap()
            .transition("pending", ["approved"]);

        assert!(matches!(
            result,
            Err(DefinitionError::UndeclaredState(name)) if name == "approved"
        ));
    }

    #[test]
    fn repeated_transition_declarations_accumulate() {
        let def = DefinitionBuilder::<()>::new()
            .state("approved")
            .state("rejected")
            .initial_state("pending")
            .unwrap()
            .transition("pending", ["approved"])
            .unwrap()
            .transition("pending", ["rejected"])
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(def.successors_from("pending"), ["approved", "rejected"]);
    }

    #[test]
    fn duplicate_state_declarations_are_harmless() {
        let def = DefinitionBuilder::<()>::new()
            .state("pending")
            .state("pending")
            .initial_state("pending")
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(def.states(), ["pending"]);
    }

    #[test]
    fn universal_wildcard_scope_is_always_valid() {
        let result = DefinitionBuilder::<()>::new()
            .guard(StatePattern::Any, StatePattern::Any, |_| true);
        assert!(result.is_ok());
    }

    #[test]
    fn hook_scope_rejects_undeclared_state() {
        let result = reviewed_graph().guard("shipped", StatePattern::Any, |_| true);

        assert!(matches!(
            result,
            Err(DefinitionError::UndeclaredState(name)) if name == "shipped"
        ));
    }

    #[test]
    fn hook_scope_rejects_terminal_from() {
        let result = reviewed_graph().before("approved", StatePattern::Any, |_| Ok(()));

        assert!(matches!(
            result,
            Err(DefinitionError::HookFromTerminalState(name)) if name == "approved"
        ));
    }

    #[test]
    fn hook_scope_rejects_unentered_to() {
        // Nothing transitions into the initial state, so a hook scoped
        // into it can never fire.
        let result = reviewed_graph().after(StatePattern::Any, "pending", |_| Ok(()));

        assert!(matches!(
            result,
            Err(DefinitionError::HookIntoUnenteredState(name)) if name == "pending"
        ));
    }

    #[test]
    fn hook_scope_rejects_nonexistent_edge() {
        let def = DefinitionBuilder::<()>::new()
            .state("approved")
            .state("archived")
            .initial_state("pending")
            .unwrap()
            .transition("pending", ["approved"])
            .unwrap()
            .transition("approved", ["archived"])
            .unwrap()
            .guard("pending", "archived", |_| true);

        assert!(matches!(
            def,
            Err(DefinitionError::UnknownEdge { from, to })
                if from == "pending" && to == "archived"
        ));
    }

    #[test]
    fn existence_is_checked_before_reachability() {
        // "shipped" is both undeclared and terminal; the existence check
        // must win.
        let result = reviewed_graph().guard("shipped", "approved", |_| true);

        assert!(matches!(
            result,
            Err(DefinitionError::UndeclaredState(_))
        ));
    }

    #[test]
    fn valid_edge_scope_is_accepted() {
        let result = reviewed_graph().guard("pending", "approved", |_| true);
        assert!(result.is_ok());
    }

    #[test]
    fn half_open_scopes_are_accepted_when_reachable() {
        let builder = reviewed_graph()
            .guard("pending", StatePattern::Any, |_| true)
            .unwrap()
            .before(StatePattern::Any, "approved", |_| Ok(()))
            .unwrap();

        assert!(builder.build().is_ok());
    }
}
