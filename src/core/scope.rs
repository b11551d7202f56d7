//! Scope patterns for guard and callback registrations.
//!
//! A hook can be registered against a concrete (from, to) edge, against
//! every transition leaving or entering one state, or against every
//! transition in the machine. Wildcards are an explicit variant rather
//! than an absent value, so matching stays a total pattern match.

use serde::{Deserialize, Serialize};

/// One side of a hook scope: either a concrete state name or a wildcard.
///
/// # Example
///
/// ```rust
/// use waypoint::StatePattern;
///
/// let any = StatePattern::Any;
/// let named = StatePattern::named("pending");
///
/// assert!(any.matches("pending"));
/// assert!(any.matches("approved"));
/// assert!(named.matches("pending"));
/// assert!(!named.matches("approved"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatePattern {
    /// Matches any state on this side.
    Any,
    /// Matches exactly the named state.
    Named(String),
}

impl StatePattern {
    /// Create a pattern matching exactly one state.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Check whether this pattern matches a concrete state name.
    pub fn matches(&self, state: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Named(name) => name == state,
        }
    }

    /// The concrete name this pattern is pinned to, if any.
    pub fn as_named(&self) -> Option<&str> {
        match self {
            Self::Any => None,
            Self::Named(name) => Some(name.as_str()),
        }
    }
}

impl From<&str> for StatePattern {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl From<String> for StatePattern {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

impl From<Option<&str>> for StatePattern {
    fn from(name: Option<&str>) -> Self {
        match name {
            Some(name) => Self::Named(name.to_string()),
            None => Self::Any,
        }
    }
}

/// The (from, to) scope of a guard or callback registration.
///
/// A hook applies to a concrete transition when both sides match.
/// Matching is pure and has no failure modes.
///
/// # Example
///
/// ```rust
/// use waypoint::{HookScope, StatePattern};
///
/// let scope = HookScope::new("pending", StatePattern::Any);
///
/// assert!(scope.applies_to("pending", "approved"));
/// assert!(scope.applies_to("pending", "rejected"));
/// assert!(!scope.applies_to("approved", "rejected"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookScope {
    /// Pattern for the state being transitioned away from.
    pub from: StatePattern,
    /// Pattern for the state being transitioned into.
    pub to: StatePattern,
}

impl HookScope {
    /// Create a scope from anything convertible to a pattern
    /// (`&str` for a named state, `StatePattern::Any` for a wildcard).
    pub fn new(from: impl Into<StatePattern>, to: impl Into<StatePattern>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// The universal scope: applies to every transition.
    pub fn any() -> Self {
        Self {
            from: StatePattern::Any,
            to: StatePattern::Any,
        }
    }

    /// Check whether this scope applies to a concrete (from, to) pair.
    pub fn applies_to(&self, from: &str, to: &str) -> bool {
        self.from.matches(from) && self.to.matches(to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_pattern_matches_everything() {
        assert!(StatePattern::Any.matches("pending"));
        assert!(StatePattern::Any.matches(""));
    }

    #[test]
    fn named_pattern_matches_exactly() {
        let pattern = StatePattern::named("pending");
        assert!(pattern.matches("pending"));
        assert!(!pattern.matches("approved"));
        assert!(!pattern.matches("pend"));
    }

    #[test]
    fn as_named_distinguishes_wildcards() {
        assert_eq!(StatePattern::Any.as_named(), None);
        assert_eq!(StatePattern::named("x").as_named(), Some("x"));
    }

    #[test]
    fn option_converts_none_to_wildcard() {
        assert_eq!(StatePattern::from(None), StatePattern::Any);
        assert_eq!(
            StatePattern::from(Some("pending")),
            StatePattern::named("pending")
        );
    }

    #[test]
    fn universal_scope_applies_to_any_pair() {
        let scope = HookScope::any();
        assert!(scope.applies_to("a", "b"));
        assert!(scope.applies_to("b", "a"));
    }

    #[test]
    fn exact_scope_requires_both_sides() {
        let scope = HookScope::new("pending", "approved");
        assert!(scope.applies_to("pending", "approved"));
        assert!(!scope.applies_to("pending", "rejected"));
        assert!(!scope.applies_to("draft", "approved"));
    }

    #[test]
    fn half_open_scope_matches_one_side() {
        let from_only = HookScope::new("pending", StatePattern::Any);
        assert!(from_only.applies_to("pending", "approved"));
        assert!(from_only.applies_to("pending", "rejected"));
        assert!(!from_only.applies_to("approved", "done"));

        let to_only = HookScope::new(StatePattern::Any, "approved");
        assert!(to_only.applies_to("pending", "approved"));
        assert!(!to_only.applies_to("pending", "rejected"));
    }

    #[test]
    fn scope_serializes_correctly() {
        let scope = HookScope::new("pending", StatePattern::Any);
        let json = serde_json::to_string(&scope).unwrap();
        let deserialized: HookScope = serde_json::from_str(&json).unwrap();
        assert_eq!(scope, deserialized);
    }
}
