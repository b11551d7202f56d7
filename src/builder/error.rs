//! Declaration-time errors for the definition builder.

use thiserror::Error;

/// Errors raised while declaring states, transitions, and hooks.
///
/// Every malformed declaration fails immediately; the builder never
/// silently ignores one.
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("state '{0}' has not been declared")]
    UndeclaredState(String),

    #[error("initial state is already '{existing}'; cannot also mark '{new}' initial")]
    InitialStateRedefined { existing: String, new: String },

    #[error("initial state not specified. Call .initial_state(name) before .build()")]
    MissingInitialState,

    #[error("state '{0}' has no outgoing transitions; a hook scoped away from it can never fire")]
    HookFromTerminalState(String),

    #[error("no declared transition targets state '{0}'; a hook scoped into it can never fire")]
    HookIntoUnenteredState(String),

    #[error("no transition from '{from}' to '{to}' has been declared")]
    UnknownEdge { from: String, to: String },
}
