//! Runtime errors for the transition engine.

use crate::core::BoxError;
use thiserror::Error;

/// Errors that can occur while attempting a transition.
///
/// The first two variants are *rule rejections*: the declared graph or a
/// guard forbids the transition. The rest are infrastructure failures.
/// The non-throwing operations ([`Machine::can_transition_to`] and
/// [`Machine::try_transition_to`]) convert rejections into a boolean or
/// `None` but always surface infrastructure failures, so callers can
/// distinguish "the rules forbid this" from "something broke".
///
/// [`Machine::can_transition_to`]: crate::Machine::can_transition_to
/// [`Machine::try_transition_to`]: crate::Machine::try_transition_to
#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("no transition from '{from}' to '{to}' is permitted")]
    InvalidTransition { from: String, to: String },

    #[error("a guard rejected the transition from '{from}' to '{to}'")]
    GuardFailed { from: String, to: String },

    #[error("callback failed during transition")]
    CallbackFailed(#[source] BoxError),

    #[error("storage operation failed")]
    Storage(#[source] BoxError),
}

impl TransitionError {
    /// Whether this error means the transition rules forbade the attempt,
    /// as opposed to a callback or storage failure.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::InvalidTransition { .. } | Self::GuardFailed { .. }
        )
    }
}
