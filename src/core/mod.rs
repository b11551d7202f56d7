//! Core types shared by the declaration builder and the runtime engine.
//!
//! This module contains the pure pieces of the machine:
//! - Scope patterns and their total matching logic
//! - Guard and callback entry types
//! - The transition record produced by storage
//!
//! Nothing here performs I/O; matching and guard evaluation are pure.

mod hook;
mod record;
mod scope;

pub use hook::{BoxError, Callback, Guard};
pub use record::TransitionRecord;
pub use scope::{HookScope, StatePattern};
