//! Waypoint: a declarative finite-state-machine engine.
//!
//! A host application declares named states, a directed graph of permitted
//! transitions, and hooks around them — guards that approve or veto a
//! transition, and before/after callbacks — then drives an arbitrary subject
//! through that graph. Durability is delegated to a pluggable storage
//! collaborator that owns the transition records; the engine derives the
//! current state from storage on every read instead of caching it.
//!
//! # Core Concepts
//!
//! - **Definition**: an immutable graph + hook configuration, built once by
//!   [`DefinitionBuilder`] and shared by every machine instance
//! - **Guards**: pure predicates that may veto a matching transition
//! - **Callbacks**: side-effecting hooks that run before or after a
//!   transition is recorded
//! - **Storage**: the collaborator that persists transition records and is
//!   the single source of truth for the current state
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use waypoint::{DefinitionBuilder, InMemoryStorage, Machine, StatePattern};
//!
//! struct Order {
//!     amount: u32,
//! }
//!
//! let def = DefinitionBuilder::new()
//!     .state("approved")
//!     .state("rejected")
//!     .initial_state("pending")?
//!     .transition("pending", ["approved", "rejected"])?
//!     .guard("pending", "approved", |order: &Order| order.amount < 1_000)?
//!     .after(StatePattern::Any, "approved", |_order| {
//!         // notify downstream systems
//!         Ok(())
//!     })?
//!     .build()?;
//!
//! let machine = Machine::new(Arc::new(def), Order { amount: 250 }, InMemoryStorage::new());
//!
//! assert_eq!(machine.current_state()?, "pending");
//! assert!(machine.can_transition_to("approved")?);
//!
//! machine.transition_to("approved", None)?;
//! assert_eq!(machine.current_state()?, "approved");
//! assert_eq!(machine.history()?.len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builder;
pub mod core;
pub mod engine;
pub mod storage;

// Re-export commonly used types
pub use crate::core::{BoxError, Callback, Guard, HookScope, StatePattern, TransitionRecord};
pub use builder::{DefinitionBuilder, DefinitionError, MachineDef};
pub use engine::{Machine, TransitionError};
pub use storage::{InMemoryStorage, Storage};
