//! Declaration API: build an immutable machine definition.
//!
//! A machine type is configured once — states, permitted transitions,
//! guards, and callbacks — and the resulting [`MachineDef`] is shared
//! read-only by every machine instance.

pub mod definition;
pub mod error;
pub mod machine;

pub use definition::MachineDef;
pub use error::DefinitionError;
pub use machine::DefinitionBuilder;
