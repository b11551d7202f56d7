//! Runtime API: drive a subject through its declared graph.

pub mod error;
pub mod machine;

pub use error::TransitionError;
pub use machine::Machine;
