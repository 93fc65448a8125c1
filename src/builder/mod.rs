//! Builder API for ergonomic registry construction.
//!
//! This module provides the fluent [`RegistryBuilder`], the construction
//! errors it reports, and the [`state_enum!`](crate::state_enum) macro for
//! declaring closed sets of states with minimal boilerplate.

pub mod error;
pub mod macros;
pub mod registry;

pub use error::BuildError;
pub use registry::RegistryBuilder;
