//! The state registry and transition dispatcher.
//!
//! A [`StateRegistry`] owns the declared states, the callbacks bound to
//! them, and the current state. It is single-threaded by contract: callers
//! that share one across threads serialize access themselves, for example
//! behind a `Mutex`.

mod error;
mod machine;

pub use error::RegistryError;
pub use machine::{StateRegistry, DEFAULT_STATE};
