//! Hookstate: a generic state registry with transition hooks
//!
//! Hookstate keeps a "current state" value drawn from a registry of declared
//! states, and fires observer callbacks whenever the current state changes.
//! It is meant to be embedded in a larger owner (a game entity, a UI
//! widget, a workflow node) that drives transitions from its own logic.
//!
//! # Core Concepts
//!
//! - **State identifiers**: any `Clone + Eq + Hash + Debug` value via `StateId`
//! - **Hooks**: global, per-state exit and per-state enter callback lists
//! - **Transitions**: validated, all-or-nothing, with a fixed dispatch order
//! - **History**: bounded record of committed transitions
//!
//! There is no transition graph: any registered state can be entered from
//! any other, including itself.
//!
//! # Example
//!
//! ```rust
//! use hookstate::StateRegistry;
//! use std::sync::{Arc, Mutex};
//!
//! let log = Arc::new(Mutex::new(Vec::new()));
//! let mut registry: StateRegistry<&str> =
//!     StateRegistry::from_states(["Idle", "Running", "Done"], "Idle").unwrap();
//!
//! let sink = Arc::clone(&log);
//! registry
//!     .bind_exit(&"Idle", move |_, _| sink.lock().unwrap().push("exit:Idle"))
//!     .unwrap();
//! let sink = Arc::clone(&log);
//! registry
//!     .bind_enter(&"Running", move |_, _| sink.lock().unwrap().push("enter:Running"))
//!     .unwrap();
//! let sink = Arc::clone(&log);
//! registry.bind_transition(move |_| sink.lock().unwrap().push("global"));
//!
//! registry.set_state("Running").unwrap();
//!
//! assert_eq!(*log.lock().unwrap(), vec!["global", "exit:Idle", "enter:Running"]);
//! assert_eq!(registry.current(), &"Running");
//! ```

pub mod builder;
pub mod core;
pub mod registry;

// Re-export commonly used types
pub use builder::{BuildError, RegistryBuilder};
pub use crate::core::{
    Enumerable, HandlerId, StateChange, StateHistory, StateHooks, StateId, StateTransition,
};
pub use registry::{RegistryError, StateRegistry, DEFAULT_STATE};
