//! Core building blocks shared by the registry and its builder.
//!
//! This module contains:
//! - State identifier traits (`StateId`, `Enumerable`)
//! - Multicast callback lists and their payloads
//! - Bounded transition history

mod handler;
mod history;
mod state;

pub(crate) use handler::HandlerList;
pub use handler::{HandlerId, StateChange, StateHandler, StateHooks, TransitionHandler};
pub use history::{StateHistory, StateTransition, DEFAULT_HISTORY_LIMIT};
pub use state::{Enumerable, StateId};
