//! Callback lists fired on state transitions.
//!
//! Every list starts empty and invoking an empty list is a no-op, so a
//! registry never has to guard against a missing observer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle identifying one bound callback.
///
/// Returned by every `bind_*` operation and accepted by the matching
/// `unbind_*` operation. Ids are unique within the registry that issued them.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct HandlerId(u64);

impl HandlerId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "handler#{}", self.0)
    }
}

/// Payload handed to global transition callbacks.
///
/// `sender` is the registry's context object, or the sender passed to
/// `set_state_as` for that one transition.
#[derive(Debug)]
pub struct StateChange<'a, S, C = ()> {
    /// The state that is now active
    pub next: &'a S,
    /// The state that was active before the transition
    pub previous: &'a S,
    /// Owner of the registry, if one was supplied
    pub sender: Option<&'a C>,
}

impl<S: PartialEq, C> StateChange<'_, S, C> {
    /// True when the registry transitioned to the state it was already in.
    pub fn is_self_transition(&self) -> bool {
        self.next == self.previous
    }
}

/// Callback fired on every transition.
pub type TransitionHandler<S, C> = Box<dyn Fn(&StateChange<'_, S, C>) + Send + Sync>;

/// Callback fired when leaving or entering one particular state.
///
/// Exit callbacks receive the state being entered; enter callbacks receive
/// the state being left.
pub type StateHandler<S, C> = Box<dyn Fn(&S, Option<&C>) + Send + Sync>;

/// Ordered multicast list of callbacks keyed by [`HandlerId`].
pub(crate) struct HandlerList<F: ?Sized> {
    entries: Vec<(HandlerId, Box<F>)>,
}

impl<F: ?Sized> HandlerList<F> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, id: HandlerId, handler: Box<F>) {
        self.entries.push((id, handler));
    }

    /// Remove the callback bound under `id`. Returns false when absent.
    pub(crate) fn remove(&mut self, id: HandlerId) -> bool {
        match self.entries.iter().position(|(bound, _)| *bound == id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &F> {
        self.entries.iter().map(|(_, handler)| handler.as_ref())
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<F: ?Sized> Default for HandlerList<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Pre-built enter and exit callback lists for one state.
///
/// Handed to `add_state_with_hooks` or to the registry builder. The
/// callbacks receive fresh [`HandlerId`]s when the state is registered.
///
/// # Example
///
/// ```rust
/// use hookstate::core::StateHooks;
///
/// let hooks: StateHooks<&str> = StateHooks::new()
///     .on_enter(|previous, _| println!("entered from {previous}"))
///     .on_exit(|next, _| println!("leaving for {next}"));
///
/// assert_eq!(hooks.enter_count(), 1);
/// assert_eq!(hooks.exit_count(), 1);
/// ```
pub struct StateHooks<S, C = ()> {
    pub(crate) on_exit: Vec<StateHandler<S, C>>,
    pub(crate) on_enter: Vec<StateHandler<S, C>>,
}

impl<S, C> StateHooks<S, C> {
    /// Create an empty set of hooks.
    pub fn new() -> Self {
        Self {
            on_exit: Vec::new(),
            on_enter: Vec::new(),
        }
    }

    /// Add a callback fired when the state is left.
    pub fn on_exit<F>(mut self, handler: F) -> Self
    where
        F: Fn(&S, Option<&C>) + Send + Sync + 'static,
    {
        self.on_exit.push(Box::new(handler));
        self
    }

    /// Add a callback fired when the state is entered.
    pub fn on_enter<F>(mut self, handler: F) -> Self
    where
        F: Fn(&S, Option<&C>) + Send + Sync + 'static,
    {
        self.on_enter.push(Box::new(handler));
        self
    }

    pub fn exit_count(&self) -> usize {
        self.on_exit.len()
    }

    pub fn enter_count(&self) -> usize {
        self.on_enter.len()
    }
}

impl<S, C> Default for StateHooks<S, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, C> fmt::Debug for StateHooks<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateHooks")
            .field("on_exit", &self.on_exit.len())
            .field("on_enter", &self.on_enter.len())
            .finish()
    }
}
