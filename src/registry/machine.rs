//! State registry that dispatches transition callbacks.

use crate::builder::{BuildError, RegistryBuilder};
use crate::core::{
    Enumerable, HandlerId, HandlerList, StateChange, StateHistory, StateHooks, StateId,
    StateTransition, DEFAULT_HISTORY_LIMIT,
};
use crate::registry::error::RegistryError;
use chrono::Utc;
use std::collections::HashMap;
use std::fmt;

/// Identifier pre-registered by [`StateRegistry::new`]. It can never be removed.
pub const DEFAULT_STATE: &str = "Default";

type StateCallback<S, C> = dyn Fn(&S, Option<&C>) + Send + Sync;
type TransitionCallback<S, C> = dyn Fn(&StateChange<'_, S, C>) + Send + Sync;

#[derive(Clone, Copy, Debug)]
enum HookKind {
    Exit,
    Enter,
}

/// Callback lists owned by one registered state.
struct StateEntry<S, C> {
    on_exit: HandlerList<StateCallback<S, C>>,
    on_enter: HandlerList<StateCallback<S, C>>,
}

impl<S, C> StateEntry<S, C> {
    fn new() -> Self {
        Self {
            on_exit: HandlerList::new(),
            on_enter: HandlerList::new(),
        }
    }

    fn hooks(&self, kind: HookKind) -> &HandlerList<StateCallback<S, C>> {
        match kind {
            HookKind::Exit => &self.on_exit,
            HookKind::Enter => &self.on_enter,
        }
    }

    fn hooks_mut(&mut self, kind: HookKind) -> &mut HandlerList<StateCallback<S, C>> {
        match kind {
            HookKind::Exit => &mut self.on_exit,
            HookKind::Enter => &mut self.on_enter,
        }
    }
}

/// Registry of declared states with a validated current state.
///
/// The current state is always one of the registered states. Transitions
/// fire callbacks synchronously in a fixed order:
///
/// 1. every global transition callback, with `(next, previous)`
/// 2. every exit callback of the previous state, with `next`
/// 3. every enter callback of the next state, with `previous`
///
/// The state change is committed before any callback runs. A panicking
/// callback unwinds through [`set_state`](Self::set_state) and the remaining
/// callbacks are skipped.
///
/// # Example
///
/// ```rust
/// use hookstate::StateRegistry;
///
/// let mut registry: StateRegistry<&str> =
///     StateRegistry::from_states(["Idle", "Running", "Done"], "Idle").unwrap();
///
/// registry
///     .bind_enter(&"Running", |previous, _| println!("started from {previous}"))
///     .unwrap();
///
/// registry.set_state("Running").unwrap();
/// assert_eq!(registry.current(), &"Running");
/// assert!(registry.set_state("Paused").is_err());
/// ```
pub struct StateRegistry<S: StateId, C = ()> {
    states: HashMap<S, StateEntry<S, C>>,
    current: S,
    protected: Option<S>,
    context: Option<C>,
    on_transition: HandlerList<TransitionCallback<S, C>>,
    history: StateHistory<S>,
    next_handler: u64,
}

impl<C> StateRegistry<String, C> {
    /// Create a registry holding only [`DEFAULT_STATE`], which is current
    /// and protected from removal.
    pub fn new() -> Self {
        let default = DEFAULT_STATE.to_string();
        let mut registry = Self::empty(
            default.clone(),
            Some(default.clone()),
            None,
            DEFAULT_HISTORY_LIMIT,
        );
        registry.insert_entry(default, StateHooks::new());
        registry
    }
}

impl<C> Default for StateRegistry<String, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: StateId, C> StateRegistry<S, C> {
    /// Start building a registry.
    pub fn builder() -> RegistryBuilder<S, C> {
        RegistryBuilder::new()
    }

    /// Create a registry from a collection of states and an initial state.
    ///
    /// Fails when the collection is empty, contains duplicates, or does not
    /// contain `initial`.
    pub fn from_states<I>(states: I, initial: S) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = S>,
    {
        RegistryBuilder::new().states(states).initial(initial).build()
    }

    /// Create a registry from states paired with pre-built callback lists.
    pub fn from_states_with_hooks<I>(entries: I, initial: S) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = (S, StateHooks<S, C>)>,
    {
        RegistryBuilder::new()
            .states_with_hooks(entries)
            .initial(initial)
            .build()
    }

    /// Assemble a registry from parts that have already been validated.
    pub(crate) fn from_parts(
        entries: Vec<(S, StateHooks<S, C>)>,
        initial: S,
        protected: Option<S>,
        context: Option<C>,
        transition_handlers: Vec<Box<TransitionCallback<S, C>>>,
        history_limit: usize,
    ) -> Self {
        let mut registry = Self::empty(initial, protected, context, history_limit);
        for (state, hooks) in entries {
            registry.insert_entry(state, hooks);
        }
        for handler in transition_handlers {
            let id = registry.allocate_id();
            registry.on_transition.push(id, handler);
        }
        registry
    }

    fn empty(initial: S, protected: Option<S>, context: Option<C>, history_limit: usize) -> Self {
        Self {
            states: HashMap::new(),
            current: initial,
            protected,
            context,
            on_transition: HandlerList::new(),
            history: StateHistory::with_limit(history_limit),
            next_handler: 0,
        }
    }

    fn allocate_id(&mut self) -> HandlerId {
        let id = HandlerId::new(self.next_handler);
        self.next_handler += 1;
        id
    }

    fn insert_entry(&mut self, state: S, hooks: StateHooks<S, C>) {
        let mut entry = StateEntry::new();
        for handler in hooks.on_exit {
            let id = self.allocate_id();
            entry.on_exit.push(id, handler);
        }
        for handler in hooks.on_enter {
            let id = self.allocate_id();
            entry.on_enter.push(id, handler);
        }
        self.states.insert(state, entry);
    }

    /// Register a new state with empty callback lists.
    pub fn add_state(&mut self, state: S) -> Result<(), RegistryError> {
        self.add_state_with_hooks(state, StateHooks::new())
    }

    /// Register a new state with pre-built callback lists.
    pub fn add_state_with_hooks(
        &mut self,
        state: S,
        hooks: StateHooks<S, C>,
    ) -> Result<(), RegistryError> {
        if self.states.contains_key(&state) {
            tracing::debug!(state = ?state, "rejected duplicate state registration");
            return Err(RegistryError::duplicate(&state));
        }

        tracing::debug!(
            state = ?state,
            on_exit = hooks.exit_count(),
            on_enter = hooks.enter_count(),
            "registered state"
        );
        self.insert_entry(state, hooks);
        Ok(())
    }

    /// Remove a registered state and drop its callbacks.
    ///
    /// The active state and the protected state can never be removed.
    pub fn remove_state(&mut self, state: &S) -> Result<(), RegistryError> {
        let rejection = if !self.states.contains_key(state) {
            Some(RegistryError::unknown(state))
        } else if self.protected.as_ref() == Some(state) {
            Some(RegistryError::ProtectedState {
                state: format!("{state:?}"),
            })
        } else if self.current == *state {
            Some(RegistryError::ActiveState {
                state: format!("{state:?}"),
            })
        } else {
            None
        };

        if let Some(error) = rejection {
            tracing::debug!(state = ?state, %error, "rejected state removal");
            return Err(error);
        }

        if let Some(entry) = self.states.remove(state) {
            tracing::debug!(
                state = ?state,
                dropped_exit = entry.on_exit.len(),
                dropped_enter = entry.on_enter.len(),
                "removed state"
            );
        }
        Ok(())
    }

    /// Bind a callback fired on every transition.
    pub fn bind_transition<F>(&mut self, handler: F) -> HandlerId
    where
        F: Fn(&StateChange<'_, S, C>) + Send + Sync + 'static,
    {
        let id = self.allocate_id();
        self.on_transition.push(id, Box::new(handler));
        id
    }

    /// Unbind a global transition callback. Unknown ids are ignored.
    pub fn unbind_transition(&mut self, id: HandlerId) {
        if !self.on_transition.remove(id) {
            tracing::trace!(%id, "unbind of unknown transition handler ignored");
        }
    }

    /// Bind a callback fired when `state` is left. It receives the next state.
    pub fn bind_exit<F>(&mut self, state: &S, handler: F) -> Result<HandlerId, RegistryError>
    where
        F: Fn(&S, Option<&C>) + Send + Sync + 'static,
    {
        self.bind_state_hook(state, HookKind::Exit, Box::new(handler))
    }

    /// Unbind an exit callback of `state`.
    pub fn unbind_exit(&mut self, state: &S, id: HandlerId) -> Result<(), RegistryError> {
        self.unbind_state_hook(state, HookKind::Exit, id)
    }

    /// Bind a callback fired when `state` is entered. It receives the
    /// previous state.
    pub fn bind_enter<F>(&mut self, state: &S, handler: F) -> Result<HandlerId, RegistryError>
    where
        F: Fn(&S, Option<&C>) + Send + Sync + 'static,
    {
        self.bind_state_hook(state, HookKind::Enter, Box::new(handler))
    }

    /// Unbind an enter callback of `state`.
    pub fn unbind_enter(&mut self, state: &S, id: HandlerId) -> Result<(), RegistryError> {
        self.unbind_state_hook(state, HookKind::Enter, id)
    }

    fn bind_state_hook(
        &mut self,
        state: &S,
        kind: HookKind,
        handler: Box<StateCallback<S, C>>,
    ) -> Result<HandlerId, RegistryError> {
        if !self.states.contains_key(state) {
            tracing::debug!(state = ?state, ?kind, "rejected bind on unregistered state");
            return Err(RegistryError::unknown(state));
        }

        let id = self.allocate_id();
        if let Some(entry) = self.states.get_mut(state) {
            entry.hooks_mut(kind).push(id, handler);
        }
        Ok(id)
    }

    fn unbind_state_hook(
        &mut self,
        state: &S,
        kind: HookKind,
        id: HandlerId,
    ) -> Result<(), RegistryError> {
        let Some(entry) = self.states.get_mut(state) else {
            tracing::debug!(state = ?state, ?kind, "rejected unbind on unregistered state");
            return Err(RegistryError::unknown(state));
        };

        if !entry.hooks_mut(kind).remove(id) {
            tracing::trace!(state = ?state, ?kind, %id, "unbind of unknown handler ignored");
        }
        Ok(())
    }

    /// Transition to `next`, using the registry's context as the sender.
    ///
    /// Fails without changing anything or firing any callback when `next`
    /// is not registered. Transitioning to the current state is allowed and
    /// fires every callback group.
    pub fn set_state(&mut self, next: S) -> Result<(), RegistryError> {
        self.transition(next, None)
    }

    /// Transition to `next`, passing `sender` to callbacks for this
    /// transition instead of the registry's context.
    pub fn set_state_as(&mut self, sender: &C, next: S) -> Result<(), RegistryError> {
        self.transition(next, Some(sender))
    }

    fn transition(&mut self, next: S, sender: Option<&C>) -> Result<(), RegistryError> {
        if !self.states.contains_key(&next) {
            tracing::debug!(to = ?next, "rejected transition to unregistered state");
            return Err(RegistryError::unknown(&next));
        }

        let previous = std::mem::replace(&mut self.current, next);
        self.history.record(StateTransition {
            from: previous.clone(),
            to: self.current.clone(),
            timestamp: Utc::now(),
        });

        tracing::debug!(
            from = ?previous,
            to = ?self.current,
            global = self.on_transition.len(),
            "state transition"
        );

        let sender = sender.or(self.context.as_ref());
        let change = StateChange {
            next: &self.current,
            previous: &previous,
            sender,
        };
        for handler in self.on_transition.iter() {
            handler(&change);
        }

        if let Some(entry) = self.states.get(&previous) {
            for handler in entry.hooks(HookKind::Exit).iter() {
                handler(&self.current, sender);
            }
        }

        if let Some(entry) = self.states.get(&self.current) {
            for handler in entry.hooks(HookKind::Enter).iter() {
                handler(&previous, sender);
            }
        }

        Ok(())
    }

    /// The active state.
    pub fn current(&self) -> &S {
        &self.current
    }

    /// All registered states, in no particular order.
    pub fn states(&self) -> impl Iterator<Item = &S> {
        self.states.keys()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always false: a registry holds at least its current state.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn contains(&self, state: &S) -> bool {
        self.states.contains_key(state)
    }

    /// The state that can never be removed, if any.
    pub fn protected_state(&self) -> Option<&S> {
        self.protected.as_ref()
    }

    /// The context object supplied at construction.
    pub fn context(&self) -> Option<&C> {
        self.context.as_ref()
    }

    pub fn history(&self) -> &StateHistory<S> {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn transition_handler_count(&self) -> usize {
        self.on_transition.len()
    }

    /// Number of exit callbacks bound to `state`, or `None` if unregistered.
    pub fn exit_handler_count(&self, state: &S) -> Option<usize> {
        self.states.get(state).map(|entry| entry.on_exit.len())
    }

    /// Number of enter callbacks bound to `state`, or `None` if unregistered.
    pub fn enter_handler_count(&self, state: &S) -> Option<usize> {
        self.states.get(state).map(|entry| entry.on_enter.len())
    }
}

impl<S: Enumerable, C> StateRegistry<S, C> {
    /// Create a registry holding every value of a closed enumeration.
    pub fn from_enum(initial: S) -> Result<Self, BuildError> {
        Self::from_states(S::all(), initial)
    }
}

impl<S: StateId, C> fmt::Debug for StateRegistry<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateRegistry")
            .field("current", &self.current)
            .field("states", &self.states.keys().collect::<Vec<_>>())
            .field("protected", &self.protected)
            .field("transition_handlers", &self.on_transition.len())
            .field("history", &self.history.len())
            .finish()
    }
}
