//! Builder for constructing state registries.

use crate::builder::error::BuildError;
use crate::core::{StateChange, StateHooks, StateId, TransitionHandler, DEFAULT_HISTORY_LIMIT};
use crate::registry::StateRegistry;
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Builder for constructing registries with a fluent API.
///
/// Every construction rule is checked by [`validate`](Self::validate), which
/// reports all broken rules at once. [`build`](Self::build) refuses to
/// produce a registry unless validation passes.
///
/// # Example
///
/// ```rust
/// use hookstate::builder::RegistryBuilder;
///
/// let registry = RegistryBuilder::<&str, &str>::new()
///     .states(["Idle", "Running", "Done"])
///     .initial("Idle")
///     .protect("Idle")
///     .context("worker-7")
///     .on_transition(|change| {
///         println!("{:?}: {} -> {}", change.sender, change.previous, change.next)
///     })
///     .build()
///     .unwrap();
///
/// assert_eq!(registry.len(), 3);
/// assert_eq!(registry.protected_state(), Some(&"Idle"));
/// ```
pub struct RegistryBuilder<S: StateId, C = ()> {
    entries: Option<Vec<(S, StateHooks<S, C>)>>,
    initial: Option<S>,
    protected: Option<S>,
    context: Option<C>,
    transition_handlers: Vec<TransitionHandler<S, C>>,
    history_limit: usize,
}

impl<S: StateId, C> RegistryBuilder<S, C> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            entries: None,
            initial: None,
            protected: None,
            context: None,
            transition_handlers: Vec::new(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Declare several states with empty callback lists.
    pub fn states<I>(self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        self.states_with_hooks(states.into_iter().map(|state| (state, StateHooks::new())))
    }

    /// Declare several states paired with pre-built callback lists.
    pub fn states_with_hooks<I>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (S, StateHooks<S, C>)>,
    {
        self.entries.get_or_insert_with(Vec::new).extend(entries);
        self
    }

    /// Declare one state with empty callback lists.
    pub fn state(self, state: S) -> Self {
        self.state_with_hooks(state, StateHooks::new())
    }

    /// Declare one state with pre-built callback lists.
    pub fn state_with_hooks(mut self, state: S, hooks: StateHooks<S, C>) -> Self {
        self.entries
            .get_or_insert_with(Vec::new)
            .push((state, hooks));
        self
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Reserve a state that can never be removed (optional).
    pub fn protect(mut self, state: S) -> Self {
        self.protected = Some(state);
        self
    }

    /// Attach a context object forwarded to every callback (optional).
    pub fn context(mut self, context: C) -> Self {
        self.context = Some(context);
        self
    }

    /// Add a callback fired on every transition (optional).
    pub fn on_transition<F>(mut self, handler: F) -> Self
    where
        F: Fn(&StateChange<'_, S, C>) + Send + Sync + 'static,
    {
        self.transition_handlers.push(Box::new(handler));
        self
    }

    /// Cap the transition history. Zero disables recording.
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Check every construction rule, accumulating ALL violations.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<BuildError>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<BuildError>>> = Vec::new();

        match &self.entries {
            None => checks.push(Validation::fail(BuildError::MissingStates)),
            Some(entries) if entries.is_empty() => {
                checks.push(Validation::fail(BuildError::EmptyStates))
            }
            Some(entries) => {
                let mut seen = HashSet::with_capacity(entries.len());
                for (state, _) in entries {
                    if !seen.insert(state) {
                        checks.push(Validation::fail(BuildError::DuplicateState {
                            state: format!("{state:?}"),
                        }));
                    }
                }
            }
        }

        // Membership is only meaningful once some states are declared.
        let declared = |candidate: &S| match &self.entries {
            Some(entries) if !entries.is_empty() => {
                Some(entries.iter().any(|(state, _)| state == candidate))
            }
            _ => None,
        };

        match &self.initial {
            None => checks.push(Validation::fail(BuildError::MissingInitialState)),
            Some(initial) if declared(initial) == Some(false) => {
                checks.push(Validation::fail(BuildError::UnknownInitialState {
                    state: format!("{initial:?}"),
                }))
            }
            Some(_) => {}
        }

        if let Some(protected) = &self.protected {
            if declared(protected) == Some(false) {
                checks.push(Validation::fail(BuildError::UnknownProtectedState {
                    state: format!("{protected:?}"),
                }));
            }
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// Build the registry.
    /// Returns an error if any construction rule is broken.
    pub fn build(self) -> Result<StateRegistry<S, C>, BuildError> {
        if let Validation::Failure(errors) = self.validate() {
            let mut violations: Vec<BuildError> = errors.iter().cloned().collect();
            let error = if violations.len() == 1 {
                violations.swap_remove(0)
            } else {
                BuildError::Invalid { violations }
            };
            tracing::debug!(%error, "rejected registry configuration");
            return Err(error);
        }

        let entries = self.entries.ok_or(BuildError::MissingStates)?;
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        tracing::debug!(
            states = entries.len(),
            initial = ?initial,
            protected = ?self.protected,
            "built state registry"
        );

        Ok(StateRegistry::from_parts(
            entries,
            initial,
            self.protected,
            self.context,
            self.transition_handlers,
            self.history_limit,
        ))
    }
}

impl<S: StateId, C> Default for RegistryBuilder<S, C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::RegistryError;
    use std::sync::{Arc, Mutex};

    #[test]
    fn builder_requires_states() {
        let result = RegistryBuilder::<&str>::new().initial("Idle").build();

        assert_eq!(result.err(), Some(BuildError::MissingStates));
    }

    #[test]
    fn builder_rejects_empty_collection() {
        let result = RegistryBuilder::<&str>::new()
            .states(Vec::new())
            .initial("Idle")
            .build();

        assert_eq!(result.err(), Some(BuildError::EmptyStates));
    }

    #[test]
    fn builder_requires_initial_state() {
        let result = RegistryBuilder::<&str>::new().states(["Idle"]).build();

        assert_eq!(result.err(), Some(BuildError::MissingInitialState));
    }

    #[test]
    fn builder_rejects_undeclared_initial_state() {
        let result = RegistryBuilder::<&str>::new()
            .states(["Idle", "Running"])
            .initial("Done")
            .build();

        assert_eq!(
            result.err(),
            Some(BuildError::UnknownInitialState {
                state: "\"Done\"".to_string()
            })
        );
    }

    #[test]
    fn builder_rejects_duplicates() {
        let result = RegistryBuilder::<u8>::new()
            .states([1, 2, 2])
            .initial(1)
            .build();

        assert_eq!(
            result.err(),
            Some(BuildError::DuplicateState {
                state: "2".to_string()
            })
        );
    }

    #[test]
    fn builder_rejects_undeclared_protected_state() {
        let result = RegistryBuilder::<u8>::new()
            .states([1, 2])
            .initial(1)
            .protect(9)
            .build();

        assert!(matches!(
            result.err(),
            Some(BuildError::UnknownProtectedState { .. })
        ));
    }

    #[test]
    fn validation_accumulates_all_violations() {
        let builder = RegistryBuilder::<u8>::new()
            .states([1, 1])
            .initial(5)
            .protect(6);

        match builder.validate() {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 3);
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, BuildError::DuplicateState { .. })));
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, BuildError::UnknownInitialState { .. })));
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, BuildError::UnknownProtectedState { .. })));
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }

        let error = builder.build().err().unwrap();
        assert!(matches!(error, BuildError::Invalid { .. }));
        assert_eq!(error.violations().len(), 3);
    }

    #[test]
    fn missing_states_does_not_also_report_unknown_initial() {
        let builder = RegistryBuilder::<u8>::new().initial(1);
        match builder.validate() {
            Validation::Failure(errors) => assert_eq!(errors.len(), 1),
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn valid_configuration_passes_validation() {
        let builder = RegistryBuilder::<&str>::new()
            .state("Idle")
            .state("Running")
            .initial("Running");

        assert!(builder.validate().is_success());

        let registry = builder.build().unwrap();
        assert_eq!(registry.current(), &"Running");
        assert_eq!(registry.protected_state(), None);
    }

    #[test]
    fn protected_state_cannot_be_removed_while_inactive() {
        let mut registry = RegistryBuilder::<&str>::new()
            .states(["Idle", "Running", "Done"])
            .initial("Idle")
            .protect("Done")
            .build()
            .unwrap();

        let result = registry.remove_state(&"Done");

        assert!(matches!(result, Err(RegistryError::ProtectedState { .. })));
        assert_eq!(registry.len(), 3);
        assert!(registry.contains(&"Done"));
        assert!(registry.remove_state(&"Running").is_ok());
    }

    #[test]
    fn protected_and_active_state_reports_protection() {
        let mut registry = RegistryBuilder::<&str>::new()
            .states(["Idle", "Running"])
            .initial("Idle")
            .protect("Idle")
            .build()
            .unwrap();

        assert_eq!(
            registry.remove_state(&"Idle"),
            Err(RegistryError::ProtectedState {
                state: "\"Idle\"".to_string()
            })
        );
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn fluent_api_wires_hooks_and_transition_handlers() {
        let log = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&log);
        let hooks: StateHooks<&str> = StateHooks::new().on_enter(move |previous, _| {
            sink.lock().unwrap().push(format!("enter:Running<-{previous}"))
        });
        let sink = Arc::clone(&log);
        let mut registry = RegistryBuilder::new()
            .state("Idle")
            .state_with_hooks("Running", hooks)
            .initial("Idle")
            .on_transition(move |_| sink.lock().unwrap().push("global".to_string()))
            .history_limit(1)
            .build()
            .unwrap();

        assert_eq!(registry.transition_handler_count(), 1);
        assert_eq!(registry.enter_handler_count(&"Running"), Some(1));

        registry.set_state("Running").unwrap();
        registry.set_state("Idle").unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            vec!["global", "enter:Running<-Idle", "global"]
        );
        assert_eq!(registry.history().len(), 1);
    }
}
