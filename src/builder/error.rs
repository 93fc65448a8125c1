//! Build errors for registry construction.

use thiserror::Error;

/// Errors that prevent a registry from being constructed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("No states supplied. Call .states(..) or .state(..) before .build()")]
    MissingStates,

    #[error("State collection is empty. Declare at least one state")]
    EmptyStates,

    #[error("State {state} is declared more than once")]
    DuplicateState { state: String },

    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("Initial state {state} is not one of the declared states")]
    UnknownInitialState { state: String },

    #[error("Protected state {state} is not one of the declared states")]
    UnknownProtectedState { state: String },

    #[error("Registry configuration has {} errors", .violations.len())]
    Invalid { violations: Vec<BuildError> },
}

impl BuildError {
    /// The individual violations behind this error.
    pub fn violations(&self) -> Vec<&BuildError> {
        match self {
            Self::Invalid { violations } => violations.iter().collect(),
            other => vec![other],
        }
    }
}
