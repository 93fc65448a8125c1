//! Runtime registry errors.

use thiserror::Error;

/// Errors returned by non-fatal registry operations.
///
/// Every operation that returns one of these leaves the registry exactly as
/// it was before the call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("State {state} is not registered")]
    UnknownState { state: String },

    #[error("State {state} is already registered")]
    DuplicateState { state: String },

    #[error("State {state} is active and cannot be removed")]
    ActiveState { state: String },

    #[error("State {state} is protected and cannot be removed")]
    ProtectedState { state: String },
}

impl RegistryError {
    // Identifiers render with Debug: strings keep one pair of quotes.
    pub(crate) fn unknown(state: &impl std::fmt::Debug) -> Self {
        Self::UnknownState {
            state: format!("{state:?}"),
        }
    }

    pub(crate) fn duplicate(state: &impl std::fmt::Debug) -> Self {
        Self::DuplicateState {
            state: format!("{state:?}"),
        }
    }
}
