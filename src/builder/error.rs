//! Build errors for the state machine builders.

use crate::core::StateMachineError;
use thiserror::Error;

/// Errors that can occur when building state machines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) or .allow_null(true) before .build()")]
    MissingInitialState,

    #[error("State key {key} was registered twice")]
    DuplicateKey { key: String },

    #[error("Initial key {key} has no registered state. Call .state(key, state) for it")]
    UnknownInitialKey { key: String },

    #[error(transparent)]
    Machine(#[from] StateMachineError),
}
