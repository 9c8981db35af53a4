//! Usage errors raised by state machines.

use thiserror::Error;

/// Errors that indicate a state machine was used incorrectly.
///
/// A guard rejecting a transition is not an error; those calls return `false`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateMachineError {
    #[error("Cannot set a null {state_type}: this machine does not allow null states. Enable them with `set_allow_null(true)`")]
    NullStateDisallowed { state_type: &'static str },

    #[error("Cannot disallow null {state_type} states while the current state is null")]
    CurrentStateIsNull { state_type: &'static str },

    #[error("No default {state_type} has been set")]
    NoDefaultState { state_type: &'static str },

    #[error("No state is registered for key {key}")]
    UnknownKey { key: String },

    #[error("A state is already registered for key {key}")]
    DuplicateKey { key: String },

    #[error("{requested} is only available during a transition. Active transition contexts: {active}")]
    InactiveContext {
        requested: &'static str,
        active: String,
    },
}
