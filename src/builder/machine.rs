//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::core::{State, StateMachine};

/// Builder for constructing a [`StateMachine`] with a fluent API.
#[derive(Clone, Debug)]
pub struct StateMachineBuilder<S: State> {
    initial: Option<S>,
    allow_null: bool,
    default_state: Option<S>,
}

impl<S: State> StateMachineBuilder<S> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            allow_null: false,
            default_state: None,
        }
    }

    /// Set the initial state. Required unless null states are allowed.
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Allow the machine to have no current state.
    pub fn allow_null(mut self, allow: bool) -> Self {
        self.allow_null = allow;
        self
    }

    /// Set the state used by `try_reset_default_state` and `force_set_default_state`.
    pub fn default_state(mut self, state: S) -> Self {
        self.default_state = Some(state);
        self
    }

    /// Build the state machine. The initial state is assigned without
    /// running its callbacks.
    pub fn build(self) -> Result<StateMachine<S>, BuildError> {
        let mut machine = match self.initial {
            Some(initial) => StateMachine::new(initial),
            None if self.allow_null => StateMachine::empty(),
            None => return Err(BuildError::MissingInitialState),
        };
        machine.set_allow_null(self.allow_null)?;
        machine.set_default_state(self.default_state);
        Ok(machine)
    }
}

impl<S: State> Default for StateMachineBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}
