//! Single-state machine with guarded transitions.

use super::context::StateChange;
use super::error::StateMachineError;
use super::state::State;
use std::any::type_name;

/// Holds one current state and switches it on request.
///
/// Transitions come in three strengths:
///
/// - [`try_set_state`](Self::try_set_state) does nothing if the state is
///   already current, otherwise asks the guards.
/// - [`try_reset_state`](Self::try_reset_state) asks the guards even if the
///   state is already current, so it can re-enter it.
/// - [`force_set_state`](Self::force_set_state) never asks.
///
/// The guards are the current state's `can_exit_state` followed by the
/// candidate's `can_enter_state`; the second is skipped when the first says
/// no. A transition that goes ahead calls `on_exit_state` on the old state,
/// assigns the new one, then calls `on_enter_state` on it. A [`StateChange`]
/// is active throughout.
///
/// The current state may only be null (`None`) if the machine allows it.
///
/// # Example
///
/// ```rust
/// use crossfade::core::{State, StateMachine};
///
/// #[derive(Clone, PartialEq, Debug)]
/// enum Light {
///     Off,
///     On,
/// }
///
/// impl State for Light {
///     fn name(&self) -> &str {
///         match self {
///             Self::Off => "Off",
///             Self::On => "On",
///         }
///     }
/// }
///
/// let mut machine = StateMachine::new(Light::Off);
/// assert!(machine.try_set_state(Light::On));
/// assert_eq!(machine.current_state(), Some(&Light::On));
/// ```
#[derive(Clone, Debug)]
pub struct StateMachine<S> {
    current: Option<S>,
    allow_null: bool,
    default_state: Option<S>,
}

impl<S: State> Default for StateMachine<S> {
    /// Same as [`empty`](StateMachine::empty).
    fn default() -> Self {
        Self::empty()
    }
}

impl<S: State> StateMachine<S> {
    /// Creates a machine already in `initial`. No callbacks run.
    pub fn new(initial: S) -> Self {
        Self {
            current: Some(initial),
            allow_null: false,
            default_state: None,
        }
    }

    /// Creates a machine with a null current state that allows null states.
    pub fn empty() -> Self {
        Self {
            current: None,
            allow_null: true,
            default_state: None,
        }
    }

    pub fn current_state(&self) -> Option<&S> {
        self.current.as_ref()
    }

    /// Whether `state` is the current state.
    pub fn is_in(&self, state: &S) -> bool {
        self.current.as_ref() == Some(state)
    }

    pub fn allows_null(&self) -> bool {
        self.allow_null
    }

    /// Enables or disables null states. Disabling fails while the current
    /// state is null.
    pub fn set_allow_null(&mut self, allow: bool) -> Result<(), StateMachineError> {
        if !allow && self.current.is_none() {
            return Err(StateMachineError::CurrentStateIsNull {
                state_type: type_name::<S>(),
            });
        }
        self.allow_null = allow;
        Ok(())
    }

    pub fn default_state(&self) -> Option<&S> {
        self.default_state.as_ref()
    }

    /// State to fall back to with [`try_reset_default_state`](Self::try_reset_default_state)
    /// and [`force_set_default_state`](Self::force_set_default_state).
    pub fn set_default_state(&mut self, state: Option<S>) {
        self.default_state = state;
    }

    /// Whether the guards would allow switching to `next`. Nothing changes.
    pub fn can_set_state(&self, next: &S) -> bool {
        self.passes_guards(Some(next))
    }

    /// Switches to `next` if the guards allow it. Succeeds without doing
    /// anything if `next` is already current.
    pub fn try_set_state(&mut self, next: S) -> bool {
        if self.is_in(&next) {
            return true;
        }
        self.try_reset_state(next)
    }

    /// Switches to `next` if the guards allow it, re-entering it if it is
    /// already current.
    pub fn try_reset_state(&mut self, next: S) -> bool {
        if !self.passes_guards(Some(&next)) {
            log::trace!(
                "{} rejected transition {} -> {}",
                type_name::<S>(),
                state_name(self.current.as_ref()),
                next.name()
            );
            return false;
        }
        self.change(Some(next));
        true
    }

    /// Switches to `next` without asking any guard.
    pub fn force_set_state(&mut self, next: S) {
        self.change(Some(next));
    }

    /// Whether the current state may be exited to null.
    pub fn can_set_null_state(&self) -> Result<bool, StateMachineError> {
        self.check_null_allowed()?;
        Ok(self.passes_guards(None))
    }

    /// Exits to null if the current state allows it.
    pub fn try_set_null_state(&mut self) -> Result<bool, StateMachineError> {
        self.check_null_allowed()?;
        if self.current.is_none() {
            return Ok(true);
        }
        if !self.passes_guards(None) {
            return Ok(false);
        }
        self.change(None);
        Ok(true)
    }

    /// Exits to null without asking any guard.
    pub fn force_set_null_state(&mut self) -> Result<(), StateMachineError> {
        self.check_null_allowed()?;
        self.change(None);
        Ok(())
    }

    /// Re-enters the default state if the guards allow it.
    pub fn try_reset_default_state(&mut self) -> Result<bool, StateMachineError> {
        let state = self.require_default_state()?;
        Ok(self.try_reset_state(state))
    }

    /// Switches to the default state without asking any guard.
    pub fn force_set_default_state(&mut self) -> Result<(), StateMachineError> {
        let state = self.require_default_state()?;
        self.force_set_state(state);
        Ok(())
    }

    fn require_default_state(&self) -> Result<S, StateMachineError> {
        self.default_state
            .clone()
            .ok_or(StateMachineError::NoDefaultState {
                state_type: type_name::<S>(),
            })
    }

    fn check_null_allowed(&self) -> Result<(), StateMachineError> {
        if self.allow_null {
            Ok(())
        } else {
            Err(StateMachineError::NullStateDisallowed {
                state_type: type_name::<S>(),
            })
        }
    }

    fn passes_guards(&self, next: Option<&S>) -> bool {
        let _scope = StateChange::scope(self.current.clone(), next.cloned());

        if let Some(current) = &self.current {
            if !current.can_exit_state() {
                return false;
            }
        }
        next.map_or(true, |next| next.can_enter_state())
    }

    fn change(&mut self, next: Option<S>) {
        let _scope = StateChange::scope(self.current.clone(), next.clone());

        log::debug!(
            "{} transition {} -> {}",
            type_name::<S>(),
            state_name(self.current.as_ref()),
            state_name(next.as_ref())
        );

        if let Some(previous) = &self.current {
            previous.on_exit_state();
        }
        self.current = next;
        if let Some(current) = &self.current {
            current.on_enter_state();
        }
    }
}

fn state_name<S: State>(state: Option<&S>) -> &str {
    state.map_or("null", |state| state.name())
}
