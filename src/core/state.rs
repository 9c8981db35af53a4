//! The capability set every state machine state provides.

use std::fmt::Debug;

/// Trait for state machine states.
///
/// A state is a plain value the machine stores and compares. The guard
/// methods decide whether a transition may happen and the callbacks run while
/// it happens. While any of them runs, a [`StateChange`](super::StateChange)
/// for this state type is active, so a state can ask where the machine is
/// coming from or going to.
///
/// Every method except [`name`](State::name) has a permissive default.
///
/// # Required Traits
///
/// - `Clone`: the ambient transition context holds copies of both ends
/// - `PartialEq`: `try_set_state` is a no-op when the state is already current
/// - `Debug`: states appear in diagnostics and logs
///
/// # Example
///
/// ```rust
/// use crossfade::core::{State, StateChange};
///
/// #[derive(Clone, PartialEq, Debug)]
/// enum Stance {
///     Standing,
///     Crouching,
///     Prone,
/// }
///
/// impl State for Stance {
///     fn name(&self) -> &str {
///         match self {
///             Self::Standing => "Standing",
///             Self::Crouching => "Crouching",
///             Self::Prone => "Prone",
///         }
///     }
///
///     // Going prone is only possible from a crouch.
///     fn can_enter_state(&self) -> bool {
///         match self {
///             Self::Prone => {
///                 StateChange::<Stance>::previous_state() == Ok(Some(Self::Crouching))
///             }
///             _ => true,
///         }
///     }
/// }
/// ```
pub trait State: Clone + PartialEq + Debug + 'static {
    /// Name used in logs and diagnostics.
    fn name(&self) -> &str;

    /// Whether the machine may switch to this state.
    fn can_enter_state(&self) -> bool {
        true
    }

    /// Whether the machine may leave this state.
    fn can_exit_state(&self) -> bool {
        true
    }

    /// Called after the previous state exited, once this state is current.
    fn on_enter_state(&self) {}

    /// Called while this state is still current, before the next one is assigned.
    fn on_exit_state(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug)]
    enum TestState {
        Open,
        Locked,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Open => "Open",
                Self::Locked => "Locked",
            }
        }

        fn can_exit_state(&self) -> bool {
            !matches!(self, Self::Locked)
        }
    }

    #[test]
    fn state_name_returns_correct_value() {
        assert_eq!(TestState::Open.name(), "Open");
        assert_eq!(TestState::Locked.name(), "Locked");
    }

    #[test]
    fn guards_default_to_permissive() {
        assert!(TestState::Open.can_enter_state());
        assert!(TestState::Open.can_exit_state());
        assert!(TestState::Locked.can_enter_state());
    }

    #[test]
    fn overridden_guard_is_used() {
        assert!(!TestState::Locked.can_exit_state());
    }

    #[test]
    fn state_is_cloneable() {
        let state = TestState::Locked;
        let cloned = state.clone();
        assert_eq!(state, cloned);
    }
}
