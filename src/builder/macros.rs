//! Macros for ergonomic state machine construction.

/// Generate a `State` implementation for a fieldless enum.
///
/// The enum gets `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `Debug` and the
/// serde traits, so it can also serve as a key of a keyed machine and be
/// persisted by the host. Variants listed under `no_enter` refuse to be
/// entered by guarded transitions; variants under `no_exit` refuse to be
/// left. Both lists are optional.
///
/// # Example
///
/// ```
/// use crossfade::core::{State, StateMachine};
/// use crossfade::state_enum;
///
/// state_enum! {
///     pub enum Phase {
///         Ready,
///         Casting,
///         Locked,
///         Disabled,
///     }
///     no_enter: [Disabled]
///     no_exit: [Locked]
/// }
///
/// let mut machine = StateMachine::new(Phase::Ready);
/// assert!(!machine.try_set_state(Phase::Disabled));
/// assert!(machine.try_set_state(Phase::Locked));
/// assert!(!machine.try_set_state(Phase::Casting));
/// assert_eq!(Phase::Casting.name(), "Casting");
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        $(no_enter: [$($no_enter:ident),* $(,)?])?
        $(no_exit: [$($no_exit:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn can_enter_state(&self) -> bool {
                match self {
                    $($(Self::$no_enter => false,)*)?
                    _ => true,
                }
            }

            fn can_exit_state(&self) -> bool {
                match self {
                    $($(Self::$no_exit => false,)*)?
                    _ => true,
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{KeyedStateMachine, State};

    state_enum! {
        enum TestState {
            Idle,
            Running,
            Dead,
        }
        no_enter: [Idle]
        no_exit: [Dead]
    }

    #[test]
    fn state_enum_macro_generates_trait() {
        assert_eq!(TestState::Running.name(), "Running");
        assert!(!TestState::Idle.can_enter_state());
        assert!(TestState::Idle.can_exit_state());
        assert!(TestState::Dead.can_enter_state());
        assert!(!TestState::Dead.can_exit_state());
    }

    #[test]
    fn state_enum_supports_visibility() {
        state_enum! {
            pub enum PublicState {
                A,
                B,
            }
            no_exit: [B]
        }

        assert!(!PublicState::B.can_exit_state());
    }

    #[test]
    fn state_enum_works_without_guard_lists() {
        state_enum! {
            enum MinimalState {
                One,
                Two,
            }
        }

        assert!(MinimalState::One.can_enter_state());
        assert!(MinimalState::Two.can_exit_state());
    }

    #[test]
    fn state_enum_can_key_a_keyed_machine() {
        let mut machine = KeyedStateMachine::new();
        machine.add(TestState::Running, TestState::Running).unwrap();

        machine.force_set_state_by_key(TestState::Running).unwrap();

        assert_eq!(machine.current_key(), Some(&TestState::Running));
    }

    #[test]
    fn state_enum_serializes() {
        let json = serde_json::to_string(&TestState::Dead).unwrap();
        let restored: TestState = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, TestState::Dead);
    }
}
