//! Builder API for ergonomic state machine construction.
//!
//! This module provides fluent builders and the [`state_enum!`](crate::state_enum)
//! macro for creating state machines with minimal boilerplate.

pub mod error;
pub mod keyed;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use keyed::KeyedStateMachineBuilder;
pub use machine::StateMachineBuilder;

/// Build a keyed machine whose states are their own keys.
///
/// Handy with [`state_enum!`](crate::state_enum) types, where the state value
/// is already a good key. Without an `initial` state the machine starts null
/// and allows null states.
///
/// # Example
///
/// ```
/// use crossfade::builder::self_keyed;
/// use crossfade::state_enum;
///
/// state_enum! {
///     enum Gait {
///         Walk,
///         Run,
///     }
/// }
///
/// let mut machine = self_keyed([Gait::Walk, Gait::Run], Some(Gait::Walk)).unwrap();
/// assert!(machine.try_set_state_by_key(Gait::Run).unwrap());
/// ```
pub fn self_keyed<S>(
    states: impl IntoIterator<Item = S>,
    initial: Option<S>,
) -> Result<crate::core::KeyedStateMachine<S, S>, BuildError>
where
    S: crate::core::State + Eq + std::hash::Hash,
{
    let builder = KeyedStateMachineBuilder::new()
        .states(states.into_iter().map(|state| (state.clone(), state)));
    match initial {
        Some(key) => builder.initial_key(key).build(),
        None => builder.allow_null(true).build(),
    }
}
