//! State machine addressed by external keys.

use super::context::KeyChange;
use super::error::StateMachineError;
use super::machine::StateMachine;
use super::state::State;
use rustc_hash::FxHashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// A [`StateMachine`] whose states are registered under keys and requested
/// by key.
///
/// Every by-key transition runs inside a [`KeyChange`] for `K`, so the
/// states' guards and callbacks can see which keys are involved alongside the
/// usual [`StateChange`](super::StateChange). The current key only moves when
/// the underlying transition happens.
///
/// ```rust
/// use crossfade::core::{KeyedStateMachine, State};
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Clip(&'static str);
///
/// impl State for Clip {
///     fn name(&self) -> &str {
///         self.0
///     }
/// }
///
/// let mut machine = KeyedStateMachine::new();
/// machine.add("idle", Clip("idle.anim")).unwrap();
/// machine.add("walk", Clip("walk.anim")).unwrap();
///
/// machine.force_set_state_by_key("idle").unwrap();
/// assert!(machine.try_set_state_by_key("walk").unwrap());
/// assert_eq!(machine.current_key(), Some(&"walk"));
/// ```
#[derive(Clone, Debug)]
pub struct KeyedStateMachine<K, S> {
    states: FxHashMap<K, S>,
    current_key: Option<K>,
    machine: StateMachine<S>,
}

impl<K, S> Default for KeyedStateMachine<K, S>
where
    K: Clone + Eq + Hash + Debug + 'static,
    S: State,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, S> KeyedStateMachine<K, S>
where
    K: Clone + Eq + Hash + Debug + 'static,
    S: State,
{
    /// Creates a machine with no states and no current key.
    ///
    /// It starts null, so null states are allowed until the first transition
    /// makes [`set_allow_null(false)`](Self::set_allow_null) possible.
    pub fn new() -> Self {
        Self {
            states: FxHashMap::default(),
            current_key: None,
            machine: StateMachine::empty(),
        }
    }

    /// Registers `state` under `key`.
    pub fn add(&mut self, key: K, state: S) -> Result<(), StateMachineError> {
        if self.states.contains_key(&key) {
            return Err(StateMachineError::DuplicateKey {
                key: format!("{key:?}"),
            });
        }
        self.states.insert(key, state);
        Ok(())
    }

    /// Unregisters `key`. The current state is left as it is.
    pub fn remove(&mut self, key: &K) -> Option<S> {
        self.states.remove(key)
    }

    pub fn get(&self, key: &K) -> Option<&S> {
        self.states.get(key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.states.contains_key(key)
    }

    /// Registered keys, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.states.keys()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn current_key(&self) -> Option<&K> {
        self.current_key.as_ref()
    }

    pub fn current_state(&self) -> Option<&S> {
        self.machine.current_state()
    }

    /// The underlying machine.
    pub fn machine(&self) -> &StateMachine<S> {
        &self.machine
    }

    /// See [`StateMachine::set_allow_null`].
    pub fn set_allow_null(&mut self, allow: bool) -> Result<(), StateMachineError> {
        self.machine.set_allow_null(allow)
    }

    /// Whether the guards would allow switching to the state under `key`.
    pub fn can_set_state_by_key(&self, key: &K) -> Result<bool, StateMachineError> {
        let state = self.resolve(key)?;
        let _scope = KeyChange::scope(self.current_key.clone(), Some(key.clone()));
        Ok(self.machine.can_set_state(state))
    }

    /// Switches to the state under `key` if the guards allow it. Succeeds
    /// without doing anything if `key` is already current.
    pub fn try_set_state_by_key(&mut self, key: K) -> Result<bool, StateMachineError> {
        if self.current_key.as_ref() == Some(&key) {
            return Ok(true);
        }
        let state = self.resolve(&key)?.clone();
        let _scope = KeyChange::scope(self.current_key.clone(), Some(key.clone()));

        let changed = self.machine.try_set_state(state);
        if changed {
            self.current_key = Some(key);
        }
        Ok(changed)
    }

    /// Switches to the state under `key` if the guards allow it, re-entering
    /// it if it is already current.
    pub fn try_reset_state_by_key(&mut self, key: K) -> Result<bool, StateMachineError> {
        let state = self.resolve(&key)?.clone();
        let _scope = KeyChange::scope(self.current_key.clone(), Some(key.clone()));

        let changed = self.machine.try_reset_state(state);
        if changed {
            self.current_key = Some(key);
        }
        Ok(changed)
    }

    /// Switches to the state under `key` without asking any guard.
    pub fn force_set_state_by_key(&mut self, key: K) -> Result<(), StateMachineError> {
        let state = self.resolve(&key)?.clone();
        let _scope = KeyChange::scope(self.current_key.clone(), Some(key.clone()));

        self.machine.force_set_state(state);
        self.current_key = Some(key);
        Ok(())
    }

    /// Exits to null if the current state allows it, clearing the current key.
    pub fn try_set_null_state(&mut self) -> Result<bool, StateMachineError> {
        let _scope = KeyChange::scope(self.current_key.clone(), None);

        let changed = self.machine.try_set_null_state()?;
        if changed {
            self.current_key = None;
        }
        Ok(changed)
    }

    /// Exits to null without asking any guard, clearing the current key.
    pub fn force_set_null_state(&mut self) -> Result<(), StateMachineError> {
        let _scope = KeyChange::scope(self.current_key.clone(), None);

        self.machine.force_set_null_state()?;
        self.current_key = None;
        Ok(())
    }

    /// Puts the machine in the state under `key` without running callbacks.
    pub(crate) fn initialize(&mut self, key: K) -> Result<(), StateMachineError> {
        let state = self.resolve(&key)?.clone();
        let allow_null = self.machine.allows_null();
        self.machine = StateMachine::new(state);
        self.machine.set_allow_null(allow_null)?;
        self.current_key = Some(key);
        Ok(())
    }

    fn resolve(&self, key: &K) -> Result<&S, StateMachineError> {
        self.states
            .get(key)
            .ok_or_else(|| StateMachineError::UnknownKey {
                key: format!("{key:?}"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StateChange;
    use std::cell::RefCell;

    thread_local! {
        static SEEN: RefCell<Vec<(Option<u8>, Option<u8>)>> = const { RefCell::new(Vec::new()) };
    }

    #[derive(Clone, PartialEq, Debug)]
    struct Pose {
        name: &'static str,
        locked: bool,
    }

    impl Pose {
        fn new(name: &'static str) -> Self {
            Self {
                name,
                locked: false,
            }
        }
    }

    impl State for Pose {
        fn name(&self) -> &str {
            self.name
        }

        fn can_exit_state(&self) -> bool {
            !self.locked
        }

        fn on_enter_state(&self) {
            let keys = KeyChange::<u8>::current().unwrap();
            assert!(StateChange::<Pose>::is_active());
            SEEN.with(|seen| seen.borrow_mut().push((keys.previous, keys.next)));
        }
    }

    fn machine() -> KeyedStateMachine<u8, Pose> {
        let mut machine = KeyedStateMachine::new();
        machine.add(1, Pose::new("stand")).unwrap();
        machine.add(2, Pose::new("sit")).unwrap();
        machine.add(
            3,
            Pose {
                name: "stuck",
                locked: true,
            },
        )
        .unwrap();
        machine
    }

    #[test]
    fn duplicate_key_is_rejected() {
        let mut machine = machine();

        let result = machine.add(1, Pose::new("other"));

        assert_eq!(
            result,
            Err(StateMachineError::DuplicateKey {
                key: "1".to_string()
            })
        );
        assert_eq!(machine.get(&1), Some(&Pose::new("stand")));
    }

    #[test]
    fn unknown_key_is_an_error() {
        let mut machine = machine();

        assert!(matches!(
            machine.try_set_state_by_key(9),
            Err(StateMachineError::UnknownKey { .. })
        ));
        assert!(machine.current_key().is_none());
    }

    #[test]
    fn key_context_is_visible_to_callbacks() {
        let mut machine = machine();

        machine.force_set_state_by_key(1).unwrap();
        machine.try_set_state_by_key(2).unwrap();

        let seen = SEEN.with(|seen| seen.borrow().clone());
        assert_eq!(seen, vec![(None, Some(1)), (Some(1), Some(2))]);
        assert!(!KeyChange::<u8>::is_active());
    }

    #[test]
    fn rejected_transition_keeps_key() {
        let mut machine = machine();
        machine.force_set_state_by_key(3).unwrap();

        assert_eq!(machine.can_set_state_by_key(&1), Ok(false));
        assert_eq!(machine.try_set_state_by_key(1), Ok(false));

        assert_eq!(machine.current_key(), Some(&3));
        assert_eq!(machine.current_state().map(|pose| pose.name), Some("stuck"));
    }

    #[test]
    fn try_reset_reenters_same_key() {
        let mut machine = machine();
        machine.force_set_state_by_key(1).unwrap();

        assert_eq!(machine.try_reset_state_by_key(1), Ok(true));

        let seen = SEEN.with(|seen| seen.borrow().clone());
        assert_eq!(seen.last(), Some(&(Some(1), Some(1))));
    }

    #[test]
    fn null_state_clears_key() {
        let mut machine = machine();
        machine.force_set_state_by_key(1).unwrap();
        machine.set_allow_null(false).unwrap();
        assert!(machine.force_set_null_state().is_err());

        machine.set_allow_null(true).unwrap();
        machine.force_set_null_state().unwrap();

        assert!(machine.current_key().is_none());
        assert!(machine.current_state().is_none());
    }

    #[test]
    fn new_machine_starts_null_with_null_allowed() {
        let mut machine = machine();

        assert!(machine.current_state().is_none());
        assert!(machine.machine().allows_null());
        assert!(machine.set_allow_null(false).is_err());
    }

    #[test]
    fn remove_keeps_current_state() {
        let mut machine = machine();
        machine.force_set_state_by_key(2).unwrap();

        assert_eq!(machine.remove(&2), Some(Pose::new("sit")));

        assert!(!machine.contains_key(&2));
        assert_eq!(machine.current_state(), Some(&Pose::new("sit")));
        assert_eq!(machine.len(), 2);
    }
}
