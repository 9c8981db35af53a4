//! Builder for constructing keyed state machines.

use crate::builder::error::BuildError;
use crate::core::{KeyedStateMachine, State};
use std::fmt::Debug;
use std::hash::Hash;

/// Builder for constructing a [`KeyedStateMachine`] with a fluent API.
///
/// Registration problems are reported by [`build`](Self::build),
/// so the chain itself never fails.
#[derive(Clone, Debug)]
pub struct KeyedStateMachineBuilder<K, S> {
    states: Vec<(K, S)>,
    initial_key: Option<K>,
    allow_null: bool,
}

impl<K, S> KeyedStateMachineBuilder<K, S>
where
    K: Clone + Eq + Hash + Debug + 'static,
    S: State,
{
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            initial_key: None,
            allow_null: false,
        }
    }

    /// Register `state` under `key`.
    pub fn state(mut self, key: K, state: S) -> Self {
        self.states.push((key, state));
        self
    }

    /// Register several states at once.
    pub fn states(mut self, states: impl IntoIterator<Item = (K, S)>) -> Self {
        self.states.extend(states);
        self
    }

    /// Key of the state the machine starts in. Required unless null states
    /// are allowed, in which case the machine may start null.
    pub fn initial_key(mut self, key: K) -> Self {
        self.initial_key = Some(key);
        self
    }

    pub fn allow_null(mut self, allow: bool) -> Self {
        self.allow_null = allow;
        self
    }

    /// Build the machine. The initial state is assigned without running its
    /// callbacks.
    pub fn build(self) -> Result<KeyedStateMachine<K, S>, BuildError> {
        let mut machine = KeyedStateMachine::new();

        for (key, state) in self.states {
            if machine.contains_key(&key) {
                return Err(BuildError::DuplicateKey {
                    key: format!("{key:?}"),
                });
            }
            machine.add(key, state)?;
        }

        match self.initial_key {
            Some(key) if !machine.contains_key(&key) => {
                return Err(BuildError::UnknownInitialKey {
                    key: format!("{key:?}"),
                });
            }
            Some(key) => machine.initialize(key)?,
            None if self.allow_null => {}
            None => return Err(BuildError::MissingInitialState),
        }

        machine.set_allow_null(self.allow_null)?;
        Ok(machine)
    }
}

impl<K, S> Default for KeyedStateMachineBuilder<K, S>
where
    K: Clone + Eq + Hash + Debug + 'static,
    S: State,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug)]
    struct Clip(&'static str);

    impl State for Clip {
        fn name(&self) -> &str {
            self.0
        }

        fn on_enter_state(&self) {
            panic!("build must not run callbacks");
        }
    }

    #[test]
    fn builds_with_initial_key() {
        let machine = KeyedStateMachineBuilder::new()
            .state('i', Clip("idle"))
            .state('w', Clip("walk"))
            .initial_key('i')
            .build()
            .unwrap();

        assert_eq!(machine.current_key(), Some(&'i'));
        assert_eq!(machine.current_state(), Some(&Clip("idle")));
        assert_eq!(machine.len(), 2);
    }

    #[test]
    fn duplicate_key_fails_build() {
        let result = KeyedStateMachineBuilder::new()
            .states([('i', Clip("idle")), ('i', Clip("again"))])
            .build();

        assert_eq!(
            result.map(|_| ()),
            Err(BuildError::DuplicateKey {
                key: "'i'".to_string()
            })
        );
    }

    #[test]
    fn unknown_initial_key_fails_build() {
        let result = KeyedStateMachineBuilder::new()
            .state('i', Clip("idle"))
            .initial_key('x')
            .build();

        assert!(matches!(result, Err(BuildError::UnknownInitialKey { .. })));
    }

    #[test]
    fn no_initial_key_requires_null_states() {
        let result = KeyedStateMachineBuilder::<char, Clip>::new()
            .state('i', Clip("idle"))
            .build();

        assert!(matches!(result, Err(BuildError::MissingInitialState)));
    }

    #[test]
    fn no_initial_key_starts_null_when_allowed() {
        let machine = KeyedStateMachineBuilder::<char, Clip>::new()
            .state('i', Clip("idle"))
            .allow_null(true)
            .build()
            .unwrap();

        assert!(machine.current_key().is_none());
        assert!(machine.current_state().is_none());
        assert!(machine.machine().allows_null());
    }

    #[test]
    fn initial_key_without_null_states_disallows_null() {
        let machine = KeyedStateMachineBuilder::new()
            .state('i', Clip("idle"))
            .initial_key('i')
            .build()
            .unwrap();

        assert!(!machine.machine().allows_null());
    }
}
