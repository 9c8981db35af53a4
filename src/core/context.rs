//! Ambient details of the transition in progress.
//!
//! A guard or callback often needs to know where the machine is coming from
//! or going to, but the [`State`](super::State) methods take no parameters.
//! While a transition runs, the machine publishes a [`StateChange`] (and the
//! keyed machine a [`KeyChange`]) in a thread-local slot keyed by type.
//!
//! Scopes nest: a transition started from inside another transition's
//! callback replaces the slot for its own duration and puts the outer value
//! back when it ends, whether it ends normally or by unwinding.

use super::error::StateMachineError;
use std::any::{type_name, Any, TypeId};
use std::cell::RefCell;
use std::marker::PhantomData;
use rustc_hash::FxHashMap;

struct ActiveContext {
    type_name: &'static str,
    value: Box<dyn Any>,
}

thread_local! {
    static ACTIVE: RefCell<FxHashMap<TypeId, ActiveContext>> = RefCell::new(FxHashMap::default());
}

/// Keeps a context value published until dropped, then restores whatever
/// value of the same type was published before it.
pub(crate) struct ContextScope<T: 'static> {
    saved: Option<ActiveContext>,
    _marker: PhantomData<*const T>,
}

impl<T: Any> ContextScope<T> {
    pub(crate) fn enter(value: T) -> Self {
        let context = ActiveContext {
            type_name: type_name::<T>(),
            value: Box::new(value),
        };
        let saved = ACTIVE.with(|active| active.borrow_mut().insert(TypeId::of::<T>(), context));
        Self {
            saved,
            _marker: PhantomData,
        }
    }
}

impl<T: 'static> Drop for ContextScope<T> {
    fn drop(&mut self) {
        let saved = self.saved.take();
        // The slot may already be gone during thread teardown.
        let _ = ACTIVE.try_with(|active| {
            let mut active = active.borrow_mut();
            match saved {
                Some(context) => {
                    active.insert(TypeId::of::<T>(), context);
                }
                None => {
                    active.remove(&TypeId::of::<T>());
                }
            }
        });
    }
}

fn is_active<T: Any>() -> bool {
    ACTIVE.with(|active| active.borrow().contains_key(&TypeId::of::<T>()))
}

fn current<T: Any + Clone>() -> Result<T, StateMachineError> {
    ACTIVE.with(|active| {
        let active = active.borrow();
        if let Some(value) = active
            .get(&TypeId::of::<T>())
            .and_then(|context| context.value.downcast_ref::<T>())
        {
            return Ok(value.clone());
        }

        let mut names: Vec<&str> = active.values().map(|context| context.type_name).collect();
        names.sort_unstable();
        let active = if names.is_empty() {
            "none".to_string()
        } else {
            names.join(", ")
        };
        Err(StateMachineError::InactiveContext {
            requested: type_name::<T>(),
            active,
        })
    })
}

/// The states on both ends of the transition currently running for `S`.
///
/// `None` on either end means the null state.
///
/// ```rust
/// use crossfade::core::{State, StateChange, StateMachine};
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Door(&'static str);
///
/// impl State for Door {
///     fn name(&self) -> &str {
///         self.0
///     }
///
///     fn on_enter_state(&self) {
///         let change = StateChange::<Door>::current().unwrap();
///         assert_eq!(change.previous, Some(Door("closed")));
///     }
/// }
///
/// assert!(!StateChange::<Door>::is_active());
/// let mut machine = StateMachine::new(Door("closed"));
/// machine.force_set_state(Door("open"));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct StateChange<S> {
    pub previous: Option<S>,
    pub next: Option<S>,
}

impl<S: Clone + 'static> StateChange<S> {
    pub(crate) fn scope(previous: Option<S>, next: Option<S>) -> ContextScope<Self> {
        ContextScope::enter(Self { previous, next })
    }

    /// Whether a transition for `S` is running on this thread.
    pub fn is_active() -> bool {
        is_active::<Self>()
    }

    /// Both ends of the running transition.
    pub fn current() -> Result<Self, StateMachineError> {
        current::<Self>()
    }

    /// State the machine is leaving.
    pub fn previous_state() -> Result<Option<S>, StateMachineError> {
        Self::current().map(|change| change.previous)
    }

    /// State the machine is entering.
    pub fn next_state() -> Result<Option<S>, StateMachineError> {
        Self::current().map(|change| change.next)
    }
}

/// The keys on both ends of the transition currently running on a keyed
/// machine with key type `K`.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyChange<K> {
    pub previous: Option<K>,
    pub next: Option<K>,
}

impl<K: Clone + 'static> KeyChange<K> {
    pub(crate) fn scope(previous: Option<K>, next: Option<K>) -> ContextScope<Self> {
        ContextScope::enter(Self { previous, next })
    }

    pub fn is_active() -> bool {
        is_active::<Self>()
    }

    pub fn current() -> Result<Self, StateMachineError> {
        current::<Self>()
    }

    pub fn previous_key() -> Result<Option<K>, StateMachineError> {
        Self::current().map(|change| change.previous)
    }

    pub fn next_key() -> Result<Option<K>, StateMachineError> {
        Self::current().map(|change| change.next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inactive_context_reports_error() {
        let result = StateChange::<u8>::current();

        assert!(matches!(
            result,
            Err(StateMachineError::InactiveContext { ref active, .. }) if active == "none"
        ));
    }

    #[test]
    fn scope_publishes_and_restores() {
        {
            let _scope = StateChange::scope(Some(1u8), Some(2u8));
            assert!(StateChange::<u8>::is_active());
            assert_eq!(StateChange::<u8>::previous_state(), Ok(Some(1)));
            assert_eq!(StateChange::<u8>::next_state(), Ok(Some(2)));
        }
        assert!(!StateChange::<u8>::is_active());
    }

    #[test]
    fn nested_scope_restores_outer_value() {
        let _outer = StateChange::scope(Some(1u8), Some(2u8));
        {
            let _inner = StateChange::scope(Some(2u8), None);
            assert_eq!(StateChange::<u8>::next_state(), Ok(None));
        }
        assert_eq!(StateChange::<u8>::next_state(), Ok(Some(2)));
    }

    #[test]
    fn error_lists_other_active_contexts() {
        let _keys = KeyChange::scope(None, Some("run"));

        let error = StateChange::<u16>::current().unwrap_err();

        match error {
            StateMachineError::InactiveContext { requested, active } => {
                assert!(requested.contains("StateChange<u16>"));
                assert!(active.contains("KeyChange<&str>"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn different_types_do_not_interfere() {
        let _states = StateChange::scope(None, Some(5u8));
        let _keys = KeyChange::scope(Some('a'), Some('b'));

        assert_eq!(StateChange::<u8>::next_state(), Ok(Some(5)));
        assert_eq!(KeyChange::<char>::previous_key(), Ok(Some('a')));
        assert!(!KeyChange::<u8>::is_active());
    }
}
