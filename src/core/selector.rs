//! Picks the highest-priority state whose guards pass.

use super::machine::StateMachine;
use super::state::State;

/// Gives a state its own priority so it can be added to a [`StateSelector`]
/// without passing one explicitly.
pub trait Prioritized {
    fn priority(&self) -> f32;
}

/// Candidate states in descending priority order.
///
/// Candidates with equal priority keep the order they were added in. Each
/// operation walks the list from the top and acts on the first candidate the
/// machine accepts.
///
/// ```rust
/// use crossfade::core::{State, StateMachine, StateSelector};
///
/// #[derive(Clone, PartialEq, Debug)]
/// enum Move {
///     Idle,
///     Walk,
///     Jump,
/// }
///
/// impl State for Move {
///     fn name(&self) -> &str {
///         match self {
///             Self::Idle => "Idle",
///             Self::Walk => "Walk",
///             Self::Jump => "Jump",
///         }
///     }
///
///     fn can_enter_state(&self) -> bool {
///         !matches!(self, Self::Jump)
///     }
/// }
///
/// let mut selector = StateSelector::new();
/// selector.add_with_priority(Move::Walk, 1.0);
/// selector.add_with_priority(Move::Jump, 5.0);
/// selector.add_with_priority(Move::Idle, 0.0);
///
/// let mut machine = StateMachine::new(Move::Idle);
/// assert!(selector.try_set_state(&mut machine));
/// assert_eq!(machine.current_state(), Some(&Move::Walk));
/// ```
#[derive(Clone, Debug)]
pub struct StateSelector<S> {
    candidates: Vec<(S, f32)>,
}

impl<S> Default for StateSelector<S> {
    fn default() -> Self {
        Self {
            candidates: Vec::new(),
        }
    }
}

impl<S: State> StateSelector<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `state` using its own priority.
    pub fn add(&mut self, state: S)
    where
        S: Prioritized,
    {
        let priority = state.priority();
        self.add_with_priority(state, priority);
    }

    /// Adds `state` after every candidate with the same or higher priority.
    pub fn add_with_priority(&mut self, state: S, priority: f32) {
        let index = self
            .candidates
            .partition_point(|(_, existing)| *existing >= priority);
        self.candidates.insert(index, (state, priority));
    }

    /// Removes the first candidate equal to `state`.
    pub fn remove(&mut self, state: &S) -> bool {
        match self.candidates.iter().position(|(candidate, _)| candidate == state) {
            Some(index) => {
                self.candidates.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.candidates.clear();
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Candidates with their priorities, highest first.
    pub fn iter(&self) -> impl Iterator<Item = (&S, f32)> {
        self.candidates
            .iter()
            .map(|(state, priority)| (state, *priority))
    }

    /// Highest-priority candidate the machine could switch to right now.
    pub fn select(&self, machine: &StateMachine<S>) -> Option<&S> {
        self.candidates
            .iter()
            .map(|(state, _)| state)
            .find(|state| machine.can_set_state(state))
    }

    /// Switches to the highest-priority candidate the guards allow. A
    /// candidate that is already current counts as success.
    pub fn try_set_state(&self, machine: &mut StateMachine<S>) -> bool {
        self.candidates
            .iter()
            .any(|(state, _)| machine.try_set_state(state.clone()))
    }

    /// Like [`try_set_state`](Self::try_set_state) but re-enters a candidate
    /// that is already current.
    pub fn try_reset_state(&self, machine: &mut StateMachine<S>) -> bool {
        self.candidates
            .iter()
            .any(|(state, _)| machine.try_reset_state(state.clone()))
    }

    /// Switches to the highest-priority candidate without asking any guard.
    /// Returns `false` only when there are no candidates.
    pub fn force_set_state(&self, machine: &mut StateMachine<S>) -> bool {
        match self.candidates.first() {
            Some((state, _)) => {
                machine.force_set_state(state.clone());
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug)]
    struct Attack {
        name: &'static str,
        priority: f32,
        ready: bool,
    }

    fn attack(name: &'static str, priority: f32, ready: bool) -> Attack {
        Attack {
            name,
            priority,
            ready,
        }
    }

    impl State for Attack {
        fn name(&self) -> &str {
            self.name
        }

        fn can_enter_state(&self) -> bool {
            self.ready
        }
    }

    impl Prioritized for Attack {
        fn priority(&self) -> f32 {
            self.priority
        }
    }

    fn names(selector: &StateSelector<Attack>) -> Vec<&'static str> {
        selector.iter().map(|(state, _)| state.name).collect()
    }

    #[test]
    fn candidates_sorted_descending_with_stable_ties() {
        let mut selector = StateSelector::new();
        selector.add(attack("light", 1.0, true));
        selector.add(attack("heavy", 3.0, true));
        selector.add(attack("jab", 1.0, true));
        selector.add(attack("special", 5.0, true));

        assert_eq!(names(&selector), vec!["special", "heavy", "light", "jab"]);
    }

    #[test]
    fn select_skips_rejected_candidates() {
        let mut selector = StateSelector::new();
        selector.add(attack("special", 5.0, false));
        selector.add(attack("heavy", 3.0, true));
        let machine = StateMachine::new(attack("none", 0.0, true));

        assert_eq!(selector.select(&machine).map(|state| state.name), Some("heavy"));
    }

    #[test]
    fn try_set_state_fails_when_nothing_passes() {
        let mut selector = StateSelector::new();
        selector.add(attack("special", 5.0, false));
        let mut machine = StateMachine::new(attack("none", 0.0, true));

        assert!(!selector.try_set_state(&mut machine));
        assert_eq!(machine.current_state().map(|state| state.name), Some("none"));
    }

    #[test]
    fn force_set_state_ignores_guards() {
        let mut selector = StateSelector::new();
        selector.add(attack("special", 5.0, false));
        selector.add(attack("heavy", 3.0, true));
        let mut machine = StateMachine::new(attack("none", 0.0, true));

        assert!(selector.force_set_state(&mut machine));

        assert_eq!(machine.current_state().map(|state| state.name), Some("special"));
        assert!(!StateSelector::<Attack>::new().force_set_state(&mut machine));
    }

    #[test]
    fn remove_drops_candidate() {
        let mut selector = StateSelector::new();
        let heavy = attack("heavy", 3.0, true);
        selector.add(heavy.clone());

        assert!(selector.remove(&heavy));
        assert!(!selector.remove(&heavy));
        assert!(selector.is_empty());
    }
}
