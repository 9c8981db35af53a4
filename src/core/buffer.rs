//! Input buffering for state requests.

use super::machine::StateMachine;
use super::state::State;
use crate::clock::FrameClock;

/// Remembers one requested state and keeps retrying it until the machine
/// accepts it or the request times out.
///
/// Useful when a request arrives a little too early, such as an attack
/// pressed during the last frames of the previous attack: the current state
/// refuses to exit now but will accept shortly.
#[derive(Clone, Debug)]
pub struct StateBuffer<S> {
    state: Option<S>,
    time_remaining: f32,
}

impl<S> Default for StateBuffer<S> {
    fn default() -> Self {
        Self {
            state: None,
            time_remaining: 0.0,
        }
    }
}

impl<S: State> StateBuffer<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tries `state` right away and buffers it for `timeout` seconds if the
    /// machine refuses. Replaces any request already buffered.
    pub fn buffer(&mut self, machine: &mut StateMachine<S>, state: S, timeout: f32) -> bool {
        if machine.try_set_state(state.clone()) {
            self.clear();
            return true;
        }
        self.state = Some(state);
        self.time_remaining = timeout;
        false
    }

    /// Retries the buffered state. Returns `true` once it has been entered.
    pub fn update<C>(&mut self, machine: &mut StateMachine<S>, clock: &C) -> bool
    where
        C: FrameClock + ?Sized,
    {
        let Some(state) = &self.state else {
            return false;
        };

        if machine.try_set_state(state.clone()) {
            self.clear();
            return true;
        }

        self.time_remaining -= clock.delta_time();
        if self.time_remaining < 0.0 {
            log::trace!("Buffered {} timed out", state.name());
            self.clear();
        }
        false
    }

    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    pub fn buffered_state(&self) -> Option<&S> {
        self.state.as_ref()
    }

    pub fn time_remaining(&self) -> f32 {
        self.time_remaining
    }

    pub fn clear(&mut self) {
        self.state = None;
        self.time_remaining = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use std::cell::Cell;

    thread_local! {
        static BUSY: Cell<bool> = const { Cell::new(false) };
    }

    #[derive(Clone, PartialEq, Debug)]
    enum Combo {
        Idle,
        First,
        Second,
    }

    impl State for Combo {
        fn name(&self) -> &str {
            match self {
                Self::Idle => "Idle",
                Self::First => "First",
                Self::Second => "Second",
            }
        }

        fn can_exit_state(&self) -> bool {
            !BUSY.with(Cell::get)
        }
    }

    #[test]
    fn accepted_request_is_not_buffered() {
        let mut machine = StateMachine::new(Combo::Idle);
        let mut buffer = StateBuffer::new();

        assert!(buffer.buffer(&mut machine, Combo::First, 0.5));

        assert!(!buffer.is_active());
        assert_eq!(machine.current_state(), Some(&Combo::First));
    }

    #[test]
    fn refused_request_is_retried_until_accepted() {
        let mut machine = StateMachine::new(Combo::First);
        let mut buffer = StateBuffer::new();
        BUSY.with(|busy| busy.set(true));

        assert!(!buffer.buffer(&mut machine, Combo::Second, 0.5));
        assert!(!buffer.update(&mut machine, &FixedClock::new(0.1)));
        assert_eq!(buffer.buffered_state(), Some(&Combo::Second));

        BUSY.with(|busy| busy.set(false));
        assert!(buffer.update(&mut machine, &FixedClock::new(0.1)));
        assert_eq!(machine.current_state(), Some(&Combo::Second));
        assert!(!buffer.is_active());
    }

    #[test]
    fn request_times_out() {
        let mut machine = StateMachine::new(Combo::First);
        let mut buffer = StateBuffer::new();
        BUSY.with(|busy| busy.set(true));

        buffer.buffer(&mut machine, Combo::Second, 0.15);
        assert!(!buffer.update(&mut machine, &0.1));
        assert!(buffer.is_active());
        assert!(!buffer.update(&mut machine, &0.1));

        assert!(!buffer.is_active());
        BUSY.with(|busy| busy.set(false));
        assert!(!buffer.update(&mut machine, &0.1));
        assert_eq!(machine.current_state(), Some(&Combo::First));
    }
}
