//! Guarded state machines.
//!
//! - [`State`] is the capability set a state provides: two guards and two
//!   callbacks, all optional apart from a name.
//! - [`StateMachine`] holds one current state.
//! - [`KeyedStateMachine`] registers states under keys and switches by key.
//! - [`StateSelector`] picks the highest-priority state whose guards pass.
//! - [`StateBuffer`] retries a refused request for a short time.
//!
//! Guards and callbacks can read [`StateChange`] and [`KeyChange`] to see
//! both ends of the transition they are part of.

mod buffer;
mod context;
mod error;
mod keyed;
mod machine;
mod selector;
mod state;

pub use buffer::StateBuffer;
pub use context::{KeyChange, StateChange};
pub use error::StateMachineError;
pub use keyed::KeyedStateMachine;
pub use machine::StateMachine;
pub use selector::{Prioritized, StateSelector};
pub use state::State;
