//! Crossfade: eased weight blending driven by guarded state machines.
//!
//! The crate covers two coupled problems of a frame-driven runtime:
//!
//! - keeping collections of live objects that are added, removed and walked
//!   while they change, without allocating per frame, and
//! - fading blend weights between the nodes of a host graph with custom
//!   easing, gated by state machines with enter and exit guards.
//!
//! # Modules
//!
//! - [`collections`]: keyed list with generational handles, a cursor that
//!   survives edits, and a per-depth scratch stack.
//! - [`pool`]: typed free lists and a registry holding one per value type.
//! - [`easing`]: 31 named curves with derivatives and ranged variants.
//! - [`fade`]: the blend graph contract, fade operations and their scheduler.
//! - [`core`]: states, state machines and the ambient transition context.
//! - [`builder`]: fluent builders and the [`state_enum!`] macro.
//! - [`config`]: serde-backed runtime configuration.
//!
//! Everything is single-threaded and advanced by an explicit tick.
//!
//! # Example
//!
//! ```rust
//! use crossfade::core::StateMachine;
//! use crossfade::easing::Easing;
//! use crossfade::fade::{BlendGraph, BlendTree, FadeScheduler};
//! use crossfade::state_enum;
//!
//! state_enum! {
//!     enum Locomotion {
//!         Idle,
//!         Walk,
//!     }
//! }
//!
//! let mut tree = BlendTree::new();
//! let layer = tree.add_layer();
//! let idle = tree.add_node(layer);
//! let walk = tree.add_node(layer);
//! tree.play(idle, 0.0);
//!
//! let mut machine = StateMachine::new(Locomotion::Idle);
//! let mut fades = FadeScheduler::new();
//!
//! if machine.try_set_state(Locomotion::Walk) {
//!     tree.play(walk, 0.5);
//!     fades.start_easing(&mut tree, walk, Easing::QuadraticInOut).unwrap();
//! }
//!
//! fades.tick(&mut tree, &0.25);
//! assert_eq!(tree.weight(walk), 0.5);
//! fades.tick(&mut tree, &0.25);
//! assert_eq!(tree.weight(walk), 1.0);
//! assert_eq!(tree.weight(idle), 0.0);
//! ```

pub mod builder;
pub mod clock;
pub mod collections;
pub mod config;
pub mod core;
pub mod easing;
pub mod fade;
pub mod pool;

// Re-export commonly used types
pub use builder::{BuildError, KeyedStateMachineBuilder, StateMachineBuilder};
pub use clock::{FixedClock, FrameClock};
pub use collections::{Cursor, ItemKey, KeyedList, LazyStack};
pub use config::RuntimeConfig;
pub use core::{KeyedStateMachine, State, StateChange, StateMachine, StateMachineError};
pub use easing::Easing;
pub use fade::{BlendGraph, FadeError, FadeScheduler};
pub use pool::{Pool, PoolRegistry};
