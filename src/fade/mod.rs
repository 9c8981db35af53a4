//! Eased weight fades over a host blend graph.
//!
//! The host exposes its nodes through [`BlendGraph`]. A node that is already
//! fading on its own can be handed to a [`FadeScheduler`], which replaces the
//! built-in linear ramp with any easing curve and fades the node's siblings
//! out in lockstep. [`BlendTree`] is a self-contained graph for tests and
//! tools.

mod error;
mod graph;
mod operation;
mod scheduler;
mod tree;

pub use error::FadeError;
pub use graph::BlendGraph;
pub use operation::{FadeOperation, FadeStatus, NodeWeight};
pub use scheduler::{FadeScheduler, TickReport};
pub use tree::{BlendTree, LayerId, NodeId};
