//! Object pooling.
//!
//! A [`Pool`] is a typed free list; a [`PoolRegistry`] owns one pool per value
//! type. [`Pooled`] is the scope guard that releases an acquired value when it
//! goes out of scope, optionally clearing it first.

mod object_pool;
mod registry;

pub use object_pool::{Container, Pool, Pooled};
pub use registry::PoolRegistry;
