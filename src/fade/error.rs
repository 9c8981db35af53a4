//! Errors raised when starting or cancelling fades.

use crate::collections::KeyedListError;
use thiserror::Error;

/// Usage errors of the fade scheduler.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FadeError {
    #[error("Cannot fade node {node}: it is no longer valid")]
    InvalidTarget { node: String },

    #[error("Cannot fade node {node}: it does not belong to any layer")]
    Detached { node: String },

    #[error("Cannot fade node {node}: it is not fading (fade speed is zero)")]
    NotFading { node: String },

    #[error("Fade registration error: {0}")]
    Registration(#[from] KeyedListError),
}
