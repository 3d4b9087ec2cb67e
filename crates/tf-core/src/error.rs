//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `TfError` as one variant
//! via `#[from]`.

use thiserror::Error;

use crate::AgentId;

/// The top-level error type for `tf-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum TfError {
    #[error("agent {0} is already in the population")]
    DuplicateAgent(AgentId),

    #[error("invalid direction ({dx}, {dy}): each component must be -1, 0 or 1")]
    InvalidDirection { dx: i32, dy: i32 },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `tf-*` crates.
pub type TfResult<T> = Result<T, TfError>;
