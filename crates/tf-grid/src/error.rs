//! Grid error type.

use thiserror::Error;

use tf_core::{AgentId, Cell};

/// Errors produced by `tf-grid`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("grid must be at least 1x1, got {width}x{height}")]
    ZeroDimension { width: u32, height: u32 },

    #[error("cell {cell} is outside the {width}x{height} grid")]
    OutOfBounds { cell: Cell, width: u32, height: u32 },

    #[error("{0} is already on the grid")]
    AlreadyPlaced(AgentId),

    #[error("{0} is not on the grid")]
    NotPlaced(AgentId),
}

pub type GridResult<T> = Result<T, GridError>;
