use thiserror::Error;

use tf_core::{DriverKind, TfError};
use tf_grid::GridError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] TfError),

    #[error("grid error: {0}")]
    Grid(#[from] GridError),

    #[error("{kind} placements: expected {expected}, got {got}")]
    PlacementMismatch {
        kind:     DriverKind,
        expected: u32,
        got:      usize,
    },
}

pub type SimResult<T> = Result<T, SimError>;
