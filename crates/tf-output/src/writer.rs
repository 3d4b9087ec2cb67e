//! The `OutputWriter` trait implemented by all backend writers.

use crate::{AgentSnapshotRow, CollisionRow, OutputResult, PopulationRow};

/// Trait implemented by CSV, SQLite, and Parquet writers.
///
/// The observer never sees these results directly: errors are
/// stored internally and retrieved with
/// [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write one population row (one per tick).
    fn write_population(&mut self, row: &PopulationRow) -> OutputResult<()>;

    /// Write a batch of collision rows.
    fn write_collisions(&mut self, rows: &[CollisionRow]) -> OutputResult<()>;

    /// Write a batch of agent snapshots.
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
