//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `population.csv`
//! - `collisions.csv`
//! - `agent_snapshots.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, CollisionRow, OutputResult, PopulationRow};

pub const POPULATION_HEADER: [&str; 6] =
    ["tick", "yielding", "aggressive", "collisions", "spawned", "streak"];
pub const COLLISION_HEADER: [&str; 7] =
    ["tick", "sub_step", "x", "y", "instigator", "yielding_lost", "aggressive_lost"];
pub const SNAPSHOT_HEADER: [&str; 7] = ["tick", "agent_id", "kind", "x", "y", "dx", "dy"];

/// Writes simulation output to three CSV files.
pub struct CsvWriter {
    population: Writer<File>,
    collisions: Writer<File>,
    snapshots:  Writer<File>,
    finished:   bool,
}

impl CsvWriter {
    /// Open (or create) the CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut population = Writer::from_path(dir.join("population.csv"))?;
        population.write_record(POPULATION_HEADER)?;

        let mut collisions = Writer::from_path(dir.join("collisions.csv"))?;
        collisions.write_record(COLLISION_HEADER)?;

        let mut snapshots = Writer::from_path(dir.join("agent_snapshots.csv"))?;
        snapshots.write_record(SNAPSHOT_HEADER)?;

        Ok(Self { population, collisions, snapshots, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_population(&mut self, row: &PopulationRow) -> OutputResult<()> {
        self.population.write_record(&[
            row.tick.to_string(),
            row.yielding.to_string(),
            row.aggressive.to_string(),
            row.collisions.to_string(),
            // Empty field when nothing spawned.
            row.spawned.map(|id| id.to_string()).unwrap_or_default(),
            row.streak.to_string(),
        ])?;
        Ok(())
    }

    fn write_collisions(&mut self, rows: &[CollisionRow]) -> OutputResult<()> {
        for row in rows {
            self.collisions.write_record(&[
                row.tick.to_string(),
                row.sub_step.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                row.instigator.to_string(),
                row.yielding_lost.to_string(),
                row.aggressive_lost.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.tick.to_string(),
                row.agent_id.to_string(),
                row.kind.to_owned(),
                row.x.to_string(),
                row.y.to_string(),
                row.dx.to_string(),
                row.dy.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.population.flush()?;
        self.collisions.flush()?;
        self.snapshots.flush()?;
        self.finished = true;
        Ok(())
    }
}
