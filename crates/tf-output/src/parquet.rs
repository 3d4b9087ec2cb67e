//! Parquet output backend (feature `parquet`).
//!
//! Creates three files in the configured output directory:
//! - `population.parquet`
//! - `collisions.parquet`
//! - `agent_snapshots.parquet`

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Int32Builder, StringBuilder, UInt32Builder, UInt64Builder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, CollisionRow, OutputResult, PopulationRow};

fn population_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("tick",       DataType::UInt64, false),
        Field::new("yielding",   DataType::UInt64, false),
        Field::new("aggressive", DataType::UInt64, false),
        Field::new("collisions", DataType::UInt64, false),
        Field::new("spawned",    DataType::UInt32, true),
        Field::new("streak",     DataType::UInt64, false),
    ]))
}

fn collision_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("tick",            DataType::UInt64, false),
        Field::new("sub_step",        DataType::UInt32, false),
        Field::new("x",               DataType::UInt32, false),
        Field::new("y",               DataType::UInt32, false),
        Field::new("instigator",      DataType::UInt32, false),
        Field::new("yielding_lost",   DataType::UInt64, false),
        Field::new("aggressive_lost", DataType::UInt64, false),
    ]))
}

fn snapshot_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("tick",     DataType::UInt64, false),
        Field::new("agent_id", DataType::UInt32, false),
        Field::new("kind",     DataType::Utf8,   false),
        Field::new("x",        DataType::UInt32, false),
        Field::new("y",        DataType::UInt32, false),
        Field::new("dx",       DataType::Int32,  false),
        Field::new("dy",       DataType::Int32,  false),
    ]))
}

fn snappy_props() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

fn open(dir: &Path, name: &str, schema: &Arc<Schema>) -> OutputResult<ArrowWriter<File>> {
    let file = File::create(dir.join(name))?;
    Ok(ArrowWriter::try_new(file, Arc::clone(schema), Some(snappy_props()))?)
}

/// One open Parquet file and the schema its batches must match.
struct Table {
    writer: Option<ArrowWriter<File>>,
    schema: Arc<Schema>,
}

impl Table {
    fn new(dir: &Path, name: &str, schema: Arc<Schema>) -> OutputResult<Self> {
        let writer = open(dir, name, &schema)?;
        Ok(Self { writer: Some(writer), schema })
    }

    fn write(&mut self, columns: Vec<ArrayRef>) -> OutputResult<()> {
        let Some(writer) = self.writer.as_mut() else {
            return Ok(());
        };
        let batch = RecordBatch::try_new(Arc::clone(&self.schema), columns)?;
        writer.write(&batch)?;
        Ok(())
    }

    fn close(&mut self) -> OutputResult<()> {
        if let Some(w) = self.writer.take() {
            w.close()?;
        }
        Ok(())
    }
}

/// Writes simulation output to three Parquet files.
///
/// `finish()` **must** be called to write the Parquet file footers; files
/// written without calling `finish()` cannot be opened by Parquet readers.
pub struct ParquetWriter {
    population: Table,
    collisions: Table,
    snapshots:  Table,
}

impl ParquetWriter {
    /// Create all three Parquet files in `dir`.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        Ok(Self {
            population: Table::new(dir, "population.parquet", population_schema())?,
            collisions: Table::new(dir, "collisions.parquet", collision_schema())?,
            snapshots:  Table::new(dir, "agent_snapshots.parquet", snapshot_schema())?,
        })
    }
}

impl OutputWriter for ParquetWriter {
    fn write_population(&mut self, row: &PopulationRow) -> OutputResult<()> {
        let mut ticks      = UInt64Builder::new();
        let mut yielding   = UInt64Builder::new();
        let mut aggressive = UInt64Builder::new();
        let mut collisions = UInt64Builder::new();
        let mut spawned    = UInt32Builder::new();
        let mut streaks    = UInt64Builder::new();

        ticks.append_value(row.tick);
        yielding.append_value(row.yielding);
        aggressive.append_value(row.aggressive);
        collisions.append_value(row.collisions);
        spawned.append_option(row.spawned);
        streaks.append_value(row.streak);

        self.population.write(vec![
            Arc::new(ticks.finish()),
            Arc::new(yielding.finish()),
            Arc::new(aggressive.finish()),
            Arc::new(collisions.finish()),
            Arc::new(spawned.finish()),
            Arc::new(streaks.finish()),
        ])
    }

    fn write_collisions(&mut self, rows: &[CollisionRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }

        let mut ticks           = UInt64Builder::new();
        let mut sub_steps       = UInt32Builder::new();
        let mut xs              = UInt32Builder::new();
        let mut ys              = UInt32Builder::new();
        let mut instigators     = UInt32Builder::new();
        let mut yielding_lost   = UInt64Builder::new();
        let mut aggressive_lost = UInt64Builder::new();

        for row in rows {
            ticks.append_value(row.tick);
            sub_steps.append_value(row.sub_step);
            xs.append_value(row.x);
            ys.append_value(row.y);
            instigators.append_value(row.instigator);
            yielding_lost.append_value(row.yielding_lost);
            aggressive_lost.append_value(row.aggressive_lost);
        }

        self.collisions.write(vec![
            Arc::new(ticks.finish()),
            Arc::new(sub_steps.finish()),
            Arc::new(xs.finish()),
            Arc::new(ys.finish()),
            Arc::new(instigators.finish()),
            Arc::new(yielding_lost.finish()),
            Arc::new(aggressive_lost.finish()),
        ])
    }

    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }

        let mut ticks     = UInt64Builder::new();
        let mut agent_ids = UInt32Builder::new();
        let mut kinds     = StringBuilder::new();
        let mut xs        = UInt32Builder::new();
        let mut ys        = UInt32Builder::new();
        let mut dxs       = Int32Builder::new();
        let mut dys       = Int32Builder::new();

        for row in rows {
            ticks.append_value(row.tick);
            agent_ids.append_value(row.agent_id);
            kinds.append_value(row.kind);
            xs.append_value(row.x);
            ys.append_value(row.y);
            dxs.append_value(row.dx);
            dys.append_value(row.dy);
        }

        self.snapshots.write(vec![
            Arc::new(ticks.finish()),
            Arc::new(agent_ids.finish()),
            Arc::new(kinds.finish()),
            Arc::new(xs.finish()),
            Arc::new(ys.finish()),
            Arc::new(dxs.finish()),
            Arc::new(dys.finish()),
        ])
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.population.close()?;
        self.collisions.close()?;
        self.snapshots.close()?;
        Ok(())
    }
}
