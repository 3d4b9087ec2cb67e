//! Integration tests for tf-output.

use tf_core::{IdPolicy, SimConfig};

fn yielding_only(total_ticks: u64, snapshot_interval_ticks: u64) -> SimConfig {
    SimConfig {
        initial_yielding:   3,
        initial_aggressive: 0,
        width:              6,
        height:             6,
        sub_steps_per_tick: 1,
        total_ticks,
        seed:               1,
        spawn_streak:       5,
        id_policy:          IdPolicy::Monotonic,
        snapshot_interval_ticks,
    }
}

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::{COLLISION_HEADER, CsvWriter, POPULATION_HEADER, SNAPSHOT_HEADER};
    use crate::row::{AgentSnapshotRow, CollisionRow, PopulationRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn headers(path: std::path::PathBuf) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    fn records(path: std::path::PathBuf) -> Vec<csv::StringRecord> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.records().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("population.csv").exists());
        assert!(dir.path().join("collisions.csv").exists());
        assert!(dir.path().join("agent_snapshots.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        assert_eq!(headers(dir.path().join("population.csv")), POPULATION_HEADER);
        assert_eq!(headers(dir.path().join("collisions.csv")), COLLISION_HEADER);
        assert_eq!(headers(dir.path().join("agent_snapshots.csv")), SNAPSHOT_HEADER);
    }

    #[test]
    fn csv_population_spawned_blank_when_none() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let quiet = PopulationRow { tick: 0, yielding: 3, aggressive: 2, collisions: 0, spawned: None, streak: 1 };
        let spawn = PopulationRow { tick: 1, spawned: Some(5), streak: 0, ..quiet };
        w.write_population(&quiet).unwrap();
        w.write_population(&spawn).unwrap();
        w.finish().unwrap();

        let rows = records(dir.path().join("population.csv"));
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][4], "");
        assert_eq!(&rows[1][4], "5");
        assert_eq!(&rows[1][5], "0");
    }

    #[test]
    fn csv_collision_rows() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_collisions(&[CollisionRow {
            tick: 2, sub_step: 1, x: 3, y: 4, instigator: 9, yielding_lost: 1, aggressive_lost: 2,
        }]).unwrap();
        w.finish().unwrap();

        let rows = records(dir.path().join("collisions.csv"));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].iter().collect::<Vec<_>>(), ["2", "1", "3", "4", "9", "1", "2"]);
    }

    #[test]
    fn csv_snapshot_signed_heading() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[AgentSnapshotRow {
            tick: 0, agent_id: 7, kind: "aggressive", x: 1, y: 2, dx: -1, dy: 0,
        }]).unwrap();
        w.finish().unwrap();

        let rows = records(dir.path().join("agent_snapshots.csv"));
        assert_eq!(&rows[0][2], "aggressive");
        assert_eq!(&rows[0][5], "-1");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn csv_failed_finish_not_marked_done() {
        let full = std::path::Path::new("/dev/full");
        if !full.exists() {
            return;
        }
        let dir = tmp();
        // Buffered header bytes hit ENOSPC on flush.
        std::os::unix::fs::symlink(full, dir.path().join("population.csv")).unwrap();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        assert!(w.finish().is_err());
        assert!(w.finish().is_err(), "retry must not report success");
    }

    #[test]
    fn csv_empty_batches_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[]).unwrap();
        w.write_collisions(&[]).unwrap();
    }

    #[test]
    fn missing_directory_is_io_error() {
        let dir = tmp();
        let result = CsvWriter::new(&dir.path().join("does/not/exist"));
        assert!(result.is_err());
    }
}

// ── Observer bridge ───────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use tempfile::TempDir;
    use tf_core::SimConfig;
    use tf_sim::SimBuilder;

    use super::yielding_only;
    use crate::csv::CsvWriter;
    use crate::observer::SimOutputObserver;
    use crate::row::{AgentSnapshotRow, CollisionRow, PopulationRow};
    use crate::writer::OutputWriter;
    use crate::{OutputError, OutputResult};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn records(path: std::path::PathBuf) -> Vec<csv::StringRecord> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.records().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn integration_csv_population_and_snapshots() {
        let config = yielding_only(6, 2);
        let mut sim = SimBuilder::new(config).build().unwrap();

        let dir = tmp();
        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");

        let population = records(dir.path().join("population.csv"));
        assert_eq!(population.len(), 6);
        assert_eq!(&population[0][1], "3");
        // Five quiet ticks spawn one yielding car at the end of tick 4.
        assert_eq!(&population[4][4], "3");
        assert_eq!(&population[5][1], "4");

        // Yielding cars never crash.
        assert!(records(dir.path().join("collisions.csv")).is_empty());

        // Snapshots at ticks 0, 2, 4: 3 + 3 + 4 cars.
        let snapshots = records(dir.path().join("agent_snapshots.csv"));
        assert_eq!(snapshots.len(), 10);
        assert!(snapshots.iter().all(|r| &r[2] == "yielding"));
    }

    #[test]
    fn integration_csv_collisions_match_population_series() {
        let config = SimConfig { total_ticks: 30, ..SimConfig::default() };
        let mut sim = SimBuilder::new(config).build().unwrap();

        let dir = tmp();
        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());

        let per_tick: u64 = records(dir.path().join("population.csv"))
            .iter()
            .map(|r| r[3].parse::<u64>().unwrap())
            .sum();
        let collisions = records(dir.path().join("collisions.csv"));
        assert_eq!(collisions.len() as u64, per_tick);
        // 110 cars on 400 cells always collide at least once in 30 ticks.
        assert!(per_tick > 0);
    }

    /// Fails every write with a distinct message.
    #[derive(Default)]
    struct FailingWriter {
        calls:    usize,
        finished: bool,
    }

    impl FailingWriter {
        fn fail(&mut self) -> OutputResult<()> {
            self.calls += 1;
            Err(OutputError::Io(std::io::Error::other(format!("write {}", self.calls))))
        }
    }

    impl OutputWriter for FailingWriter {
        fn write_population(&mut self, _row: &PopulationRow) -> OutputResult<()> {
            self.fail()
        }
        fn write_collisions(&mut self, _rows: &[CollisionRow]) -> OutputResult<()> {
            self.fail()
        }
        fn write_snapshots(&mut self, _rows: &[AgentSnapshotRow]) -> OutputResult<()> {
            self.fail()
        }
        fn finish(&mut self) -> OutputResult<()> {
            self.finished = true;
            Ok(())
        }
    }

    #[test]
    fn first_error_kept() {
        let mut sim = SimBuilder::new(yielding_only(3, 0)).build().unwrap();
        let mut obs = SimOutputObserver::new(FailingWriter::default());
        sim.run(&mut obs).unwrap();

        let err = obs.take_error().expect("error stored");
        assert_eq!(err.to_string(), "I/O error: write 1");
        assert!(obs.take_error().is_none(), "take_error clears the slot");

        let writer = obs.into_writer();
        assert_eq!(writer.calls, 3);
        assert!(writer.finished);
    }
}

// ── SQLite tests ──────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use tempfile::TempDir;
    use tf_sim::SimBuilder;

    use super::yielding_only;
    use crate::observer::SimOutputObserver;
    use crate::row::{AgentSnapshotRow, CollisionRow, PopulationRow};
    use crate::sqlite::SqliteWriter;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn count(dir: &TempDir, table: &str) -> i64 {
        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0)).unwrap()
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _w = SqliteWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("output.db").exists());
    }

    #[test]
    fn sqlite_spawned_null_when_none() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_population(&PopulationRow {
            tick: 0, yielding: 1, aggressive: 1, collisions: 0, spawned: None, streak: 1,
        }).unwrap();
        w.write_population(&PopulationRow {
            tick: 1, yielding: 1, aggressive: 1, collisions: 0, spawned: Some(2), streak: 0,
        }).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let spawned: Vec<Option<i64>> = conn
            .prepare("SELECT spawned FROM population ORDER BY tick").unwrap()
            .query_map([], |r| r.get(0)).unwrap()
            .map(|r| r.unwrap())
            .collect();
        assert_eq!(spawned, vec![None, Some(2)]);
    }

    #[test]
    fn sqlite_collision_and_snapshot_counts() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_collisions(&[
            CollisionRow { tick: 0, sub_step: 0, x: 1, y: 1, instigator: 0, yielding_lost: 1, aggressive_lost: 1 },
            CollisionRow { tick: 0, sub_step: 1, x: 2, y: 1, instigator: 4, yielding_lost: 0, aggressive_lost: 2 },
        ]).unwrap();
        w.write_snapshots(&[
            AgentSnapshotRow { tick: 0, agent_id: 0, kind: "yielding", x: 0, y: 0, dx: 1, dy: -1 },
        ]).unwrap();
        w.finish().unwrap();

        assert_eq!(count(&dir, "collisions"), 2);
        assert_eq!(count(&dir, "agent_snapshots"), 1);

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let (kind, dy): (String, i64) = conn.query_row(
            "SELECT kind, dy FROM agent_snapshots WHERE agent_id = 0",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        ).unwrap();
        assert_eq!(kind, "yielding");
        assert_eq!(dy, -1);
    }

    #[test]
    fn sqlite_integration() {
        let mut sim = SimBuilder::new(yielding_only(6, 2)).build().unwrap();
        let dir = tmp();
        let mut obs = SimOutputObserver::new(SqliteWriter::new(dir.path()).unwrap());
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());
        drop(obs);

        assert_eq!(count(&dir, "population"), 6);
        assert_eq!(count(&dir, "agent_snapshots"), 10);
    }
}

// ── Parquet tests ─────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "parquet"))]
mod parquet_tests {
    use tempfile::TempDir;

    use arrow::datatypes::DataType;
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

    use crate::parquet::ParquetWriter;
    use crate::row::{AgentSnapshotRow, PopulationRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn parquet_files_created() {
        let dir = tmp();
        let mut w = ParquetWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        assert!(dir.path().join("population.parquet").exists());
        assert!(dir.path().join("collisions.parquet").exists());
        assert!(dir.path().join("agent_snapshots.parquet").exists());
    }

    #[test]
    fn parquet_snapshot_schema_and_rows() {
        let dir = tmp();
        let mut w = ParquetWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[
            AgentSnapshotRow { tick: 2, agent_id: 0, kind: "yielding",   x: 1, y: 1, dx: 0,  dy: 1 },
            AgentSnapshotRow { tick: 2, agent_id: 1, kind: "aggressive", x: 4, y: 0, dx: -1, dy: 0 },
        ]).unwrap();
        w.finish().unwrap();

        let file = std::fs::File::open(dir.path().join("agent_snapshots.parquet")).unwrap();
        let builder = ParquetRecordBatchReaderBuilder::try_new(file).unwrap();
        let schema = builder.schema().clone();
        let total_rows: usize = builder.build().unwrap().map(|b| b.unwrap().num_rows()).sum();
        assert_eq!(total_rows, 2);

        let field_names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        assert_eq!(field_names, ["tick", "agent_id", "kind", "x", "y", "dx", "dy"]);
        assert_eq!(*schema.field_with_name("kind").unwrap().data_type(), DataType::Utf8);
    }

    #[test]
    fn parquet_spawned_column_nullable() {
        let dir = tmp();
        let mut w = ParquetWriter::new(dir.path()).unwrap();
        w.write_population(&PopulationRow {
            tick: 0, yielding: 2, aggressive: 0, collisions: 0, spawned: None, streak: 1,
        }).unwrap();
        w.finish().unwrap();

        let file = std::fs::File::open(dir.path().join("population.parquet")).unwrap();
        let builder = ParquetRecordBatchReaderBuilder::try_new(file).unwrap();
        assert!(builder.schema().field_with_name("spawned").unwrap().is_nullable());
        let batch = builder.build().unwrap().next().unwrap().unwrap();
        assert_eq!(batch.column(4).null_count(), 1);
    }

    #[test]
    fn parquet_finish_required() {
        let dir = tmp();
        {
            let mut w = ParquetWriter::new(dir.path()).unwrap();
            w.write_snapshots(&[AgentSnapshotRow {
                tick: 0, agent_id: 0, kind: "yielding", x: 0, y: 0, dx: 0, dy: 0,
            }]).unwrap();
            // Dropped without finish(): no footer.
        }

        let file = std::fs::File::open(dir.path().join("agent_snapshots.parquet")).unwrap();
        assert!(ParquetRecordBatchReaderBuilder::try_new(file).is_err());
    }
}
