//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! three tables: `population`, `collisions` and `agent_snapshots`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, CollisionRow, OutputResult, PopulationRow};

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS population (
                 tick       INTEGER PRIMARY KEY,
                 yielding   INTEGER NOT NULL,
                 aggressive INTEGER NOT NULL,
                 collisions INTEGER NOT NULL,
                 spawned    INTEGER,
                 streak     INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS collisions (
                 tick            INTEGER NOT NULL,
                 sub_step        INTEGER NOT NULL,
                 x               INTEGER NOT NULL,
                 y               INTEGER NOT NULL,
                 instigator      INTEGER NOT NULL,
                 yielding_lost   INTEGER NOT NULL,
                 aggressive_lost INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS agent_snapshots (
                 tick     INTEGER NOT NULL,
                 agent_id INTEGER NOT NULL,
                 kind     TEXT    NOT NULL,
                 x        INTEGER NOT NULL,
                 y        INTEGER NOT NULL,
                 dx       INTEGER NOT NULL,
                 dy       INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_population(&mut self, row: &PopulationRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO population (tick, yielding, aggressive, collisions, spawned, streak) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
                row.tick,
                row.yielding,
                row.aggressive,
                row.collisions,
                row.spawned,
                row.streak,
            ],
        )?;
        Ok(())
    }

    fn write_collisions(&mut self, rows: &[CollisionRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO collisions \
                 (tick, sub_step, x, y, instigator, yielding_lost, aggressive_lost) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.tick,
                    row.sub_step,
                    row.x,
                    row.y,
                    row.instigator,
                    row.yielding_lost,
                    row.aggressive_lost,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO agent_snapshots (tick, agent_id, kind, x, y, dx, dy) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.tick,
                    row.agent_id,
                    row.kind,
                    row.x,
                    row.y,
                    row.dx,
                    row.dy,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        self.finished = true;
        Ok(())
    }
}
