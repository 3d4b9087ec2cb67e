//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use tf_agent::Population;
use tf_core::Tick;
use tf_grid::MultiGrid;
use tf_sim::{CollisionEvent, SimObserver, TickSummary};

use crate::row::{AgentSnapshotRow, CollisionRow, PopulationRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes the population series, crashes and agent
/// snapshots to any [`OutputWriter`] backend (CSV, SQLite, Parquet, …).
///
/// Collisions are buffered for the current tick and written in one batch at
/// tick end, just before that tick's population row.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    pending:    Vec<CollisionRow>,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, pending: Vec::new(), last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_collision(&mut self, event: &CollisionEvent) {
        let lost = event.casualties();
        self.pending.push(CollisionRow {
            tick:            event.tick.0,
            sub_step:        event.sub_step,
            x:               event.site.x,
            y:               event.site.y,
            instigator:      event.instigator.0,
            yielding_lost:   lost.yielding as u64,
            aggressive_lost: lost.aggressive as u64,
        });
    }

    fn on_tick_end(&mut self, summary: &TickSummary) {
        if !self.pending.is_empty() {
            let rows = std::mem::take(&mut self.pending);
            let result = self.writer.write_collisions(&rows);
            self.store_err(result);
        }

        let row = PopulationRow {
            tick:       summary.tick.0,
            yielding:   summary.counts_before.yielding as u64,
            aggressive: summary.counts_before.aggressive as u64,
            collisions: summary.collisions as u64,
            spawned:    summary.spawned.map(u32::from),
            streak:     summary.streak,
        };
        let result = self.writer.write_population(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, grid: &MultiGrid, population: &Population) {
        let rows: Vec<AgentSnapshotRow> = population
            .iter()
            .filter_map(|car| {
                let cell = grid.locate(car.id)?;
                Some(AgentSnapshotRow {
                    tick:     tick.0,
                    agent_id: car.id.0,
                    kind:     car.kind.as_str(),
                    x:        cell.x,
                    y:        cell.y,
                    dx:       car.direction.dx(),
                    dy:       car.direction.dy(),
                })
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
