//! Simulation observer trait for metrics and data collection.

use tf_agent::{Population, PopulationCounts};
use tf_core::Tick;
use tf_grid::MultiGrid;

use crate::{CollisionEvent, SpawnEvent, TickSummary};

/// Callbacks invoked by [`Sim::tick`][crate::Sim::tick] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: crash logger
///
/// ```rust,ignore
/// struct CrashLog;
///
/// impl SimObserver for CrashLog {
///     fn on_collision(&mut self, event: &CollisionEvent) {
///         println!("{}: {} cars lost at {}", event.tick, event.involved.len(), event.site);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the start of each tick with the population entering it,
    /// before any car acts.
    fn on_tick_start(&mut self, _tick: Tick, _counts: PopulationCounts) {}

    /// Called once per crash, right after the cars are removed.
    fn on_collision(&mut self, _event: &CollisionEvent) {}

    /// Called when the spawn rule adds a car.
    fn on_spawn(&mut self, _event: &SpawnEvent) {}

    /// Called at the end of each tick.
    fn on_tick_end(&mut self, _summary: &TickSummary) {}

    /// Called every `config.snapshot_interval_ticks` ticks (never when the
    /// interval is 0), after `on_tick_end`.
    ///
    /// Read-only access to the grid and population lets renderers and
    /// output writers record positions without the sim knowing any format.
    fn on_snapshot(&mut self, _tick: Tick, _grid: &MultiGrid, _population: &Population) {}

    /// Called once after the final tick of [`Sim::run`][crate::Sim::run].
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Collects the per-tick population series (yielding vs aggressive counts
/// entering each tick) in memory, ready for plotting.
#[derive(Debug, Default, Clone)]
pub struct PopulationHistory {
    series: Vec<(Tick, PopulationCounts)>,
}

impl PopulationHistory {
    pub fn series(&self) -> &[(Tick, PopulationCounts)] {
        &self.series
    }

    pub fn last(&self) -> Option<PopulationCounts> {
        self.series.last().map(|&(_, c)| c)
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

impl SimObserver for PopulationHistory {
    fn on_tick_start(&mut self, tick: Tick, counts: PopulationCounts) {
        self.series.push((tick, counts));
    }
}
