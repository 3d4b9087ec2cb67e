//! Records handed to observers.

use tf_agent::PopulationCounts;
use tf_core::{AgentId, Cell, Direction, DriverKind, Tick};

/// One crash: everything that was in `site`, plus the car that drove in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollisionEvent {
    pub tick:       Tick,
    /// Zero-based sub-step within `tick`.
    pub sub_step:   u32,
    pub site:       Cell,
    /// The car whose move caused the crash.
    pub instigator: AgentId,
    /// Every car removed, ascending by id.  Includes the instigator.
    pub involved:   Vec<(AgentId, DriverKind)>,
}

impl CollisionEvent {
    /// How many of each kind were lost.
    pub fn casualties(&self) -> PopulationCounts {
        let mut counts = PopulationCounts::default();
        for &(_, kind) in &self.involved {
            match kind {
                DriverKind::Yielding   => counts.yielding += 1,
                DriverKind::Aggressive => counts.aggressive += 1,
            }
        }
        counts
    }
}

/// A car added by the spawn rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnEvent {
    pub tick:      Tick,
    pub agent:     AgentId,
    pub kind:      DriverKind,
    pub cell:      Cell,
    pub direction: Direction,
}

/// Bookkeeping for one completed tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummary {
    pub tick:          Tick,
    /// Population entering the tick (the metrics snapshot).
    pub counts_before: PopulationCounts,
    /// Population after crashes and the spawn check.
    pub counts_after:  PopulationCounts,
    /// Crashes across all sub-steps of this tick.
    pub collisions:    usize,
    pub spawned:       Option<AgentId>,
    /// Collision-free streak after the increment and any spawn reset.
    pub streak:        u64,
}
