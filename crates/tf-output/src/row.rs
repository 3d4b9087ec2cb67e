//! Plain data row types written by output backends.

/// Head-count entering one tick, plus what happened during it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopulationRow {
    pub tick:       u64,
    pub yielding:   u64,
    pub aggressive: u64,
    /// Crashes across all sub-steps of the tick.
    pub collisions: u64,
    /// Id of the car added by the spawn rule, if any.
    pub spawned:    Option<u32>,
    /// Collision-free streak at the end of the tick.
    pub streak:     u64,
}

/// One crash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionRow {
    pub tick:            u64,
    pub sub_step:        u32,
    pub x:               u32,
    pub y:               u32,
    pub instigator:      u32,
    pub yielding_lost:   u64,
    pub aggressive_lost: u64,
}

/// One live car's position and heading at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentSnapshotRow {
    pub tick:     u64,
    pub agent_id: u32,
    /// `"yielding"` or `"aggressive"`.
    pub kind:     &'static str,
    pub x:        u32,
    pub y:        u32,
    pub dx:       i32,
    pub dy:       i32,
}
