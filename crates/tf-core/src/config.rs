//! Top-level simulation configuration.

use crate::{TfError, TfResult};

/// Default collision-free streak (in ticks) that triggers a spawn.
pub const DEFAULT_SPAWN_STREAK: u64 = 5;

// ── IdPolicy ──────────────────────────────────────────────────────────────────

/// How the id of a spawned car is chosen.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum IdPolicy {
    /// A counter that only increases.  Ids are never reused, even after the
    /// car holding them has crashed.
    #[default]
    Monotonic,
    /// `(largest live id) + 1`, or `0` when nobody is alive.  Reproduces the
    /// classic model's numbering, which can hand out an id that belonged to
    /// a car that crashed earlier.
    MaxLivePlusOne,
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Construction parameters for one run.
///
/// Typically built in code or loaded from JSON by the application crate (the
/// `serde` feature adds the derives) and passed to `SimBuilder`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Yielding cars placed at tick 0.  They receive ids `0..initial_yielding`.
    pub initial_yielding: u32,

    /// Aggressive cars placed at tick 0.  Their ids follow the yielding ones.
    pub initial_aggressive: u32,

    /// Grid width in cells.  Must be ≥ 1.
    pub width: u32,

    /// Grid height in cells.  Must be ≥ 1.
    pub height: u32,

    /// Sub-steps per tick ("speed").  Every live car acts once per sub-step.
    pub sub_steps_per_tick: u32,

    /// Ticks executed by `Sim::run`.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Collision-free ticks needed before one car is spawned.
    pub spawn_streak: u64,

    /// Numbering rule for spawned cars.
    pub id_policy: IdPolicy,

    /// Emit a per-car position snapshot every N ticks.  0 disables
    /// snapshots.
    pub snapshot_interval_ticks: u64,
}

impl Default for SimConfig {
    /// The classic batch run: 10 yielding and 100 aggressive cars on a
    /// 20 × 20 grid at speed 1 for 100 ticks.
    fn default() -> Self {
        Self {
            initial_yielding:        10,
            initial_aggressive:      100,
            width:                   20,
            height:                  20,
            sub_steps_per_tick:      1,
            total_ticks:             100,
            seed:                    42,
            spawn_streak:            DEFAULT_SPAWN_STREAK,
            id_policy:               IdPolicy::Monotonic,
            snapshot_interval_ticks: 0,
        }
    }
}

impl SimConfig {
    /// Reject parameters that would make placement or the tick loop
    /// meaningless.
    pub fn validate(&self) -> TfResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(TfError::Config(format!(
                "grid must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        if self.sub_steps_per_tick == 0 {
            return Err(TfError::Config("sub_steps_per_tick must be at least 1".into()));
        }
        if self.spawn_streak == 0 {
            return Err(TfError::Config("spawn_streak must be at least 1".into()));
        }
        Ok(())
    }

    /// Size of the initial population.
    #[inline]
    pub fn initial_population(&self) -> u64 {
        self.initial_yielding as u64 + self.initial_aggressive as u64
    }
}
