//! The simulation's single shared random source.
//!
//! # Determinism strategy
//!
//! One `SimRng` (a seeded `SmallRng`) is owned by the simulation and passed
//! by `&mut` to every call that needs randomness: initial placement, agent
//! activation order, boundary re-draws, swerves, and spawns.  There is no
//! global or thread-local generator, so the same seed and config always
//! reproduce the same run.
//!
//! The draws the traffic model needs are collected in the [`TrafficRng`]
//! trait.  `SimRng` is the production implementation; tests substitute a
//! scripted source to force specific headings.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{AgentId, Cell, Direction};

// ── TrafficRng ────────────────────────────────────────────────────────────────

/// Every random decision the traffic model makes.
pub trait TrafficRng {
    /// A uniformly random heading: each axis independently from `{-1, 0, 1}`.
    /// The zero heading is a legal outcome.
    fn heading(&mut self) -> Direction;

    /// A uniformly random axis-aligned unit heading.  A fair coin picks the
    /// axis, then a fair coin picks the sign.  Never diagonal, never zero.
    fn swerve(&mut self) -> Direction;

    /// A uniformly random cell of a `width × height` lattice.
    ///
    /// # Panics
    /// May panic if either dimension is zero; callers validate config first.
    fn cell(&mut self, width: u32, height: u32) -> Cell;

    /// Permute the activation order for one sub-step.
    fn shuffle_ids(&mut self, ids: &mut [AgentId]);
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG: a seeded `SmallRng` behind [`TrafficRng`].
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }
}

impl TrafficRng for SimRng {
    fn heading(&mut self) -> Direction {
        use rand::seq::SliceRandom;
        // ALL is a non-empty constant.
        *Direction::ALL.choose(&mut self.0).unwrap_or(&Direction::ZERO)
    }

    fn swerve(&mut self) -> Direction {
        let along_x = self.0.gen_bool(0.5);
        let positive = self.0.gen_bool(0.5);
        match (along_x, positive) {
            (true, true)   => Direction::EAST,
            (true, false)  => Direction::WEST,
            (false, true)  => Direction::NORTH,
            (false, false) => Direction::SOUTH,
        }
    }

    fn cell(&mut self, width: u32, height: u32) -> Cell {
        Cell::new(self.0.gen_range(0..width), self.0.gen_range(0..height))
    }

    fn shuffle_ids(&mut self, ids: &mut [AgentId]) {
        use rand::seq::SliceRandom;
        ids.shuffle(&mut self.0);
    }
}
