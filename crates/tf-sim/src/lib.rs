//! `tf-sim` — tick loop orchestrator for the rust_traffic simulator.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Metrics   — count yielding/aggressive cars; on_tick_start.
//!   ② Sub-steps — repeat sub_steps_per_tick times:
//!                   snapshot live ids, shuffle them, and for each id
//!                   still alive: decide → apply (move / turn / crash).
//!                   A crash resets the collision-free streak to 0.
//!   ③ Streak    — streak += 1.
//!   ④ Spawn     — if streak ≥ spawn_streak: add one car of the majority
//!                 kind (ties → aggressive) on a random cell; streak = 0.
//!   ⑤ Report    — on_tick_end, then on_snapshot every N ticks.
//! ```
//!
//! # Cargo features
//!
//! | Feature   | Effect                                                  |
//! |-----------|---------------------------------------------------------|
//! | `fx-hash` | FxHash for the grid's location index.                   |
//! | `serde`   | Serde derives on `SimConfig` and the core value types.  |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use tf_core::SimConfig;
//! use tf_sim::{PopulationHistory, SimBuilder};
//!
//! let mut sim = SimBuilder::new(SimConfig::default()).build()?;
//! let mut history = PopulationHistory::default();
//! sim.run(&mut history)?;
//! ```

pub mod builder;
pub mod error;
pub mod event;
pub mod observer;
pub mod sim;


pub use builder::{Placement, SimBuilder};
pub use error::{SimError, SimResult};
pub use event::{CollisionEvent, SpawnEvent, TickSummary};
pub use observer::{NoopObserver, PopulationHistory, SimObserver};
pub use sim::Sim;
