//! `tf-core` — foundational types for the `rust_traffic` simulator.
//!
//! This crate is a dependency of every other `tf-*` crate.  It intentionally
//! has no `tf-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`                                             |
//! | [`lattice`]     | `Cell`, `Direction`                                   |
//! | [`time`]        | `Tick`                                                |
//! | [`driver`]      | `DriverKind` enum                                     |
//! | [`config`]      | `SimConfig`, `IdPolicy`                               |
//! | [`rng`]         | `TrafficRng` trait, `SimRng` (seeded `SmallRng`)      |
//! | [`error`]       | `TfError`, `TfResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod config;
pub mod driver;
pub mod error;
pub mod ids;
pub mod lattice;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{DEFAULT_SPAWN_STREAK, IdPolicy, SimConfig};
pub use driver::DriverKind;
pub use error::{TfError, TfResult};
pub use ids::AgentId;
pub use lattice::{Cell, Direction};
pub use rng::{SimRng, TrafficRng};
pub use time::Tick;
