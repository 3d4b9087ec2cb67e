//! `tf-agent` — per-car state and population storage.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`car`]        | `Car` — id, driver kind, heading                          |
//! | [`population`] | `Population` (id-keyed arena), `PopulationCounts`         |
//!
//! A car's position is not stored here: the grid's location index is the
//! single source of truth, so a car that is off the grid is unplaced.

pub mod car;
pub mod population;


pub use car::Car;
pub use population::{Population, PopulationCounts};
