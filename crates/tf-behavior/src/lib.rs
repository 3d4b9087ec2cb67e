//! `tf-behavior` — what a car decides to do in one sub-step.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`maneuver`] | `Maneuver` enum (`Bounce`, `Advance`, `Swerve`, `Hold`, `Crash`) |
//! | [`context`]  | `DriveContext<'a>` — read-only view of grid and population    |
//! | [`drive`]    | `decide` — the movement and collision rules                   |
//!
//! # Design notes
//!
//! Each car's action is split in two:
//!
//! 1. **Decide** (this crate): read the grid and population through
//!    `&DriveContext` and return a `Maneuver`.  No mutation besides the
//!    random source.
//!
//! 2. **Apply** (tf-sim): move the car, rewrite its heading, or remove the
//!    crashed cars, immediately, before the next car decides.
//!
//! A car removed by an earlier crash is gone before the next car looks.

pub mod context;
pub mod drive;
pub mod maneuver;

#[cfg(test)]
mod tests;

pub use context::DriveContext;
pub use drive::decide;
pub use maneuver::Maneuver;
