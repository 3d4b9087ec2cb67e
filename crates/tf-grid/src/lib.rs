//! `tf-grid` — the lattice the cars drive on.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                    |
//! |-----------|-------------------------------------------------------------|
//! | [`grid`]  | `MultiGrid` — `width × height` cells, 0..N cars per cell    |
//! | [`error`] | `GridError`, `GridResult<T>`                                |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                     |
//! |-----------|------------------------------------------------------------|
//! | `fx-hash` | FxHash for the location index (faster on integer keys).    |

pub mod error;
pub mod grid;


pub use error::{GridError, GridResult};
pub use grid::MultiGrid;
