//! Maneuvers: the outcome of one car's decision in one sub-step.

use tf_core::{AgentId, Cell, Direction};

/// What a car does in a single sub-step.
///
/// Produced by [`decide`][crate::decide] and applied by the tick loop in
/// tf-sim before the next car decides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Maneuver {
    /// The next step would leave the grid.  The car stays put and takes a
    /// fresh uniformly random heading (possibly the same one, possibly zero).
    Bounce(Direction),

    /// The target cell is empty; the car moves there, heading unchanged.
    Advance(Cell),

    /// The target cell holds only yielding cars and this car is yielding:
    /// it stays put and turns to an axis-aligned unit heading.
    Swerve(Direction),

    /// The target cell holds only yielding cars and this car is aggressive:
    /// it stays put and keeps its heading.
    Hold,

    /// The target cell holds at least one aggressive car.  Every car in
    /// `involved` (the cell's occupants plus the mover, without duplicates,
    /// ascending) is destroyed.
    Crash {
        site:     Cell,
        involved: Vec<AgentId>,
    },
}

impl Maneuver {
    /// The heading the car should adopt, if this maneuver changes it.
    pub fn new_direction(&self) -> Option<Direction> {
        match self {
            Maneuver::Bounce(d) | Maneuver::Swerve(d) => Some(*d),
            _ => None,
        }
    }

    /// Short label for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Maneuver::Bounce(_)     => "bounce",
            Maneuver::Advance(_)    => "advance",
            Maneuver::Swerve(_)     => "swerve",
            Maneuver::Hold          => "hold",
            Maneuver::Crash { .. }  => "crash",
        }
    }
}
