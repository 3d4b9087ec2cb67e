//! Lattice coordinates and headings.
//!
//! The grid is a bounded (non-toroidal) `width × height` lattice.  A `Cell`
//! is always non-negative; stepping off the edge is expressed as `None` from
//! [`Cell::step`] rather than as a wrapped or negative coordinate.

use std::fmt;

use crate::{TfError, TfResult};

// ── Direction ─────────────────────────────────────────────────────────────────

/// A heading with each component in `{-1, 0, 1}`.
///
/// The fields are private so a `Direction` is valid by construction; use
/// [`Direction::new`] or the constants.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "(i32, i32)", into = "(i32, i32)"))]
pub struct Direction {
    dx: i8,
    dy: i8,
}

impl Direction {
    /// Standing still.  The car's target cell is its own cell.
    pub const ZERO: Direction = Direction { dx: 0, dy: 0 };

    pub const EAST:  Direction = Direction { dx: 1,  dy: 0 };
    pub const WEST:  Direction = Direction { dx: -1, dy: 0 };
    pub const NORTH: Direction = Direction { dx: 0,  dy: 1 };
    pub const SOUTH: Direction = Direction { dx: 0,  dy: -1 };

    /// All nine headings, row-major over `dy` then `dx`.
    pub const ALL: [Direction; 9] = [
        Direction { dx: -1, dy: -1 },
        Direction { dx: 0,  dy: -1 },
        Direction { dx: 1,  dy: -1 },
        Direction { dx: -1, dy: 0 },
        Direction { dx: 0,  dy: 0 },
        Direction { dx: 1,  dy: 0 },
        Direction { dx: -1, dy: 1 },
        Direction { dx: 0,  dy: 1 },
        Direction { dx: 1,  dy: 1 },
    ];

    /// The four axis-aligned unit headings a yielding car may swerve to.
    pub const AXIS: [Direction; 4] = [
        Direction::EAST,
        Direction::WEST,
        Direction::NORTH,
        Direction::SOUTH,
    ];

    /// Build a heading, rejecting components outside `{-1, 0, 1}`.
    pub fn new(dx: i32, dy: i32) -> TfResult<Self> {
        if !(-1..=1).contains(&dx) || !(-1..=1).contains(&dy) {
            return Err(TfError::InvalidDirection { dx, dy });
        }
        Ok(Self { dx: dx as i8, dy: dy as i8 })
    }

    #[inline]
    pub fn dx(self) -> i32 {
        self.dx as i32
    }

    #[inline]
    pub fn dy(self) -> i32 {
        self.dy as i32
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self == Direction::ZERO
    }

    /// `true` for exactly the four members of [`Direction::AXIS`].
    #[inline]
    pub fn is_axis_aligned_unit(self) -> bool {
        (self.dx == 0) != (self.dy == 0)
    }
}

impl TryFrom<(i32, i32)> for Direction {
    type Error = TfError;
    fn try_from((dx, dy): (i32, i32)) -> TfResult<Self> {
        Direction::new(dx, dy)
    }
}

impl From<Direction> for (i32, i32) {
    fn from(d: Direction) -> (i32, i32) {
        (d.dx(), d.dy())
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{:+}, {:+}>", self.dx, self.dy)
    }
}

// ── Cell ──────────────────────────────────────────────────────────────────────

/// A lattice coordinate.  `(0, 0)` is the lower-left corner.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub x: u32,
    pub y: u32,
}

impl Cell {
    #[inline]
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// `true` if the cell lies inside `[0, width) × [0, height)`.
    #[inline]
    pub fn within(self, width: u32, height: u32) -> bool {
        self.x < width && self.y < height
    }

    /// The cell one `direction` step away, or `None` if that step leaves
    /// `[0, width) × [0, height)`.
    ///
    /// A zero direction returns `self` (when `self` is in bounds).
    pub fn step(self, direction: Direction, width: u32, height: u32) -> Option<Cell> {
        let x = self.x as i64 + direction.dx() as i64;
        let y = self.y as i64 + direction.dy() as i64;
        if x < 0 || y < 0 || x >= width as i64 || y >= height as i64 {
            return None;
        }
        Some(Cell { x: x as u32, y: y as u32 })
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
