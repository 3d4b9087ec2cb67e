//! Read-only simulation state passed to every decision.

use tf_agent::Population;
use tf_grid::MultiGrid;

/// A read-only view of the world for one car's decision.
///
/// Built by tf-sim right before each call to [`decide`][crate::decide]; the
/// borrows end before the resulting [`Maneuver`][crate::Maneuver] is
/// applied, so the view always reflects every earlier car's action.
#[derive(Copy, Clone)]
pub struct DriveContext<'a> {
    /// Cell occupancy and car positions.
    pub grid: &'a MultiGrid,

    /// Live cars, used to look up the kind of each occupant.
    pub population: &'a Population,
}

impl<'a> DriveContext<'a> {
    #[inline]
    pub fn new(grid: &'a MultiGrid, population: &'a Population) -> Self {
        Self { grid, population }
    }
}
