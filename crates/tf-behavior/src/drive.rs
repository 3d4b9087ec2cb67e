//! The driving rules.

use std::collections::BTreeSet;

use tf_agent::Car;
use tf_core::{AgentId, Cell, DriverKind, TrafficRng};

use crate::{DriveContext, Maneuver};

/// Decide what `car`, currently on `from`, does this sub-step.
///
/// 1. `target = from + car.direction`.  Off the grid → [`Maneuver::Bounce`]
///    with a fresh random heading.
/// 2. Empty target → [`Maneuver::Advance`].
/// 3. Any aggressive occupant → [`Maneuver::Crash`] involving every
///    occupant and the mover.
/// 4. Only yielding occupants → a yielding car swerves
///    ([`Maneuver::Swerve`]), an aggressive car holds its heading
///    ([`Maneuver::Hold`]).
///
/// A car with a zero heading targets its own cell, so it counts among the
/// occupants.  An aggressive car standing still therefore crashes into
/// itself.
pub fn decide<R: TrafficRng + ?Sized>(
    car:  &Car,
    from: Cell,
    ctx:  &DriveContext<'_>,
    rng:  &mut R,
) -> Maneuver {
    let grid = ctx.grid;
    let Some(target) = from.step(car.direction, grid.width(), grid.height()) else {
        return Maneuver::Bounce(rng.heading());
    };

    let occupants = grid.occupants(target);
    if occupants.is_empty() {
        return Maneuver::Advance(target);
    }

    let aggressive_present = occupants
        .iter()
        .any(|&id| ctx.population.kind_of(id).is_some_and(DriverKind::is_aggressive));

    if aggressive_present {
        let mut involved: BTreeSet<AgentId> = occupants.iter().copied().collect();
        involved.insert(car.id);
        return Maneuver::Crash {
            site:     target,
            involved: involved.into_iter().collect(),
        };
    }

    match car.kind {
        DriverKind::Yielding   => Maneuver::Swerve(rng.swerve()),
        DriverKind::Aggressive => Maneuver::Hold,
    }
}
