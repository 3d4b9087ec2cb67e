//! Unit tests for tf-behavior.

use tf_agent::{Car, Population};
use tf_core::{AgentId, Cell, Direction, DriverKind, TrafficRng};
use tf_grid::MultiGrid;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Returns the same heading and swerve every time and counts draws.
struct FixedRng {
    heading: Direction,
    swerve:  Direction,
    draws:   usize,
}

impl FixedRng {
    fn new(heading: Direction, swerve: Direction) -> Self {
        Self { heading, swerve, draws: 0 }
    }
}

impl TrafficRng for FixedRng {
    fn heading(&mut self) -> Direction {
        self.draws += 1;
        self.heading
    }
    fn swerve(&mut self) -> Direction {
        self.draws += 1;
        self.swerve
    }
    fn cell(&mut self, _w: u32, _h: u32) -> Cell {
        Cell::new(0, 0)
    }
    fn shuffle_ids(&mut self, _ids: &mut [AgentId]) {}
}

/// Place `cars` (id, kind, heading, cell) on a fresh `w × h` grid.
fn world(w: u32, h: u32, cars: &[(u32, DriverKind, Direction, Cell)]) -> (MultiGrid, Population) {
    let mut grid = MultiGrid::new(w, h).unwrap();
    let mut pop = Population::new();
    for &(id, kind, dir, cell) in cars {
        pop.insert(Car::new(AgentId(id), kind, dir)).unwrap();
        grid.place(AgentId(id), cell).unwrap();
    }
    (grid, pop)
}

fn decide_for(id: u32, grid: &MultiGrid, pop: &Population, rng: &mut FixedRng) -> crate::Maneuver {
    let car = *pop.get(AgentId(id)).unwrap();
    let from = grid.locate(AgentId(id)).unwrap();
    crate::decide(&car, from, &crate::DriveContext::new(grid, pop), rng)
}

// ── Boundary ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod boundary {
    use super::*;
    use crate::Maneuver;

    #[test]
    fn leaving_the_grid_redraws_heading() {
        let (grid, pop) = world(3, 3, &[(0, DriverKind::Yielding, Direction::WEST, Cell::new(0, 1))]);
        let mut rng = FixedRng::new(Direction::ZERO, Direction::NORTH);
        assert_eq!(decide_for(0, &grid, &pop, &mut rng), Maneuver::Bounce(Direction::ZERO));
        assert_eq!(rng.draws, 1);
    }

    #[test]
    fn every_nonzero_heading_bounces_on_a_single_cell() {
        for d in Direction::ALL.into_iter().filter(|d| !d.is_zero()) {
            let (grid, pop) = world(1, 1, &[(0, DriverKind::Aggressive, d, Cell::new(0, 0))]);
            let mut rng = FixedRng::new(Direction::EAST, Direction::EAST);
            assert!(matches!(decide_for(0, &grid, &pop, &mut rng), Maneuver::Bounce(_)), "{d}");
        }
    }
}

// ── Free movement ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod advance {
    use super::*;
    use crate::Maneuver;

    #[test]
    fn empty_target_advances_without_drawing() {
        let (grid, pop) = world(3, 3, &[(0, DriverKind::Yielding, Direction::new(1, 1).unwrap(), Cell::new(0, 0))]);
        let mut rng = FixedRng::new(Direction::ZERO, Direction::NORTH);
        assert_eq!(decide_for(0, &grid, &pop, &mut rng), Maneuver::Advance(Cell::new(1, 1)));
        assert_eq!(rng.draws, 0);
    }
}

// ── Yielding traffic ──────────────────────────────────────────────────────────

#[cfg(test)]
mod yielding_traffic {
    use super::*;
    use crate::Maneuver;

    #[test]
    fn yielding_mover_swerves_axis_aligned() {
        let (grid, pop) = world(3, 1, &[
            (0, DriverKind::Yielding, Direction::EAST, Cell::new(0, 0)),
            (1, DriverKind::Yielding, Direction::ZERO, Cell::new(1, 0)),
        ]);
        let mut rng = FixedRng::new(Direction::ZERO, Direction::SOUTH);
        let m = decide_for(0, &grid, &pop, &mut rng);
        assert_eq!(m, Maneuver::Swerve(Direction::SOUTH));
        assert_eq!(m.new_direction(), Some(Direction::SOUTH));
    }

    #[test]
    fn aggressive_mover_holds_behind_yielding() {
        let (grid, pop) = world(3, 1, &[
            (0, DriverKind::Aggressive, Direction::EAST, Cell::new(0, 0)),
            (1, DriverKind::Yielding,   Direction::ZERO, Cell::new(1, 0)),
        ]);
        let mut rng = FixedRng::new(Direction::ZERO, Direction::SOUTH);
        let m = decide_for(0, &grid, &pop, &mut rng);
        assert_eq!(m, Maneuver::Hold);
        assert_eq!(m.new_direction(), None);
        assert_eq!(rng.draws, 0);
    }

    #[test]
    fn stationary_yielding_car_swerves_off_its_own_cell() {
        let (grid, pop) = world(2, 2, &[(0, DriverKind::Yielding, Direction::ZERO, Cell::new(0, 0))]);
        let mut rng = FixedRng::new(Direction::ZERO, Direction::EAST);
        assert_eq!(decide_for(0, &grid, &pop, &mut rng), Maneuver::Swerve(Direction::EAST));
    }
}

// ── Crashes ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod crash {
    use super::*;
    use crate::Maneuver;

    #[test]
    fn aggressive_occupant_takes_everyone() {
        let target = Cell::new(1, 0);
        let (grid, pop) = world(3, 1, &[
            (0, DriverKind::Yielding,   Direction::EAST, Cell::new(0, 0)),
            (1, DriverKind::Yielding,   Direction::ZERO, target),
            (2, DriverKind::Aggressive, Direction::ZERO, target),
        ]);
        let mut rng = FixedRng::new(Direction::ZERO, Direction::NORTH);
        assert_eq!(
            decide_for(0, &grid, &pop, &mut rng),
            Maneuver::Crash { site: target, involved: vec![AgentId(0), AgentId(1), AgentId(2)] }
        );
    }

    #[test]
    fn mover_listed_once_when_already_an_occupant() {
        let c = Cell::new(0, 0);
        let (grid, pop) = world(1, 1, &[
            (4, DriverKind::Yielding,   Direction::ZERO, c),
            (7, DriverKind::Aggressive, Direction::ZERO, c),
        ]);
        let mut rng = FixedRng::new(Direction::ZERO, Direction::NORTH);
        assert_eq!(
            decide_for(4, &grid, &pop, &mut rng),
            Maneuver::Crash { site: c, involved: vec![AgentId(4), AgentId(7)] }
        );
    }

    #[test]
    fn stationary_aggressive_car_crashes_into_itself() {
        let c = Cell::new(2, 2);
        let (grid, pop) = world(5, 5, &[(0, DriverKind::Aggressive, Direction::ZERO, c)]);
        let mut rng = FixedRng::new(Direction::ZERO, Direction::NORTH);
        let m = decide_for(0, &grid, &pop, &mut rng);
        assert_eq!(m, Maneuver::Crash { site: c, involved: vec![AgentId(0)] });
    }

    #[test]
    fn labels() {
        assert_eq!(Maneuver::Hold.as_str(), "hold");
        assert_eq!(Maneuver::Advance(Cell::new(0, 0)).as_str(), "advance");
    }
}
