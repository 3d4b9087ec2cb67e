//! Fluent builder for constructing a [`Sim`].

use tf_agent::{Car, Population};
use tf_core::{AgentId, Cell, Direction, DriverKind, SimConfig, SimRng, Tick, TrafficRng};
use tf_grid::MultiGrid;

use crate::{Sim, SimError, SimResult};

/// Explicit starting spot for one car of the initial population.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub kind:      DriverKind,
    pub cell:      Cell,
    /// `None` draws a random heading at build time.
    pub direction: Option<Direction>,
}

impl Placement {
    pub fn new(kind: DriverKind, cell: Cell) -> Self {
        Self { kind, cell, direction: None }
    }

    pub fn heading(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }
}

/// Fluent builder for [`Sim<R>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: counts, grid size, speed, seed, …
///
/// # Optional inputs (have defaults)
///
/// | Method             | Default                                           |
/// |--------------------|---------------------------------------------------|
/// | `.rng(r)`          | `SimRng::new(config.seed)`                        |
/// | `.placements(v)`   | Random cell and heading for every initial car     |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config)
///     .placements(vec![Placement::new(DriverKind::Yielding, Cell::new(0, 0))])
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<R: TrafficRng = SimRng> {
    config:     SimConfig,
    rng:        R,
    placements: Option<Vec<Placement>>,
}

impl SimBuilder<SimRng> {
    /// Create a builder seeded from `config.seed`.
    pub fn new(config: SimConfig) -> Self {
        let rng = SimRng::new(config.seed);
        Self { config, rng, placements: None }
    }
}

impl<R: TrafficRng> SimBuilder<R> {
    /// Replace the random source (e.g. with a scripted one in tests).
    pub fn rng<S: TrafficRng>(self, rng: S) -> SimBuilder<S> {
        SimBuilder {
            config:     self.config,
            rng,
            placements: self.placements,
        }
    }

    /// Place the initial population explicitly.
    ///
    /// The number of placements of each kind must match
    /// `config.initial_yielding` / `config.initial_aggressive`.  Ids are
    /// assigned in the order given, starting at 0.
    pub fn placements(mut self, placements: Vec<Placement>) -> Self {
        self.placements = Some(placements);
        self
    }

    /// Validate inputs, place the initial population, and return a
    /// ready-to-run [`Sim`].
    ///
    /// Without explicit placements, yielding cars get ids
    /// `0..initial_yielding` and aggressive cars the ids after them; each
    /// draws a heading and then a cell.
    pub fn build(self) -> SimResult<Sim<R>> {
        let config = self.config;
        config.validate()?;
        let mut rng = self.rng;

        // ── Resolve placements ────────────────────────────────────────────
        let placements = match self.placements {
            Some(p) => {
                for kind in DriverKind::ALL {
                    let expected = match kind {
                        DriverKind::Yielding   => config.initial_yielding,
                        DriverKind::Aggressive => config.initial_aggressive,
                    };
                    let got = p.iter().filter(|pl| pl.kind == kind).count();
                    if got != expected as usize {
                        return Err(SimError::PlacementMismatch { kind, expected, got });
                    }
                }
                p
            }
            None => {
                let total = config.initial_population() as usize;
                let mut p = Vec::with_capacity(total);
                for kind in DriverKind::ALL {
                    let n = match kind {
                        DriverKind::Yielding   => config.initial_yielding,
                        DriverKind::Aggressive => config.initial_aggressive,
                    };
                    for _ in 0..n {
                        let direction = rng.heading();
                        let cell = rng.cell(config.width, config.height);
                        p.push(Placement { kind, cell, direction: Some(direction) });
                    }
                }
                p
            }
        };

        // ── Populate grid and arena ───────────────────────────────────────
        let mut grid = MultiGrid::new(config.width, config.height)?;
        let mut population = Population::new();
        let mut next_id = AgentId(0);
        for placement in placements {
            let id = next_id;
            let direction = match placement.direction {
                Some(d) => d,
                None => rng.heading(),
            };
            grid.place(id, placement.cell)?;
            population.insert(Car::new(id, placement.kind, direction))?;
            next_id = id.next();
        }

        Ok(Sim {
            config,
            current_tick: Tick::ZERO,
            grid,
            population,
            rng,
            streak: 0,
            next_id,
        })
    }
}
