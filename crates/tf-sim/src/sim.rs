//! The `Sim` struct and its tick loop.

use tracing::{debug, info, trace};

use tf_agent::{Car, Population, PopulationCounts};
use tf_behavior::{DriveContext, Maneuver, decide};
use tf_core::{AgentId, IdPolicy, SimConfig, SimRng, Tick, TrafficRng};
use tf_grid::MultiGrid;

use crate::{CollisionEvent, SimObserver, SimResult, SpawnEvent, TickSummary};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<R>` holds all simulation state and drives the tick loop:
///
/// 1. **Metrics**: count each driver kind before anyone moves.
/// 2. **Sub-steps** (`config.sub_steps_per_tick` of them): every live car
///    acts once, in a freshly shuffled order.  A car removed earlier in the
///    same sub-step is skipped.
/// 3. **Streak**: the collision-free streak grows by one per tick.  Crashes
///    reset it to 0 the moment they happen.
/// 4. **Spawn**: once the streak reaches `config.spawn_streak`, one car of
///    the majority kind joins and the streak restarts.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<R: TrafficRng = SimRng> {
    /// Run configuration (counts, grid size, speed, seed, …).
    pub config: SimConfig,

    /// The tick that the next call to [`tick`](Self::tick) will execute.
    pub current_tick: Tick,

    /// Cell occupancy and the authoritative car positions.
    pub grid: MultiGrid,

    /// Live cars keyed by id.
    pub population: Population,

    /// The single shared random source.
    pub rng: R,

    /// Ticks since the last crash (or since the last spawn).
    pub(crate) streak: u64,

    /// Strictly greater than every id ever issued in this run.
    pub(crate) next_id: AgentId,
}

impl<R: TrafficRng> Sim<R> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current tick to `config.total_ticks`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let end = Tick(self.config.total_ticks);
        info!(
            start = self.current_tick.0,
            end = end.0,
            cars = self.population.len(),
            width = self.grid.width(),
            height = self.grid.height(),
            "simulation starting"
        );
        while self.current_tick < end {
            self.tick(observer)?;
        }
        observer.on_sim_end(self.current_tick);
        let counts = self.counts();
        info!(
            tick = self.current_tick.0,
            yielding = counts.yielding,
            aggressive = counts.aggressive,
            "simulation finished"
        );
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores
    /// `total_ticks`).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.tick(observer)?;
        }
        Ok(())
    }

    /// Execute one tick: metrics, sub-steps, streak, spawn.
    pub fn tick<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<TickSummary> {
        let now = self.current_tick;
        let counts_before = self.population.counts();
        observer.on_tick_start(now, counts_before);

        let mut collisions = 0;
        for sub_step in 0..self.config.sub_steps_per_tick {
            // Snapshot the ids: crashes remove cars while we iterate.
            let mut order: Vec<AgentId> = self.population.ids().collect();
            self.rng.shuffle_ids(&mut order);
            for id in order {
                if self.act(id, now, sub_step, observer)? {
                    collisions += 1;
                }
            }
        }

        self.streak += 1;
        let spawned = if self.streak >= self.config.spawn_streak {
            let id = self.spawn(now, observer)?;
            self.streak = 0;
            Some(id)
        } else {
            None
        };

        let summary = TickSummary {
            tick: now,
            counts_before,
            counts_after: self.population.counts(),
            collisions,
            spawned,
            streak: self.streak,
        };
        observer.on_tick_end(&summary);

        let interval = self.config.snapshot_interval_ticks;
        if interval > 0 && now.0.is_multiple_of(interval) {
            observer.on_snapshot(now, &self.grid, &self.population);
        }

        self.current_tick = now + 1;
        Ok(summary)
    }

    /// Current collision-free streak.
    #[inline]
    pub fn streak(&self) -> u64 {
        self.streak
    }

    /// Head-count of each driver kind right now.
    pub fn counts(&self) -> PopulationCounts {
        self.population.counts()
    }

    /// Lower bound for the next id under [`IdPolicy::Monotonic`].
    #[inline]
    pub fn next_id(&self) -> AgentId {
        self.next_id
    }

    // ── Per-car action ────────────────────────────────────────────────────

    /// Let one car act.  Returns `true` if it caused a crash.
    ///
    /// A car that is no longer live, or is somehow off the grid, does
    /// nothing.
    fn act<O: SimObserver>(
        &mut self,
        id:       AgentId,
        now:      Tick,
        sub_step: u32,
        observer: &mut O,
    ) -> SimResult<bool> {
        let Some(car) = self.population.get(id).copied() else {
            return Ok(false);
        };
        let Some(from) = self.grid.locate(id) else {
            return Ok(false);
        };

        let maneuver = {
            let ctx = DriveContext::new(&self.grid, &self.population);
            decide(&car, from, &ctx, &mut self.rng)
        };
        trace!(agent = id.0, kind = %car.kind, from = %from, maneuver = maneuver.as_str(), "act");

        match maneuver {
            Maneuver::Bounce(_) | Maneuver::Swerve(_) | Maneuver::Hold => {
                if let (Some(direction), Some(c)) =
                    (maneuver.new_direction(), self.population.get_mut(id))
                {
                    c.direction = direction;
                }
                Ok(false)
            }
            Maneuver::Advance(to) => {
                self.grid.move_agent(id, to)?;
                Ok(false)
            }
            Maneuver::Crash { site, involved } => {
                let mut wrecked = Vec::with_capacity(involved.len());
                for victim in involved {
                    let Some(kind) = self.population.kind_of(victim) else {
                        continue;
                    };
                    // Grid first: a failure leaves the car fully live.
                    self.grid.remove(victim)?;
                    self.population.remove(victim);
                    wrecked.push((victim, kind));
                }
                self.streak = 0;

                let event = CollisionEvent {
                    tick: now,
                    sub_step,
                    site,
                    instigator: id,
                    involved: wrecked,
                };
                let lost = event.casualties();
                debug!(
                    tick = now.0,
                    sub_step,
                    site = %site,
                    instigator = id.0,
                    yielding_lost = lost.yielding,
                    aggressive_lost = lost.aggressive,
                    "collision"
                );
                observer.on_collision(&event);
                Ok(true)
            }
        }
    }

    // ── Spawn rule ────────────────────────────────────────────────────────

    /// Id the next spawned car will receive under the configured policy.
    pub fn next_spawn_id(&self) -> AgentId {
        match self.config.id_policy {
            IdPolicy::Monotonic => self.next_id,
            IdPolicy::MaxLivePlusOne => self
                .population
                .max_id()
                .map_or(AgentId(0), AgentId::next),
        }
    }

    /// Add one car of the majority kind at a random cell.  The cell's
    /// current occupants are not consulted.
    fn spawn<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> SimResult<AgentId> {
        let kind = self.population.counts().majority_kind();
        let id = self.next_spawn_id();
        let direction = self.rng.heading();
        let cell = self.rng.cell(self.grid.width(), self.grid.height());

        self.grid.place(id, cell)?;
        self.population.insert(Car::new(id, kind, direction))?;
        self.next_id = self.next_id.max(id.next());

        debug!(tick = now.0, agent = id.0, kind = %kind, cell = %cell, "spawn");
        observer.on_spawn(&SpawnEvent { tick: now, agent: id, kind, cell, direction });
        Ok(id)
    }
}
