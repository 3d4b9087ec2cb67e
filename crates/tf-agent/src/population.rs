//! The live car population.
//!
//! # Why a `BTreeMap`?
//!
//! Cars are removed while a sub-step is in flight (a crash can take out
//! cars that have not acted yet).  Keying the arena by `AgentId` means a
//! removal never shifts or invalidates anyone else's slot: the tick loop
//! iterates a snapshot of [`Population::ids`] and simply skips ids that are
//! no longer present.  The ordered map also keeps iteration deterministic,
//! which keeps seeded runs reproducible.

use std::collections::BTreeMap;

use tf_core::{AgentId, DriverKind, TfError, TfResult};

use crate::Car;

// ── PopulationCounts ──────────────────────────────────────────────────────────

/// Head-count of each driver kind: the per-tick metrics snapshot.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PopulationCounts {
    pub yielding:   usize,
    pub aggressive: usize,
}

impl PopulationCounts {
    #[inline]
    pub fn total(&self) -> usize {
        self.yielding + self.aggressive
    }

    #[inline]
    pub fn of(&self, kind: DriverKind) -> usize {
        match kind {
            DriverKind::Yielding   => self.yielding,
            DriverKind::Aggressive => self.aggressive,
        }
    }

    /// The kind with strictly more live cars; a tie (including 0 vs 0)
    /// goes to `Aggressive`.
    pub fn majority_kind(&self) -> DriverKind {
        if self.yielding > self.aggressive {
            DriverKind::Yielding
        } else {
            DriverKind::Aggressive
        }
    }
}

// ── Population ────────────────────────────────────────────────────────────────

/// Every live car, keyed by id.
#[derive(Default, Debug, Clone)]
pub struct Population {
    cars: BTreeMap<AgentId, Car>,
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a car.  Fails if a live car already has the same id.
    pub fn insert(&mut self, car: Car) -> TfResult<()> {
        if self.cars.contains_key(&car.id) {
            return Err(TfError::DuplicateAgent(car.id));
        }
        self.cars.insert(car.id, car);
        Ok(())
    }

    /// Remove a car, returning it if it was live.
    #[inline]
    pub fn remove(&mut self, id: AgentId) -> Option<Car> {
        self.cars.remove(&id)
    }

    #[inline]
    pub fn get(&self, id: AgentId) -> Option<&Car> {
        self.cars.get(&id)
    }

    #[inline]
    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Car> {
        self.cars.get_mut(&id)
    }

    #[inline]
    pub fn contains(&self, id: AgentId) -> bool {
        self.cars.contains_key(&id)
    }

    /// Driver kind of a live car.
    #[inline]
    pub fn kind_of(&self, id: AgentId) -> Option<DriverKind> {
        self.cars.get(&id).map(|c| c.kind)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cars.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cars.is_empty()
    }

    /// Live ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.cars.keys().copied()
    }

    /// Live cars in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Car> + '_ {
        self.cars.values()
    }

    /// Largest live id, or `None` when the population is empty.
    #[inline]
    pub fn max_id(&self) -> Option<AgentId> {
        self.cars.keys().next_back().copied()
    }

    /// Count each driver kind.  O(n).
    pub fn counts(&self) -> PopulationCounts {
        self.cars.values().fold(PopulationCounts::default(), |mut acc, car| {
            match car.kind {
                DriverKind::Yielding   => acc.yielding += 1,
                DriverKind::Aggressive => acc.aggressive += 1,
            }
            acc
        })
    }
}
