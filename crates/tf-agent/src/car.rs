//! The per-entity state of one car.

use tf_core::{AgentId, Direction, DriverKind};

/// One car on the road.
///
/// `Car` is small and `Copy`: the decision step reads a copy, and the apply
/// step writes the new heading back into the population.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Car {
    pub id:        AgentId,
    pub kind:      DriverKind,
    pub direction: Direction,
}

impl Car {
    #[inline]
    pub fn new(id: AgentId, kind: DriverKind, direction: Direction) -> Self {
        Self { id, kind, direction }
    }
}
