//! Strongly typed agent identifier.
//!
//! `AgentId` is `Copy + Ord + Hash` so it can key the population arena and
//! the grid's location index without ceremony.  Ids are issued by the
//! simulation; an id is never shared by two live agents.

use std::fmt;

/// Identifier of one car.  Max ~4.3 billion ids per run.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentId(pub u32);

impl AgentId {
    /// The id immediately after `self`.
    #[inline(always)]
    pub fn next(self) -> AgentId {
        AgentId(self.0 + 1)
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AgentId({})", self.0)
    }
}

impl From<AgentId> for u32 {
    #[inline(always)]
    fn from(id: AgentId) -> u32 {
        id.0
    }
}

