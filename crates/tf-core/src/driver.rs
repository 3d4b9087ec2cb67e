//! Driver temperament shared across all crates.

/// The two kinds of car on the grid.
///
/// Behavior is selected by `match` on this tag inside the decision step;
/// there is no per-kind trait object.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DriverKind {
    /// Swerves to an axis-aligned heading when its target cell holds only
    /// other yielding cars.
    Yielding,
    /// Never swerves.  Any cell it occupies becomes a crash site for every
    /// car that tries to enter it.
    Aggressive,
}

impl DriverKind {
    /// Both kinds, in id-assignment order for the initial population.
    pub const ALL: [DriverKind; 2] = [DriverKind::Yielding, DriverKind::Aggressive];

    #[inline]
    pub fn is_aggressive(self) -> bool {
        matches!(self, DriverKind::Aggressive)
    }

    /// Human-readable label, used for CSV/Parquet column values.
    pub fn as_str(self) -> &'static str {
        match self {
            DriverKind::Yielding   => "yielding",
            DriverKind::Aggressive => "aggressive",
        }
    }
}

impl std::fmt::Display for DriverKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
