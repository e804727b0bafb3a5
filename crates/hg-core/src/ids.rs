use core::fmt;
use core::num::NonZeroU32;

/// Compact, stable identifier assigned by an element registry.
///
/// - `u32` keeps memory small
/// - `NonZero` enables `Option<Id>` to be pointer-optimized, which matters
///   because every element carries an `Option<Id>` until it is registered
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Id(NonZeroU32);

impl Id {
    /// Create an Id from a 0-based registry slot by storing slot+1.
    pub fn from_index(index: u32) -> Self {
        Self(NonZeroU32::MIN.saturating_add(index))
    }

    /// Recover the 0-based registry slot.
    pub fn index(self) -> u32 {
        self.0.get() - 1
    }

    /// Registry slot as a `usize`, for indexing element vectors.
    pub fn slot(self) -> usize {
        self.index() as usize
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.index())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// Domain-specific ID aliases for clarity (no runtime cost).
pub type ProcessId = Id;
pub type CouplingId = Id;
pub type HeaterId = Id;
pub type BusId = Id;
pub type BranchId = Id;
pub type ControllerId = Id;
pub type CpsId = Id;
