//! Type-safe arena identifiers.
//!
//! - [`PinId`]: index of a pin inside a netlist's pin arena.
//! - [`CircuitId`]: index of a circuit inside a netlist's circuit arena.
//!
//! Ids are only meaningful for the netlist that allocated them. Observer edges are
//! keyed by [`PinId`], never by pin name, so renaming a circuit cannot break wiring.

use contracts::*;
use std::fmt;

// ---------------------------------------------------------------------------
// PinId
// ---------------------------------------------------------------------------

/// Index of a pin inside a netlist arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PinId {
    /// The underlying raw arena slot.
    inner: u32,
}

impl PinId {
    /// Creates a pin id from a raw arena slot.
    #[ensures(ret.inner == id)]
    pub fn new(id: u32) -> Self {
        Self { inner: id }
    }

    /// Returns the id as a usize for arena access.
    #[ensures(ret == self.inner as usize)]
    pub fn as_usize(self) -> usize {
        self.inner as usize
    }
}

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.inner)
    }
}

impl From<usize> for PinId {
    #[inline]
    fn from(id: usize) -> Self {
        Self { inner: id as u32 }
    }
}

impl From<PinId> for usize {
    #[inline]
    fn from(id: PinId) -> Self {
        id.inner as Self
    }
}

// ---------------------------------------------------------------------------
// CircuitId
// ---------------------------------------------------------------------------

/// Index of a circuit (gate or component) inside a netlist arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CircuitId {
    /// The underlying raw arena slot.
    inner: u32,
}

impl CircuitId {
    /// Creates a circuit id from a raw arena slot.
    #[ensures(ret.inner == id)]
    pub fn new(id: u32) -> Self {
        Self { inner: id }
    }

    /// Returns the id as a usize for arena access.
    #[ensures(ret == self.inner as usize)]
    pub fn as_usize(self) -> usize {
        self.inner as usize
    }
}

impl fmt::Display for CircuitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.inner)
    }
}

impl From<usize> for CircuitId {
    #[inline]
    fn from(id: usize) -> Self {
        Self { inner: id as u32 }
    }
}

impl From<CircuitId> for usize {
    #[inline]
    fn from(id: CircuitId) -> Self {
        id.inner as Self
    }
}
