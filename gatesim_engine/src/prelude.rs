//! Everything needed to build and simulate a netlist.

pub use crate::{Circuit, CircuitBody, CloneMap, Netlist, Pin};
pub use gatesim_common::{
    CircuitId, CircuitKind, PinDirection, PinId, PinState, Result, SimConfig, SimError,
    UnsetPolicy,
};
