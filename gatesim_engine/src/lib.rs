//! Signal propagation and composition engine for discrete logic circuits.
//!
//! A [`Netlist`] is an arena of [`Pin`]s and [`Circuit`]s. Pins carry a tri-state
//! signal and forward every change to the pins observing them; gates recompute
//! their function only when processed; components process their children in the
//! order they were added. Subtrees can be deep-copied with
//! [`Netlist::clone_circuit`] and re-wired through the returned [`CloneMap`].
//!
//! ```ignore
//! use gatesim_engine::prelude::*;
//!
//! let mut net = Netlist::new();
//! let and1 = net.and("and1");
//! net.set_inputs(and1, &[true, true])?;
//! net.process(and1)?;
//! assert_eq!(net.output_state(and1, 0)?, PinState::High);
//! ```

mod circuit;
mod clone;
mod netlist;
mod pin;

pub mod prelude;

pub use crate::circuit::{Circuit, CircuitBody};
pub use crate::clone::CloneMap;
pub use crate::netlist::Netlist;
pub use crate::pin::Pin;
