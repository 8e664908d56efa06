//! Common vocabulary for the gatesim workspace.
//!
//! This crate provides the identifiers, signal states, circuit kinds, configuration
//! and error types shared by the simulation engine and its tests.

pub mod config;
pub mod error;
pub mod ids;
pub mod kind;
pub mod state;

pub use crate::config::*;
pub use crate::error::*;
pub use crate::ids::*;
pub use crate::kind::*;
pub use crate::state::*;
