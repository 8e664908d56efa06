//! Configuration for the simulation engine.
//!
//! The two knobs that change semantics are:
//! - max_propagation_depth: how many pin-to-pin hops a single state change may
//!   travel before it is treated as runaway (cyclic) wiring.
//! - unset_inputs: what a gate does when asked to compute over an input that
//!   was never driven.
//!
//! Quick examples
//!
//! Strict evaluation (default):
//! ```ignore
//! use gatesim_common::SimConfig;
//! let cfg = SimConfig::strict();
//! ```
//!
//! Treat undriven inputs as low, with a deeper propagation budget:
//! ```ignore
//! use gatesim_common::{SimConfig, UnsetPolicy};
//! let cfg = SimConfig::new(4096, UnsetPolicy::AsLow);
//! ```

use contracts::*;
use serde::{Deserialize, Serialize};

use crate::SimError;

/// Default hop limit of a single propagation wave.
pub const DEFAULT_MAX_PROPAGATION_DEPTH: usize = 1024;

/// Simulator configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Maximum number of hops a single `set_state` may traverse.
    pub max_propagation_depth: usize,
    /// How gates treat inputs that were never driven.
    pub unset_inputs: UnsetPolicy,
    /// Emit a trace event for every propagation hop.
    pub trace_propagation: bool,
}

impl SimConfig {
    /// Create a new configuration.
    #[must_use]
    pub const fn new(max_propagation_depth: usize, unset_inputs: UnsetPolicy) -> Self {
        Self {
            max_propagation_depth,
            unset_inputs,
            trace_propagation: false,
        }
    }

    /// Convenience: default depth, undriven inputs are errors.
    #[must_use]
    pub const fn strict() -> Self {
        Self::new(DEFAULT_MAX_PROPAGATION_DEPTH, UnsetPolicy::Reject)
    }

    /// Convenience: default depth, undriven inputs read as low.
    #[must_use]
    pub const fn permissive() -> Self {
        Self::new(DEFAULT_MAX_PROPAGATION_DEPTH, UnsetPolicy::AsLow)
    }

    /// Set the propagation hop limit.
    #[must_use]
    #[ensures(ret.max_propagation_depth == depth)]
    pub fn with_max_propagation_depth(mut self, depth: usize) -> Self {
        self.max_propagation_depth = depth;
        self
    }

    /// Set the undriven-input policy.
    #[must_use]
    #[ensures(ret.unset_inputs == policy)]
    pub fn with_unset_inputs(mut self, policy: UnsetPolicy) -> Self {
        self.unset_inputs = policy;
        self
    }

    /// Enable or disable per-hop trace events.
    #[must_use]
    #[ensures(ret.trace_propagation == enabled)]
    pub fn with_trace_propagation(mut self, enabled: bool) -> Self {
        self.trace_propagation = enabled;
        self
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] if the text is not a valid configuration.
    pub fn from_json_str(text: &str) -> Result<Self, SimError> {
        serde_json::from_str(text).map_err(|e| SimError::Config(e.to_string()))
    }

    /// Serialize the configuration to JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] if serialization fails.
    pub fn to_json_string(&self) -> Result<String, SimError> {
        serde_json::to_string(self).map_err(|e| SimError::Config(e.to_string()))
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::strict()
    }
}

/// What a gate does with an input that was never driven.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnsetPolicy {
    /// Fail the evaluation with [`SimError::UninitializedInput`].
    #[default]
    Reject,
    /// Read the input as `false`.
    AsLow,
}
