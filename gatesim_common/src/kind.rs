//! Circuit categories and their pin-count rules.

use std::fmt;
use std::fmt::Formatter;

use serde::{Deserialize, Serialize};

/// Categorizes the circuits the engine knows how to simulate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CircuitKind {
    /// Logical AND gate.
    And,
    /// Logical OR gate.
    Or,
    /// Inverter gate.
    Not,
    /// Composite circuit made of an ordered list of children.
    Component,
}

impl CircuitKind {
    /// Returns true for the primitive gates.
    #[must_use]
    pub const fn is_gate(&self) -> bool {
        matches!(self, Self::And | Self::Or | Self::Not)
    }

    /// Returns true if the inputs to this circuit can be swapped without changing logic.
    #[must_use]
    pub const fn has_commutative_inputs(&self) -> bool {
        matches!(self, Self::And | Self::Or)
    }

    /// Smallest legal input count for a gate of this kind.
    ///
    /// Components accept any count, so they report zero.
    #[must_use]
    pub const fn min_inputs(&self) -> usize {
        match self {
            Self::And | Self::Or => 2,
            Self::Not => 1,
            Self::Component => 0,
        }
    }

    /// Largest legal input count, `None` when unbounded.
    #[must_use]
    pub const fn max_inputs(&self) -> Option<usize> {
        match self {
            Self::Not => Some(1),
            Self::And | Self::Or | Self::Component => None,
        }
    }

    /// Output count of a gate of this kind, `None` for components.
    #[must_use]
    pub const fn fixed_outputs(&self) -> Option<usize> {
        match self {
            Self::And | Self::Or | Self::Not => Some(1),
            Self::Component => None,
        }
    }

    /// Returns true if a gate of this kind may have `num_inputs` inputs.
    #[must_use]
    pub fn accepts_inputs(&self, num_inputs: usize) -> bool {
        num_inputs >= self.min_inputs() && self.max_inputs().is_none_or(|max| num_inputs <= max)
    }
}

impl fmt::Display for CircuitKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Which side of a circuit boundary a pin sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PinDirection {
    /// Driven from outside the circuit.
    Input,
    /// Driven by the circuit itself.
    Output,
}

impl PinDirection {
    /// Diagnostic label of the `index`-th pin of circuit `owner`,
    /// e.g. `input 0 of and1`.
    #[must_use]
    pub fn label(&self, index: usize, owner: &str) -> String {
        format!("{self} {index} of {owner}")
    }
}

impl fmt::Display for PinDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => write!(f, "input"),
            Self::Output => write!(f, "output"),
        }
    }
}
