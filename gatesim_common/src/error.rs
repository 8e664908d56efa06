//! Error types for building and simulating netlists.
//!
//! Every error is raised synchronously by the operation that violated a rule.
//! Nothing is retried and nothing is rolled back.

use thiserror::Error;

use crate::{CircuitId, CircuitKind, PinDirection, PinId};

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, SimError>;

/// Errors that can occur while wiring or simulating a netlist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    // === Evaluation errors ===
    /// A gate was processed while one of its inputs had never been driven.
    #[error("{circuit} cannot be processed: {pin} has no state")]
    UninitializedInput {
        /// Name of the gate being processed.
        circuit: String,
        /// Diagnostic name of the undriven input.
        pin: String,
    },

    /// An undriven pin was read as a boolean.
    #[error("{pin} has no state")]
    StateNotSet {
        /// Diagnostic name of the pin.
        pin: String,
    },

    /// A single state change travelled further than the configured limit.
    #[error("propagation from {pin} exceeded {limit} hops (cyclic wiring?)")]
    PropagationDepthExceeded {
        /// Diagnostic name of the pin that started the wave.
        pin: String,
        /// The configured hop limit.
        limit: usize,
    },

    // === Access errors ===
    /// Pin index outside of a circuit's declared boundary.
    #[error("{circuit} has {len} {direction} pins, index {index} is out of range")]
    IndexOutOfRange {
        /// Name of the circuit.
        circuit: String,
        /// Which side of the boundary was addressed.
        direction: PinDirection,
        /// The requested index.
        index: usize,
        /// The declared pin count.
        len: usize,
    },

    /// The pin id was not allocated by this netlist.
    #[error("unknown pin {0}")]
    UnknownPin(PinId),

    /// The circuit id was not allocated by this netlist.
    #[error("unknown circuit {0}")]
    UnknownCircuit(CircuitId),

    // === Wiring errors ===
    /// Removal of an observer edge that does not exist.
    #[error("{observer} is not an observer of {observed}")]
    NotAnObserver {
        /// Diagnostic name of the observed pin.
        observed: String,
        /// Diagnostic name of the pin that was expected to observe it.
        observer: String,
    },

    /// The same observer edge was registered twice.
    #[error("{observer} already observes {observed}")]
    DuplicateObserver {
        /// Diagnostic name of the observed pin.
        observed: String,
        /// Diagnostic name of the observer.
        observer: String,
    },

    /// A pin was connected to itself.
    #[error("{pin} cannot observe itself")]
    SelfConnection {
        /// Diagnostic name of the pin.
        pin: String,
    },

    // === Construction errors ===
    /// A gate was declared with a pin count its kind does not allow.
    #[error("{kind} gate expects {expected} inputs, got {actual}")]
    InvalidArity {
        /// Kind of the gate being constructed.
        kind: CircuitKind,
        /// Human readable description of the legal counts.
        expected: String,
        /// The requested count.
        actual: usize,
    },

    /// Children can only be added to components.
    #[error("{circuit} is a primitive gate and cannot own circuits")]
    NotAComponent {
        /// Name of the gate.
        circuit: String,
    },

    /// Circuits are owned by at most one component.
    #[error("{child} already belongs to {parent}")]
    AlreadyOwned {
        /// Name of the circuit being added.
        child: String,
        /// Name of its current owner.
        parent: String,
    },

    /// A component would end up containing itself.
    #[error("adding {child} to {parent} would make {parent} contain itself")]
    CompositionCycle {
        /// Name of the receiving component.
        parent: String,
        /// Name of the circuit being added.
        child: String,
    },

    // === Configuration errors ===
    /// Simulator configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl SimError {
    /// Create an uninitialized-input error.
    pub fn uninitialized_input(circuit: impl Into<String>, pin: impl Into<String>) -> Self {
        Self::UninitializedInput {
            circuit: circuit.into(),
            pin: pin.into(),
        }
    }

    /// Create a not-an-observer error.
    pub fn not_an_observer(observed: impl Into<String>, observer: impl Into<String>) -> Self {
        Self::NotAnObserver {
            observed: observed.into(),
            observer: observer.into(),
        }
    }

    /// Create a duplicate-observer error.
    pub fn duplicate_observer(observed: impl Into<String>, observer: impl Into<String>) -> Self {
        Self::DuplicateObserver {
            observed: observed.into(),
            observer: observer.into(),
        }
    }

    /// Create an out-of-range error.
    pub fn index_out_of_range(
        circuit: impl Into<String>,
        direction: PinDirection,
        index: usize,
        len: usize,
    ) -> Self {
        Self::IndexOutOfRange {
            circuit: circuit.into(),
            direction,
            index,
            len,
        }
    }

    /// Create an arity error, describing the legal counts of `kind`.
    pub fn invalid_arity(kind: CircuitKind, actual: usize) -> Self {
        let expected = match kind.max_inputs() {
            Some(max) if max == kind.min_inputs() => format!("exactly {max}"),
            Some(max) => format!("{} to {max}", kind.min_inputs()),
            None => format!("at least {}", kind.min_inputs()),
        };
        Self::InvalidArity {
            kind,
            expected,
            actual,
        }
    }
}
