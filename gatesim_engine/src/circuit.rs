//! Circuits: primitive gates and composite components.
//!
//! Every circuit has a name, a fixed list of input pins and a fixed list of output
//! pins. What `process` does is decided by its [`CircuitBody`]:
//! - gates compute one boolean function of their inputs,
//! - components evaluate their children in insertion order.

use gatesim_common::{CircuitId, CircuitKind, PinDirection, PinId};

/// Behaviour of a circuit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CircuitBody {
    /// Conjunction of all inputs.
    And,
    /// Disjunction of all inputs.
    Or,
    /// Negation of the single input.
    Not,
    /// Ordered list of owned child circuits.
    Component(Vec<CircuitId>),
}

impl CircuitBody {
    /// The category of this body.
    #[must_use]
    pub const fn kind(&self) -> CircuitKind {
        match self {
            Self::And => CircuitKind::And,
            Self::Or => CircuitKind::Or,
            Self::Not => CircuitKind::Not,
            Self::Component(_) => CircuitKind::Component,
        }
    }

    /// Computes the gate function over concrete input levels.
    ///
    /// Returns `None` for components, which have no function of their own.
    #[must_use]
    pub fn evaluate(&self, levels: &[bool]) -> Option<bool> {
        match self {
            Self::And => Some(levels.iter().all(|&l| l)),
            Self::Or => Some(levels.iter().any(|&l| l)),
            Self::Not => levels.first().map(|&l| !l),
            Self::Component(_) => None,
        }
    }
}

/// A gate or component as stored in a [`crate::Netlist`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Circuit {
    /// Circuit name; boundary pin names are derived from it.
    name: String,
    /// Boundary input pins.
    inputs: Vec<PinId>,
    /// Boundary output pins.
    outputs: Vec<PinId>,
    /// Owning component, if any.
    parent: Option<CircuitId>,
    /// Gate function or child list.
    body: CircuitBody,
}

impl Circuit {
    pub(crate) const fn new(
        name: String,
        inputs: Vec<PinId>,
        outputs: Vec<PinId>,
        body: CircuitBody,
    ) -> Self {
        Self {
            name,
            inputs,
            outputs,
            parent: None,
            body,
        }
    }

    /// Circuit name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The category of this circuit.
    #[must_use]
    pub const fn kind(&self) -> CircuitKind {
        self.body.kind()
    }

    /// Gate function or child list.
    #[must_use]
    pub const fn body(&self) -> &CircuitBody {
        &self.body
    }

    /// Boundary input pins, in declaration order.
    #[must_use]
    pub fn inputs(&self) -> &[PinId] {
        &self.inputs
    }

    /// Boundary output pins, in declaration order.
    #[must_use]
    pub fn outputs(&self) -> &[PinId] {
        &self.outputs
    }

    /// Boundary pins on one side.
    #[must_use]
    pub fn pins(&self, direction: PinDirection) -> &[PinId] {
        match direction {
            PinDirection::Input => &self.inputs,
            PinDirection::Output => &self.outputs,
        }
    }

    /// Child circuits in evaluation order. Empty for gates.
    #[must_use]
    pub fn children(&self) -> &[CircuitId] {
        match &self.body {
            CircuitBody::Component(children) => children,
            _ => &[],
        }
    }

    /// The component that owns this circuit.
    #[must_use]
    pub const fn parent(&self) -> Option<CircuitId> {
        self.parent
    }

    /// All boundary pins with their direction and index.
    pub fn boundary(&self) -> impl Iterator<Item = (PinDirection, usize, PinId)> + '_ {
        let ins = self
            .inputs
            .iter()
            .enumerate()
            .map(|(i, &p)| (PinDirection::Input, i, p));
        let outs = self
            .outputs
            .iter()
            .enumerate()
            .map(|(i, &p)| (PinDirection::Output, i, p));
        ins.chain(outs)
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub(crate) const fn set_parent(&mut self, parent: Option<CircuitId>) {
        self.parent = parent;
    }

    pub(crate) fn push_child(&mut self, child: CircuitId) -> bool {
        match &mut self.body {
            CircuitBody::Component(children) => {
                children.push(child);
                true
            }
            _ => false,
        }
    }
}
