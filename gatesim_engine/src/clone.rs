//! Structural cloning of circuit subtrees.
//!
//! A clone gets fresh pins and fresh circuits in the same arena. Only observer
//! edges whose two endpoints both belong to the cloned subtree are copied, so the
//! clone starts out disconnected from everything around the original. The
//! returned [`CloneMap`] lets the caller find the clone's counterpart of any
//! original pin or circuit and wire it up deliberately.

use gatesim_common::{CircuitId, PinId, Result};
use indexmap::IndexMap;
use tracing::debug;

use crate::circuit::{Circuit, CircuitBody};
use crate::netlist::Netlist;

/// Correspondence between an original subtree and its clone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CloneMap {
    /// Root of the clone.
    root: CircuitId,
    /// Original pin -> cloned pin, in allocation order.
    pins: IndexMap<PinId, PinId>,
    /// Original circuit -> cloned circuit, root first then depth-first in child order.
    circuits: IndexMap<CircuitId, CircuitId>,
}

impl CloneMap {
    /// Root circuit of the clone.
    #[must_use]
    pub const fn root(&self) -> CircuitId {
        self.root
    }

    /// The clone's counterpart of an original pin.
    #[must_use]
    pub fn pin(&self, original: PinId) -> Option<PinId> {
        self.pins.get(&original).copied()
    }

    /// The clone's counterpart of an original circuit.
    #[must_use]
    pub fn circuit(&self, original: CircuitId) -> Option<CircuitId> {
        self.circuits.get(&original).copied()
    }

    /// All (original, clone) pin pairs.
    pub fn pins(&self) -> impl Iterator<Item = (PinId, PinId)> + '_ {
        self.pins.iter().map(|(&a, &b)| (a, b))
    }

    /// All (original, clone) circuit pairs.
    pub fn circuits(&self) -> impl Iterator<Item = (CircuitId, CircuitId)> + '_ {
        self.circuits.iter().map(|(&a, &b)| (a, b))
    }
}

impl Netlist {
    /// Deep-copies the circuit `id` and everything it contains.
    ///
    /// Pin states are copied; observer edges are copied only when both ends lie
    /// inside the subtree. The clone has no parent and carries the same names as
    /// the original.
    ///
    /// # Errors
    ///
    /// Returns [`gatesim_common::SimError::UnknownCircuit`] if `id` is not in this netlist.
    pub fn clone_circuit(&mut self, id: CircuitId) -> Result<CloneMap> {
        self.circuit(id)?;

        let order = self.subtree(id);

        let circuit_base = self.circuits.len();
        let circuits: IndexMap<CircuitId, CircuitId> = order
            .iter()
            .enumerate()
            .map(|(i, &old)| (old, CircuitId::from(circuit_base + i)))
            .collect();

        let pin_base = self.pins.len();
        let pins: IndexMap<_, _> = order
            .iter()
            .flat_map(|&c| self.circuits[c.as_usize()].boundary().map(|(_, _, p)| p))
            .enumerate()
            .map(|(i, old)| (old, PinId::from(pin_base + i)))
            .collect();

        for &old in pins.keys() {
            let original = &self.pins[old.as_usize()];
            let mut copy = original.detached_copy();
            for observer in original.observers() {
                if let Some(&mapped) = pins.get(observer) {
                    copy.push_observer_unchecked(mapped);
                }
            }
            self.pins.push(copy);
        }

        for &old in &order {
            let original = &self.circuits[old.as_usize()];
            let inputs = original.inputs().iter().map(|p| pins[p]).collect();
            let outputs = original.outputs().iter().map(|p| pins[p]).collect();
            let body = match original.body() {
                CircuitBody::Component(children) => {
                    CircuitBody::Component(children.iter().map(|c| circuits[c]).collect())
                }
                gate => gate.clone(),
            };
            let mut copy = Circuit::new(original.name().to_string(), inputs, outputs, body);
            if old != id {
                copy.set_parent(original.parent().map(|p| circuits[&p]));
            }
            self.circuits.push(copy);
        }

        debug!(
            "Cloned {}: {} circuits, {} pins",
            self.circuits[id.as_usize()].name(),
            circuits.len(),
            pins.len()
        );

        Ok(CloneMap {
            root: circuits[&id],
            pins,
            circuits,
        })
    }

    /// Deep-copies `id` and gives the copy `new_name`.
    ///
    /// Only the root is renamed; children keep their names.
    ///
    /// # Errors
    ///
    /// Returns [`gatesim_common::SimError::UnknownCircuit`] if `id` is not in this netlist.
    pub fn duplicate(&mut self, id: CircuitId, new_name: impl Into<String>) -> Result<CloneMap> {
        let map = self.clone_circuit(id)?;
        self.rename(map.root(), new_name)?;
        Ok(map)
    }

    /// `id` and all its descendants, parents before children, children in order.
    fn subtree(&self, id: CircuitId) -> Vec<CircuitId> {
        let mut order = Vec::new();
        let mut stack = vec![id];
        while let Some(c) = stack.pop() {
            order.push(c);
            stack.extend(self.circuits[c.as_usize()].children().iter().rev());
        }
        order
    }
}
