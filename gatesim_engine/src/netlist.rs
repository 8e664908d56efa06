//! The netlist arena and its simulation protocol.
//!
//! A [`Netlist`] owns every [`Pin`] and every [`Circuit`]. Circuits refer to their
//! pins and children by id, and pins refer to their observers by id, so the whole
//! wiring graph is plain indices into two vectors.
//!
//! Simulation is two-phase:
//! 1. [`Netlist::set_state`] copies a state along observer edges immediately,
//!    depth first, in registration order.
//! 2. [`Netlist::process`] is the only way a gate's function is (re)computed.
//!    Components evaluate their children in the order they were added.

use contracts::*;
use gatesim_common::{
    CircuitId, CircuitKind, PinDirection, PinId, PinState, Result, SimConfig, SimError,
    UnsetPolicy,
};
use tracing::{debug, trace, warn};

use crate::circuit::{Circuit, CircuitBody};
use crate::pin::Pin;

/// Arena of pins and circuits plus the configuration they are simulated with.
#[derive(Clone, Debug, Default)]
pub struct Netlist {
    /// Every pin, indexed by [`PinId`].
    pub(crate) pins: Vec<Pin>,
    /// Every circuit, indexed by [`CircuitId`].
    pub(crate) circuits: Vec<Circuit>,
    /// Simulation settings.
    config: SimConfig,
}

impl Netlist {
    /// Creates an empty netlist with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty netlist with the given configuration.
    #[must_use]
    pub fn with_config(config: SimConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Number of pins allocated so far.
    #[must_use]
    pub fn pin_count(&self) -> usize {
        self.pins.len()
    }

    /// Number of circuits allocated so far.
    #[must_use]
    pub fn circuit_count(&self) -> usize {
        self.circuits.len()
    }

    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    /// Two-input AND gate.
    pub fn and(&mut self, name: impl Into<String>) -> CircuitId {
        self.alloc_circuit(name.into(), 2, 1, CircuitBody::And)
    }

    /// AND gate with `num_inputs` inputs.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidArity`] if `num_inputs < 2`.
    pub fn and_n(&mut self, name: impl Into<String>, num_inputs: usize) -> Result<CircuitId> {
        self.gate(CircuitKind::And, name, num_inputs)
    }

    /// Two-input OR gate.
    pub fn or(&mut self, name: impl Into<String>) -> CircuitId {
        self.alloc_circuit(name.into(), 2, 1, CircuitBody::Or)
    }

    /// OR gate with `num_inputs` inputs.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidArity`] if `num_inputs < 2`.
    pub fn or_n(&mut self, name: impl Into<String>, num_inputs: usize) -> Result<CircuitId> {
        self.gate(CircuitKind::Or, name, num_inputs)
    }

    /// Inverter.
    pub fn not(&mut self, name: impl Into<String>) -> CircuitId {
        self.alloc_circuit(name.into(), 1, 1, CircuitBody::Not)
    }

    /// Primitive gate of any kind, checking the input count against the kind's rules.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidArity`] if the kind does not accept `num_inputs`
    /// inputs, or if `kind` is [`CircuitKind::Component`].
    pub fn gate(
        &mut self,
        kind: CircuitKind,
        name: impl Into<String>,
        num_inputs: usize,
    ) -> Result<CircuitId> {
        let body = match kind {
            CircuitKind::And => CircuitBody::And,
            CircuitKind::Or => CircuitBody::Or,
            CircuitKind::Not => CircuitBody::Not,
            CircuitKind::Component => return Err(SimError::invalid_arity(kind, num_inputs)),
        };
        if !kind.accepts_inputs(num_inputs) {
            return Err(SimError::invalid_arity(kind, num_inputs));
        }
        let outputs = kind.fixed_outputs().unwrap_or(1);
        Ok(self.alloc_circuit(name.into(), num_inputs, outputs, body))
    }

    /// Composite circuit with the given boundary, initially without children.
    pub fn component(
        &mut self,
        name: impl Into<String>,
        num_inputs: usize,
        num_outputs: usize,
    ) -> CircuitId {
        self.alloc_circuit(
            name.into(),
            num_inputs,
            num_outputs,
            CircuitBody::Component(Vec::new()),
        )
    }

    #[ensures(self.circuits.len() == old(self.circuits.len()) + 1)]
    #[ensures(self.pins.len() == old(self.pins.len()) + num_inputs + num_outputs)]
    fn alloc_circuit(
        &mut self,
        name: String,
        num_inputs: usize,
        num_outputs: usize,
        body: CircuitBody,
    ) -> CircuitId {
        let inputs = (0..num_inputs)
            .map(|i| self.alloc_pin(PinDirection::Input.label(i, &name)))
            .collect();
        let outputs = (0..num_outputs)
            .map(|i| self.alloc_pin(PinDirection::Output.label(i, &name)))
            .collect();
        let id = CircuitId::from(self.circuits.len());
        trace!("Allocated {} {} as {}", body.kind(), name, id);
        self.circuits.push(Circuit::new(name, inputs, outputs, body));
        id
    }

    fn alloc_pin(&mut self, name: String) -> PinId {
        let id = PinId::from(self.pins.len());
        self.pins.push(Pin::new(name));
        id
    }

    /// Appends `child` to the component `parent`.
    ///
    /// The order of calls is the evaluation order of [`Netlist::process`]; a child
    /// that reads another child's output must be added after it.
    ///
    /// # Errors
    ///
    /// - [`SimError::NotAComponent`] if `parent` is a gate.
    /// - [`SimError::AlreadyOwned`] if `child` already belongs to a component.
    /// - [`SimError::CompositionCycle`] if `child` is `parent` or one of its ancestors.
    pub fn add_circuit(&mut self, parent: CircuitId, child: CircuitId) -> Result<()> {
        let parent_circuit = self.circuit(parent)?;
        let child_circuit = self.circuit(child)?;
        if parent_circuit.kind() != CircuitKind::Component {
            return Err(SimError::NotAComponent {
                circuit: parent_circuit.name().to_string(),
            });
        }
        if let Some(owner) = child_circuit.parent() {
            return Err(SimError::AlreadyOwned {
                child: child_circuit.name().to_string(),
                parent: self.circuits[owner.as_usize()].name().to_string(),
            });
        }
        if self.ancestors(parent).any(|a| a == child) {
            return Err(SimError::CompositionCycle {
                parent: parent_circuit.name().to_string(),
                child: child_circuit.name().to_string(),
            });
        }

        debug!(
            "{} added to {}",
            child_circuit.name(),
            parent_circuit.name()
        );
        self.circuits[parent.as_usize()].push_child(child);
        self.circuits[child.as_usize()].set_parent(Some(parent));
        Ok(())
    }

    /// `id` followed by its owner, its owner's owner, and so on.
    fn ancestors(&self, id: CircuitId) -> impl Iterator<Item = CircuitId> + '_ {
        std::iter::successors(Some(id), |c| self.circuits[c.as_usize()].parent())
    }

    /// Changes a circuit's name and re-derives its boundary pin names.
    ///
    /// Children of a component keep their own names. Observer edges are untouched.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownCircuit`] if `id` is not in this netlist.
    pub fn rename(&mut self, id: CircuitId, new_name: impl Into<String>) -> Result<()> {
        let new_name = new_name.into();
        let circuit = self.circuit(id)?;
        debug!("Renaming {} to {}", circuit.name(), new_name);
        let relabels: Vec<(PinId, String)> = circuit
            .boundary()
            .map(|(dir, i, pin)| (pin, dir.label(i, &new_name)))
            .collect();
        for (pin, label) in relabels {
            self.pins[pin.as_usize()].set_name(label);
        }
        self.circuits[id.as_usize()].set_name(new_name);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Access
    // -----------------------------------------------------------------------

    /// Looks up a pin.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownPin`] if `id` is not in this netlist.
    pub fn pin(&self, id: PinId) -> Result<&Pin> {
        self.pins.get(id.as_usize()).ok_or(SimError::UnknownPin(id))
    }

    /// Looks up a circuit.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownCircuit`] if `id` is not in this netlist.
    pub fn circuit(&self, id: CircuitId) -> Result<&Circuit> {
        self.circuits
            .get(id.as_usize())
            .ok_or(SimError::UnknownCircuit(id))
    }

    /// The `index`-th boundary pin on one side of a circuit.
    ///
    /// # Errors
    ///
    /// [`SimError::UnknownCircuit`], or [`SimError::IndexOutOfRange`] if the
    /// circuit has no such pin.
    pub fn boundary_pin(
        &self,
        id: CircuitId,
        direction: PinDirection,
        index: usize,
    ) -> Result<PinId> {
        let circuit = self.circuit(id)?;
        let pins = circuit.pins(direction);
        pins.get(index).copied().ok_or_else(|| {
            SimError::index_out_of_range(circuit.name(), direction, index, pins.len())
        })
    }

    /// The `index`-th input pin of a circuit.
    ///
    /// # Errors
    ///
    /// See [`Netlist::boundary_pin`].
    pub fn input(&self, id: CircuitId, index: usize) -> Result<PinId> {
        self.boundary_pin(id, PinDirection::Input, index)
    }

    /// The `index`-th output pin of a circuit.
    ///
    /// # Errors
    ///
    /// See [`Netlist::boundary_pin`].
    pub fn output(&self, id: CircuitId, index: usize) -> Result<PinId> {
        self.boundary_pin(id, PinDirection::Output, index)
    }

    /// Child circuits of a component in evaluation order. Empty for gates.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownCircuit`] if `id` is not in this netlist.
    pub fn children(&self, id: CircuitId) -> Result<&[CircuitId]> {
        Ok(self.circuit(id)?.children())
    }

    /// The component owning a circuit, if any.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownCircuit`] if `id` is not in this netlist.
    pub fn parent(&self, id: CircuitId) -> Result<Option<CircuitId>> {
        Ok(self.circuit(id)?.parent())
    }

    /// Current state of a pin.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownPin`] if `id` is not in this netlist.
    pub fn pin_state(&self, id: PinId) -> Result<PinState> {
        Ok(self.pin(id)?.is_state())
    }

    /// Current state of a pin as a boolean.
    ///
    /// # Errors
    ///
    /// [`SimError::UnknownPin`], or [`SimError::StateNotSet`] if the pin was never driven.
    pub fn pin_level(&self, id: PinId) -> Result<bool> {
        let pin = self.pin(id)?;
        pin.is_state().as_bool().ok_or_else(|| SimError::StateNotSet {
            pin: pin.name().to_string(),
        })
    }

    /// State of the `index`-th output of a circuit.
    ///
    /// # Errors
    ///
    /// See [`Netlist::boundary_pin`].
    pub fn output_state(&self, id: CircuitId, index: usize) -> Result<PinState> {
        self.pin_state(self.output(id, index)?)
    }

    /// States of every output of a circuit, in order.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownCircuit`] if `id` is not in this netlist.
    pub fn output_states(&self, id: CircuitId) -> Result<Vec<PinState>> {
        Ok(self
            .circuit(id)?
            .outputs()
            .iter()
            .map(|p| self.pins[p.as_usize()].is_state())
            .collect())
    }

    /// Searches a circuit's boundary pins for `name`, then its children's, in order.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownCircuit`] if `id` is not in this netlist.
    pub fn find_pin(&self, id: CircuitId, name: &str) -> Result<Option<PinId>> {
        let circuit = self.circuit(id)?;
        if let Some((_, _, pin)) = circuit
            .boundary()
            .find(|&(_, _, p)| self.pins[p.as_usize()].name() == name)
        {
            return Ok(Some(pin));
        }
        for &child in circuit.children() {
            if let Some(pin) = self.find_pin(child, name)? {
                return Ok(Some(pin));
            }
        }
        Ok(None)
    }

    /// Renders a pin and the pins observing it, e.g.
    /// `input 0 of xor1 observed by input 0 of and1, input 0 of or1`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownPin`] if `id` is not in this netlist.
    pub fn describe_pin(&self, id: PinId) -> Result<String> {
        let pin = self.pin(id)?;
        if pin.observers().is_empty() {
            return Ok(pin.name().to_string());
        }
        let observers: Vec<&str> = pin
            .observers()
            .iter()
            .map(|o| self.pins[o.as_usize()].name())
            .collect();
        Ok(format!("{} observed by {}", pin.name(), observers.join(", ")))
    }

    // -----------------------------------------------------------------------
    // Wiring
    // -----------------------------------------------------------------------

    /// Registers `to` as an observer of `from`.
    ///
    /// Observers are notified in the order they were connected. Connecting two
    /// sources to the same pin is legal; whichever writes last wins.
    ///
    /// # Errors
    ///
    /// - [`SimError::UnknownPin`] if either pin is not in this netlist.
    /// - [`SimError::SelfConnection`] if `from == to`.
    /// - [`SimError::DuplicateObserver`] if the edge already exists.
    pub fn connect(&mut self, from: PinId, to: PinId) -> Result<()> {
        let to_name = self.pin(to)?.name().to_string();
        let from_pin = self.pin(from)?;
        if from == to {
            return Err(SimError::SelfConnection { pin: to_name });
        }
        if from_pin.is_observed_by(to) {
            return Err(SimError::duplicate_observer(from_pin.name(), to_name));
        }
        debug!("{} is observer of {}", to_name, from_pin.name());
        self.pins[from.as_usize()].add_observer(to);
        Ok(())
    }

    /// Same as [`Netlist::connect`].
    ///
    /// # Errors
    ///
    /// See [`Netlist::connect`].
    pub fn add_observer(&mut self, from: PinId, observer: PinId) -> Result<()> {
        self.connect(from, observer)
    }

    /// Unregisters `observer` from `from`. Later state changes on `from` no longer
    /// reach `observer`; its current state is kept.
    ///
    /// # Errors
    ///
    /// - [`SimError::UnknownPin`] if either pin is not in this netlist.
    /// - [`SimError::NotAnObserver`] if the edge does not exist.
    pub fn remove_observer(&mut self, from: PinId, observer: PinId) -> Result<()> {
        let observer_name = self.pin(observer)?.name().to_string();
        let from_pin = self.pin(from)?;
        if !from_pin.is_observed_by(observer) {
            return Err(SimError::not_an_observer(from_pin.name(), observer_name));
        }
        debug!(
            "{} does not observe anymore {}",
            observer_name,
            from_pin.name()
        );
        self.pins[from.as_usize()].remove_observer(observer);
        Ok(())
    }

    /// Same as [`Netlist::remove_observer`].
    ///
    /// # Errors
    ///
    /// See [`Netlist::remove_observer`].
    pub fn disconnect(&mut self, from: PinId, to: PinId) -> Result<()> {
        self.remove_observer(from, to)
    }

    // -----------------------------------------------------------------------
    // Stimulus and propagation
    // -----------------------------------------------------------------------

    /// Sets a pin's state and synchronously copies it to every pin reachable
    /// through observer edges.
    ///
    /// The traversal is depth first: the first observer and everything downstream
    /// of it are updated before the second observer. Every call starts its own
    /// wave; nothing is coalesced.
    ///
    /// # Errors
    ///
    /// - [`SimError::UnknownPin`] if `id` is not in this netlist.
    /// - [`SimError::PropagationDepthExceeded`] if the wave goes deeper than
    ///   [`SimConfig::max_propagation_depth`]. Pins reached before that keep
    ///   their new state.
    pub fn set_state(&mut self, id: PinId, state: impl Into<PinState>) -> Result<()> {
        self.pin(id)?;
        let state = state.into();
        let limit = self.config.max_propagation_depth;
        let tracing_hops = self.config.trace_propagation;

        let mut stack = vec![(id, 0usize)];
        while let Some((pin_id, depth)) = stack.pop() {
            if depth > limit {
                return Err(SimError::PropagationDepthExceeded {
                    pin: self.pins[id.as_usize()].name().to_string(),
                    limit,
                });
            }
            let pin = &mut self.pins[pin_id.as_usize()];
            pin.store(state);
            if tracing_hops {
                trace!("{} <- {} (depth {})", pin.name(), state, depth);
            }
            stack.extend(pin.observers().iter().rev().map(|&o| (o, depth + 1)));
        }
        Ok(())
    }

    /// Copies the current state of `source` into `observer` and propagates it
    /// onward, as if `observer` had just been notified by `source`.
    ///
    /// # Errors
    ///
    /// [`SimError::UnknownPin`] for either pin, otherwise see [`Netlist::set_state`].
    pub fn update(&mut self, observer: PinId, source: PinId) -> Result<()> {
        let state = self.pin_state(source)?;
        self.set_state(observer, state)
    }

    /// Drives the `index`-th input of a circuit.
    ///
    /// Only wires move; no gate is recomputed until [`Netlist::process`] runs.
    ///
    /// # Errors
    ///
    /// See [`Netlist::boundary_pin`] and [`Netlist::set_state`].
    pub fn set_input(&mut self, id: CircuitId, index: usize, level: bool) -> Result<()> {
        let pin = self.input(id, index)?;
        self.set_state(pin, level)
    }

    /// Drives the first `levels.len()` inputs of a circuit, in order.
    ///
    /// # Errors
    ///
    /// [`SimError::IndexOutOfRange`] if there are more levels than inputs (no input
    /// is driven in that case), otherwise see [`Netlist::set_state`].
    pub fn set_inputs(&mut self, id: CircuitId, levels: &[bool]) -> Result<()> {
        let circuit = self.circuit(id)?;
        let inputs = circuit.inputs();
        if levels.len() > inputs.len() {
            return Err(SimError::index_out_of_range(
                circuit.name(),
                PinDirection::Input,
                inputs.len(),
                inputs.len(),
            ));
        }
        let targets: Vec<PinId> = inputs[..levels.len()].to_vec();
        for (pin, &level) in targets.into_iter().zip(levels) {
            self.set_state(pin, level)?;
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Evaluation
    // -----------------------------------------------------------------------

    /// Evaluates a circuit.
    ///
    /// A gate reads its inputs and writes its output, which propagates. A component
    /// processes each child in insertion order; it does not read its own boundary.
    ///
    /// # Errors
    ///
    /// - [`SimError::UnknownCircuit`] if `id` is not in this netlist.
    /// - [`SimError::UninitializedInput`] if a gate input was never driven and the
    ///   configuration is [`UnsetPolicy::Reject`]. Children processed before the
    ///   failing gate keep what they wrote.
    /// - Any error of [`Netlist::set_state`].
    pub fn process(&mut self, id: CircuitId) -> Result<()> {
        let circuit = self.circuit(id)?;
        if circuit.kind() == CircuitKind::Component {
            trace!("Processing {} ({} children)", circuit.name(), circuit.children().len());
            for i in 0..circuit.children().len() {
                let child = self.circuits[id.as_usize()].children()[i];
                self.process(child)?;
            }
            return Ok(());
        }
        self.process_gate(id)
    }

    fn process_gate(&mut self, id: CircuitId) -> Result<()> {
        let circuit = &self.circuits[id.as_usize()];
        let levels = circuit
            .inputs()
            .iter()
            .map(|&p| self.input_level(circuit, p))
            .collect::<Result<Vec<bool>>>()?;

        let (Some(result), Some(&out)) = (circuit.body().evaluate(&levels), circuit.outputs().first())
        else {
            return Ok(());
        };
        trace!("{} {:?} -> {}", circuit.name(), levels, result);
        self.set_state(out, result)
    }

    fn input_level(&self, circuit: &Circuit, pin: PinId) -> Result<bool> {
        let pin = &self.pins[pin.as_usize()];
        match (pin.is_state().as_bool(), self.config.unset_inputs) {
            (Some(level), _) => Ok(level),
            (None, UnsetPolicy::AsLow) => {
                warn!("{} has no state, reading it as low", pin.name());
                Ok(false)
            }
            (None, UnsetPolicy::Reject) => {
                Err(SimError::uninitialized_input(circuit.name(), pin.name()))
            }
        }
    }
}
