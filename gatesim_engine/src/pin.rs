//! Pins: named tri-state signal endpoints.
//!
//! A pin is both a data holder and a node of the propagation graph. Its observer
//! list is an ordered set of [`PinId`]s that are notified, first registered first,
//! whenever the pin's state is set. The list is the only record of a connection;
//! there is no reverse edge.

use contracts::*;
use gatesim_common::{PinId, PinState};

/// A single-bit signal endpoint owned by a circuit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pin {
    /// Diagnostic name, derived from the owning circuit's name.
    name: String,
    /// Current signal.
    state: PinState,
    /// Downstream pins, in registration order.
    observers: Vec<PinId>,
}

impl Pin {
    /// Creates an undriven pin with no observers.
    #[ensures(!ret.state.is_known() && ret.observers.is_empty())]
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            state: PinState::Unknown,
            observers: Vec::new(),
        }
    }

    /// Diagnostic name, e.g. `input 0 of and1`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current state, without side effects.
    #[must_use]
    pub const fn is_state(&self) -> PinState {
        self.state
    }

    /// Pins notified when this pin changes, in notification order.
    #[must_use]
    pub fn observers(&self) -> &[PinId] {
        &self.observers
    }

    /// Returns true if `pin` is registered as an observer.
    #[must_use]
    pub fn is_observed_by(&self, pin: PinId) -> bool {
        self.observers.contains(&pin)
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    /// Assigns the state without notifying anyone.
    pub(crate) const fn store(&mut self, state: PinState) {
        self.state = state;
    }

    /// Appends `pin` to the observer list. Returns false if it was already there.
    pub(crate) fn add_observer(&mut self, pin: PinId) -> bool {
        if self.is_observed_by(pin) {
            return false;
        }
        self.observers.push(pin);
        true
    }

    /// Removes `pin` from the observer list, keeping the order of the others.
    /// Returns false if it was not there.
    pub(crate) fn remove_observer(&mut self, pin: PinId) -> bool {
        let Some(pos) = self.observers.iter().position(|&o| o == pin) else {
            return false;
        };
        self.observers.remove(pos);
        true
    }

    /// Makes an unconnected copy carrying the same name and state.
    pub(crate) fn detached_copy(&self) -> Self {
        Self {
            name: self.name.clone(),
            state: self.state,
            observers: Vec::new(),
        }
    }

    pub(crate) fn push_observer_unchecked(&mut self, pin: PinId) {
        self.observers.push(pin);
    }
}
