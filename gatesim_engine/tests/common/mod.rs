//! Shared circuit builders and helpers for integration tests.

#![allow(dead_code)]

use std::sync::OnceLock;

use gatesim_engine::prelude::*;

pub fn init_test_logger() {
    static INIT: OnceLock<()> = OnceLock::new();
    let _ = INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// XOR as (a OR b) AND NOT (a AND b).
///
/// Children are added or1, and1, not1, and2 so every gate reads fresh values.
pub fn build_xor(net: &mut Netlist, name: &str) -> Result<CircuitId> {
    let xor = net.component(name, 2, 1);
    let or1 = net.or("or1");
    let and1 = net.and("and1");
    let not1 = net.not("not1");
    let and2 = net.and("and2");
    for child in [or1, and1, not1, and2] {
        net.add_circuit(xor, child)?;
    }

    net.connect(net.input(xor, 0)?, net.input(and1, 0)?)?;
    net.connect(net.input(xor, 0)?, net.input(or1, 0)?)?;
    net.connect(net.input(xor, 1)?, net.input(and1, 1)?)?;
    net.connect(net.input(xor, 1)?, net.input(or1, 1)?)?;
    net.connect(net.output(or1, 0)?, net.input(and2, 0)?)?;
    net.connect(net.output(and1, 0)?, net.input(not1, 0)?)?;
    net.connect(net.output(not1, 0)?, net.input(and2, 1)?)?;
    net.connect(net.output(and2, 0)?, net.output(xor, 0)?)?;
    Ok(xor)
}

/// One-bit full adder. Inputs (A, B, Cin), outputs (Sum, Cout).
///
/// The second XOR is a renamed clone of the first.
pub fn build_full_adder(net: &mut Netlist, name: &str) -> Result<CircuitId> {
    let adder = net.component(name, 3, 2);
    let xor1 = build_xor(net, "xor1")?;
    let xor2 = net.duplicate(xor1, "xor2")?.root();
    let and3 = net.and("and3");
    let and4 = net.and("and4");
    let or2 = net.or("or2");
    for child in [xor1, xor2, and3, and4, or2] {
        net.add_circuit(adder, child)?;
    }

    let a = net.input(adder, 0)?;
    let b = net.input(adder, 1)?;
    let ci = net.input(adder, 2)?;
    let s = net.output(adder, 0)?;
    let co = net.output(adder, 1)?;

    net.connect(a, net.input(xor1, 0)?)?;
    net.connect(b, net.input(xor1, 1)?)?;
    net.connect(net.output(xor1, 0)?, net.input(xor2, 0)?)?;
    net.connect(ci, net.input(xor2, 1)?)?;
    net.connect(net.output(xor1, 0)?, net.input(and3, 0)?)?;
    net.connect(ci, net.input(and3, 1)?)?;
    net.connect(a, net.input(and4, 0)?)?;
    net.connect(b, net.input(and4, 1)?)?;
    net.connect(net.output(and3, 0)?, net.input(or2, 0)?)?;
    net.connect(net.output(and4, 0)?, net.input(or2, 1)?)?;
    net.connect(net.output(xor2, 0)?, s)?;
    net.connect(net.output(or2, 0)?, co)?;
    Ok(adder)
}

/// A ripple-carry adder and the one-bit stages it is made of.
pub struct RippleAdder {
    pub circuit: CircuitId,
    pub stages: Vec<CircuitId>,
    pub bits: usize,
}

/// `bits`-wide ripple-carry adder built from clones of a single full adder.
///
/// Inputs are `A[0..n]`, `B[0..n]`, `Cin`; outputs are `S[0..n]`, `Cout`, all
/// least significant bit first.
pub fn build_ripple_adder(net: &mut Netlist, bits: usize) -> Result<RippleAdder> {
    let template = build_full_adder(net, "OneBitAdder")?;
    let stages = (0..bits)
        .map(|i| -> Result<CircuitId> {
            Ok(net.duplicate(template, format!("oneBitAdder{}", i + 1))?.root())
        })
        .collect::<Result<Vec<_>>>()?;

    let adder = net.component(format!("{bits}BitsAdder"), 2 * bits + 1, bits + 1);
    for &stage in &stages {
        net.add_circuit(adder, stage)?;
    }

    for (i, &stage) in stages.iter().enumerate() {
        net.connect(net.input(adder, i)?, net.input(stage, 0)?)?;
        net.connect(net.input(adder, bits + i)?, net.input(stage, 1)?)?;
        if i == 0 {
            net.connect(net.input(adder, 2 * bits)?, net.input(stage, 2)?)?;
        }
        net.connect(net.output(stage, 0)?, net.output(adder, i)?)?;
        if i + 1 < bits {
            net.connect(net.output(stage, 1)?, net.input(stages[i + 1], 2)?)?;
        } else {
            net.connect(net.output(stage, 1)?, net.output(adder, bits)?)?;
        }
    }

    Ok(RippleAdder {
        circuit: adder,
        stages,
        bits,
    })
}

impl RippleAdder {
    /// Drives both operands and the carry, processes, and reads the result back.
    pub fn add(&self, net: &mut Netlist, a: u64, b: u64, carry: bool) -> Result<u64> {
        let mut levels = to_bits(a, self.bits);
        levels.extend(to_bits(b, self.bits));
        levels.push(carry);
        net.set_inputs(self.circuit, &levels)?;
        net.process(self.circuit)?;
        let outputs = net
            .output_states(self.circuit)?
            .into_iter()
            .map(|s| s.as_bool().unwrap_or(false))
            .collect::<Vec<_>>();
        Ok(from_bits(&outputs))
    }
}

/// `value` as `bits` booleans, least significant first.
pub fn to_bits(value: u64, bits: usize) -> Vec<bool> {
    (0..bits).map(|i| (value >> i) & 1 == 1).collect()
}

/// Inverse of [`to_bits`].
pub fn from_bits(bits: &[bool]) -> u64 {
    bits.iter()
        .enumerate()
        .map(|(i, &b)| u64::from(b) << i)
        .sum()
}
