#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use gatesim_engine::prelude::*;
use itertools::Itertools;
use rstest::rstest;

mod common;

use common::init_test_logger;

fn run_gate(net: &mut Netlist, gate: CircuitId, levels: &[bool]) -> PinState {
    net.set_inputs(gate, levels).unwrap();
    net.process(gate).unwrap();
    net.output_state(gate, 0).unwrap()
}

#[rstest]
#[case::ff(false, false, false)]
#[case::ft(false, true, false)]
#[case::tf(true, false, false)]
#[case::tt(true, true, true)]
fn and_truth_table(#[case] a: bool, #[case] b: bool, #[case] expected: bool) {
    init_test_logger();
    let mut net = Netlist::new();
    let and1 = net.and("and1");
    assert_eq!(run_gate(&mut net, and1, &[a, b]), PinState::from(expected));
}

#[rstest]
#[case::ff(false, false, false)]
#[case::ft(false, true, true)]
#[case::tf(true, false, true)]
#[case::tt(true, true, true)]
fn or_truth_table(#[case] a: bool, #[case] b: bool, #[case] expected: bool) {
    init_test_logger();
    let mut net = Netlist::new();
    let or1 = net.or("or1");
    assert_eq!(run_gate(&mut net, or1, &[a, b]), PinState::from(expected));
}

#[rstest]
#[case::f(false, true)]
#[case::t(true, false)]
fn not_truth_table(#[case] a: bool, #[case] expected: bool) {
    let mut net = Netlist::new();
    let not1 = net.not("not1");
    assert_eq!(run_gate(&mut net, not1, &[a]), PinState::from(expected));
}

#[rstest]
#[case::and3(CircuitKind::And, 3)]
#[case::and5(CircuitKind::And, 5)]
#[case::or3(CircuitKind::Or, 3)]
#[case::or4(CircuitKind::Or, 4)]
fn wide_gates_match_fold(#[case] kind: CircuitKind, #[case] width: usize) {
    let mut net = Netlist::new();
    let gate = net.gate(kind, "wide", width).unwrap();

    for levels in std::iter::repeat_n([false, true], width).multi_cartesian_product() {
        let expected = match kind {
            CircuitKind::And => levels.iter().all(|&l| l),
            _ => levels.iter().any(|&l| l),
        };
        assert_eq!(
            run_gate(&mut net, gate, &levels),
            PinState::from(expected),
            "{kind} over {levels:?}"
        );
    }
}

#[test]
fn process_is_idempotent() {
    let mut net = Netlist::new();
    let or1 = net.or("or1");
    net.set_inputs(or1, &[false, true]).unwrap();
    for _ in 0..3 {
        net.process(or1).unwrap();
        assert_eq!(net.output_state(or1, 0).unwrap(), PinState::High);
    }
}

#[rstest]
#[case::and_one(CircuitKind::And, 1)]
#[case::and_zero(CircuitKind::And, 0)]
#[case::or_one(CircuitKind::Or, 1)]
#[case::not_two(CircuitKind::Not, 2)]
#[case::not_zero(CircuitKind::Not, 0)]
fn bad_arity_fails_at_construction(#[case] kind: CircuitKind, #[case] n: usize) {
    let mut net = Netlist::new();
    let err = net.gate(kind, "bad", n).unwrap_err();
    assert!(matches!(err, SimError::InvalidArity { actual, .. } if actual == n));
    assert_eq!(net.circuit_count(), 0);
    assert_eq!(net.pin_count(), 0);
}

#[test]
fn n_input_constructors_validate() {
    let mut net = Netlist::new();
    assert!(net.and_n("ok", 4).is_ok());
    assert!(net.or_n("ok", 2).is_ok());
    assert!(matches!(
        net.and_n("bad", 1),
        Err(SimError::InvalidArity {
            kind: CircuitKind::And,
            ..
        })
    ));
}

#[test]
fn undriven_input_is_rejected_by_default() {
    let mut net = Netlist::new();
    let and1 = net.and("and1");
    net.set_input(and1, 0, true).unwrap();

    let err = net.process(and1).unwrap_err();
    assert_eq!(
        err,
        SimError::UninitializedInput {
            circuit: "and1".to_string(),
            pin: "input 1 of and1".to_string(),
        }
    );
    assert_eq!(net.output_state(and1, 0).unwrap(), PinState::Unknown);
}

#[test]
fn permissive_policy_reads_undriven_as_low() {
    init_test_logger();
    let mut net = Netlist::with_config(SimConfig::permissive());
    let or1 = net.or("or1");
    let not1 = net.not("not1");

    net.process(not1).unwrap();
    assert_eq!(net.output_state(not1, 0).unwrap(), PinState::High);

    net.set_input(or1, 1, true).unwrap();
    net.process(or1).unwrap();
    assert_eq!(net.output_state(or1, 0).unwrap(), PinState::High);
}

#[test]
fn out_of_range_input_is_reported() {
    let mut net = Netlist::new();
    let not1 = net.not("not1");
    let err = net.set_input(not1, 1, true).unwrap_err();
    assert_eq!(
        err,
        SimError::IndexOutOfRange {
            circuit: "not1".to_string(),
            direction: PinDirection::Input,
            index: 1,
            len: 1,
        }
    );
    assert!(matches!(
        net.output(not1, 3),
        Err(SimError::IndexOutOfRange {
            direction: PinDirection::Output,
            ..
        })
    ));
}

#[test]
fn too_many_levels_drive_nothing() {
    let mut net = Netlist::new();
    let and1 = net.and("and1");
    assert!(net.set_inputs(and1, &[true, true, true]).is_err());
    assert_eq!(net.pin_state(net.input(and1, 0).unwrap()).unwrap(), PinState::Unknown);
}

#[test]
fn pin_level_requires_a_state() {
    let mut net = Netlist::new();
    let not1 = net.not("not1");
    let out = net.output(not1, 0).unwrap();
    assert_eq!(
        net.pin_level(out),
        Err(SimError::StateNotSet {
            pin: "output 0 of not1".to_string()
        })
    );
    net.set_input(not1, 0, false).unwrap();
    net.process(not1).unwrap();
    assert_eq!(net.pin_level(out), Ok(true));
}

#[test]
fn ids_from_elsewhere_are_rejected() {
    let mut net = Netlist::new();
    net.not("not1");
    assert_eq!(
        net.process(CircuitId::new(9)),
        Err(SimError::UnknownCircuit(CircuitId::new(9)))
    );
    assert_eq!(
        net.set_state(PinId::new(2), true),
        Err(SimError::UnknownPin(PinId::new(2)))
    );
}
