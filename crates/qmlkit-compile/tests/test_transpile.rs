//! End-to-end transpilation checks against the simulator.

use proptest::prelude::*;
use qmlkit_compile::{Target, transpile};
use qmlkit_ir::{Circuit, ParameterVector, QubitId};
use qmlkit_sim::Statevector;
use rustc_hash::FxHashMap;

fn layered(num_qubits: u32, x: &ParameterVector) -> Circuit {
    let mut c = Circuit::new("layered", num_qubits);
    for q in 0..num_qubits {
        c.h(QubitId(q)).unwrap();
        c.ry(x.get(q as usize % x.len()), QubitId(q)).unwrap();
    }
    for q in 0..num_qubits {
        c.cx(QubitId(q), QubitId((q + 1) % num_qubits)).unwrap();
    }
    for q in 0..num_qubits {
        c.rz(x.get(q as usize % x.len()) * 2.0, QubitId(q)).unwrap();
    }
    c.rzz(0.4, QubitId(0), QubitId(num_qubits - 1)).unwrap();
    c
}

fn widened(circuit: &Circuit, width: u32) -> Circuit {
    let mut wide = circuit.clone();
    wide.expand_qubits(width);
    wide
}

fn check_connectivity(compiled: &Circuit, target: Target) {
    let map = target.coupling_map().unwrap();
    for inst in compiled.instructions() {
        if inst.is_gate() && inst.qubits.len() == 2 {
            assert!(
                map.is_connected(inst.qubits[0].0, inst.qubits[1].0),
                "{} on uncoupled {:?}",
                inst.name(),
                inst.qubits
            );
        }
    }
}

#[test]
fn compiled_circuits_match_source_on_five_qubit_devices() {
    let x = ParameterVector::new("x", 3);
    let source = layered(4, &x);
    let values: FxHashMap<String, f64> = x.binding(&[0.3, -1.2, 2.5]).collect();

    for target in [Target::Ibm5, Target::Iqm5] {
        for level in 0..=3 {
            let compiled = transpile(&source, target, level).unwrap();
            let basis = target.basis_gates();
            assert!(
                compiled.instructions().iter().all(|i| basis.contains(i.name())),
                "{target} level {level}: {:?}",
                compiled.count_ops()
            );
            check_connectivity(&compiled, target);
            assert_eq!(compiled.parameters(), vec!["x[0]", "x[1]", "x[2]"]);

            let expected = Statevector::from_circuit(&widened(&source, 5).bind(&values)).unwrap();
            let actual = Statevector::from_circuit(&compiled.bind(&values)).unwrap();
            assert!(expected.equiv(&actual, 1e-8), "{target} level {level}");
        }
    }
}

#[test]
fn optimization_never_grows_the_circuit() {
    let x = ParameterVector::new("x", 2);
    let source = layered(3, &x);
    for target in Target::ALL {
        let plain = transpile(&source, target, 0).unwrap();
        let optimized = transpile(&source, target, 2).unwrap();
        assert!(optimized.size() <= plain.size(), "{target}");
    }
}

#[test]
fn heavy_hex_routing_respects_coupling() {
    let mut c = Circuit::new("long_range", 27);
    c.cx(QubitId(0), QubitId(26)).unwrap();
    c.cz(QubitId(6), QubitId(20)).unwrap();
    c.cx(QubitId(3), QubitId(17)).unwrap();
    let compiled = transpile(&c, Target::Ibm27, 1).unwrap();
    check_connectivity(&compiled, Target::Ibm27);
    assert!(compiled.count_ops().iter().all(|(name, _)| ["rz", "sx", "x", "cx"].contains(name)));
}

#[test]
fn measurements_survive_compilation() {
    let mut c = Circuit::new("measured", 2);
    c.h(QubitId(0)).unwrap();
    c.cx(QubitId(0), QubitId(1)).unwrap();
    c.barrier_all().unwrap();
    c.measure_all().unwrap();

    let compiled = transpile(&c, Target::Iqm20, 1).unwrap();
    let ops: FxHashMap<&str, usize> = compiled.count_ops().into_iter().collect();
    assert_eq!(ops.get("measure"), Some(&2));
    assert_eq!(ops.get("barrier"), Some(&1));
    assert_eq!(compiled.creg("meas").map(|r| r.size()), Some(2));
}

#[test]
fn oversized_circuit_is_rejected() {
    let c = Circuit::new("big", 6);
    assert!(transpile(&c, Target::Iqm5, 1).is_err());
    assert!(transpile(&c, Target::Simulator, 1).is_ok());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn random_rotation_circuits_stay_equivalent(
        angles in prop::collection::vec(-6.3f64..6.3, 9),
        level in 0u8..=3,
    ) {
        let mut c = Circuit::new("random", 3);
        for (i, chunk) in angles.chunks(3).enumerate() {
            let q = QubitId(i as u32);
            c.u(chunk[0], chunk[1], chunk[2], q).unwrap();
        }
        c.cp(angles[0], QubitId(0), QubitId(2)).unwrap();
        c.iswap(QubitId(1), QubitId(2)).unwrap();
        c.cry(angles[4], QubitId(2), QubitId(0)).unwrap();

        for target in [Target::Ibm5, Target::Iqm5] {
            let compiled = transpile(&c, target, level).unwrap();
            let expected = Statevector::from_circuit(&widened(&c, 5)).unwrap();
            let actual = Statevector::from_circuit(&compiled).unwrap();
            prop_assert!(expected.equiv(&actual, 1e-8));
        }
    }
}
