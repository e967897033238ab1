//! Property tests for layered and random layered encoding circuits.

use proptest::prelude::*;
use qmlkit_encoding::{EncodingCircuit, LayeredEncodingCircuit, RandomLayeredEncodingCircuit};
use qmlkit_ir::ParameterVector;
use qmlkit_sim::Statevector;
use rustc_hash::FxHashMap;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_circuits_are_deterministic(
        num_qubits in 1usize..5,
        num_features in 1usize..6,
        min in 1usize..4,
        extra in 0usize..3,
        seed in any::<u64>(),
    ) {
        let first = RandomLayeredEncodingCircuit::new(num_qubits, num_features, min, min + extra, seed);
        let second = RandomLayeredEncodingCircuit::new(num_qubits, num_features, min, min + extra, seed);
        match (first, second) {
            (Ok(a), Ok(b)) => prop_assert_eq!(a, b),
            (Err(a), Err(b)) => prop_assert_eq!(a.to_string(), b.to_string()),
            _ => prop_assert!(false, "same seed gave different outcomes"),
        }
    }

    #[test]
    fn every_feature_is_encoded(
        num_qubits in 1usize..5,
        num_features in 1usize..6,
        num_layers in 1usize..6,
        seed in any::<u64>(),
    ) {
        let result = RandomLayeredEncodingCircuit::new(num_qubits, num_features, num_layers, num_layers, seed);
        if num_layers * num_qubits < num_features {
            prop_assert!(result.is_err());
        } else {
            let enc = result.unwrap();
            prop_assert_eq!(enc.num_layers(), num_layers);
            let circuit = enc.symbolic_circuit().unwrap();
            let expected: Vec<String> = ParameterVector::new("x", num_features)
                .symbols()
                .iter()
                .map(ToString::to_string)
                .collect();
            prop_assert_eq!(circuit.parameters(), expected);
        }
    }

    #[test]
    fn encoded_states_are_normalized(
        features in prop::collection::vec(-3.2f64..3.2, 3),
        seed in any::<u64>(),
    ) {
        let enc = RandomLayeredEncodingCircuit::new(3, 3, 2, 5, seed).unwrap();
        let state = Statevector::from_circuit(&enc.bound_circuit(&features, &[]).unwrap()).unwrap();
        let norm: f64 = state.probabilities().iter().sum();
        prop_assert!((norm - 1.0).abs() < 1e-9);
    }
}

#[test]
fn symbolic_and_bound_circuits_agree() {
    let enc = LayeredEncodingCircuit::parse("H-Ry(x)-crz(p)-Rx(x)-rzz(p)", 3, 2).unwrap();
    assert_eq!(enc.num_parameters(), 4);

    let features = [0.7, -1.1];
    let parameters = [0.2, 0.4, -0.6, 1.5];
    let mut values: FxHashMap<String, f64> = ParameterVector::new("x", 2).binding(&features).collect();
    values.extend(ParameterVector::new("p", 4).binding(&parameters));

    let symbolic = enc.symbolic_circuit().unwrap().bind_strict(&values).unwrap();
    let bound = enc.bound_circuit(&features, &parameters).unwrap();

    let a = Statevector::from_circuit(&symbolic).unwrap();
    let b = Statevector::from_circuit(&bound).unwrap();
    assert!(a.equiv(&b, 1e-12));
}

#[test]
fn random_circuit_layers_parse_back() {
    let enc = RandomLayeredEncodingCircuit::new(4, 6, 3, 6, 2024).unwrap();
    let again = LayeredEncodingCircuit::parse(&enc.to_string(), 4, 6).unwrap();
    assert_eq!(&again, enc.inner());
}
