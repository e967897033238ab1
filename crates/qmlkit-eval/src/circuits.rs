//! Circuit statistics and measurement circuits for encoding circuits.

use tracing::debug;

use qmlkit_compile::{Target, transpile};
use qmlkit_encoding::EncodingCircuit;
use qmlkit_ir::{Circuit, ParameterExpression, ParameterVector, QubitId};
use qmlkit_observables::{Observable, Pauli, group_qubit_wise_commuting};

use crate::error::{EvalError, EvalResult};

/// Optimization level used for every helper transpilation.
pub const OPTIMIZATION_LEVEL: u8 = 1;

/// The encoding circuit over symbols `x[i]` and `p[i]`, transpiled for
/// `target` (the simulator preset when `None`).
pub fn get_transpiled_encoding_circuit(
    encoding: &(impl EncodingCircuit + ?Sized),
    target: Option<Target>,
) -> EvalResult<Circuit> {
    let circuit = encoding.symbolic_circuit()?;
    let target = target.unwrap_or(Target::Simulator);
    let compiled = transpile(&circuit, target, OPTIMIZATION_LEVEL)?;
    debug!(%target, source = circuit.size(), compiled = compiled.size(), "transpiled encoding circuit");
    Ok(compiled)
}

/// Operation count of the transpiled symbolic encoding circuit.
pub fn get_num_gates(encoding: &(impl EncodingCircuit + ?Sized), target: Option<Target>) -> EvalResult<usize> {
    Ok(get_transpiled_encoding_circuit(encoding, target)?.size())
}

/// One measurement circuit per qubit-wise commuting group of the
/// observable's terms.
///
/// Missing `parameters` or `features` stay symbolic (`p[i]`, `x[i]`). Each
/// circuit is the state preparation followed by a barrier, the basis change
/// for every active qubit (H for X, Sdg then H for Y) and measurements into a
/// register named after the group's labels joined by `+`. With a target the
/// circuits are transpiled.
pub fn get_measurement_circuits(
    encoding: &(impl EncodingCircuit + ?Sized),
    observable: &(impl Observable + ?Sized),
    target: Option<Target>,
    parameters: Option<&[f64]>,
    features: Option<&[f64]>,
) -> EvalResult<Vec<Circuit>> {
    let features = values_or_symbols("x", encoding.num_features(), features);
    let parameters = values_or_symbols("p", encoding.num_parameters(), parameters);
    let preparation = encoding.get_circuit(&features, &parameters)?;

    let labels = observable.symbolic_operator()?.labels();
    let groups = group_qubit_wise_commuting(&labels)?;
    debug!(terms = labels.len(), groups = groups.len(), "grouped observable terms");

    let mut circuits = Vec::with_capacity(groups.len());
    for group in &groups {
        let mut circuit = preparation.clone();
        circuit.barrier_all()?;

        let bases = group.measurement_bases();
        let width = u32::try_from(bases.len()).map_err(|_| EvalError::QubitIndex(bases.len()))?;
        let clbits = circuit.add_creg(group.name(), width)?;
        for (&(qubit, basis), clbit) in bases.iter().zip(clbits) {
            let qubit = qubit_id(qubit)?;
            match basis {
                Pauli::X => {
                    circuit.h(qubit)?;
                }
                Pauli::Y => {
                    circuit.sdg(qubit)?;
                    circuit.h(qubit)?;
                }
                Pauli::Z | Pauli::I => {}
            }
            circuit.measure(qubit, clbit)?;
        }

        let circuit = match target {
            Some(target) => transpile(&circuit, target, OPTIMIZATION_LEVEL)?,
            None => circuit,
        };
        circuits.push(circuit);
    }
    Ok(circuits)
}

fn qubit_id(index: usize) -> EvalResult<QubitId> {
    u32::try_from(index)
        .map(QubitId)
        .map_err(|_| EvalError::QubitIndex(index))
}

fn values_or_symbols(name: &str, len: usize, values: Option<&[f64]>) -> Vec<ParameterExpression> {
    match values {
        Some(values) => values.iter().map(|&v| ParameterExpression::from(v)).collect(),
        None => ParameterVector::new(name, len).symbols(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qmlkit_encoding::LayeredEncodingCircuit;
    use qmlkit_observables::{CustomObservable, PauliLabel, summed_pairs};

    fn encoding() -> LayeredEncodingCircuit {
        LayeredEncodingCircuit::parse("H-Ry(x)-cx-Rz(p)", 3, 2).unwrap()
    }

    #[test]
    fn test_qubit_ids_stay_addressable() {
        assert_eq!(qubit_id(7).unwrap(), QubitId(7));
        assert_eq!(qubit_id(u32::MAX as usize).unwrap(), QubitId(u32::MAX));
        #[cfg(target_pointer_width = "64")]
        assert!(matches!(
            qubit_id(u32::MAX as usize + 1),
            Err(EvalError::QubitIndex(_))
        ));
    }

    #[test]
    fn test_num_gates() {
        let enc = encoding();
        assert_eq!(get_num_gates(&enc, None).unwrap(), 11);
        let on_iqm = get_transpiled_encoding_circuit(&enc, Some(Target::Iqm5)).unwrap();
        assert!(on_iqm.instructions().iter().all(|i| ["prx", "cz"].contains(&i.name())));
        assert_eq!(on_iqm.parameters(), vec!["p[0]", "p[1]", "p[2]", "x[0]", "x[1]"]);
    }

    #[test]
    fn test_measurement_circuit_layout() {
        let labels = ["XZI", "XIY", "IZY", "III"]
            .iter()
            .map(|s| s.parse::<PauliLabel>().unwrap())
            .collect();
        let obs = CustomObservable::new(3, labels, true).unwrap();
        let circuits = get_measurement_circuits(&encoding(), &obs, None, None, None).unwrap();
        assert_eq!(circuits.len(), 1);

        let c = &circuits[0];
        let reg = c.creg("XZI+XIY+IZY+III").unwrap();
        assert_eq!(reg.size(), 3);
        let tail: Vec<&str> = c.instructions()[11..].iter().map(|i| i.name()).collect();
        assert_eq!(tail, vec![
            "barrier", "h", "measure", "measure", "sdg", "h", "measure"
        ]);
    }

    #[test]
    fn test_group_count_and_register_widths() {
        let obs = summed_pairs(4, &[Pauli::X, Pauli::Z], 3).unwrap();
        let labels = obs.symbolic_operator().unwrap().labels();
        let groups = group_qubit_wise_commuting(&labels).unwrap();

        let circuits = get_measurement_circuits(&encoding_4(), &obs, None, Some(&[0.1; 4][..]), None).unwrap();
        assert_eq!(circuits.len(), groups.len());
        for (circuit, group) in circuits.iter().zip(&groups) {
            let reg = circuit.creg(&group.name()).unwrap();
            assert_eq!(reg.size(), group.num_active_qubits());
            assert!(circuit.parameters().iter().all(|p| p.starts_with("x[")));
        }
    }

    #[test]
    fn test_bound_features_and_target() {
        let obs = summed_pairs(3, &[Pauli::Y], 0).unwrap();
        let circuits =
            get_measurement_circuits(&encoding(), &obs, Some(Target::Ibm5), Some(&[0.1, 0.2, 0.3][..]), Some(&[1.0, 2.0][..]))
                .unwrap();
        for c in &circuits {
            assert_eq!(c.num_parameters(), 0);
            assert_eq!(c.num_qubits(), 5);
            assert!(c.instructions().iter().any(|i| i.name() == "measure"));
        }
    }

    #[test]
    fn test_wrong_feature_count() {
        let obs = summed_pairs(3, &[Pauli::Z], 0).unwrap();
        assert!(get_measurement_circuits(&encoding(), &obs, None, None, Some(&[1.0][..])).is_err());
    }

    fn encoding_4() -> LayeredEncodingCircuit {
        LayeredEncodingCircuit::parse("Ry(x)-cz-Rx(p)", 4, 3).unwrap()
    }
}
