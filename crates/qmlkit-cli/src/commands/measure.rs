//! Measure command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use qmlkit_compile::Target;
use qmlkit_encoding::LayeredEncodingCircuit;
use qmlkit_eval::get_measurement_circuits;
use qmlkit_ir::qasm::emit;
use qmlkit_observables::ObservableKind;

use super::common::{parse_bases, write_output};

/// Execute the measure command.
#[allow(clippy::too_many_arguments)]
pub fn execute(
    layers: &str,
    num_qubits: usize,
    num_features: usize,
    kind: ObservableKind,
    bases: &str,
    seed: u64,
    target: Option<Target>,
    output: Option<&Path>,
) -> Result<()> {
    let encoding = LayeredEncodingCircuit::parse(layers, num_qubits, num_features)
        .with_context(|| format!("Invalid layer string: '{layers}'"))?;
    let observable = kind.build(num_qubits, &parse_bases(bases)?, seed)?;
    let circuits = get_measurement_circuits(&encoding, &observable, target, None, None)?;

    eprintln!(
        "{} {} measurement circuits for the {} observable",
        style("→").cyan().bold(),
        circuits.len(),
        style(kind).yellow()
    );

    for (i, circuit) in circuits.iter().enumerate() {
        let group = circuit.cregs().last().map_or("", |r| r.name.as_str());
        let qasm = emit(circuit);
        match output {
            Some(dir) => {
                let path = dir.join(format!("measurement_{i}.qasm"));
                write_output(&path, &qasm)?;
                eprintln!(
                    "  {} {} ({} ops)",
                    style(path.display()).green(),
                    group,
                    circuit.size()
                );
            }
            None => {
                println!("// group {i}: {group}");
                println!("{qasm}");
            }
        }
    }
    Ok(())
}
