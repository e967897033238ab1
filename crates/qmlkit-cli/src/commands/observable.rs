//! Observable command implementation.

use anyhow::Result;
use console::style;
use serde::Serialize;

use qmlkit_observables::{ObservableKind, get_pauli_strings};

use super::common::parse_bases;

#[derive(Debug, Serialize)]
struct ObservableReport<'a> {
    kind: ObservableKind,
    num_qubits: usize,
    bases: &'a str,
    seed: u64,
    terms: Vec<String>,
}

/// Execute the observable command.
pub fn execute(kind: ObservableKind, num_qubits: usize, bases: &str, seed: u64, json: bool) -> Result<()> {
    let paulis = parse_bases(bases)?;
    let observable = kind.build(num_qubits, &paulis, seed)?;
    let terms = get_pauli_strings(&observable)?;

    if json {
        let report = ObservableReport {
            kind,
            num_qubits,
            bases,
            seed,
            terms,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    eprintln!(
        "{} {} observable on {} qubits ({} terms)",
        style("→").cyan().bold(),
        style(kind).yellow(),
        num_qubits,
        terms.len()
    );
    for term in &terms {
        println!("{term}");
    }
    Ok(())
}
