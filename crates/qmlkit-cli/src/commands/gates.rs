//! Gates command implementation.

use anyhow::{Context, Result};
use console::style;

use qmlkit_compile::Target;
use qmlkit_encoding::LayeredEncodingCircuit;
use qmlkit_eval::get_transpiled_encoding_circuit;

/// Execute the gates command.
pub fn execute(layers: &str, num_qubits: usize, num_features: usize, target: Option<Target>) -> Result<()> {
    let encoding = LayeredEncodingCircuit::parse(layers, num_qubits, num_features)
        .with_context(|| format!("Invalid layer string: '{layers}'"))?;
    let target = target.unwrap_or(Target::Simulator);
    let compiled = get_transpiled_encoding_circuit(&encoding, Some(target))?;

    println!(
        "{} {} on {}: {} gates, depth {}",
        style("✓").green().bold(),
        style(&encoding).cyan(),
        style(target).yellow(),
        compiled.size(),
        compiled.depth()
    );
    for (name, count) in compiled.count_ops() {
        println!("  {name:<10} {count:>6}");
    }
    Ok(())
}
