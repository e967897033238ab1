//! Bloch command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use qmlkit_encoding::LayeredEncodingCircuit;
use qmlkit_eval::{Dataset, plot_encoded_quantum_data};

use super::common::write_output;

/// Execute the bloch command.
pub fn execute(
    dataset: &Path,
    layers: &str,
    num_qubits: usize,
    num_features: Option<usize>,
    output: &Path,
) -> Result<()> {
    let data = Dataset::load(dataset).with_context(|| format!("Failed to load dataset: {}", dataset.display()))?;
    let num_features = num_features.unwrap_or_else(|| data.num_features());
    let encoding = LayeredEncodingCircuit::parse(layers, num_qubits, num_features)
        .with_context(|| format!("Invalid layer string: '{layers}'"))?;

    let plot = plot_encoded_quantum_data(&encoding, data.x(), data.y())?;
    write_output(output, &plot.to_svg())?;

    eprintln!(
        "{} {} examples of {} classes on {} spheres",
        style("✓").green().bold(),
        data.len(),
        plot.classes.len(),
        plot.num_qubits()
    );
    eprintln!("  Output: {}", style(output.display()).green());
    Ok(())
}
