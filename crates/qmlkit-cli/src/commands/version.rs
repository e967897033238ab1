//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - encoding-circuit analysis for quantum machine learning",
        style("qmlkit").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qmlkit-ir           Circuit intermediate representation");
    println!("  qmlkit-sim          Statevector and density-matrix simulation");
    println!("  qmlkit-observables  Pauli observables and commuting groups");
    println!("  qmlkit-compile      Transpilation to device presets");
    println!("  qmlkit-encoding     Layered encoding circuits");
    println!("  qmlkit-eval         Cross-validation, Bloch and Pareto helpers");
    println!("  qmlkit-cli          Command-line interface");
}
