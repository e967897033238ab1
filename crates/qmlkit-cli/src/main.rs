//! qmlkit command-line interface.
//!
//! ```text
//!   qmlkit observable --kind pairs -n 4 --bases XZ
//!   qmlkit gates --layers "H-Ry(x)-cx" -n 3 -f 3 --target iqm5
//!   qmlkit sweep --config sweep.yaml
//!   qmlkit pareto --input records.json --output front.svg
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

use qmlkit_cli::commands::{bloch, gates, measure, observable, pareto, sweep, version};
use qmlkit_cli::{Cli, Commands};

/// Environment variable overriding the `-v` log level.
const LOG_ENV: &str = "QMLKIT_LOG";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Observable {
            kind,
            num_qubits,
            bases,
            seed,
            json,
        } => observable::execute(kind, num_qubits, &bases, seed, json),

        Commands::Gates {
            layers,
            num_qubits,
            num_features,
            target,
        } => gates::execute(&layers, num_qubits, num_features, target),

        Commands::Measure {
            layers,
            num_qubits,
            num_features,
            observable,
            bases,
            seed,
            target,
            output,
        } => measure::execute(
            &layers,
            num_qubits,
            num_features,
            observable,
            &bases,
            seed,
            target,
            output.as_deref(),
        ),

        Commands::Sweep { config } => sweep::execute(&config).await,

        Commands::Pareto {
            input,
            x,
            y,
            label,
            title,
            output,
        } => pareto::execute(&input, &x, &y, &label, &title, &output),

        Commands::Bloch {
            dataset,
            layers,
            num_qubits,
            num_features,
            output,
        } => bloch::execute(&dataset, &layers, num_qubits, num_features, &output),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
