//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use qmlkit_compile::Target;
use qmlkit_observables::ObservableKind;

/// qmlkit - analysis helpers for quantum machine-learning encodings
#[derive(Debug, Parser)]
#[command(name = "qmlkit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the Pauli strings of a summed observable
    Observable {
        /// Observable pattern (neighbours, pairs, singles)
        #[arg(short, long)]
        kind: ObservableKind,

        /// Number of qubits
        #[arg(short = 'n', long)]
        num_qubits: usize,

        /// Pauli bases to draw from, e.g. XZ
        #[arg(short, long, default_value = "XYZ")]
        bases: String,

        /// Seed for the basis draws
        #[arg(short, long, default_value = "0")]
        seed: u64,

        /// Print JSON instead of one string per line
        #[arg(long)]
        json: bool,
    },

    /// Count the gates of a transpiled layered encoding circuit
    Gates {
        /// Layer string, e.g. "H-Ry(x)-cx-Rz(p)"
        #[arg(short, long)]
        layers: String,

        /// Number of qubits
        #[arg(short = 'n', long)]
        num_qubits: usize,

        /// Number of features
        #[arg(short = 'f', long)]
        num_features: usize,

        /// Target preset (ibm5, ibm27, iqm5, iqm20, simulator)
        #[arg(short, long)]
        target: Option<Target>,
    },

    /// Build one measurement circuit per qubit-wise commuting group
    Measure {
        /// Layer string of the state preparation
        #[arg(short, long)]
        layers: String,

        /// Number of qubits
        #[arg(short = 'n', long)]
        num_qubits: usize,

        /// Number of features
        #[arg(short = 'f', long)]
        num_features: usize,

        /// Observable pattern (neighbours, pairs, singles)
        #[arg(long, default_value = "pairs")]
        observable: ObservableKind,

        /// Pauli bases of the observable
        #[arg(short, long, default_value = "XYZ")]
        bases: String,

        /// Seed for the observable's basis draws
        #[arg(short, long, default_value = "0")]
        seed: u64,

        /// Transpile for a target preset
        #[arg(short, long)]
        target: Option<Target>,

        /// Directory for the OpenQASM 3 files (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run an approximate cross-validation sweep
    Sweep {
        /// Sweep configuration (YAML)
        #[arg(short, long)]
        config: PathBuf,
    },

    /// Render a Pareto plot of a records table
    Pareto {
        /// Records file (JSON array of objects)
        #[arg(short, long)]
        input: PathBuf,

        /// Column on the x axis (lower is better)
        #[arg(long, default_value = "num_layers")]
        x: String,

        /// Column on the y axis (higher is better)
        #[arg(long, default_value = "score")]
        y: String,

        /// Columns shown in the labels of front points
        #[arg(long, value_delimiter = ',', default_value = "num_qubits,bases")]
        label: Vec<String>,

        /// Plot title
        #[arg(long, default_value = "")]
        title: String,

        /// Output SVG file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Render the Bloch-sphere view of an encoded dataset
    Bloch {
        /// Dataset file (JSON with "x" and "y")
        #[arg(short, long)]
        dataset: PathBuf,

        /// Layer string of the encoding
        #[arg(short, long)]
        layers: String,

        /// Number of qubits
        #[arg(short = 'n', long)]
        num_qubits: usize,

        /// Number of features (defaults to the dataset's)
        #[arg(short = 'f', long)]
        num_features: Option<usize>,

        /// Output SVG file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Show version information
    Version,
}
