//! Evaluation error types.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for evaluation helpers.
pub type EvalResult<T> = Result<T, EvalError>;

/// Errors that can occur while analysing encoding circuits.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EvalError {
    /// Circuit construction failed.
    #[error(transparent)]
    Ir(#[from] qmlkit_ir::IrError),

    /// Simulation failed.
    #[error(transparent)]
    Sim(#[from] qmlkit_sim::SimError),

    /// Observable construction or evaluation failed.
    #[error(transparent)]
    Observable(#[from] qmlkit_observables::ObservableError),

    /// Transpilation failed.
    #[error("Compilation error: {0}")]
    Compilation(#[from] qmlkit_compile::CompileError),

    /// Encoding circuit construction failed.
    #[error(transparent)]
    Encoding(#[from] qmlkit_encoding::EncodingError),

    /// Qubit index or register width beyond what a circuit can address.
    #[error("Qubit index {0} exceeds the circuit address range")]
    QubitIndex(usize),

    /// Bloch basis string contains something other than `X`, `Y`, `Z`.
    #[error("Invalid bases '{0}': expected a non-empty subset of XYZ")]
    InvalidBases(String),

    /// Malformed dataset.
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// Table has no usable rows.
    #[error("No rows with numeric '{x}' and '{y}'")]
    NoData {
        /// Horizontal column.
        x: String,
        /// Vertical column.
        y: String,
    },

    /// Fold count unusable for the given labels.
    #[error("Cannot split into {folds} folds: {reason}")]
    InvalidFolds {
        /// Requested folds.
        folds: usize,
        /// Why the split is impossible.
        reason: String,
    },

    /// A classifier needs examples of at least two classes.
    #[error("Training data contains a single class ({0})")]
    SingleClass(i64),

    /// Feature matrix and labels disagree.
    #[error("Shape mismatch: {0}")]
    Shape(String),

    /// File access failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// JSON (de)serialization failed.
    #[error("Export error: {0}")]
    Export(#[from] serde_json::Error),
}

impl EvalError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EvalError::Io {
            path: path.into(),
            source,
        }
    }
}
