//! Error types for the sim crate.

use thiserror::Error;

/// Errors produced while simulating a circuit or reducing a state.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// The state would not fit in memory.
    #[error("Cannot simulate {requested} qubits, the limit is {max}")]
    TooManyQubits {
        /// Requested width.
        requested: usize,
        /// Largest supported width.
        max: usize,
    },

    /// A gate still carries a symbolic angle.
    #[error("Gate '{gate}' has unbound parameter '{parameter}'")]
    UnboundParameter {
        /// Name of the gate.
        gate: String,
        /// Offending expression.
        parameter: String,
    },

    /// Measurement inside a circuit that must stay unitary.
    #[error("Instruction '{0}' is not unitary and cannot be applied to a statevector")]
    NonUnitary(String),

    /// A qubit index is out of range.
    #[error("Qubit {qubit} out of range for a {num_qubits}-qubit state")]
    QubitOutOfRange {
        /// The offending qubit index.
        qubit: usize,
        /// Number of qubits in the state.
        num_qubits: usize,
    },

    /// The same qubit was listed twice.
    #[error("Qubit {0} listed more than once")]
    DuplicateQubit(usize),

    /// Pauli label contains a character outside `IXYZ`.
    #[error("Invalid Pauli character '{0}'")]
    InvalidPauli(char),

    /// Label or matrix width does not match the state.
    #[error("Expected width {expected}, got {got}")]
    DimensionMismatch {
        /// Width of the state.
        expected: usize,
        /// Width supplied by the caller.
        got: usize,
    },
}

/// Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;
