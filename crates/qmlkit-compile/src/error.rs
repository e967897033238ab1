//! Error types for the compilation crate.

use qmlkit_ir::IrError;
use thiserror::Error;

/// Errors raised by compilation passes.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// The circuit needs more qubits than the device has.
    #[error("Circuit requires {required} qubits, but target only has {available}")]
    CircuitTooLarge {
        /// Qubits used by the circuit.
        required: usize,
        /// Qubits on the device.
        available: u32,
    },

    /// A pass needs a coupling map that was not configured.
    #[error("Coupling map not set")]
    MissingCouplingMap,

    /// A pass needs a layout that no earlier pass produced.
    #[error("Layout not set; run a layout pass first")]
    MissingLayout,

    /// A pass needs basis gates that were not configured.
    #[error("Basis gates not set")]
    MissingBasisGates,

    /// No path connects two physical qubits.
    #[error("Cannot route between physical qubits {qubit1} and {qubit2}")]
    RoutingFailed {
        /// First physical qubit.
        qubit1: u32,
        /// Second physical qubit.
        qubit2: u32,
    },

    /// A gate has no decomposition into the target basis.
    #[error("Gate '{gate}' cannot be translated to basis [{basis}]")]
    GateNotInBasis {
        /// Gate name.
        gate: String,
        /// Comma-separated basis gate names.
        basis: String,
    },

    /// Unknown target name.
    #[error("Unknown target '{0}'. Available: ibm5, ibm27, iqm5, iqm20, simulator")]
    UnknownTarget(String),

    /// Underlying IR error.
    #[error(transparent)]
    Ir(#[from] IrError),
}

/// Result type for compilation.
pub type CompileResult<T> = Result<T, CompileError>;
