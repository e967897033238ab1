//! Error types for encoding circuits.

use qmlkit_ir::IrError;
use thiserror::Error;

/// Errors raised while building encoding circuits.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EncodingError {
    /// An encoding circuit needs at least one qubit.
    #[error("Encoding circuit requires at least one qubit")]
    ZeroQubits,

    /// More qubits than a circuit can address.
    #[error("Encoding circuit requires {0} qubits, more than a circuit can address")]
    TooManyQubits(usize),

    /// Feature gates present but no features declared.
    #[error("Encoding circuit requires at least one feature")]
    ZeroFeatures,

    /// A layer token could not be parsed.
    #[error("Invalid layer '{layer}': {reason}")]
    InvalidLayer {
        /// The offending token.
        layer: String,
        /// What is wrong with it.
        reason: String,
    },

    /// Layer string with no layers.
    #[error("Layer string is empty")]
    EmptyLayers,

    /// Layer count bounds are zero or inverted.
    #[error("Invalid layer bounds: min {min}, max {max}")]
    InvalidLayerBounds {
        /// Minimum layer count.
        min: usize,
        /// Maximum layer count.
        max: usize,
    },

    /// Not enough feature slots to encode every feature once.
    #[error("{num_features} features do not fit into {capacity} feature gates")]
    FeatureCoverage {
        /// Declared features.
        num_features: usize,
        /// Feature gates the layout can hold.
        capacity: usize,
    },

    /// Wrong number of feature values.
    #[error("Expected {expected} features, got {got}")]
    FeatureCount {
        /// Declared features.
        expected: usize,
        /// Supplied features.
        got: usize,
    },

    /// Wrong number of parameter values.
    #[error("Expected {expected} parameters, got {got}")]
    ParameterCount {
        /// Declared parameters.
        expected: usize,
        /// Supplied parameters.
        got: usize,
    },

    /// Underlying IR error.
    #[error(transparent)]
    Ir(#[from] IrError),
}

/// Result type for encoding circuits.
pub type EncodingResult<T> = Result<T, EncodingError>;

/// Circuit width for `num_qubits`, rejecting counts a [`QubitId`](qmlkit_ir::QubitId)
/// cannot index.
pub(crate) fn circuit_width(num_qubits: usize) -> EncodingResult<u32> {
    if num_qubits == 0 {
        return Err(EncodingError::ZeroQubits);
    }
    u32::try_from(num_qubits).map_err(|_| EncodingError::TooManyQubits(num_qubits))
}
