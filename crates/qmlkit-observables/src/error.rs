//! Error types for observables.

use thiserror::Error;

/// Errors raised while building or evaluating observables.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ObservableError {
    /// An observable needs at least one qubit.
    #[error("Observable requires at least one qubit")]
    ZeroQubits,

    /// Builders need at least one basis to draw from.
    #[error("Basis list is empty")]
    EmptyBases,

    /// Character outside `IXYZ`.
    #[error("Invalid Pauli character '{0}'")]
    InvalidPauli(char),

    /// A basis entry was not a single character.
    #[error("Basis '{0}' is not a single Pauli character")]
    InvalidBasis(String),

    /// Operator string has the wrong width.
    #[error("Operator string '{label}' has length {got}, expected {expected}")]
    LabelLength {
        /// The offending label.
        label: String,
        /// Observable width.
        expected: usize,
        /// Label width.
        got: usize,
    },

    /// Observable with no operator strings.
    #[error("Observable has no operator strings")]
    NoTerms,

    /// Wrong number of coefficient parameters.
    #[error("Observable takes {expected} parameters, got {got}")]
    ParameterCount {
        /// Parameters the observable declares.
        expected: usize,
        /// Parameters supplied.
        got: usize,
    },

    /// Expectation value requested while a coefficient is symbolic.
    #[error("Coefficient '{0}' is unbound")]
    UnboundCoefficient(String),

    /// Simulation failed while evaluating an expectation value.
    #[error("Simulation error: {0}")]
    Sim(#[from] qmlkit_sim::SimError),
}

/// Result type for observable operations.
pub type ObservableResult<T> = Result<T, ObservableError>;
