//! Single-qubit Pauli operators and Pauli labels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ObservableError, ObservableResult};

/// A single-qubit Pauli operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Pauli {
    /// Identity.
    I,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
}

impl Pauli {
    /// Parse a single character (case-insensitive).
    pub fn from_char(c: char) -> ObservableResult<Self> {
        match c.to_ascii_uppercase() {
            'I' => Ok(Pauli::I),
            'X' => Ok(Pauli::X),
            'Y' => Ok(Pauli::Y),
            'Z' => Ok(Pauli::Z),
            _ => Err(ObservableError::InvalidPauli(c)),
        }
    }

    /// Upper-case character for this operator.
    pub fn as_char(self) -> char {
        match self {
            Pauli::I => 'I',
            Pauli::X => 'X',
            Pauli::Y => 'Y',
            Pauli::Z => 'Z',
        }
    }

    /// Whether this is the identity.
    pub fn is_identity(self) -> bool {
        self == Pauli::I
    }

    /// Parse a compact basis set such as `"XZ"`.
    pub fn parse_list(bases: &str) -> ObservableResult<Vec<Pauli>> {
        bases.chars().map(Pauli::from_char).collect()
    }

    /// Parse a list of one-character basis names such as `["X", "Z"]`.
    pub fn parse_names<S: AsRef<str>>(bases: &[S]) -> ObservableResult<Vec<Pauli>> {
        bases
            .iter()
            .map(|b| {
                let b = b.as_ref();
                let mut chars = b.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Pauli::from_char(c),
                    _ => Err(ObservableError::InvalidBasis(b.to_string())),
                }
            })
            .collect()
    }
}

impl fmt::Display for Pauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A tensor product of Paulis; position `k` acts on qubit `k`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PauliLabel(Vec<Pauli>);

impl PauliLabel {
    /// Build a label from operators.
    pub fn new(paulis: Vec<Pauli>) -> Self {
        Self(paulis)
    }

    /// The all-identity label on `num_qubits` qubits.
    pub fn identity(num_qubits: usize) -> Self {
        Self(vec![Pauli::I; num_qubits])
    }

    /// Number of qubits the label spans.
    pub fn num_qubits(&self) -> usize {
        self.0.len()
    }

    /// Operators in qubit order.
    pub fn paulis(&self) -> &[Pauli] {
        &self.0
    }

    /// Operator acting on `qubit`.
    pub fn get(&self, qubit: usize) -> Option<Pauli> {
        self.0.get(qubit).copied()
    }

    /// Whether every position is the identity.
    pub fn is_identity(&self) -> bool {
        self.0.iter().all(|p| p.is_identity())
    }

    /// Qubits with a non-identity operator, in ascending order.
    pub fn support(&self) -> impl Iterator<Item = (usize, Pauli)> + '_ {
        self.0
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, p)| !p.is_identity())
    }

    /// Two labels commute qubit-wise when, at every position, one of them is
    /// the identity or both are equal.
    pub fn qubit_wise_commutes(&self, other: &PauliLabel) -> bool {
        self.0
            .iter()
            .zip(&other.0)
            .all(|(a, b)| a.is_identity() || b.is_identity() || a == b)
    }
}

impl FromStr for PauliLabel {
    type Err = ObservableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Pauli::parse_list(s)?))
    }
}

impl TryFrom<String> for PauliLabel {
    type Error = ObservableError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PauliLabel> for String {
    fn from(label: PauliLabel) -> Self {
        label.to_string()
    }
}

impl fmt::Display for PauliLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for p in &self.0 {
            write!(f, "{p}")?;
        }
        Ok(())
    }
}
