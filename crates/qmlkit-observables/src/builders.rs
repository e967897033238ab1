//! Seeded observable builders.
//!
//! Each builder places randomly drawn bases on a fixed pattern of qubit
//! positions (adjacent pairs, all pairs, or single qubits), appends an
//! all-identity offset term, and returns a parameterized
//! [`CustomObservable`] with one coefficient per term.
//!
//! Draws come from a generator owned by the call and seeded with `seed`,
//! consumed strictly left to right (for a pair `(i, j)`: position `i`, then
//! `j`). The same `(num_qubits, bases, seed)` always yields the same
//! strings, independent of call order or thread.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::error::{ObservableError, ObservableResult};
use crate::observable::CustomObservable;
use crate::pauli::{Pauli, PauliLabel};

/// The qubit patterns a builder can cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObservableKind {
    /// Adjacent pairs `(i, i+1)`.
    Neighbours,
    /// All pairs `(i, j)`, `i < j`.
    Pairs,
    /// Single qubits.
    Singles,
}

impl ObservableKind {
    /// Build the observable of this kind.
    pub fn build(self, num_qubits: usize, bases: &[Pauli], seed: u64) -> ObservableResult<CustomObservable> {
        match self {
            ObservableKind::Neighbours => summed_neighbours(num_qubits, bases, seed),
            ObservableKind::Pairs => summed_pairs(num_qubits, bases, seed),
            ObservableKind::Singles => summed_singles(num_qubits, bases, seed),
        }
    }

    /// Number of terms a builder of this kind produces, identity included.
    pub fn num_terms(self, num_qubits: usize) -> usize {
        match self {
            ObservableKind::Neighbours => num_qubits.saturating_sub(1) + 1,
            ObservableKind::Pairs => num_qubits * num_qubits.saturating_sub(1) / 2 + 1,
            ObservableKind::Singles => num_qubits + 1,
        }
    }
}

impl fmt::Display for ObservableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ObservableKind::Neighbours => "neighbours",
            ObservableKind::Pairs => "pairs",
            ObservableKind::Singles => "singles",
        };
        write!(f, "{name}")
    }
}

impl FromStr for ObservableKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "neighbours" | "neighbors" | "summed_neighbours" => Ok(ObservableKind::Neighbours),
            "pairs" | "summed_pairs" => Ok(ObservableKind::Pairs),
            "singles" | "summed_singles" => Ok(ObservableKind::Singles),
            other => Err(format!("unknown observable kind '{other}'")),
        }
    }
}

/// Terms on each adjacent pair `(i, i+1)`, plus identity: `N` terms.
pub fn summed_neighbours(num_qubits: usize, bases: &[Pauli], seed: u64) -> ObservableResult<CustomObservable> {
    let groups = (0..num_qubits.saturating_sub(1)).map(|i| vec![i, i + 1]);
    build(ObservableKind::Neighbours, num_qubits, bases, seed, groups)
}

/// Terms on every pair `(i, j)`, `i < j`, in lexicographic order, plus
/// identity: `N(N-1)/2 + 1` terms.
pub fn summed_pairs(num_qubits: usize, bases: &[Pauli], seed: u64) -> ObservableResult<CustomObservable> {
    let groups = (0..num_qubits).flat_map(|i| ((i + 1)..num_qubits).map(move |j| vec![i, j]));
    build(ObservableKind::Pairs, num_qubits, bases, seed, groups)
}

/// Terms on each single qubit, plus identity: `N + 1` terms.
pub fn summed_singles(num_qubits: usize, bases: &[Pauli], seed: u64) -> ObservableResult<CustomObservable> {
    let groups = (0..num_qubits).map(|i| vec![i]);
    build(ObservableKind::Singles, num_qubits, bases, seed, groups)
}

fn build(
    kind: ObservableKind,
    num_qubits: usize,
    bases: &[Pauli],
    seed: u64,
    positions: impl Iterator<Item = Vec<usize>>,
) -> ObservableResult<CustomObservable> {
    if num_qubits == 0 {
        return Err(ObservableError::ZeroQubits);
    }
    if bases.is_empty() {
        return Err(ObservableError::EmptyBases);
    }
    let mut rng = StdRng::seed_from_u64(seed);

    let mut labels = Vec::with_capacity(kind.num_terms(num_qubits));
    for group in positions {
        let mut paulis = vec![Pauli::I; num_qubits];
        for idx in group {
            paulis[idx] = *bases.choose(&mut rng).ok_or(ObservableError::EmptyBases)?;
        }
        labels.push(PauliLabel::new(paulis));
    }
    labels.push(PauliLabel::identity(num_qubits));

    debug!(%kind, num_qubits, seed, terms = labels.len(), "built observable");
    CustomObservable::new(num_qubits, labels, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observable::Observable;

    fn strings(obs: &CustomObservable) -> Vec<String> {
        obs.operator_strings().iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_single_basis_is_fully_determined() {
        let obs = summed_neighbours(4, &[Pauli::Z], 7).unwrap();
        assert_eq!(strings(&obs), vec!["ZZII", "IZZI", "IIZZ", "IIII"]);
        assert_eq!(obs.num_parameters(), 4);

        let obs = summed_pairs(3, &[Pauli::X], 0).unwrap();
        assert_eq!(strings(&obs), vec!["XXI", "XIX", "IXX", "III"]);

        let obs = summed_singles(2, &[Pauli::Y], 1).unwrap();
        assert_eq!(strings(&obs), vec!["YI", "IY", "II"]);
    }

    #[test]
    fn test_single_qubit_neighbours_is_identity_only() {
        let obs = summed_neighbours(1, &[Pauli::X, Pauli::Z], 3).unwrap();
        assert_eq!(strings(&obs), vec!["I"]);
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            summed_pairs(0, &[Pauli::X], 0),
            Err(ObservableError::ZeroQubits)
        ));
        assert!(matches!(
            summed_singles(3, &[], 0),
            Err(ObservableError::EmptyBases)
        ));
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("Pairs".parse::<ObservableKind>().unwrap(), ObservableKind::Pairs);
        assert_eq!(ObservableKind::Neighbours.to_string(), "neighbours");
        assert!("triples".parse::<ObservableKind>().is_err());
        assert_eq!(ObservableKind::Pairs.num_terms(5), 11);
    }
}
