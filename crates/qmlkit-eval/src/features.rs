//! Bloch-vector features of encoded states.

use std::fmt;
use std::str::FromStr;

use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

use qmlkit_encoding::EncodingCircuit;
use qmlkit_sim::Statevector;

use crate::error::{EvalError, EvalResult};

/// Subset of Bloch components to extract, always emitted in X, Y, Z order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlochBases {
    /// Emit `2 Re ρ01`.
    pub x: bool,
    /// Emit `2 Im ρ10`.
    pub y: bool,
    /// Emit `ρ00 - ρ11`.
    pub z: bool,
}

impl BlochBases {
    /// All three components.
    pub const XYZ: BlochBases = BlochBases {
        x: true,
        y: true,
        z: true,
    };

    /// Components per qubit.
    pub fn len(&self) -> usize {
        usize::from(self.x) + usize::from(self.y) + usize::from(self.z)
    }

    /// Whether no component is selected.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Select the requested components from a Bloch vector.
    pub fn select(&self, [x, y, z]: [f64; 3]) -> impl Iterator<Item = f64> {
        [(self.x, x), (self.y, y), (self.z, z)]
            .into_iter()
            .filter_map(|(keep, v)| keep.then_some(v))
    }
}

impl FromStr for BlochBases {
    type Err = EvalError;

    /// Parse a string such as `"XZ"`; order and repetition are irrelevant.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bases = BlochBases {
            x: false,
            y: false,
            z: false,
        };
        for c in s.chars() {
            match c.to_ascii_uppercase() {
                'X' => bases.x = true,
                'Y' => bases.y = true,
                'Z' => bases.z = true,
                _ => return Err(EvalError::InvalidBases(s.to_string())),
            }
        }
        if bases.is_empty() {
            return Err(EvalError::InvalidBases(s.to_string()));
        }
        Ok(bases)
    }
}

impl fmt::Display for BlochBases {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (keep, c) in [(self.x, 'X'), (self.y, 'Y'), (self.z, 'Z')] {
            if keep {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

/// Simulate the encoding of every row of `x`.
pub fn encode_dataset(
    encoding: &(impl EncodingCircuit + ?Sized),
    x: ArrayView2<'_, f64>,
) -> EvalResult<Vec<Statevector>> {
    let parameters = vec![0.0; encoding.num_parameters()];
    x.rows()
        .into_iter()
        .map(|row| {
            let features: Vec<f64> = row.to_vec();
            let circuit = encoding.bound_circuit(&features, &parameters)?;
            Ok(Statevector::from_circuit(&circuit)?)
        })
        .collect()
}

/// Bloch components of every qubit of `state`, qubit by qubit.
pub fn bloch_features(state: &Statevector, bases: BlochBases) -> EvalResult<Vec<f64>> {
    let mut features = Vec::with_capacity(state.num_qubits() * bases.len());
    for qubit in 0..state.num_qubits() {
        features.extend(bases.select(state.bloch_vector(qubit)?));
    }
    Ok(features)
}

/// Feature matrix with one row per state and `num_qubits * bases.len()`
/// columns.
pub fn quantum_features(states: &[Statevector], bases: BlochBases) -> EvalResult<Array2<f64>> {
    let cols = states.first().map_or(0, |s| s.num_qubits() * bases.len());
    let mut matrix = Array2::zeros((states.len(), cols));
    for (mut row, state) in matrix.rows_mut().into_iter().zip(states) {
        let features = bloch_features(state, bases)?;
        if features.len() != cols {
            return Err(EvalError::Shape(format!(
                "state has {} features, expected {cols}",
                features.len()
            )));
        }
        for (dst, v) in row.iter_mut().zip(features) {
            *dst = v;
        }
    }
    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qmlkit_encoding::LayeredEncodingCircuit;
    use ndarray::array;

    #[test]
    fn test_parse_bases() {
        let b: BlochBases = "zx".parse().unwrap();
        assert_eq!(b, BlochBases {
            x: true,
            y: false,
            z: true
        });
        assert_eq!(b.to_string(), "XZ");
        assert_eq!(b.len(), 2);
        assert!("".parse::<BlochBases>().is_err());
        assert!("XI".parse::<BlochBases>().is_err());
    }

    #[test]
    fn test_feature_order() {
        // Ry(π/2) on |0⟩ gives |+⟩: Bloch vector (1, 0, 0).
        let enc = LayeredEncodingCircuit::parse("Ry(x)", 2, 2).unwrap();
        let states = encode_dataset(&enc, array![[std::f64::consts::FRAC_PI_2, 0.0]].view()).unwrap();
        let features = quantum_features(&states, "ZX".parse().unwrap()).unwrap();
        assert_eq!(features.dim(), (1, 4));
        let expected = [1.0, 0.0, 0.0, 1.0];
        for (got, want) in features.iter().zip(expected) {
            assert!((got - want).abs() < 1e-12, "{features}");
        }
    }

    #[test]
    fn test_wrong_width_is_an_error() {
        let enc = LayeredEncodingCircuit::parse("Ry(x)", 2, 2).unwrap();
        assert!(encode_dataset(&enc, array![[0.1, 0.2, 0.3]].view()).is_err());
    }
}
