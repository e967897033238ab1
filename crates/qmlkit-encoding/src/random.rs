//! Random layered encoding circuits.

use std::fmt;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use qmlkit_ir::{Circuit, ParameterExpression};

use crate::encoding::EncodingCircuit;
use crate::error::{EncodingError, EncodingResult, circuit_width};
use crate::layered::{Layer, LayerArgument, LayeredEncodingCircuit};

const FIXED_LAYERS: [&str; 6] = ["H", "X", "Y", "Z", "S", "T"];
const FEATURE_LAYERS: [&str; 4] = ["Rx(x)", "Ry(x)", "Rz(x)", "P(x)"];
const ENTANGLING_LAYERS: [&str; 4] = ["cx", "cy", "cz", "ch"];

/// A layered encoding circuit drawn at random from a seed.
///
/// Each layer is a fixed single-qubit gate, a feature rotation or an
/// entangling gate. After drawing, random non-feature layers are replaced by
/// feature rotations until every feature is encoded at least once. The
/// circuit has no trainable parameters.
///
/// ```rust
/// use qmlkit_encoding::{EncodingCircuit, RandomLayeredEncodingCircuit};
///
/// let enc = RandomLayeredEncodingCircuit::new(3, 4, 2, 5, 7).unwrap();
/// assert!((2..=5).contains(&enc.num_layers()));
/// assert!(enc.inner().num_feature_gates() >= 4);
/// assert_eq!(enc.num_parameters(), 0);
///
/// let same = RandomLayeredEncodingCircuit::new(3, 4, 2, 5, 7).unwrap();
/// assert_eq!(enc.to_string(), same.to_string());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RandomLayeredEncodingCircuit {
    seed: u64,
    inner: LayeredEncodingCircuit,
}

impl RandomLayeredEncodingCircuit {
    /// Draw a circuit with between `min_num_layers` and `max_num_layers`
    /// layers (inclusive).
    pub fn new(
        num_qubits: usize,
        num_features: usize,
        min_num_layers: usize,
        max_num_layers: usize,
        seed: u64,
    ) -> EncodingResult<Self> {
        circuit_width(num_qubits)?;
        if num_features == 0 {
            return Err(EncodingError::ZeroFeatures);
        }
        if min_num_layers == 0 || min_num_layers > max_num_layers {
            return Err(EncodingError::InvalidLayerBounds {
                min: min_num_layers,
                max: max_num_layers,
            });
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let num_layers = rng.gen_range(min_num_layers..=max_num_layers);

        let capacity = num_layers * num_qubits;
        if capacity < num_features {
            return Err(EncodingError::FeatureCoverage {
                num_features,
                capacity,
            });
        }

        let mut tokens: Vec<&str> = (0..num_layers).map(|_| draw_layer(&mut rng)).collect();

        let required = num_features.div_ceil(num_qubits);
        let mut present = tokens.iter().filter(|t| FEATURE_LAYERS.contains(*t)).count();
        while present < required {
            let free: Vec<usize> = (0..tokens.len())
                .filter(|&i| !FEATURE_LAYERS.contains(&tokens[i]))
                .collect();
            // capacity >= num_features guarantees a free slot
            let Some(&slot) = free.choose(&mut rng) else {
                break;
            };
            tokens[slot] = pick(&FEATURE_LAYERS, &mut rng);
            present += 1;
        }

        let inner = LayeredEncodingCircuit::parse(&tokens.join("-"), num_qubits, num_features)?;
        debug!(seed, layers = %inner, "drew random layered encoding circuit");
        Ok(Self { seed, inner })
    }

    /// Seed the circuit was drawn from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of drawn layers.
    pub fn num_layers(&self) -> usize {
        self.inner.num_layers()
    }

    /// The drawn layers.
    pub fn layers(&self) -> &[Layer] {
        self.inner.layers()
    }

    /// The underlying layered circuit.
    pub fn inner(&self) -> &LayeredEncodingCircuit {
        &self.inner
    }

    /// Number of feature layers.
    pub fn num_feature_layers(&self) -> usize {
        self.layers()
            .iter()
            .filter(|l| l.argument() == Some(LayerArgument::Feature))
            .count()
    }
}

fn pick<'a>(pool: &[&'a str], rng: &mut StdRng) -> &'a str {
    pool[rng.gen_range(0..pool.len())]
}

fn draw_layer(rng: &mut StdRng) -> &'static str {
    match rng.gen_range(0..3) {
        0 => pick(&FIXED_LAYERS, rng),
        1 => pick(&FEATURE_LAYERS, rng),
        _ => pick(&ENTANGLING_LAYERS, rng),
    }
}

impl EncodingCircuit for RandomLayeredEncodingCircuit {
    fn num_qubits(&self) -> usize {
        self.inner.num_qubits()
    }

    fn num_features(&self) -> usize {
        self.inner.num_features()
    }

    fn num_parameters(&self) -> usize {
        self.inner.num_parameters()
    }

    fn get_circuit(
        &self,
        features: &[ParameterExpression],
        parameters: &[ParameterExpression],
    ) -> EncodingResult<Circuit> {
        let mut circuit = self.inner.get_circuit(features, parameters)?;
        circuit.set_name("RandomLayeredEncodingCircuit");
        Ok(circuit)
    }
}

impl fmt::Display for RandomLayeredEncodingCircuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_layer_count() {
        for seed in 0..20 {
            let enc = RandomLayeredEncodingCircuit::new(2, 3, 4, 4, seed).unwrap();
            assert_eq!(enc.num_layers(), 4);
            assert!(enc.num_feature_layers() >= 2, "seed {seed}: {enc}");
            assert_eq!(enc.seed(), seed);
        }
    }

    #[test]
    fn test_invalid_arguments() {
        assert!(matches!(
            RandomLayeredEncodingCircuit::new(0, 2, 1, 2, 0),
            Err(EncodingError::ZeroQubits)
        ));
        assert!(matches!(
            RandomLayeredEncodingCircuit::new(2, 0, 1, 2, 0),
            Err(EncodingError::ZeroFeatures)
        ));
        assert!(matches!(
            RandomLayeredEncodingCircuit::new(2, 2, 3, 2, 0),
            Err(EncodingError::InvalidLayerBounds { min: 3, max: 2 })
        ));
        assert!(matches!(
            RandomLayeredEncodingCircuit::new(2, 2, 0, 2, 0),
            Err(EncodingError::InvalidLayerBounds { .. })
        ));
        assert!(matches!(
            RandomLayeredEncodingCircuit::new(2, 5, 2, 2, 0),
            Err(EncodingError::FeatureCoverage {
                num_features: 5,
                capacity: 4
            })
        ));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_width_beyond_qubit_ids() {
        assert!(matches!(
            RandomLayeredEncodingCircuit::new((1 << 32) + 2, 2, 1, 1, 0),
            Err(EncodingError::TooManyQubits(_))
        ));
    }

    #[test]
    fn test_single_layer_is_feature_layer() {
        let enc = RandomLayeredEncodingCircuit::new(3, 3, 1, 1, 11).unwrap();
        assert_eq!(enc.num_feature_layers(), 1);
        let circuit = enc.symbolic_circuit().unwrap();
        assert_eq!(circuit.parameters(), vec!["x[0]", "x[1]", "x[2]"]);
        assert_eq!(circuit.name(), "RandomLayeredEncodingCircuit");
    }
}
