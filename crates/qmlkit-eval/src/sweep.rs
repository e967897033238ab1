//! Approximate cross-validation of random layered encoding circuits.
//!
//! Instead of training a quantum model, each example is encoded and the
//! single-qubit Bloch components of the resulting state are fed to a
//! classical logistic regression. The cross-validated accuracy is a cheap
//! proxy for how well the encoding separates the classes.

use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use qmlkit_encoding::RandomLayeredEncodingCircuit;

use crate::classifier::LogisticRegressionConfig;
use crate::cross_validation::{DEFAULT_FOLDS, cross_val_score, mean_score};
use crate::dataset::Dataset;
use crate::error::{EvalError, EvalResult};
use crate::features::{BlochBases, encode_dataset, quantum_features};

/// One scored configuration.
///
/// `score` is `None` when any step failed; the other fields echo the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CvRecord {
    /// Qubits of the encoding circuit.
    pub num_qubits: usize,
    /// Features per example.
    pub num_features: usize,
    /// Layers of the encoding circuit.
    pub num_layers: usize,
    /// Seed the circuit was drawn from.
    pub seed: u64,
    /// Bloch components used as classical features.
    pub bases: String,
    /// Mean test accuracy.
    pub score: Option<f64>,
}

/// Score a random layered encoding circuit with `num_layers` layers by
/// 5-fold cross-validated logistic regression on its Bloch features.
///
/// Never fails: errors are logged at `warn` and reported as a `None` score.
pub fn approx_cross_validate_random_encoding_circuit(
    num_qubits: usize,
    num_features: usize,
    num_layers: usize,
    seed: u64,
    bases: &str,
    x: ArrayView2<'_, f64>,
    y: &[i64],
) -> CvRecord {
    approx_cross_validate_with_folds(num_qubits, num_features, num_layers, seed, bases, x, y, DEFAULT_FOLDS)
}

/// [`approx_cross_validate_random_encoding_circuit`] with a custom fold count.
#[allow(clippy::too_many_arguments)]
pub fn approx_cross_validate_with_folds(
    num_qubits: usize,
    num_features: usize,
    num_layers: usize,
    seed: u64,
    bases: &str,
    x: ArrayView2<'_, f64>,
    y: &[i64],
    folds: usize,
) -> CvRecord {
    let score = match score_configuration(num_qubits, num_features, num_layers, seed, bases, x, y, folds) {
        Ok(score) => Some(score),
        Err(e) => {
            warn!(num_qubits, num_features, num_layers, seed, bases, error = %e, "cross-validation failed");
            None
        }
    };
    CvRecord {
        num_qubits,
        num_features,
        num_layers,
        seed,
        bases: bases.to_string(),
        score,
    }
}

#[allow(clippy::too_many_arguments)]
fn score_configuration(
    num_qubits: usize,
    num_features: usize,
    num_layers: usize,
    seed: u64,
    bases: &str,
    x: ArrayView2<'_, f64>,
    y: &[i64],
    folds: usize,
) -> EvalResult<f64> {
    let bases: BlochBases = bases.parse()?;
    let encoding = RandomLayeredEncodingCircuit::new(num_qubits, num_features, num_layers, num_layers, seed)?;
    let states = encode_dataset(&encoding, x)?;
    let features = quantum_features(&states, bases)?;
    let scores = cross_val_score(features.view(), y, folds, &LogisticRegressionConfig::default())?;
    mean_score(&scores).ok_or_else(|| EvalError::InvalidFolds {
        folds,
        reason: "no folds were scored".into(),
    })
}

/// The configurations to score: the Cartesian product of every axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepGrid {
    /// Qubit counts.
    pub num_qubits: Vec<usize>,
    /// Feature counts.
    pub num_features: Vec<usize>,
    /// Layer counts.
    pub num_layers: Vec<usize>,
    /// Circuit seeds.
    pub seeds: Vec<u64>,
    /// Basis subsets, e.g. `"XZ"`.
    pub bases: Vec<String>,
}

/// A single grid point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepPoint {
    /// Qubits.
    pub num_qubits: usize,
    /// Features.
    pub num_features: usize,
    /// Layers.
    pub num_layers: usize,
    /// Seed.
    pub seed: u64,
    /// Bases.
    pub bases: String,
}

impl SweepGrid {
    /// Number of grid points.
    pub fn len(&self) -> usize {
        self.num_qubits.len() * self.num_features.len() * self.num_layers.len() * self.seeds.len() * self.bases.len()
    }

    /// Whether the grid is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Grid points, varying `bases` fastest and `num_qubits` slowest.
    pub fn points(&self) -> Vec<SweepPoint> {
        let mut points = Vec::with_capacity(self.len());
        for &num_qubits in &self.num_qubits {
            for &num_features in &self.num_features {
                for &num_layers in &self.num_layers {
                    for &seed in &self.seeds {
                        for bases in &self.bases {
                            points.push(SweepPoint {
                                num_qubits,
                                num_features,
                                num_layers,
                                seed,
                                bases: bases.clone(),
                            });
                        }
                    }
                }
            }
        }
        points
    }
}

/// Score every grid point on `dataset`, calling `on_record` after each.
///
/// Failed points are included with a `None` score.
pub fn run_sweep(
    grid: &SweepGrid,
    dataset: &Dataset,
    folds: usize,
    mut on_record: impl FnMut(&CvRecord),
) -> Vec<CvRecord> {
    let points = grid.points();
    info!(points = points.len(), examples = dataset.len(), folds, "starting sweep");

    let records: Vec<CvRecord> = points
        .into_iter()
        .map(|p| {
            let record = approx_cross_validate_with_folds(
                p.num_qubits,
                p.num_features,
                p.num_layers,
                p.seed,
                &p.bases,
                dataset.x(),
                dataset.y(),
                folds,
            );
            on_record(&record);
            record
        })
        .collect();

    let scored = records.iter().filter(|r| r.score.is_some()).count();
    info!(scored, failed = records.len() - scored, "sweep completed");
    records
}
