//! Labelled datasets loaded from JSON.

use std::path::Path;

use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::classifier::unique_classes;
use crate::error::{EvalError, EvalResult};

#[derive(Debug, Serialize, Deserialize)]
struct RawDataset {
    x: Vec<Vec<f64>>,
    y: Vec<i64>,
}

/// Feature rows with integer class labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    x: Array2<f64>,
    y: Vec<i64>,
}

impl Dataset {
    /// Create a dataset, checking that every row has a label.
    pub fn new(x: Array2<f64>, y: Vec<i64>) -> EvalResult<Self> {
        if x.nrows() != y.len() {
            return Err(EvalError::Dataset(format!(
                "{} feature rows but {} labels",
                x.nrows(),
                y.len()
            )));
        }
        if y.is_empty() {
            return Err(EvalError::Dataset("dataset is empty".into()));
        }
        Ok(Self { x, y })
    }

    /// Parse `{"x": [[...], ...], "y": [...]}`.
    pub fn from_json(json: &str) -> EvalResult<Self> {
        let raw: RawDataset = serde_json::from_str(json)?;
        let cols = raw.x.first().map_or(0, Vec::len);
        if let Some(i) = raw.x.iter().position(|row| row.len() != cols) {
            return Err(EvalError::Dataset(format!(
                "row {i} has {} features, expected {cols}",
                raw.x[i].len()
            )));
        }
        let rows = raw.x.len();
        let flat: Vec<f64> = raw.x.into_iter().flatten().collect();
        let x = Array2::from_shape_vec((rows, cols), flat).map_err(|e| EvalError::Dataset(e.to_string()))?;
        Self::new(x, raw.y)
    }

    /// Load a dataset file.
    pub fn load(path: impl AsRef<Path>) -> EvalResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| EvalError::io(path, e))?;
        Self::from_json(&json)
    }

    /// Serialize to the JSON layout accepted by [`Dataset::from_json`].
    pub fn to_json(&self) -> EvalResult<String> {
        let raw = RawDataset {
            x: self.x.rows().into_iter().map(|r| r.to_vec()).collect(),
            y: self.y.clone(),
        };
        Ok(serde_json::to_string(&raw)?)
    }

    /// Feature matrix.
    pub fn x(&self) -> ArrayView2<'_, f64> {
        self.x.view()
    }

    /// Labels.
    pub fn y(&self) -> &[i64] {
        &self.y
    }

    /// Number of examples.
    pub fn len(&self) -> usize {
        self.y.len()
    }

    /// Whether there are no examples.
    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    /// Features per example.
    pub fn num_features(&self) -> usize {
        self.x.ncols()
    }

    /// Distinct labels, ascending.
    pub fn classes(&self) -> Vec<i64> {
        unique_classes(&self.y)
    }
}
