//! L2-regularised multinomial logistic regression.
//!
//! Minimises `C * Σ cross_entropy + ½ ||W||²` (bias unpenalised) by full-batch
//! gradient descent with a step size fixed from a Lipschitz bound of the
//! gradient, which for Bloch features in `[-1, 1]` converges in a few hundred
//! iterations.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use tracing::trace;

use crate::error::{EvalError, EvalResult};

/// Fitting hyper-parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogisticRegressionConfig {
    /// Inverse regularisation strength.
    pub c: f64,
    /// Iteration limit.
    pub max_iter: usize,
    /// Stop when the gradient's max-norm drops below this.
    pub tol: f64,
}

impl Default for LogisticRegressionConfig {
    fn default() -> Self {
        Self {
            c: 1.0,
            max_iter: 1000,
            tol: 1e-6,
        }
    }
}

/// A fitted multinomial logistic regression model.
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    classes: Vec<i64>,
    /// `(num_features, num_classes)`
    weights: Array2<f64>,
    bias: Array1<f64>,
    iterations: usize,
}

impl LogisticRegression {
    /// Fit on rows of `x` labelled by `y`.
    pub fn fit(x: ArrayView2<'_, f64>, y: &[i64], config: &LogisticRegressionConfig) -> EvalResult<Self> {
        let (n, d) = x.dim();
        if n != y.len() {
            return Err(EvalError::Shape(format!("{n} rows but {} labels", y.len())));
        }
        let classes = unique_classes(y);
        match classes.as_slice() {
            [] => return Err(EvalError::Shape("no training examples".into())),
            [only] => return Err(EvalError::SingleClass(*only)),
            _ => {}
        }
        let k = classes.len();

        let mut targets = Array2::<f64>::zeros((n, k));
        for (i, label) in y.iter().enumerate() {
            if let Ok(c) = classes.binary_search(label) {
                targets[[i, c]] = 1.0;
            }
        }

        // Softmax cross-entropy has a gradient Lipschitz constant of at most
        // ½ λmax(XᵀX) per unit of C, bounded here by the Frobenius norm.
        let frob = x.iter().map(|v| v * v).sum::<f64>() + n as f64;
        let step = 1.0 / (0.5 * config.c * frob + 1.0);

        let mut weights = Array2::<f64>::zeros((d, k));
        let mut bias = Array1::<f64>::zeros(k);
        let mut iterations = 0;
        while iterations < config.max_iter {
            iterations += 1;
            let residual = softmax(&(x.dot(&weights) + &bias)) - &targets;
            let grad_w = x.t().dot(&residual) * config.c + &weights;
            let grad_b = residual.sum_axis(Axis(0)) * config.c;

            let norm = grad_w
                .iter()
                .chain(grad_b.iter())
                .fold(0.0_f64, |m, g| m.max(g.abs()));
            weights.scaled_add(-step, &grad_w);
            bias.scaled_add(-step, &grad_b);
            if norm < config.tol {
                break;
            }
        }
        trace!(iterations, classes = k, features = d, "fitted logistic regression");

        Ok(Self {
            classes,
            weights,
            bias,
            iterations,
        })
    }

    /// Class labels, ascending.
    pub fn classes(&self) -> &[i64] {
        &self.classes
    }

    /// Gradient steps taken.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Class probabilities, one row per example.
    pub fn predict_proba(&self, x: ArrayView2<'_, f64>) -> EvalResult<Array2<f64>> {
        if x.ncols() != self.weights.nrows() {
            return Err(EvalError::Shape(format!(
                "model has {} features, input has {}",
                self.weights.nrows(),
                x.ncols()
            )));
        }
        Ok(softmax(&(x.dot(&self.weights) + &self.bias)))
    }

    /// Most probable class per example.
    pub fn predict(&self, x: ArrayView2<'_, f64>) -> EvalResult<Vec<i64>> {
        let proba = self.predict_proba(x)?;
        Ok(proba
            .rows()
            .into_iter()
            .map(|row| self.classes[argmax(row)])
            .collect())
    }

    /// Fraction of correctly predicted labels.
    pub fn score(&self, x: ArrayView2<'_, f64>, y: &[i64]) -> EvalResult<f64> {
        let predicted = self.predict(x)?;
        if predicted.len() != y.len() || y.is_empty() {
            return Err(EvalError::Shape(format!(
                "{} predictions for {} labels",
                predicted.len(),
                y.len()
            )));
        }
        let hits = predicted.iter().zip(y).filter(|(p, t)| p == t).count();
        Ok(hits as f64 / y.len() as f64)
    }
}

/// Sorted distinct labels.
pub(crate) fn unique_classes(y: &[i64]) -> Vec<i64> {
    let mut classes = y.to_vec();
    classes.sort_unstable();
    classes.dedup();
    classes
}

fn softmax(logits: &Array2<f64>) -> Array2<f64> {
    let mut out = logits.clone();
    for mut row in out.rows_mut() {
        let max = row.fold(f64::NEG_INFINITY, |m, &v| m.max(v));
        row.mapv_inplace(|v| (v - max).exp());
        let sum = row.sum();
        row.mapv_inplace(|v| v / sum);
    }
    out
}

fn argmax(row: ArrayView1<'_, f64>) -> usize {
    row.iter()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |(bi, bv), (i, &v)| if v > bv { (i, v) } else { (bi, bv) })
        .0
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_separable_binary() {
        let x = array![[-1.0, 0.2], [-0.8, -0.1], [-0.6, 0.0], [0.7, 0.1], [0.9, -0.3], [1.0, 0.0]];
        let y = [0, 0, 0, 1, 1, 1];
        let model = LogisticRegression::fit(x.view(), &y, &LogisticRegressionConfig::default()).unwrap();
        assert_eq!(model.classes(), &[0, 1]);
        assert_eq!(model.score(x.view(), &y).unwrap(), 1.0);

        let proba = model.predict_proba(x.view()).unwrap();
        for row in proba.rows() {
            assert!((row.sum() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_three_classes() {
        let x = array![
            [1.0, 0.0],
            [0.9, 0.1],
            [0.0, 1.0],
            [0.1, 0.9],
            [-1.0, -1.0],
            [-0.9, -0.8]
        ];
        let y = [5, 5, 7, 7, 9, 9];
        let model = LogisticRegression::fit(x.view(), &y, &LogisticRegressionConfig::default()).unwrap();
        assert_eq!(model.predict(x.view()).unwrap(), y.to_vec());
    }

    #[test]
    fn test_degenerate_inputs() {
        let x = array![[0.0], [1.0]];
        assert!(matches!(
            LogisticRegression::fit(x.view(), &[3, 3], &LogisticRegressionConfig::default()),
            Err(EvalError::SingleClass(3))
        ));
        assert!(matches!(
            LogisticRegression::fit(x.view(), &[0], &LogisticRegressionConfig::default()),
            Err(EvalError::Shape(_))
        ));

        let model = LogisticRegression::fit(x.view(), &[0, 1], &LogisticRegressionConfig::default()).unwrap();
        assert!(model.predict(array![[0.0, 1.0]].view()).is_err());
    }

    #[test]
    fn test_constant_features_predict_majority() {
        let x = Array2::<f64>::zeros((5, 3));
        let y = [1, 1, 1, 2, 2];
        let model = LogisticRegression::fit(x.view(), &y, &LogisticRegressionConfig::default()).unwrap();
        assert_eq!(model.predict(x.view()).unwrap(), vec![1; 5]);
    }
}
