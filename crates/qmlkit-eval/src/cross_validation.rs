//! Stratified k-fold cross-validation.

use ndarray::{ArrayView2, Axis};
use tracing::debug;

use crate::classifier::{LogisticRegression, LogisticRegressionConfig, unique_classes};
use crate::error::{EvalError, EvalResult};

/// Default number of folds.
pub const DEFAULT_FOLDS: usize = 5;

/// Splits preserving class proportions in every fold.
///
/// Each class's examples, in input order, are cut into `n_splits` contiguous
/// chunks whose sizes differ by at most one (earlier chunks larger); test
/// fold `k` is the union of every class's chunk `k`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StratifiedKFold {
    n_splits: usize,
}

/// Train and test indices of one fold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fold {
    /// Training example indices, ascending.
    pub train: Vec<usize>,
    /// Test example indices, ascending.
    pub test: Vec<usize>,
}

impl StratifiedKFold {
    /// A splitter with `n_splits >= 2` folds.
    pub fn new(n_splits: usize) -> EvalResult<Self> {
        if n_splits < 2 {
            return Err(EvalError::InvalidFolds {
                folds: n_splits,
                reason: "at least two folds are required".into(),
            });
        }
        Ok(Self { n_splits })
    }

    /// Number of folds.
    pub fn n_splits(&self) -> usize {
        self.n_splits
    }

    /// Split examples labelled `y`.
    pub fn split(&self, y: &[i64]) -> EvalResult<Vec<Fold>> {
        if y.len() < self.n_splits {
            return Err(EvalError::InvalidFolds {
                folds: self.n_splits,
                reason: format!("only {} examples", y.len()),
            });
        }
        let classes = unique_classes(y);
        let largest = classes
            .iter()
            .map(|c| y.iter().filter(|l| *l == c).count())
            .max()
            .unwrap_or(0);
        if largest < self.n_splits {
            return Err(EvalError::InvalidFolds {
                folds: self.n_splits,
                reason: format!("no class has more than {largest} members"),
            });
        }

        let mut fold_of = vec![0usize; y.len()];
        for class in &classes {
            let members: Vec<usize> = (0..y.len()).filter(|&i| y[i] == *class).collect();
            let (base, extra) = (members.len() / self.n_splits, members.len() % self.n_splits);
            let mut start = 0;
            for k in 0..self.n_splits {
                let size = base + usize::from(k < extra);
                for &i in &members[start..start + size] {
                    fold_of[i] = k;
                }
                start += size;
            }
        }

        Ok((0..self.n_splits)
            .map(|k| {
                let (test, train): (Vec<usize>, Vec<usize>) = (0..y.len()).partition(|&i| fold_of[i] == k);
                Fold { train, test }
            })
            .collect())
    }
}

/// Test accuracy of logistic regression on each stratified fold.
pub fn cross_val_score(
    x: ArrayView2<'_, f64>,
    y: &[i64],
    folds: usize,
    config: &LogisticRegressionConfig,
) -> EvalResult<Vec<f64>> {
    if x.nrows() != y.len() {
        return Err(EvalError::Shape(format!("{} rows but {} labels", x.nrows(), y.len())));
    }
    let splits = StratifiedKFold::new(folds)?.split(y)?;
    let mut scores = Vec::with_capacity(splits.len());
    for fold in &splits {
        let train_y: Vec<i64> = fold.train.iter().map(|&i| y[i]).collect();
        let test_y: Vec<i64> = fold.test.iter().map(|&i| y[i]).collect();
        let model = LogisticRegression::fit(x.select(Axis(0), &fold.train).view(), &train_y, config)?;
        scores.push(model.score(x.select(Axis(0), &fold.test).view(), &test_y)?);
    }
    debug!(folds, ?scores, "cross-validated");
    Ok(scores)
}

/// Mean of the fold scores.
pub fn mean_score(scores: &[f64]) -> Option<f64> {
    if scores.is_empty() {
        None
    } else {
        Some(scores.iter().sum::<f64>() / scores.len() as f64)
    }
}
