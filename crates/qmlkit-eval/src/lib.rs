//! qmlkit evaluation helpers
//!
//! Analysis utilities for encoding circuits and observables:
//!
//! - **Circuit statistics**: [`get_num_gates`] and
//!   [`get_transpiled_encoding_circuit`] on a target preset
//! - **Measurement circuits**: [`get_measurement_circuits`], one circuit per
//!   qubit-wise commuting group of an observable's terms
//! - **Bloch features**: reduced single-qubit states of encoded data, as
//!   classical features ([`features`]) or as a plot ([`plot_encoded_quantum_data`])
//! - **Approximate cross-validation**: logistic regression on Bloch features
//!   of random layered encoding circuits ([`approx_cross_validate_random_encoding_circuit`],
//!   [`run_sweep`])
//! - **Pareto fronts**: [`pareto_plot`] over result tables
//!
//! # Architecture
//!
//! ```text
//! Dataset ─► RandomLayeredEncodingCircuit ─► Statevector per example
//!                                              │
//!                                              ▼
//!                                     Bloch components (X, Y, Z)
//!                                              │
//!                                              ▼
//!                           stratified k-fold logistic regression
//!                                              │
//!                                              ▼
//!                                CvRecord ─► JSON ─► Pareto plot (SVG)
//! ```
//!
//! # Example
//!
//! ```rust
//! use ndarray::array;
//! use qmlkit_eval::approx_cross_validate_random_encoding_circuit;
//!
//! let x = array![[0.1, 0.2], [0.3, 0.1], [2.9, 3.0], [3.1, 2.8]];
//! let y = [0, 0, 1, 1];
//!
//! // Two examples per class cannot fill five stratified folds.
//! let record = approx_cross_validate_random_encoding_circuit(2, 2, 3, 42, "XZ", x.view(), &y);
//! assert_eq!(record.num_layers, 3);
//! assert!(record.score.is_none());
//! ```

pub mod bloch;
pub mod circuits;
pub mod classifier;
pub mod cross_validation;
pub mod dataset;
pub mod error;
pub mod export;
pub mod features;
pub mod pareto;
pub mod plot;
pub mod sweep;

pub use bloch::{BlochPlot, BlochPoint, plot_encoded_quantum_data};
pub use circuits::{get_measurement_circuits, get_num_gates, get_transpiled_encoding_circuit};
pub use classifier::{LogisticRegression, LogisticRegressionConfig};
pub use cross_validation::{DEFAULT_FOLDS, StratifiedKFold, cross_val_score};
pub use dataset::Dataset;
pub use error::{EvalError, EvalResult};
pub use export::ExportConfig;
pub use features::BlochBases;
pub use pareto::{ParetoPlot, Row, pareto_front, pareto_plot};
pub use sweep::{CvRecord, SweepGrid, approx_cross_validate_random_encoding_circuit, run_sweep};
