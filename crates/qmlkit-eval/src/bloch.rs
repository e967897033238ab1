//! Bloch-sphere view of encoded data.

use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};
use tracing::debug;

use qmlkit_encoding::EncodingCircuit;

use crate::classifier::unique_classes;
use crate::error::{EvalError, EvalResult};
use crate::features::encode_dataset;
use crate::plot::class_color;

/// One encoded example on one qubit's sphere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlochPoint {
    /// Bloch vector `(x, y, z)` of the qubit's reduced state.
    pub vector: [f64; 3],
    /// Class label of the example.
    pub class: i64,
    /// Fill colour.
    pub color: String,
}

/// A Bloch-sphere plot: one panel per qubit, one vector per example.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlochPlot {
    /// Distinct class labels, ascending; the colour bar lists them in order.
    pub classes: Vec<i64>,
    /// `panels[q]` holds every example's vector on qubit `q`.
    pub panels: Vec<Vec<BlochPoint>>,
}

impl BlochPlot {
    /// Number of panels.
    pub fn num_qubits(&self) -> usize {
        self.panels.len()
    }

    /// Colour of each class, in [`classes`](Self::classes) order.
    pub fn class_colors(&self) -> Vec<&'static str> {
        (0..self.classes.len())
            .map(|i| class_color(i, self.classes.len()))
            .collect()
    }

    /// Render as an SVG document.
    pub fn to_svg(&self) -> String {
        crate::plot::bloch::render(self)
    }
}

/// Encode every row of `x` and collect each qubit's Bloch vector, coloured
/// by the example's class.
pub fn plot_encoded_quantum_data(
    encoding: &(impl EncodingCircuit + ?Sized),
    x: ArrayView2<'_, f64>,
    y: &[i64],
) -> EvalResult<BlochPlot> {
    if x.nrows() != y.len() {
        return Err(EvalError::Shape(format!("{} rows but {} labels", x.nrows(), y.len())));
    }
    let states = encode_dataset(encoding, x)?;
    let classes = unique_classes(y);

    let mut panels = vec![Vec::with_capacity(states.len()); encoding.num_qubits()];
    for (state, &class) in states.iter().zip(y) {
        let index = classes.binary_search(&class).unwrap_or_default();
        let color = class_color(index, classes.len()).to_string();
        for (qubit, panel) in panels.iter_mut().enumerate() {
            panel.push(BlochPoint {
                vector: state.bloch_vector(qubit)?,
                class,
                color: color.clone(),
            });
        }
    }
    debug!(
        qubits = panels.len(),
        examples = states.len(),
        classes = classes.len(),
        "collected Bloch vectors"
    );
    Ok(BlochPlot { classes, panels })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::TAB10;
    use ndarray::array;
    use qmlkit_encoding::LayeredEncodingCircuit;
    use std::f64::consts::PI;

    #[test]
    fn test_vectors_and_colors() {
        let enc = LayeredEncodingCircuit::parse("Ry(x)", 2, 2).unwrap();
        let x = array![[0.0, PI], [PI / 2.0, 0.0], [PI, PI / 2.0]];
        let plot = plot_encoded_quantum_data(&enc, x.view(), &[4, 8, 4]).unwrap();

        assert_eq!(plot.num_qubits(), 2);
        assert_eq!(plot.classes, vec![4, 8]);
        assert_eq!(plot.class_colors(), vec![TAB10[0], TAB10[9]]);

        let expected_q0 = [[0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]];
        for (point, want) in plot.panels[0].iter().zip(expected_q0) {
            for (a, b) in point.vector.iter().zip(want) {
                assert!((a - b).abs() < 1e-12, "{point:?}");
            }
        }
        assert_eq!(plot.panels[1][1].color, TAB10[9]);
        assert_eq!(plot.panels[1][2].class, 4);
    }

    #[test]
    fn test_label_mismatch() {
        let enc = LayeredEncodingCircuit::parse("Ry(x)", 1, 1).unwrap();
        assert!(plot_encoded_quantum_data(&enc, array![[0.1]].view(), &[0, 1]).is_err());
    }
}
