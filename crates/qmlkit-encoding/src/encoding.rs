//! The encoding-circuit interface.

use qmlkit_ir::{Circuit, ParameterExpression, ParameterVector};

use crate::error::{EncodingError, EncodingResult};

/// A parameterized circuit that loads classical features into a quantum state.
pub trait EncodingCircuit {
    /// Qubits in the circuit.
    fn num_qubits(&self) -> usize;

    /// Features consumed per example.
    fn num_features(&self) -> usize;

    /// Trainable parameters.
    fn num_parameters(&self) -> usize;

    /// Build the circuit for the given feature and parameter expressions.
    ///
    /// Lengths must equal [`num_features`](Self::num_features) and
    /// [`num_parameters`](Self::num_parameters).
    fn get_circuit(
        &self,
        features: &[ParameterExpression],
        parameters: &[ParameterExpression],
    ) -> EncodingResult<Circuit>;

    /// The circuit over symbols `x[i]` and `p[i]`.
    fn symbolic_circuit(&self) -> EncodingResult<Circuit> {
        let x = ParameterVector::new("x", self.num_features());
        let p = ParameterVector::new("p", self.num_parameters());
        self.get_circuit(&x.symbols(), &p.symbols())
    }

    /// The circuit with numeric features and parameters.
    fn bound_circuit(&self, features: &[f64], parameters: &[f64]) -> EncodingResult<Circuit> {
        let features: Vec<ParameterExpression> = features.iter().map(|&v| v.into()).collect();
        let parameters: Vec<ParameterExpression> = parameters.iter().map(|&v| v.into()).collect();
        self.get_circuit(&features, &parameters)
    }
}

/// Check supplied value counts against the declared ones.
pub(crate) fn check_counts(
    encoding: &(impl EncodingCircuit + ?Sized),
    features: usize,
    parameters: usize,
) -> EncodingResult<()> {
    if features != encoding.num_features() {
        return Err(EncodingError::FeatureCount {
            expected: encoding.num_features(),
            got: features,
        });
    }
    if parameters != encoding.num_parameters() {
        return Err(EncodingError::ParameterCount {
            expected: encoding.num_parameters(),
            got: parameters,
        });
    }
    Ok(())
}
