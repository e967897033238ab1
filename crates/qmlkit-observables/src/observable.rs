//! The observable interface and operator-string observables.

use qmlkit_ir::{ParameterExpression, ParameterVector};
use serde::{Deserialize, Serialize};

use crate::error::{ObservableError, ObservableResult};
use crate::operator::PauliSum;
use crate::pauli::PauliLabel;

/// A (possibly parameterized) Hermitian operator used as a model readout.
pub trait Observable {
    /// Number of qubits the operator acts on.
    fn num_qubits(&self) -> usize;

    /// Number of trainable coefficients.
    fn num_parameters(&self) -> usize;

    /// The operator with `parameters` substituted for the coefficients.
    ///
    /// `parameters` must hold exactly [`num_parameters`](Self::num_parameters)
    /// entries; symbolic entries yield a symbolic operator.
    fn get_operator(&self, parameters: &[ParameterExpression]) -> ObservableResult<PauliSum>;

    /// The operator with coefficients `p[0]`, `p[1]`, ...
    fn symbolic_operator(&self) -> ObservableResult<PauliSum> {
        let p = ParameterVector::new("p", self.num_parameters());
        self.get_operator(&p.symbols())
    }
}

/// An observable given as a list of Pauli operator strings.
///
/// When `parameterized`, term `i` is weighted by parameter `i`; otherwise
/// every term has weight 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomObservable {
    num_qubits: usize,
    operator_strings: Vec<PauliLabel>,
    parameterized: bool,
}

impl CustomObservable {
    /// Create an observable, validating every operator string's width.
    pub fn new(
        num_qubits: usize,
        operator_strings: Vec<PauliLabel>,
        parameterized: bool,
    ) -> ObservableResult<Self> {
        if num_qubits == 0 {
            return Err(ObservableError::ZeroQubits);
        }
        if operator_strings.is_empty() {
            return Err(ObservableError::NoTerms);
        }
        if let Some(bad) = operator_strings
            .iter()
            .find(|l| l.num_qubits() != num_qubits)
        {
            return Err(ObservableError::LabelLength {
                label: bad.to_string(),
                expected: num_qubits,
                got: bad.num_qubits(),
            });
        }
        Ok(Self {
            num_qubits,
            operator_strings,
            parameterized,
        })
    }

    /// Parse operator strings such as `["ZZI", "IZZ"]`.
    pub fn from_strings<S: AsRef<str>>(
        num_qubits: usize,
        operator_strings: &[S],
        parameterized: bool,
    ) -> ObservableResult<Self> {
        let labels = operator_strings
            .iter()
            .map(|s| s.as_ref().parse())
            .collect::<ObservableResult<Vec<PauliLabel>>>()?;
        Self::new(num_qubits, labels, parameterized)
    }

    /// Operator strings in declaration order.
    pub fn operator_strings(&self) -> &[PauliLabel] {
        &self.operator_strings
    }

    /// Whether coefficients are trainable parameters.
    pub fn is_parameterized(&self) -> bool {
        self.parameterized
    }
}

impl Observable for CustomObservable {
    fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    fn num_parameters(&self) -> usize {
        if self.parameterized {
            self.operator_strings.len()
        } else {
            0
        }
    }

    fn get_operator(&self, parameters: &[ParameterExpression]) -> ObservableResult<PauliSum> {
        if parameters.len() != self.num_parameters() {
            return Err(ObservableError::ParameterCount {
                expected: self.num_parameters(),
                got: parameters.len(),
            });
        }
        let mut sum = PauliSum::new(self.num_qubits);
        for (i, label) in self.operator_strings.iter().enumerate() {
            let coefficient = parameters
                .get(i)
                .cloned()
                .unwrap_or(ParameterExpression::Constant(1.0));
            sum.push(coefficient, label.clone())?;
        }
        Ok(sum)
    }
}
