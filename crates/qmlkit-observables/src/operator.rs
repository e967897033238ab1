//! Weighted sums of Pauli labels.

use qmlkit_ir::ParameterExpression;
use qmlkit_sim::Statevector;
use std::fmt;

use crate::error::{ObservableError, ObservableResult};
use crate::pauli::PauliLabel;

/// One `coefficient · label` term.
#[derive(Debug, Clone, PartialEq)]
pub struct PauliTerm {
    /// Weight of the term, possibly symbolic.
    pub coefficient: ParameterExpression,
    /// The Pauli product.
    pub label: PauliLabel,
}

/// An operator `Σ cᵢ Pᵢ` over a fixed number of qubits.
///
/// Terms are kept in insertion order and never merged, so the labels of an
/// observable come back exactly as its operator strings were given.
#[derive(Debug, Clone, PartialEq)]
pub struct PauliSum {
    num_qubits: usize,
    terms: Vec<PauliTerm>,
}

impl PauliSum {
    /// An empty sum over `num_qubits` qubits.
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            terms: vec![],
        }
    }

    /// Append a term, checking its width.
    pub fn push(
        &mut self,
        coefficient: impl Into<ParameterExpression>,
        label: PauliLabel,
    ) -> ObservableResult<()> {
        if label.num_qubits() != self.num_qubits {
            return Err(ObservableError::LabelLength {
                label: label.to_string(),
                expected: self.num_qubits,
                got: label.num_qubits(),
            });
        }
        self.terms.push(PauliTerm {
            coefficient: coefficient.into(),
            label,
        });
        Ok(())
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Terms in insertion order.
    pub fn terms(&self) -> &[PauliTerm] {
        &self.terms
    }

    /// Number of terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the sum has no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Pauli labels in term order.
    pub fn labels(&self) -> Vec<PauliLabel> {
        self.terms.iter().map(|t| t.label.clone()).collect()
    }

    /// ⟨ψ|Σ cᵢ Pᵢ|ψ⟩; every coefficient must be numeric.
    pub fn expectation(&self, state: &Statevector) -> ObservableResult<f64> {
        self.terms.iter().try_fold(0.0, |acc, term| {
            let weight = term
                .coefficient
                .as_f64()
                .ok_or_else(|| ObservableError::UnboundCoefficient(term.coefficient.to_string()))?;
            if term.label.is_identity() {
                return Ok(acc + weight);
            }
            Ok(acc + weight * state.pauli_expectation(&term.label.to_string())?)
        })
    }
}

impl fmt::Display for PauliSum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .terms
            .iter()
            .map(|t| format!("{} * {}", t.coefficient, t.label))
            .collect();
        write!(f, "{}", rendered.join(" + "))
    }
}
