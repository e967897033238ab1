//! Density matrices and partial traces.

use ndarray::Array2;
use num_complex::Complex64;

use crate::error::{SimError, SimResult};
use crate::statevector::{Statevector, scatter};

/// A density matrix over `num_qubits` qubits, little-endian like
/// [`Statevector`].
#[derive(Debug, Clone, PartialEq)]
pub struct DensityMatrix {
    data: Array2<Complex64>,
    num_qubits: usize,
}

impl DensityMatrix {
    /// Wrap a square matrix whose side is a power of two.
    pub fn from_matrix(data: Array2<Complex64>) -> SimResult<Self> {
        let (rows, cols) = data.dim();
        if rows != cols || !rows.is_power_of_two() {
            return Err(SimError::DimensionMismatch {
                expected: rows.next_power_of_two(),
                got: cols,
            });
        }
        Ok(Self {
            num_qubits: rows.trailing_zeros() as usize,
            data,
        })
    }

    /// The pure state |ψ⟩⟨ψ|.
    pub fn from_statevector(state: &Statevector) -> Self {
        let amps = state.amplitudes();
        let dim = amps.len();
        let data = Array2::from_shape_fn((dim, dim), |(r, c)| amps[r] * amps[c].conj());
        Self {
            data,
            num_qubits: state.num_qubits(),
        }
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// The underlying matrix.
    pub fn matrix(&self) -> &Array2<Complex64> {
        &self.data
    }

    /// Tr(ρ).
    pub fn trace(&self) -> Complex64 {
        self.data.diag().sum()
    }

    /// Tr(ρ²); 1 for pure states, 1/2^n for the maximally mixed state.
    pub fn purity(&self) -> f64 {
        self.data.dot(&self.data).diag().sum().re
    }

    /// Trace out the listed qubits; the remaining qubits keep their
    /// relative order.
    pub fn partial_trace(&self, trace_out: &[usize]) -> SimResult<DensityMatrix> {
        for (i, &q) in trace_out.iter().enumerate() {
            if q >= self.num_qubits {
                return Err(SimError::QubitOutOfRange {
                    qubit: q,
                    num_qubits: self.num_qubits,
                });
            }
            if trace_out[..i].contains(&q) {
                return Err(SimError::DuplicateQubit(q));
            }
        }
        let keep: Vec<usize> = (0..self.num_qubits)
            .filter(|q| !trace_out.contains(q))
            .collect();
        let dim = 1usize << keep.len();

        let data = Array2::from_shape_fn((dim, dim), |(r, c)| {
            let (row, col) = (scatter(r, &keep), scatter(c, &keep));
            (0..(1usize << trace_out.len()))
                .map(|e| {
                    let env = scatter(e, trace_out);
                    self.data[[row | env, col | env]]
                })
                .sum()
        });

        Ok(Self {
            data,
            num_qubits: keep.len(),
        })
    }

    /// Bloch vector `[x, y, z]` of a single-qubit state.
    ///
    /// `x = 2·Re ρ₀₁`, `y = 2·Im ρ₁₀`, `z = ρ₀₀ − ρ₁₁`.
    pub fn bloch_vector(&self) -> SimResult<[f64; 3]> {
        if self.num_qubits != 1 {
            return Err(SimError::DimensionMismatch {
                expected: 1,
                got: self.num_qubits,
            });
        }
        let rho = &self.data;
        Ok([
            2.0 * rho[[0, 1]].re,
            2.0 * rho[[1, 0]].im,
            (rho[[0, 0]] - rho[[1, 1]]).re,
        ])
    }
}
