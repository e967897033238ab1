//! Statevector simulation engine.

use num_complex::Complex64;
use tracing::trace;

use qmlkit_ir::{Circuit, Instruction, InstructionKind};

use crate::density::DensityMatrix;
use crate::error::{SimError, SimResult};
use crate::matrix::{GateAction, Matrix2, Matrix4, gate_action};

/// Largest state the simulator will allocate (2^24 amplitudes, 256 MiB).
pub const MAX_QUBITS: usize = 24;

/// A pure quantum state over `num_qubits` qubits.
///
/// Basis index bit `k` holds the value of qubit `k` (little-endian).
#[derive(Debug, Clone, PartialEq)]
pub struct Statevector {
    amplitudes: Vec<Complex64>,
    num_qubits: usize,
}

impl Statevector {
    /// The all-zero state |0...0⟩.
    pub fn new(num_qubits: usize) -> SimResult<Self> {
        if num_qubits > MAX_QUBITS {
            return Err(SimError::TooManyQubits {
                requested: num_qubits,
                max: MAX_QUBITS,
            });
        }
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); 1 << num_qubits];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Ok(Self {
            amplitudes,
            num_qubits,
        })
    }

    /// A state from explicit amplitudes; the length must be a power of two.
    pub fn from_amplitudes(amplitudes: Vec<Complex64>) -> SimResult<Self> {
        let len = amplitudes.len();
        if !len.is_power_of_two() {
            return Err(SimError::DimensionMismatch {
                expected: len.next_power_of_two(),
                got: len,
            });
        }
        let num_qubits = len.trailing_zeros() as usize;
        if num_qubits > MAX_QUBITS {
            return Err(SimError::TooManyQubits {
                requested: num_qubits,
                max: MAX_QUBITS,
            });
        }
        Ok(Self {
            amplitudes,
            num_qubits,
        })
    }

    /// Run a fully bound, measurement-free circuit from |0...0⟩.
    pub fn from_circuit(circuit: &Circuit) -> SimResult<Self> {
        let mut state = Self::new(circuit.num_qubits())?;
        state.evolve(circuit)?;
        Ok(state)
    }

    /// Apply every instruction of `circuit` in order.
    pub fn evolve(&mut self, circuit: &Circuit) -> SimResult<()> {
        if circuit.num_qubits() != self.num_qubits {
            return Err(SimError::DimensionMismatch {
                expected: self.num_qubits,
                got: circuit.num_qubits(),
            });
        }
        for instruction in circuit.instructions() {
            self.apply(instruction)?;
        }
        trace!(
            circuit = circuit.name(),
            ops = circuit.size(),
            "statevector evolved"
        );
        Ok(())
    }

    /// Apply a single instruction.
    pub fn apply(&mut self, instruction: &Instruction) -> SimResult<()> {
        match &instruction.kind {
            InstructionKind::Gate(gate) => {
                let qubits: Vec<usize> = instruction.qubits.iter().map(|q| q.index()).collect();
                self.check_qubits(&qubits)?;
                match gate_action(gate)? {
                    GateAction::Identity => {}
                    GateAction::Controlled { controls, target } => {
                        let mask = qubits[..controls].iter().fold(0, |m, &q| m | (1 << q));
                        self.apply_controlled(qubits[controls], &target, mask);
                    }
                    GateAction::Two(matrix) => self.apply_two(qubits[0], qubits[1], &matrix),
                }
                Ok(())
            }
            InstructionKind::Barrier => Ok(()),
            InstructionKind::Measure => {
                Err(SimError::NonUnitary(instruction.name().to_string()))
            }
        }
    }

    fn check_qubits(&self, qubits: &[usize]) -> SimResult<()> {
        for (i, &q) in qubits.iter().enumerate() {
            if q >= self.num_qubits {
                return Err(SimError::QubitOutOfRange {
                    qubit: q,
                    num_qubits: self.num_qubits,
                });
            }
            if qubits[..i].contains(&q) {
                return Err(SimError::DuplicateQubit(q));
            }
        }
        Ok(())
    }

    // =========================================================================
    // Kernels
    // =========================================================================

    fn apply_controlled(&mut self, target: usize, m: &Matrix2, control_mask: usize) {
        let mask = 1 << target;
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 && i & control_mask == control_mask {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = m[0][0] * a + m[0][1] * b;
                self.amplitudes[j] = m[1][0] * a + m[1][1] * b;
            }
        }
    }

    fn apply_two(&mut self, q0: usize, q1: usize, m: &Matrix4) {
        let (m0, m1) = (1 << q0, 1 << q1);
        for i in 0..self.amplitudes.len() {
            if i & (m0 | m1) == 0 {
                let idx = [i, i | m0, i | m1, i | m0 | m1];
                let v = idx.map(|k| self.amplitudes[k]);
                for (row, &k) in m.iter().zip(&idx) {
                    self.amplitudes[k] = row.iter().zip(&v).map(|(a, b)| a * b).sum();
                }
            }
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Amplitudes in basis order.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Born-rule probabilities in basis order.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    /// Inner product ⟨self|other⟩.
    pub fn inner(&self, other: &Statevector) -> SimResult<Complex64> {
        if other.num_qubits != self.num_qubits {
            return Err(SimError::DimensionMismatch {
                expected: self.num_qubits,
                got: other.num_qubits,
            });
        }
        Ok(self
            .amplitudes
            .iter()
            .zip(&other.amplitudes)
            .map(|(a, b)| a.conj() * b)
            .sum())
    }

    /// Whether two states agree up to a global phase.
    pub fn equiv(&self, other: &Statevector, tolerance: f64) -> bool {
        self.inner(other)
            .is_ok_and(|overlap| (overlap.norm() - 1.0).abs() < tolerance)
    }

    /// ⟨ψ|P|ψ⟩ for a Pauli label where character `k` acts on qubit `k`.
    pub fn pauli_expectation(&self, label: &str) -> SimResult<f64> {
        let chars: Vec<char> = label.chars().collect();
        if chars.len() != self.num_qubits {
            return Err(SimError::DimensionMismatch {
                expected: self.num_qubits,
                got: chars.len(),
            });
        }

        let mut flip = 0usize;
        let mut phase_z = 0usize;
        let mut y_count = 0u32;
        for (k, c) in chars.iter().enumerate() {
            match c.to_ascii_uppercase() {
                'I' => {}
                'X' => flip |= 1 << k,
                'Y' => {
                    flip |= 1 << k;
                    phase_z |= 1 << k;
                    y_count += 1;
                }
                'Z' => phase_z |= 1 << k,
                other => return Err(SimError::InvalidPauli(other)),
            }
        }

        // P|i⟩ = i^{#Y} (-1)^{popcount(i & zmask)} |i ^ flip⟩ with Y = iXZ.
        let global = Complex64::new(0.0, 1.0).powu(y_count);
        let value: Complex64 = self
            .amplitudes
            .iter()
            .enumerate()
            .map(|(i, &amp)| {
                let sign = if (i & phase_z).count_ones() % 2 == 0 {
                    1.0
                } else {
                    -1.0
                };
                self.amplitudes[i ^ flip].conj() * amp * sign
            })
            .sum();
        Ok((global * value).re)
    }

    /// Reduced density matrix over `keep`, tracing out every other qubit.
    ///
    /// `keep[0]` becomes the least significant qubit of the result.
    pub fn reduced_density_matrix(&self, keep: &[usize]) -> SimResult<DensityMatrix> {
        self.check_qubits(keep)?;
        let env: Vec<usize> = (0..self.num_qubits).filter(|q| !keep.contains(q)).collect();
        let dim = 1usize << keep.len();
        let mut rho = ndarray::Array2::<Complex64>::zeros((dim, dim));

        let mut column = vec![Complex64::new(0.0, 0.0); dim];
        for e in 0..(1usize << env.len()) {
            let base = scatter(e, &env);
            for (a, slot) in column.iter_mut().enumerate() {
                *slot = self.amplitudes[base | scatter(a, keep)];
            }
            for (r, &ar) in column.iter().enumerate() {
                if ar == Complex64::new(0.0, 0.0) {
                    continue;
                }
                for (c, &ac) in column.iter().enumerate() {
                    rho[[r, c]] += ar * ac.conj();
                }
            }
        }

        DensityMatrix::from_matrix(rho)
    }

    /// Bloch vector `[x, y, z]` of a single qubit's reduced state.
    pub fn bloch_vector(&self, qubit: usize) -> SimResult<[f64; 3]> {
        self.reduced_density_matrix(&[qubit])?.bloch_vector()
    }
}

/// Spread the bits of `value` onto the positions listed in `qubits`.
pub(crate) fn scatter(value: usize, qubits: &[usize]) -> usize {
    qubits
        .iter()
        .enumerate()
        .filter(|(bit, _)| value & (1 << bit) != 0)
        .fold(0, |acc, (_, &q)| acc | (1 << q))
}
