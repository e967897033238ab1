//! Gate matrices in little-endian operand order.
//!
//! For a two-qubit gate on `(q0, q1)` the local basis index is
//! `bit(q0) + 2 * bit(q1)`, matching Qiskit's matrix convention.

use num_complex::Complex64;
use std::f64::consts::FRAC_1_SQRT_2;

use qmlkit_ir::{ParameterExpression, StandardGate};

use crate::error::{SimError, SimResult};

/// A 2×2 complex matrix, row-major.
pub type Matrix2 = [[Complex64; 2]; 2];

/// A 4×4 complex matrix, row-major.
pub type Matrix4 = [[Complex64; 4]; 4];

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

/// How a gate acts on its operands.
#[derive(Debug, Clone, PartialEq)]
pub enum GateAction {
    /// No effect.
    Identity,
    /// A single-qubit unitary on the last operand, applied only when all
    /// `controls` leading operands are |1⟩.
    Controlled {
        /// Number of leading control operands.
        controls: usize,
        /// Unitary applied to the target.
        target: Matrix2,
    },
    /// A dense two-qubit unitary.
    Two(Matrix4),
}

fn angle(gate: &StandardGate, p: &ParameterExpression) -> SimResult<f64> {
    p.as_f64().ok_or_else(|| SimError::UnboundParameter {
        gate: gate.name().to_string(),
        parameter: p.to_string(),
    })
}

/// Resolve a bound gate to the action the simulator applies.
pub fn gate_action(gate: &StandardGate) -> SimResult<GateAction> {
    let single = |target| GateAction::Controlled {
        controls: 0,
        target,
    };
    let controlled = |target| GateAction::Controlled {
        controls: 1,
        target,
    };
    let a = |p: &ParameterExpression| angle(gate, p);

    Ok(match gate {
        StandardGate::I => GateAction::Identity,
        StandardGate::X => single(pauli_x()),
        StandardGate::Y => single(pauli_y()),
        StandardGate::Z => single(phase(std::f64::consts::PI)),
        StandardGate::H => single(hadamard()),
        StandardGate::S => single(diag(I)),
        StandardGate::Sdg => single(diag(-I)),
        StandardGate::T => single(phase(std::f64::consts::FRAC_PI_4)),
        StandardGate::Tdg => single(phase(-std::f64::consts::FRAC_PI_4)),
        StandardGate::SX => single(sqrt_x(false)),
        StandardGate::SXdg => single(sqrt_x(true)),
        StandardGate::Rx(t) => single(rx(a(t)?)),
        StandardGate::Ry(t) => single(ry(a(t)?)),
        StandardGate::Rz(t) => single(rz(a(t)?)),
        StandardGate::P(t) => single(phase(a(t)?)),
        StandardGate::U(t, p, l) => single(u(a(t)?, a(p)?, a(l)?)),
        StandardGate::PRX(t, p) => single(prx(a(t)?, a(p)?)),

        StandardGate::CX => controlled(pauli_x()),
        StandardGate::CY => controlled(pauli_y()),
        StandardGate::CZ => controlled(phase(std::f64::consts::PI)),
        StandardGate::CH => controlled(hadamard()),
        StandardGate::CRx(t) => controlled(rx(a(t)?)),
        StandardGate::CRy(t) => controlled(ry(a(t)?)),
        StandardGate::CRz(t) => controlled(rz(a(t)?)),
        StandardGate::CP(t) => controlled(phase(a(t)?)),

        StandardGate::Swap => GateAction::Two(swap()),
        StandardGate::ISwap => GateAction::Two(iswap()),
        StandardGate::RXX(t) => GateAction::Two(rxx(a(t)?)),
        StandardGate::RYY(t) => GateAction::Two(ryy(a(t)?)),
        StandardGate::RZZ(t) => GateAction::Two(rzz(a(t)?)),
    })
}

fn diag(d: Complex64) -> Matrix2 {
    [[ONE, ZERO], [ZERO, d]]
}

fn pauli_x() -> Matrix2 {
    [[ZERO, ONE], [ONE, ZERO]]
}

fn pauli_y() -> Matrix2 {
    [[ZERO, -I], [I, ZERO]]
}

fn hadamard() -> Matrix2 {
    let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
    [[h, h], [h, -h]]
}

fn sqrt_x(dagger: bool) -> Matrix2 {
    let p = Complex64::new(0.5, if dagger { -0.5 } else { 0.5 });
    let m = p.conj();
    [[p, m], [m, p]]
}

/// Phase gate `diag(1, e^{iθ})`.
pub fn phase(theta: f64) -> Matrix2 {
    diag(Complex64::from_polar(1.0, theta))
}

/// Rotation about X.
pub fn rx(theta: f64) -> Matrix2 {
    let (s, c) = (theta / 2.0).sin_cos();
    let c = Complex64::new(c, 0.0);
    let nis = Complex64::new(0.0, -s);
    [[c, nis], [nis, c]]
}

/// Rotation about Y.
pub fn ry(theta: f64) -> Matrix2 {
    let (s, c) = (theta / 2.0).sin_cos();
    [
        [Complex64::new(c, 0.0), Complex64::new(-s, 0.0)],
        [Complex64::new(s, 0.0), Complex64::new(c, 0.0)],
    ]
}

/// Rotation about Z.
pub fn rz(theta: f64) -> Matrix2 {
    [
        [Complex64::from_polar(1.0, -theta / 2.0), ZERO],
        [ZERO, Complex64::from_polar(1.0, theta / 2.0)],
    ]
}

/// Universal single-qubit gate U(θ, φ, λ).
pub fn u(theta: f64, phi: f64, lambda: f64) -> Matrix2 {
    let (s, c) = (theta / 2.0).sin_cos();
    [
        [Complex64::new(c, 0.0), -Complex64::from_polar(s, lambda)],
        [
            Complex64::from_polar(s, phi),
            Complex64::from_polar(c, phi + lambda),
        ],
    ]
}

/// Phased RX: RZ(φ) · RX(θ) · RZ(-φ).
pub fn prx(theta: f64, phi: f64) -> Matrix2 {
    let (s, c) = (theta / 2.0).sin_cos();
    let c = Complex64::new(c, 0.0);
    [
        [c, -I * Complex64::from_polar(s, -phi)],
        [-I * Complex64::from_polar(s, phi), c],
    ]
}

fn swap() -> Matrix4 {
    let mut m = [[ZERO; 4]; 4];
    m[0][0] = ONE;
    m[1][2] = ONE;
    m[2][1] = ONE;
    m[3][3] = ONE;
    m
}

fn iswap() -> Matrix4 {
    let mut m = [[ZERO; 4]; 4];
    m[0][0] = ONE;
    m[1][2] = I;
    m[2][1] = I;
    m[3][3] = ONE;
    m
}

fn rxx(theta: f64) -> Matrix4 {
    let (s, c) = (theta / 2.0).sin_cos();
    let mut m = [[ZERO; 4]; 4];
    for k in 0..4 {
        m[k][k] = Complex64::new(c, 0.0);
        m[k][3 - k] = Complex64::new(0.0, -s);
    }
    m
}

fn ryy(theta: f64) -> Matrix4 {
    let (s, c) = (theta / 2.0).sin_cos();
    let mut m = [[ZERO; 4]; 4];
    for k in 0..4 {
        m[k][k] = Complex64::new(c, 0.0);
    }
    // Y⊗Y flips both bits with sign -1 on |00⟩↔|11⟩ and +1 on |01⟩↔|10⟩.
    m[0][3] = Complex64::new(0.0, s);
    m[3][0] = Complex64::new(0.0, s);
    m[1][2] = Complex64::new(0.0, -s);
    m[2][1] = Complex64::new(0.0, -s);
    m
}

fn rzz(theta: f64) -> Matrix4 {
    let even = Complex64::from_polar(1.0, -theta / 2.0);
    let odd = Complex64::from_polar(1.0, theta / 2.0);
    let mut m = [[ZERO; 4]; 4];
    m[0][0] = even;
    m[1][1] = odd;
    m[2][2] = odd;
    m[3][3] = even;
    m
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mul(a: &Matrix2, b: &Matrix2) -> Matrix2 {
        let mut out = [[ZERO; 2]; 2];
        for r in 0..2 {
            for c in 0..2 {
                out[r][c] = a[r][0] * b[0][c] + a[r][1] * b[1][c];
            }
        }
        out
    }

    fn close(a: &Matrix2, b: &Matrix2) -> bool {
        a.iter()
            .flatten()
            .zip(b.iter().flatten())
            .all(|(x, y)| (x - y).norm() < 1e-12)
    }

    #[test]
    fn test_prx_matches_definition() {
        let (theta, phi) = (0.7, -1.3);
        let expected = mul(&mul(&rz(phi), &rx(theta)), &rz(-phi));
        assert!(close(&prx(theta, phi), &expected));
    }

    #[test]
    fn test_sx_squares_to_x() {
        assert!(close(&mul(&sqrt_x(false), &sqrt_x(false)), &pauli_x()));
        let id = [[ONE, ZERO], [ZERO, ONE]];
        assert!(close(&mul(&sqrt_x(false), &sqrt_x(true)), &id));
    }

    #[test]
    fn test_unbound_parameter_rejected() {
        let gate = StandardGate::Ry(ParameterExpression::symbol("x[0]"));
        assert!(matches!(
            gate_action(&gate),
            Err(SimError::UnboundParameter { .. })
        ));
    }
}
