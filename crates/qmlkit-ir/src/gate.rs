//! Quantum gate types.

use serde::{Deserialize, Serialize};

use crate::parameter::ParameterExpression;

/// Gates with known semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    // Single-qubit Pauli gates
    /// Identity gate.
    I,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,

    // Single-qubit Clifford gates
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Tdg,
    /// sqrt(X) gate.
    SX,
    /// sqrt(X)-dagger gate.
    SXdg,

    // Single-qubit rotation gates
    /// Rotation around X axis.
    Rx(ParameterExpression),
    /// Rotation around Y axis.
    Ry(ParameterExpression),
    /// Rotation around Z axis.
    Rz(ParameterExpression),
    /// Phase gate.
    P(ParameterExpression),
    /// Universal single-qubit gate U(θ, φ, λ).
    U(
        ParameterExpression,
        ParameterExpression,
        ParameterExpression,
    ),
    /// Phased RX gate: PRX(θ, φ) = RZ(φ) · RX(θ) · RZ(-φ).
    PRX(ParameterExpression, ParameterExpression),

    // Two-qubit gates
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Y gate.
    CY,
    /// Controlled-Z gate.
    CZ,
    /// Controlled-Hadamard gate.
    CH,
    /// SWAP gate.
    Swap,
    /// iSWAP gate.
    ISwap,
    /// Controlled rotation around X.
    CRx(ParameterExpression),
    /// Controlled rotation around Y.
    CRy(ParameterExpression),
    /// Controlled rotation around Z.
    CRz(ParameterExpression),
    /// Controlled phase gate.
    CP(ParameterExpression),
    /// XX rotation gate.
    RXX(ParameterExpression),
    /// YY rotation gate.
    RYY(ParameterExpression),
    /// ZZ rotation gate.
    RZZ(ParameterExpression),
}

impl StandardGate {
    /// Lower-case gate name, as used in QASM and basis-gate lists.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::Sdg => "sdg",
            StandardGate::T => "t",
            StandardGate::Tdg => "tdg",
            StandardGate::SX => "sx",
            StandardGate::SXdg => "sxdg",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::P(_) => "p",
            StandardGate::U(_, _, _) => "u",
            StandardGate::PRX(_, _) => "prx",
            StandardGate::CX => "cx",
            StandardGate::CY => "cy",
            StandardGate::CZ => "cz",
            StandardGate::CH => "ch",
            StandardGate::Swap => "swap",
            StandardGate::ISwap => "iswap",
            StandardGate::CRx(_) => "crx",
            StandardGate::CRy(_) => "cry",
            StandardGate::CRz(_) => "crz",
            StandardGate::CP(_) => "cp",
            StandardGate::RXX(_) => "rxx",
            StandardGate::RYY(_) => "ryy",
            StandardGate::RZZ(_) => "rzz",
        }
    }

    /// Build a gate from its lower-case name and parameter list.
    ///
    /// Returns `None` for unknown names or a wrong number of parameters.
    pub fn from_name(name: &str, params: &[ParameterExpression]) -> Option<Self> {
        let one = || match params {
            [p] => Some(p.clone()),
            _ => None,
        };
        let gate = match (name, params.len()) {
            ("id" | "i", 0) => StandardGate::I,
            ("x", 0) => StandardGate::X,
            ("y", 0) => StandardGate::Y,
            ("z", 0) => StandardGate::Z,
            ("h", 0) => StandardGate::H,
            ("s", 0) => StandardGate::S,
            ("sdg", 0) => StandardGate::Sdg,
            ("t", 0) => StandardGate::T,
            ("tdg", 0) => StandardGate::Tdg,
            ("sx", 0) => StandardGate::SX,
            ("sxdg", 0) => StandardGate::SXdg,
            ("rx", 1) => StandardGate::Rx(one()?),
            ("ry", 1) => StandardGate::Ry(one()?),
            ("rz", 1) => StandardGate::Rz(one()?),
            ("p", 1) => StandardGate::P(one()?),
            ("u", 3) => StandardGate::U(params[0].clone(), params[1].clone(), params[2].clone()),
            ("prx", 2) => StandardGate::PRX(params[0].clone(), params[1].clone()),
            ("cx", 0) => StandardGate::CX,
            ("cy", 0) => StandardGate::CY,
            ("cz", 0) => StandardGate::CZ,
            ("ch", 0) => StandardGate::CH,
            ("swap", 0) => StandardGate::Swap,
            ("iswap", 0) => StandardGate::ISwap,
            ("crx", 1) => StandardGate::CRx(one()?),
            ("cry", 1) => StandardGate::CRy(one()?),
            ("crz", 1) => StandardGate::CRz(one()?),
            ("cp", 1) => StandardGate::CP(one()?),
            ("rxx", 1) => StandardGate::RXX(one()?),
            ("ryy", 1) => StandardGate::RYY(one()?),
            ("rzz", 1) => StandardGate::RZZ(one()?),
            _ => return None,
        };
        Some(gate)
    }

    /// Number of qubits this gate acts on.
    #[inline]
    pub fn num_qubits(&self) -> usize {
        match self {
            StandardGate::CX
            | StandardGate::CY
            | StandardGate::CZ
            | StandardGate::CH
            | StandardGate::Swap
            | StandardGate::ISwap
            | StandardGate::CRx(_)
            | StandardGate::CRy(_)
            | StandardGate::CRz(_)
            | StandardGate::CP(_)
            | StandardGate::RXX(_)
            | StandardGate::RYY(_)
            | StandardGate::RZZ(_) => 2,

            _ => 1,
        }
    }

    /// Parameters of this gate, in declaration order.
    pub fn parameters(&self) -> Vec<&ParameterExpression> {
        match self {
            StandardGate::Rx(p)
            | StandardGate::Ry(p)
            | StandardGate::Rz(p)
            | StandardGate::P(p)
            | StandardGate::CRx(p)
            | StandardGate::CRy(p)
            | StandardGate::CRz(p)
            | StandardGate::CP(p)
            | StandardGate::RXX(p)
            | StandardGate::RYY(p)
            | StandardGate::RZZ(p) => vec![p],

            StandardGate::U(a, b, c) => vec![a, b, c],

            StandardGate::PRX(theta, phi) => vec![theta, phi],

            _ => vec![],
        }
    }

    /// Whether any parameter is still symbolic.
    pub fn is_parameterized(&self) -> bool {
        self.parameters().iter().any(|p| p.is_symbolic())
    }

    /// Apply `f` to every parameter, keeping the gate kind.
    #[must_use]
    pub fn map_parameters(&self, f: impl Fn(&ParameterExpression) -> ParameterExpression) -> Self {
        match self {
            StandardGate::Rx(p) => StandardGate::Rx(f(p)),
            StandardGate::Ry(p) => StandardGate::Ry(f(p)),
            StandardGate::Rz(p) => StandardGate::Rz(f(p)),
            StandardGate::P(p) => StandardGate::P(f(p)),
            StandardGate::CRx(p) => StandardGate::CRx(f(p)),
            StandardGate::CRy(p) => StandardGate::CRy(f(p)),
            StandardGate::CRz(p) => StandardGate::CRz(f(p)),
            StandardGate::CP(p) => StandardGate::CP(f(p)),
            StandardGate::RXX(p) => StandardGate::RXX(f(p)),
            StandardGate::RYY(p) => StandardGate::RYY(f(p)),
            StandardGate::RZZ(p) => StandardGate::RZZ(f(p)),
            StandardGate::U(a, b, c) => StandardGate::U(f(a), f(b), f(c)),
            StandardGate::PRX(theta, phi) => StandardGate::PRX(f(theta), f(phi)),
            other => other.clone(),
        }
    }

    /// The inverse gate, when it is itself a standard gate.
    pub fn inverse(&self) -> Option<Self> {
        let inv = match self {
            StandardGate::I
            | StandardGate::X
            | StandardGate::Y
            | StandardGate::Z
            | StandardGate::H
            | StandardGate::CX
            | StandardGate::CY
            | StandardGate::CZ
            | StandardGate::CH
            | StandardGate::Swap => self.clone(),
            StandardGate::S => StandardGate::Sdg,
            StandardGate::Sdg => StandardGate::S,
            StandardGate::T => StandardGate::Tdg,
            StandardGate::Tdg => StandardGate::T,
            StandardGate::SX => StandardGate::SXdg,
            StandardGate::SXdg => StandardGate::SX,
            StandardGate::U(theta, phi, lambda) => StandardGate::U(
                -theta.clone(),
                -lambda.clone(),
                -phi.clone(),
            ),
            StandardGate::PRX(theta, phi) => StandardGate::PRX(-theta.clone(), phi.clone()),
            StandardGate::ISwap => return None,
            rotation => rotation.map_parameters(|p| -p.clone()),
        };
        Some(inv)
    }

    /// Whether the gate is its own inverse.
    pub fn is_self_inverse(&self) -> bool {
        matches!(
            self,
            StandardGate::I
                | StandardGate::X
                | StandardGate::Y
                | StandardGate::Z
                | StandardGate::H
                | StandardGate::CX
                | StandardGate::CY
                | StandardGate::CZ
                | StandardGate::CH
                | StandardGate::Swap
        )
    }

    /// Whether swapping the two operands leaves the gate unchanged.
    pub fn is_symmetric(&self) -> bool {
        matches!(
            self,
            StandardGate::CZ
                | StandardGate::Swap
                | StandardGate::ISwap
                | StandardGate::CP(_)
                | StandardGate::RXX(_)
                | StandardGate::RYY(_)
                | StandardGate::RZZ(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_standard_gate_properties() {
        assert_eq!(StandardGate::H.num_qubits(), 1);
        assert_eq!(StandardGate::CX.num_qubits(), 2);

        assert!(!StandardGate::H.is_parameterized());
        assert!(!StandardGate::Rx(ParameterExpression::constant(PI)).is_parameterized());
        assert!(StandardGate::Rx(ParameterExpression::symbol("theta")).is_parameterized());
    }

    #[test]
    fn test_from_name() {
        let ry = StandardGate::from_name("ry", &[ParameterExpression::symbol("x[0]")]).unwrap();
        assert_eq!(ry.name(), "ry");
        assert!(StandardGate::from_name("ry", &[]).is_none());
        assert!(StandardGate::from_name("nope", &[]).is_none());
        assert_eq!(StandardGate::from_name("cz", &[]), Some(StandardGate::CZ));
        assert!(StandardGate::from_name("ccx", &[]).is_none());
        assert!(StandardGate::from_name("cswap", &[]).is_none());
    }

    #[test]
    fn test_inverse() {
        assert_eq!(StandardGate::S.inverse(), Some(StandardGate::Sdg));
        assert_eq!(StandardGate::H.inverse(), Some(StandardGate::H));
        let rz = StandardGate::Rz(ParameterExpression::constant(0.3));
        let inv = rz.inverse().unwrap();
        assert_eq!(inv.parameters()[0].as_f64(), Some(-0.3));
        assert!(StandardGate::ISwap.inverse().is_none());
    }
}
