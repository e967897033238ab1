//! Basis translation passes.
//!
//! Every rewrite here is exact up to a global phase and works on symbolic
//! angles, so feature and trainable parameters survive translation as
//! expressions such as `(x[0] + π)`.

use std::f64::consts::PI;

use tracing::debug;

use qmlkit_ir::{Circuit, Instruction, ParameterExpression, QubitId, StandardGate};

use crate::error::{CompileError, CompileResult};
use crate::pass::{Pass, PassKind};
use crate::property::{BasisGates, PropertySet};

const EPSILON: f64 = 1e-10;

/// Rewrite every gate outside the target basis.
///
/// Supported bases:
/// - IBM: RZ + SX + X + CX
/// - IQM: PRX + CZ
///
/// Multi-qubit gates go through CX (or CZ); single-qubit gates go through
/// their U(θ, φ, λ) angles.
pub struct BasisTranslation;

impl Pass for BasisTranslation {
    fn name(&self) -> &'static str {
        "BasisTranslation"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, circuit: &mut Circuit, properties: &mut PropertySet) -> CompileResult<()> {
        let basis = properties
            .basis_gates
            .as_ref()
            .ok_or(CompileError::MissingBasisGates)?;

        let before = circuit.size();
        let mut out = Vec::with_capacity(before * 3);
        for inst in circuit.instructions() {
            translate(inst, basis, &mut out)?;
        }
        circuit.set_instructions(out)?;
        debug!(before, after = circuit.size(), "basis translation complete");
        Ok(())
    }

    fn should_run(&self, circuit: &Circuit, properties: &PropertySet) -> bool {
        properties.basis_gates.as_ref().is_some_and(|basis| {
            circuit
                .instructions()
                .iter()
                .filter_map(Instruction::as_gate)
                .any(|g| !basis.contains(g.name()))
        })
    }
}

fn translate(inst: &Instruction, basis: &BasisGates, out: &mut Vec<Instruction>) -> CompileResult<()> {
    let Some(gate) = inst.as_gate() else {
        out.push(inst.clone());
        return Ok(());
    };
    if basis.contains(gate.name()) {
        out.push(inst.clone());
        return Ok(());
    }

    let unsupported = || CompileError::GateNotInBasis {
        gate: gate.name().to_string(),
        basis: basis.gates().join(", "),
    };

    if gate.num_qubits() == 1 {
        let q = inst.qubits[0];
        let angles = euler_angles(gate);
        if basis.contains("rz") && basis.contains("sx") {
            ibm_1q(angles, q, out);
        } else if basis.contains("prx") {
            iqm_1q(angles, q, out);
        } else {
            return Err(unsupported());
        }
        return Ok(());
    }

    let replacement = match gate {
        StandardGate::CX if basis.contains("cz") => {
            let (c, t) = (inst.qubits[0], inst.qubits[1]);
            vec![g(StandardGate::H, [t]), g(StandardGate::CZ, [c, t]), g(StandardGate::H, [t])]
        }
        StandardGate::CX => return Err(unsupported()),
        StandardGate::CZ if basis.contains("cx") => {
            let (c, t) = (inst.qubits[0], inst.qubits[1]);
            vec![g(StandardGate::H, [t]), g(StandardGate::CX, [c, t]), g(StandardGate::H, [t])]
        }
        StandardGate::CZ => return Err(unsupported()),
        other => decompose_to_cx(other, &inst.qubits).ok_or_else(unsupported)?,
    };
    for r in &replacement {
        translate(r, basis, out)?;
    }
    Ok(())
}

fn g<const N: usize>(gate: StandardGate, qubits: [QubitId; N]) -> Instruction {
    Instruction::gate(gate, qubits)
}

fn half(p: &ParameterExpression) -> ParameterExpression {
    (p.clone() / 2.0).simplify()
}

fn neg_half(p: &ParameterExpression) -> ParameterExpression {
    (-(p.clone() / 2.0)).simplify()
}

/// Decompose a two-qubit gate into CX and single-qubit gates.
///
/// Returns `None` for CX itself and for CZ, which have no smaller form.
pub(crate) fn decompose_to_cx(gate: &StandardGate, qubits: &[QubitId]) -> Option<Vec<Instruction>> {
    use StandardGate as G;

    let decomposed = match (gate, qubits) {
        (G::CY, &[c, t]) => vec![g(G::Sdg, [t]), g(G::CX, [c, t]), g(G::S, [t])],
        (G::CH, &[c, t]) => vec![
            g(G::S, [t]),
            g(G::H, [t]),
            g(G::T, [t]),
            g(G::CX, [c, t]),
            g(G::Tdg, [t]),
            g(G::H, [t]),
            g(G::Sdg, [t]),
        ],
        (G::Swap, &[a, b]) => vec![g(G::CX, [a, b]), g(G::CX, [b, a]), g(G::CX, [a, b])],
        (G::ISwap, &[a, b]) => vec![
            g(G::S, [a]),
            g(G::S, [b]),
            g(G::H, [a]),
            g(G::CX, [a, b]),
            g(G::CX, [b, a]),
            g(G::H, [b]),
        ],
        (G::CRx(theta), &[c, t]) => vec![
            g(G::S, [t]),
            g(G::Ry(half(theta)), [t]),
            g(G::CX, [c, t]),
            g(G::Ry(neg_half(theta)), [t]),
            g(G::CX, [c, t]),
            g(G::Sdg, [t]),
        ],
        (G::CRy(theta), &[c, t]) => vec![
            g(G::Ry(half(theta)), [t]),
            g(G::CX, [c, t]),
            g(G::Ry(neg_half(theta)), [t]),
            g(G::CX, [c, t]),
        ],
        (G::CRz(theta), &[c, t]) => vec![
            g(G::Rz(half(theta)), [t]),
            g(G::CX, [c, t]),
            g(G::Rz(neg_half(theta)), [t]),
            g(G::CX, [c, t]),
        ],
        (G::CP(theta), &[c, t]) => vec![
            g(G::P(half(theta)), [c]),
            g(G::CX, [c, t]),
            g(G::P(neg_half(theta)), [t]),
            g(G::CX, [c, t]),
            g(G::P(half(theta)), [t]),
        ],
        (G::RZZ(theta), &[a, b]) => vec![
            g(G::CX, [a, b]),
            g(G::Rz(theta.clone()), [b]),
            g(G::CX, [a, b]),
        ],
        (G::RXX(theta), &[a, b]) => vec![
            g(G::H, [a]),
            g(G::H, [b]),
            g(G::CX, [a, b]),
            g(G::Rz(theta.clone()), [b]),
            g(G::CX, [a, b]),
            g(G::H, [a]),
            g(G::H, [b]),
        ],
        (G::RYY(theta), &[a, b]) => vec![
            g(G::Rx((PI / 2.0).into()), [a]),
            g(G::Rx((PI / 2.0).into()), [b]),
            g(G::CX, [a, b]),
            g(G::Rz(theta.clone()), [b]),
            g(G::CX, [a, b]),
            g(G::Rx((-PI / 2.0).into()), [a]),
            g(G::Rx((-PI / 2.0).into()), [b]),
        ],
        _ => return None,
    };
    Some(decomposed)
}

/// A single-qubit gate as Qiskit-convention U angles, up to global phase.
enum OneQubit {
    Identity,
    /// `U(0, 0, λ)`, a Z rotation by `λ`.
    Diagonal(ParameterExpression),
    /// `U(θ, φ, λ)`.
    General(ParameterExpression, ParameterExpression, ParameterExpression),
}

fn euler_angles(gate: &StandardGate) -> OneQubit {
    use OneQubit::{Diagonal, General, Identity};
    use StandardGate as G;

    let c = ParameterExpression::constant;
    match gate {
        G::I => Identity,
        G::X => General(c(PI), c(0.0), c(PI)),
        G::Y => General(c(PI), c(PI / 2.0), c(PI / 2.0)),
        G::Z => Diagonal(c(PI)),
        G::H => General(c(PI / 2.0), c(0.0), c(PI)),
        G::S => Diagonal(c(PI / 2.0)),
        G::Sdg => Diagonal(c(-PI / 2.0)),
        G::T => Diagonal(c(PI / 4.0)),
        G::Tdg => Diagonal(c(-PI / 4.0)),
        G::SX => General(c(PI / 2.0), c(-PI / 2.0), c(PI / 2.0)),
        G::SXdg => General(c(PI / 2.0), c(PI / 2.0), c(-PI / 2.0)),
        G::Rx(theta) => General(theta.clone(), c(-PI / 2.0), c(PI / 2.0)),
        G::Ry(theta) => General(theta.clone(), c(0.0), c(0.0)),
        G::Rz(lambda) | G::P(lambda) => Diagonal(lambda.clone()),
        G::U(theta, phi, lambda) => {
            if is_multiple_of(theta, 2.0 * PI) {
                Diagonal((phi.clone() + lambda.clone()).simplify())
            } else {
                General(theta.clone(), phi.clone(), lambda.clone())
            }
        }
        G::PRX(theta, phi) => General(
            theta.clone(),
            (phi.clone() - PI / 2.0).simplify(),
            (-phi.clone() + PI / 2.0).simplify(),
        ),
        // Multi-qubit gates never reach here.
        _ => Identity,
    }
}

/// Whether `p` is a constant within [`EPSILON`] of a multiple of `period`.
pub(crate) fn is_multiple_of(p: &ParameterExpression, period: f64) -> bool {
    p.as_f64().is_some_and(|v| {
        let r = v.rem_euclid(period);
        r < EPSILON || period - r < EPSILON
    })
}

fn push_rz(angle: ParameterExpression, q: QubitId, out: &mut Vec<Instruction>) {
    if !is_multiple_of(&angle, 2.0 * PI) {
        out.push(g(StandardGate::Rz(angle.simplify()), [q]));
    }
}

/// `U(θ, φ, λ) = RZ(φ + π) · SX · RZ(θ + π) · SX · RZ(λ)` up to phase.
fn ibm_1q(angles: OneQubit, q: QubitId, out: &mut Vec<Instruction>) {
    match angles {
        OneQubit::Identity => {}
        OneQubit::Diagonal(lambda) => push_rz(lambda, q, out),
        OneQubit::General(theta, phi, lambda) => {
            push_rz(lambda, q, out);
            out.push(g(StandardGate::SX, [q]));
            push_rz(theta + PI, q, out);
            out.push(g(StandardGate::SX, [q]));
            push_rz(phi + PI, q, out);
        }
    }
}

/// `RZ(a)` as two π pulses: `PRX(π, a/2) · PRX(π, 0)` up to phase.
fn iqm_rz(angle: ParameterExpression, q: QubitId, out: &mut Vec<Instruction>) {
    if is_multiple_of(&angle, 2.0 * PI) {
        return;
    }
    out.push(g(StandardGate::PRX(PI.into(), 0.0.into()), [q]));
    out.push(g(StandardGate::PRX(PI.into(), half(&angle)), [q]));
}

/// `U(θ, φ, λ) = RZ(φ + λ) · PRX(θ, π/2 − λ)` up to phase.
fn iqm_1q(angles: OneQubit, q: QubitId, out: &mut Vec<Instruction>) {
    match angles {
        OneQubit::Identity => {}
        OneQubit::Diagonal(lambda) => iqm_rz(lambda, q, out),
        OneQubit::General(theta, phi, lambda) => {
            if !is_multiple_of(&theta, 2.0 * PI) {
                let axis = (-lambda.clone() + PI / 2.0).simplify();
                out.push(g(StandardGate::PRX(theta.simplify(), axis), [q]));
            }
            iqm_rz((phi + lambda).simplify(), q, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qmlkit_sim::Statevector;

    fn translated(circuit: &Circuit, basis: BasisGates) -> Circuit {
        let mut out = circuit.clone();
        let mut props = PropertySet::new().with_basis_gates(basis);
        BasisTranslation.run(&mut out, &mut props).unwrap();
        out
    }

    fn assert_equivalent(a: &Circuit, b: &Circuit) {
        // A non-trivial input state exposes relative phases.
        let mut prep = Circuit::new("prep", a.num_qubits() as u32);
        for q in 0..a.num_qubits() as u32 {
            prep.ry(0.3 + 0.4 * f64::from(q), QubitId(q)).unwrap();
            prep.rz(0.7 - 0.2 * f64::from(q), QubitId(q)).unwrap();
        }
        let mut sa = Statevector::from_circuit(&prep).unwrap();
        let mut sb = sa.clone();
        sa.evolve(a).unwrap();
        sb.evolve(b).unwrap();
        assert!(sa.equiv(&sb, 1e-9), "not equivalent:\n{a:?}\n{b:?}");
    }

    fn only_basis(circuit: &Circuit, basis: &BasisGates) {
        for inst in circuit.instructions() {
            assert!(basis.contains(inst.name()), "{} not in basis", inst.name());
        }
    }

    fn every_gate() -> Circuit {
        let mut c = Circuit::new("all", 3);
        let (a, b, t) = (QubitId(0), QubitId(1), QubitId(2));
        c.h(a).unwrap().x(b).unwrap().y(t).unwrap().z(a).unwrap();
        c.s(b).unwrap().sdg(t).unwrap().t(a).unwrap().tdg(b).unwrap().sx(t).unwrap();
        c.gate(StandardGate::SXdg, [a]).unwrap();
        c.rx(0.3, a).unwrap().ry(-1.1, b).unwrap().rz(2.2, t).unwrap().p(0.4, a).unwrap();
        c.u(0.5, 1.5, -0.7, b).unwrap();
        c.prx(0.9, 0.25, t).unwrap();
        c.cx(a, b).unwrap().cy(b, t).unwrap().cz(t, a).unwrap().ch(a, t).unwrap();
        c.swap(a, b).unwrap().iswap(b, t).unwrap();
        c.crx(0.6, a, b).unwrap().cry(0.7, b, t).unwrap().crz(0.8, t, a).unwrap();
        c.cp(1.3, a, t).unwrap();
        c.rxx(0.2, a, b).unwrap().ryy(0.9, b, t).unwrap().rzz(1.7, a, t).unwrap();
        c
    }

    #[test]
    fn test_ibm_translation_preserves_state() {
        let circuit = every_gate();
        let out = translated(&circuit, BasisGates::ibm());
        only_basis(&out, &BasisGates::ibm());
        assert_equivalent(&circuit, &out);
    }

    #[test]
    fn test_iqm_translation_preserves_state() {
        let circuit = every_gate();
        let out = translated(&circuit, BasisGates::iqm());
        only_basis(&out, &BasisGates::iqm());
        assert_equivalent(&circuit, &out);
    }

    #[test]
    fn test_symbolic_angles_survive() {
        let mut circuit = Circuit::new("sym", 2);
        circuit.ry(ParameterExpression::symbol("x[0]"), QubitId(0)).unwrap();
        circuit.crz(ParameterExpression::symbol("p[1]"), QubitId(0), QubitId(1)).unwrap();

        for basis in [BasisGates::ibm(), BasisGates::iqm()] {
            let out = translated(&circuit, basis.clone());
            only_basis(&out, &basis);
            assert_eq!(out.parameters(), vec!["p[1]", "x[0]"]);

            let values = [("x[0]".to_string(), 0.8), ("p[1]".to_string(), -0.4)]
                .into_iter()
                .collect();
            assert_equivalent(&circuit.bind(&values), &out.bind(&values));
        }
    }

    #[test]
    fn test_in_basis_gates_untouched() {
        let mut circuit = Circuit::new("native", 2);
        circuit.sx(QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        let mut props = PropertySet::new().with_basis_gates(BasisGates::ibm());
        assert!(!BasisTranslation.should_run(&circuit, &props));
        let before = circuit.clone();
        BasisTranslation.run(&mut circuit, &mut props).unwrap();
        assert_eq!(circuit, before);
    }

    #[test]
    fn test_unknown_basis() {
        let mut circuit = Circuit::new("h", 1);
        circuit.h(QubitId(0)).unwrap();
        let mut props = PropertySet::new().with_basis_gates(BasisGates::new(["cx"]));
        assert!(matches!(
            BasisTranslation.run(&mut circuit, &mut props),
            Err(CompileError::GateNotInBasis { .. })
        ));
    }

    #[test]
    fn test_multiple_of() {
        assert!(is_multiple_of(&(4.0 * PI).into(), 2.0 * PI));
        assert!(is_multiple_of(&(-2.0 * PI + 1e-12).into(), 2.0 * PI));
        assert!(!is_multiple_of(&PI.into(), 2.0 * PI));
        assert!(!is_multiple_of(&ParameterExpression::symbol("x"), 2.0 * PI));
    }
}
