//! Peephole optimization passes.
//!
//! Both passes scan the instruction list once, keeping per-qubit stacks of
//! the surviving instructions. A gate is combined with the top of the stack
//! only when that instruction sits on top for every one of its qubits and
//! acts on exactly the same operands, so nothing is reordered across another
//! operation. Removals re-expose earlier gates, so `h x x h` collapses fully.

use std::f64::consts::PI;

use tracing::debug;

use qmlkit_ir::{Circuit, Instruction, InstructionKind, StandardGate};

use crate::error::CompileResult;
use crate::pass::{Pass, PassKind};
use crate::passes::translation::is_multiple_of;
use crate::property::PropertySet;

/// Outcome of combining two adjacent gates.
enum Combine {
    /// The pair is the identity.
    Cancel,
    /// The pair equals a single gate.
    Replace(StandardGate),
}

fn peephole(
    circuit: &mut Circuit,
    rule: impl Fn(&StandardGate, &StandardGate) -> Option<Combine>,
) -> CompileResult<usize> {
    let mut out: Vec<Option<Instruction>> = Vec::with_capacity(circuit.instructions().len());
    let mut stacks: Vec<Vec<usize>> = vec![vec![]; circuit.num_qubits()];
    let mut changes = 0;

    for inst in circuit.instructions() {
        if let Some(gate) = inst.as_gate() {
            let top = stacks[inst.qubits[0].index()].last().copied();
            let candidate = top.filter(|&idx| {
                inst.qubits
                    .iter()
                    .all(|q| stacks[q.index()].last() == Some(&idx))
            });
            if let Some(idx) = candidate {
                if let Some(prev) = out[idx].as_mut() {
                    let combined = prev
                        .as_gate()
                        .filter(|pg| same_operands(&prev.qubits, &inst.qubits, pg))
                        .and_then(|pg| rule(pg, gate));
                    match combined {
                        Some(Combine::Cancel) => {
                            out[idx] = None;
                            for q in &inst.qubits {
                                stacks[q.index()].pop();
                            }
                            changes += 1;
                            continue;
                        }
                        Some(Combine::Replace(merged)) => {
                            prev.kind = InstructionKind::Gate(merged);
                            changes += 1;
                            continue;
                        }
                        None => {}
                    }
                }
            }
        }

        let idx = out.len();
        out.push(Some(inst.clone()));
        for q in &inst.qubits {
            stacks[q.index()].push(idx);
        }
    }

    if changes > 0 {
        circuit.set_instructions(out.into_iter().flatten().collect())?;
    }
    Ok(changes)
}

fn same_operands(a: &[qmlkit_ir::QubitId], b: &[qmlkit_ir::QubitId], gate: &StandardGate) -> bool {
    a == b || (gate.is_symmetric() && a.len() == 2 && a[0] == b[1] && a[1] == b[0])
}

/// Remove adjacent gate pairs whose product is the identity, e.g. `cx·cx`
/// or `s·sdg`.
pub struct CancelInverses;

impl Pass for CancelInverses {
    fn name(&self) -> &'static str {
        "CancelInverses"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, circuit: &mut Circuit, _properties: &mut PropertySet) -> CompileResult<()> {
        let removed = peephole(circuit, |prev, next| {
            (prev.inverse().as_ref() == Some(next)).then_some(Combine::Cancel)
        })?;
        debug!(pairs = removed, "cancelled inverse pairs");
        Ok(())
    }
}

/// Fuse adjacent rotations about the same axis, dropping those that become
/// the identity (up to global phase).
pub struct MergeRotations;

impl Pass for MergeRotations {
    fn name(&self) -> &'static str {
        "MergeRotations"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, circuit: &mut Circuit, _properties: &mut PropertySet) -> CompileResult<()> {
        let merged = peephole(circuit, merge)?;
        debug!(merged, "merged rotations");
        Ok(())
    }
}

fn merge(prev: &StandardGate, next: &StandardGate) -> Option<Combine> {
    use StandardGate as G;

    let (gate, period) = match (prev, next) {
        (G::Rx(a), G::Rx(b)) => (G::Rx((a.clone() + b.clone()).simplify()), 2.0 * PI),
        (G::Ry(a), G::Ry(b)) => (G::Ry((a.clone() + b.clone()).simplify()), 2.0 * PI),
        (G::Rz(a), G::Rz(b)) => (G::Rz((a.clone() + b.clone()).simplify()), 2.0 * PI),
        (G::P(a), G::P(b)) => (G::P((a.clone() + b.clone()).simplify()), 2.0 * PI),
        (G::RXX(a), G::RXX(b)) => (G::RXX((a.clone() + b.clone()).simplify()), 2.0 * PI),
        (G::RYY(a), G::RYY(b)) => (G::RYY((a.clone() + b.clone()).simplify()), 2.0 * PI),
        (G::RZZ(a), G::RZZ(b)) => (G::RZZ((a.clone() + b.clone()).simplify()), 2.0 * PI),
        (G::CP(a), G::CP(b)) => (G::CP((a.clone() + b.clone()).simplify()), 2.0 * PI),
        // A controlled 2π rotation is a relative phase, not the identity.
        (G::CRx(a), G::CRx(b)) => (G::CRx((a.clone() + b.clone()).simplify()), 4.0 * PI),
        (G::CRy(a), G::CRy(b)) => (G::CRy((a.clone() + b.clone()).simplify()), 4.0 * PI),
        (G::CRz(a), G::CRz(b)) => (G::CRz((a.clone() + b.clone()).simplify()), 4.0 * PI),
        (G::PRX(a, phi_a), G::PRX(b, phi_b)) if phi_a == phi_b => (
            G::PRX((a.clone() + b.clone()).simplify(), phi_a.clone()),
            2.0 * PI,
        ),
        _ => return None,
    };

    let angle = gate.parameters().first().map(|p| is_multiple_of(p, period));
    if angle == Some(true) {
        Some(Combine::Cancel)
    } else {
        Some(Combine::Replace(gate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qmlkit_ir::{ParameterExpression, QubitId};

    fn names(circuit: &Circuit) -> Vec<&'static str> {
        circuit.instructions().iter().map(Instruction::name).collect()
    }

    fn run(pass: &impl Pass, circuit: &mut Circuit) {
        pass.run(circuit, &mut PropertySet::new()).unwrap();
    }

    #[test]
    fn test_nested_cancellation() {
        let mut c = Circuit::new("t", 2);
        let (a, b) = (QubitId(0), QubitId(1));
        c.h(a).unwrap().cx(a, b).unwrap().cx(a, b).unwrap().h(a).unwrap();
        c.s(b).unwrap().sdg(b).unwrap();
        run(&CancelInverses, &mut c);
        assert!(c.instructions().is_empty());
    }

    #[test]
    fn test_blocked_by_intervening_gate() {
        let mut c = Circuit::new("t", 2);
        let (a, b) = (QubitId(0), QubitId(1));
        c.cx(a, b).unwrap().x(b).unwrap().cx(a, b).unwrap();
        c.h(a).unwrap().barrier_all().unwrap().h(a).unwrap();
        run(&CancelInverses, &mut c);
        assert_eq!(names(&c), vec!["cx", "x", "cx", "h", "barrier", "h"]);
    }

    #[test]
    fn test_direction_matters_for_cx() {
        let mut c = Circuit::new("t", 2);
        c.cx(QubitId(0), QubitId(1)).unwrap();
        c.cx(QubitId(1), QubitId(0)).unwrap();
        c.cz(QubitId(0), QubitId(1)).unwrap();
        c.cz(QubitId(1), QubitId(0)).unwrap();
        run(&CancelInverses, &mut c);
        assert_eq!(names(&c), vec!["cx", "cx"]);
    }

    #[test]
    fn test_merge_rotations() {
        let mut c = Circuit::new("t", 2);
        let x = ParameterExpression::symbol("x[0]");
        c.rz(0.5, QubitId(0)).unwrap().rz(0.25, QubitId(0)).unwrap();
        c.rx(PI, QubitId(1)).unwrap().rx(PI, QubitId(1)).unwrap();
        c.ry(x.clone(), QubitId(0)).unwrap().ry(1.0, QubitId(0)).unwrap();
        run(&MergeRotations, &mut c);

        assert_eq!(names(&c), vec!["rz", "ry"]);
        assert_eq!(c.instructions()[0].as_gate(), Some(&StandardGate::Rz(0.75.into())));
        assert_eq!(c.parameters(), vec!["x[0]"]);
    }

    #[test]
    fn test_controlled_full_turn_kept() {
        let mut c = Circuit::new("t", 2);
        c.crz(PI, QubitId(0), QubitId(1)).unwrap();
        c.crz(PI, QubitId(0), QubitId(1)).unwrap();
        run(&MergeRotations, &mut c);
        assert_eq!(names(&c), vec!["crz"]);
    }
}
