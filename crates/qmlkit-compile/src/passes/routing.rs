//! Routing passes for inserting SWAP gates.

use tracing::debug;

use qmlkit_ir::{Circuit, Instruction, QubitId, StandardGate};

use crate::error::{CompileError, CompileResult};
use crate::pass::{Pass, PassKind};
use crate::property::{CouplingMap, PropertySet};

/// Greedy SWAP insertion.
///
/// Rewrites every instruction onto physical qubits. For a two-qubit gate on
/// uncoupled qubits, the first operand is swapped along a shortest path until
/// it neighbours the second, the gate is applied, and the swaps are undone.
/// The layout is therefore the same before and after every gate, which keeps
/// measurement targets and the final qubit order unchanged.
pub struct BasicRouting;

impl Pass for BasicRouting {
    fn name(&self) -> &'static str {
        "BasicRouting"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, circuit: &mut Circuit, properties: &mut PropertySet) -> CompileResult<()> {
        let coupling_map = properties
            .coupling_map
            .as_ref()
            .ok_or(CompileError::MissingCouplingMap)?;
        let layout = properties
            .layout
            .as_ref()
            .ok_or(CompileError::MissingLayout)?;

        let mut routed = Vec::with_capacity(circuit.instructions().len());
        let mut swaps = 0usize;

        for inst in circuit.instructions() {
            let physical = inst
                .qubits
                .iter()
                .map(|&q| layout.get_physical(q).ok_or(CompileError::MissingLayout))
                .collect::<CompileResult<Vec<u32>>>()?;
            let mut mapped = inst.clone();
            mapped.qubits = physical.iter().map(|&p| QubitId(p)).collect();

            if !inst.is_gate() || physical.len() < 2 {
                routed.push(mapped);
                continue;
            }
            if physical.len() > 2 {
                check_all_coupled(coupling_map, &physical)?;
                routed.push(mapped);
                continue;
            }

            let (p0, p1) = (physical[0], physical[1]);
            if coupling_map.is_connected(p0, p1) {
                routed.push(mapped);
                continue;
            }

            let path = coupling_map
                .shortest_path(p0, p1)
                .ok_or(CompileError::RoutingFailed {
                    qubit1: p0,
                    qubit2: p1,
                })?;
            let hops: Vec<(u32, u32)> = path
                .windows(2)
                .take(path.len() - 2)
                .map(|w| (w[0], w[1]))
                .collect();

            for &(a, b) in &hops {
                routed.push(swap(a, b));
            }
            mapped.qubits = vec![QubitId(path[path.len() - 2]), QubitId(p1)];
            routed.push(mapped);
            for &(a, b) in hops.iter().rev() {
                routed.push(swap(a, b));
            }
            swaps += 2 * hops.len();
        }

        circuit.set_instructions(routed)?;
        debug!(swaps, "routing complete");
        Ok(())
    }

    fn should_run(&self, _circuit: &Circuit, properties: &PropertySet) -> bool {
        properties.coupling_map.is_some() && properties.layout.is_some()
    }
}

fn swap(a: u32, b: u32) -> Instruction {
    Instruction::gate(StandardGate::Swap, [QubitId(a), QubitId(b)])
}

fn check_all_coupled(coupling_map: &CouplingMap, physical: &[u32]) -> CompileResult<()> {
    for (i, &a) in physical.iter().enumerate() {
        for &b in &physical[i + 1..] {
            if !coupling_map.is_connected(a, b) {
                return Err(CompileError::RoutingFailed {
                    qubit1: a,
                    qubit2: b,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::passes::TrivialLayout;
    use crate::property::BasisGates;

    fn route(circuit: &mut Circuit, map: CouplingMap) {
        let mut props = PropertySet::new().with_target(map, BasisGates::universal());
        TrivialLayout.run(circuit, &mut props).unwrap();
        BasicRouting.run(circuit, &mut props).unwrap();
    }

    #[test]
    fn test_connected_gates_untouched() {
        let mut circuit = Circuit::new("test", 2);
        circuit.h(QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        route(&mut circuit, CouplingMap::linear(5));
        assert_eq!(circuit.size(), 2);
    }

    #[test]
    fn test_swap_there_and_back() {
        let mut circuit = Circuit::new("test", 4);
        circuit.cx(QubitId(0), QubitId(3)).unwrap();
        route(&mut circuit, CouplingMap::linear(4));

        let names: Vec<_> = circuit.instructions().iter().map(Instruction::name).collect();
        assert_eq!(names, vec!["swap", "swap", "cx", "swap", "swap"]);
        assert_eq!(circuit.instructions()[2].qubits, vec![QubitId(2), QubitId(3)]);
        assert_eq!(circuit.instructions()[4].qubits, vec![QubitId(0), QubitId(1)]);
    }

    #[test]
    fn test_unroutable() {
        let mut circuit = Circuit::new("test", 4);
        circuit.cz(QubitId(0), QubitId(3)).unwrap();
        let mut props = PropertySet::new().with_target(
            CouplingMap::from_edges(4, &[(0, 1), (2, 3)]),
            BasisGates::universal(),
        );
        TrivialLayout.run(&mut circuit, &mut props).unwrap();
        assert!(matches!(
            BasicRouting.run(&mut circuit, &mut props),
            Err(CompileError::RoutingFailed { .. })
        ));
    }
}
