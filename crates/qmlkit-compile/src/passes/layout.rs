//! Layout passes for mapping logical qubits to physical qubits.

use tracing::debug;

use qmlkit_ir::Circuit;

use crate::error::{CompileError, CompileResult};
use crate::pass::{Pass, PassKind};
use crate::property::{Layout, PropertySet};

/// Logical qubit `i` on physical qubit `i`.
///
/// Widens the circuit to the device size so later passes may route through
/// qubits the circuit does not use.
pub struct TrivialLayout;

impl Pass for TrivialLayout {
    fn name(&self) -> &'static str {
        "TrivialLayout"
    }

    fn kind(&self) -> PassKind {
        PassKind::Analysis
    }

    fn run(&self, circuit: &mut Circuit, properties: &mut PropertySet) -> CompileResult<()> {
        let coupling_map = properties
            .coupling_map
            .as_ref()
            .ok_or(CompileError::MissingCouplingMap)?;

        let available = coupling_map.num_qubits();
        if circuit.num_qubits() > available as usize {
            return Err(CompileError::CircuitTooLarge {
                required: circuit.num_qubits(),
                available,
            });
        }

        properties.layout = Some(Layout::trivial(available));
        circuit.expand_qubits(available);
        debug!(physical = available, "applied trivial layout");
        Ok(())
    }

    fn should_run(&self, _circuit: &Circuit, properties: &PropertySet) -> bool {
        properties.layout.is_none() && properties.coupling_map.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::{BasisGates, CouplingMap};
    use qmlkit_ir::QubitId;

    #[test]
    fn test_trivial_layout() {
        let mut circuit = Circuit::new("test", 3);
        circuit.h(QubitId(0)).unwrap();
        let mut props = PropertySet::new().with_target(CouplingMap::linear(5), BasisGates::iqm());

        TrivialLayout.run(&mut circuit, &mut props).unwrap();

        let layout = props.layout.as_ref().unwrap();
        assert_eq!(layout.get_physical(QubitId(2)), Some(2));
        assert_eq!(circuit.num_qubits(), 5);
        assert!(!TrivialLayout.should_run(&circuit, &props));
    }

    #[test]
    fn test_trivial_layout_too_large() {
        let mut circuit = Circuit::new("test", 10);
        let mut props = PropertySet::new().with_target(CouplingMap::linear(5), BasisGates::iqm());
        assert!(matches!(
            TrivialLayout.run(&mut circuit, &mut props),
            Err(CompileError::CircuitTooLarge {
                required: 10,
                available: 5
            })
        ));
    }
}
