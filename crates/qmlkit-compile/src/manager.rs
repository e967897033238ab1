//! Pass manager for orchestrating compilation.

use tracing::{debug, info, instrument};

use qmlkit_ir::Circuit;

use crate::error::CompileResult;
use crate::pass::Pass;
use crate::passes::{BasicRouting, BasisTranslation, CancelInverses, MergeRotations, TrivialLayout};
use crate::property::{BasisGates, CouplingMap, PropertySet};
use crate::target::Target;

/// Runs a sequence of passes in order.
pub struct PassManager {
    passes: Vec<Box<dyn Pass>>,
}

impl PassManager {
    /// An empty pass manager.
    pub fn new() -> Self {
        Self { passes: vec![] }
    }

    /// Append a pass.
    pub fn add_pass(&mut self, pass: impl Pass + 'static) {
        self.passes.push(Box::new(pass));
    }

    /// Names of the scheduled passes.
    pub fn pass_names(&self) -> Vec<&str> {
        self.passes.iter().map(|p| p.name()).collect()
    }

    /// Run every pass whose [`Pass::should_run`] holds.
    #[instrument(skip_all, fields(circuit = circuit.name()))]
    pub fn run(&self, circuit: &mut Circuit, properties: &mut PropertySet) -> CompileResult<()> {
        info!(
            passes = self.passes.len(),
            qubits = circuit.num_qubits(),
            ops = circuit.size(),
            "running pass manager"
        );

        for pass in &self.passes {
            if pass.should_run(circuit, properties) {
                pass.run(circuit, properties)?;
                debug!(pass = pass.name(), ops = circuit.size(), "pass completed");
            } else {
                debug!(pass = pass.name(), "skipping pass");
            }
        }

        info!(
            depth = circuit.depth(),
            ops = circuit.size(),
            "pass manager completed"
        );
        Ok(())
    }

    /// Number of passes.
    pub fn len(&self) -> usize {
        self.passes.len()
    }

    /// Whether no passes are scheduled.
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }
}

impl Default for PassManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Preset pipelines by optimization level.
///
/// | Level | Passes |
/// |-------|--------|
/// | 0 | layout, routing, translation |
/// | 1 | + one round of inverse cancellation and rotation merging |
/// | 2, 3 | + a second round, catching pairs exposed by the first |
pub struct PassManagerBuilder {
    optimization_level: u8,
    properties: PropertySet,
}

impl PassManagerBuilder {
    /// Level 1, no target.
    pub fn new() -> Self {
        Self {
            optimization_level: 1,
            properties: PropertySet::new(),
        }
    }

    /// Set the optimization level, clamped to 3.
    #[must_use]
    pub fn with_optimization_level(mut self, level: u8) -> Self {
        self.optimization_level = level.min(3);
        self
    }

    /// Set coupling map and basis gates.
    #[must_use]
    pub fn with_target(mut self, coupling_map: CouplingMap, basis_gates: BasisGates) -> Self {
        self.properties = self.properties.with_target(coupling_map, basis_gates);
        self
    }

    /// Use a named preset.
    #[must_use]
    pub fn with_preset(mut self, target: Target) -> Self {
        self.properties = target.properties();
        self
    }

    /// Build the pass manager and the properties to run it with.
    pub fn build(self) -> (PassManager, PropertySet) {
        let mut pm = PassManager::new();

        if self.properties.coupling_map.is_some() {
            pm.add_pass(TrivialLayout);
            pm.add_pass(BasicRouting);
        }
        if self.properties.basis_gates.is_some() {
            pm.add_pass(BasisTranslation);
        }

        let rounds = match self.optimization_level {
            0 => 0,
            1 => 1,
            _ => 2,
        };
        for _ in 0..rounds {
            pm.add_pass(MergeRotations);
            pm.add_pass(CancelInverses);
        }

        (pm, self.properties)
    }
}

impl Default for PassManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qmlkit_ir::QubitId;

    #[test]
    fn test_empty_pass_manager() {
        let pm = PassManager::new();
        assert!(pm.is_empty());

        let mut circuit = Circuit::new("test", 2);
        circuit.h(QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        pm.run(&mut circuit, &mut PropertySet::new()).unwrap();
        assert_eq!(circuit.size(), 2);
    }

    #[test]
    fn test_builder_levels() {
        let (pm, props) = PassManagerBuilder::new()
            .with_optimization_level(0)
            .with_preset(Target::Iqm5)
            .build();
        assert_eq!(pm.pass_names(), vec!["TrivialLayout", "BasicRouting", "BasisTranslation"]);
        assert!(props.coupling_map.is_some());

        let (pm, props) = PassManagerBuilder::new()
            .with_optimization_level(7)
            .with_preset(Target::Simulator)
            .build();
        assert_eq!(pm.len(), 5);
        assert!(props.coupling_map.is_none());
    }
}
