//! qmlkit transpiler
//!
//! Pass-based compilation of circuits onto device presets.
//!
//! ```text
//! Circuit ─► TrivialLayout ─► BasicRouting ─► BasisTranslation
//!         ─► MergeRotations / CancelInverses ─► Circuit
//! ```
//!
//! Targets are named presets ([`Target`]): IBM devices translate to
//! RZ + SX + X + CX, IQM devices to PRX + CZ, and the simulator keeps every
//! standard gate. All passes accept symbolic angles, so an encoding circuit
//! can be transpiled once and bound afterwards.
//!
//! # Example
//!
//! ```rust
//! use qmlkit_compile::{Target, transpile};
//! use qmlkit_ir::{Circuit, ParameterExpression, QubitId};
//!
//! let mut circuit = Circuit::new("enc", 2);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.ry(ParameterExpression::symbol("x[0]"), QubitId(1)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//!
//! let compiled = transpile(&circuit, Target::Iqm5, 1).unwrap();
//! assert!(compiled.instructions().iter().all(|i| ["prx", "cz"].contains(&i.name())));
//! assert_eq!(compiled.parameters(), vec!["x[0]"]);
//! ```
//!
//! # Custom passes
//!
//! ```rust
//! use qmlkit_compile::{CompileResult, Pass, PassKind, PropertySet};
//! use qmlkit_ir::Circuit;
//!
//! struct StripBarriers;
//!
//! impl Pass for StripBarriers {
//!     fn name(&self) -> &str { "StripBarriers" }
//!     fn kind(&self) -> PassKind { PassKind::Transformation }
//!
//!     fn run(&self, circuit: &mut Circuit, _props: &mut PropertySet) -> CompileResult<()> {
//!         let kept = circuit.instructions().iter().filter(|i| !i.is_barrier()).cloned().collect();
//!         circuit.set_instructions(kept)?;
//!         Ok(())
//!     }
//! }
//! ```

pub mod error;
pub mod manager;
pub mod pass;
pub mod passes;
pub mod property;
pub mod target;

pub use error::{CompileError, CompileResult};
pub use manager::{PassManager, PassManagerBuilder};
pub use pass::{Pass, PassKind};
pub use property::{BasisGates, CouplingMap, Layout, PropertySet};
pub use target::Target;

use qmlkit_ir::Circuit;

/// Compile `circuit` for `target` at `optimization_level` (0-3).
pub fn transpile(circuit: &Circuit, target: Target, optimization_level: u8) -> CompileResult<Circuit> {
    let (pm, mut properties) = PassManagerBuilder::new()
        .with_optimization_level(optimization_level)
        .with_preset(target)
        .build();
    let mut compiled = circuit.clone();
    pm.run(&mut compiled, &mut properties)?;
    Ok(compiled)
}
