//! qmlkit circuit intermediate representation
//!
//! Core data structures shared by the simulator, transpiler and encoding
//! circuits.
//!
//! # Core Components
//!
//! - **Qubits and Classical Bits**: [`QubitId`], [`ClbitId`] and named
//!   [`ClassicalRegister`]s
//! - **Gates**: [`StandardGate`] covering the Qiskit/IQM standard gate set
//! - **Parameters**: [`ParameterExpression`] symbols and [`ParameterVector`]
//!   families (`x[0]`, `x[1]`, ...)
//! - **Circuit**: [`Circuit`] builder with validation, binding and statistics
//! - **QASM**: [`qasm::emit`] for OpenQASM 3 output
//!
//! # Example: A parameterized feature map
//!
//! ```rust
//! use qmlkit_ir::{Circuit, ParameterVector, QubitId};
//! use rustc_hash::FxHashMap;
//!
//! let x = ParameterVector::new("x", 2);
//! let mut circuit = Circuit::new("feature_map", 2);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.ry(x.get(0), QubitId(0)).unwrap();
//! circuit.ry(x.get(1), QubitId(1)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//!
//! assert_eq!(circuit.parameters(), vec!["x[0]", "x[1]"]);
//!
//! let values: FxHashMap<String, f64> = x.binding(&[0.1, 0.2]).collect();
//! let bound = circuit.bind_strict(&values).unwrap();
//! assert_eq!(bound.num_parameters(), 0);
//! assert_eq!(bound.depth(), 3);
//! ```

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod parameter;
pub mod qasm;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use parameter::{ParameterExpression, ParameterVector};
pub use qubit::{ClassicalRegister, Clbit, ClbitId, QubitId};
