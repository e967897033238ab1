//! `qmlkit-sim`: exact state simulation for encoding circuits.
//!
//! Encoding circuits are small (a handful of qubits), so every state is
//! kept as a dense statevector. Measurement features come from reduced
//! density matrices:
//!
//! - [`Statevector`]: little-endian statevector with all standard gates,
//!   Pauli expectation values and reduced density matrices
//! - [`DensityMatrix`]: partial trace and single-qubit Bloch vectors
//!
//! ```rust
//! use qmlkit_ir::{Circuit, QubitId};
//! use qmlkit_sim::Statevector;
//!
//! let mut circuit = Circuit::new("plus", 1);
//! circuit.h(QubitId(0)).unwrap();
//!
//! let state = Statevector::from_circuit(&circuit).unwrap();
//! let [x, _, z] = state.bloch_vector(0).unwrap();
//! assert!((x - 1.0).abs() < 1e-12 && z.abs() < 1e-12);
//! ```

pub mod density;
pub mod error;
pub mod matrix;
pub mod statevector;

pub use density::DensityMatrix;
pub use error::{SimError, SimResult};
pub use statevector::{MAX_QUBITS, Statevector};
