//! Encoding circuits for quantum machine learning.
//!
//! An encoding circuit loads a feature vector `x` into a quantum state,
//! optionally mixed with trainable parameters `p`:
//!
//! - [`EncodingCircuit`]: the common interface
//! - [`LayeredEncodingCircuit`]: built from a layer string such as
//!   `"H-Ry(x)-cx-Rz(p)"`
//! - [`RandomLayeredEncodingCircuit`]: layers drawn from a seed, every
//!   feature encoded at least once
//!
//! ```rust
//! use qmlkit_encoding::{EncodingCircuit, LayeredEncodingCircuit};
//!
//! let enc = LayeredEncodingCircuit::parse("H-Ry(x)-cz", 2, 2).unwrap();
//! let circuit = enc.bound_circuit(&[0.5, -0.25], &[]).unwrap();
//! assert_eq!(circuit.count_ops(), vec![("h", 2), ("ry", 2), ("cz", 1)]);
//! ```

pub mod encoding;
pub mod error;
pub mod layered;
pub mod random;

pub use encoding::EncodingCircuit;
pub use error::{EncodingError, EncodingResult};
pub use layered::{Layer, LayerArgument, LayeredEncodingCircuit};
pub use random::RandomLayeredEncodingCircuit;
