//! Parameterized Pauli observables for quantum machine learning readouts.
//!
//! - [`Pauli`], [`PauliLabel`]: operators; position `k` of a label acts on
//!   qubit `k`
//! - [`Observable`], [`CustomObservable`]: operator-string observables with
//!   one trainable coefficient per term
//! - [`summed_neighbours`], [`summed_pairs`], [`summed_singles`]: seeded
//!   builders drawing random bases onto fixed qubit patterns
//! - [`group_qubit_wise_commuting`]: partition terms into measurement settings
//!
//! ```rust
//! use qmlkit_observables::{Observable, Pauli, summed_pairs, get_pauli_strings};
//!
//! let obs = summed_pairs(3, &[Pauli::Z], 42).unwrap();
//! assert_eq!(obs.num_parameters(), 4);
//! assert_eq!(get_pauli_strings(&obs).unwrap(), vec!["ZZI", "ZIZ", "IZZ", "III"]);
//! ```

pub mod builders;
pub mod error;
pub mod grouping;
pub mod observable;
pub mod operator;
pub mod pauli;
pub mod utils;

pub use builders::{ObservableKind, summed_neighbours, summed_pairs, summed_singles};
pub use error::{ObservableError, ObservableResult};
pub use grouping::{CommutingGroup, group_qubit_wise_commuting};
pub use observable::{CustomObservable, Observable};
pub use operator::{PauliSum, PauliTerm};
pub use pauli::{Pauli, PauliLabel};
pub use utils::{get_num_terms, get_pauli_strings, get_pauli_sum};
