//! Built-in compilation passes.
//!
//! - [`TrivialLayout`] and [`BasicRouting`] need a coupling map
//! - [`BasisTranslation`] rewrites gates outside the target basis
//! - [`CancelInverses`] and [`MergeRotations`] are target-agnostic peephole
//!   optimizations

pub mod layout;
pub mod optimization;
pub mod routing;
pub mod translation;

pub use layout::TrivialLayout;
pub use optimization::{CancelInverses, MergeRotations};
pub use routing::BasicRouting;
pub use translation::BasisTranslation;
