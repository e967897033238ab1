//! CLI command implementations.

pub mod bloch;
pub mod common;
pub mod gates;
pub mod measure;
pub mod observable;
pub mod pareto;
pub mod sweep;
pub mod version;
