//! Library side of the `qmlkit` binary: argument parsing, sweep
//! configuration and command implementations.

pub mod cli;
pub mod commands;
pub mod config;

pub use cli::{Cli, Commands};
pub use config::{ConfigError, SweepConfig};
