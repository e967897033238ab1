//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use qmlkit_eval::Row;
use qmlkit_observables::Pauli;

/// Parse a basis string such as `XZ` into Pauli operators.
pub fn parse_bases(bases: &str) -> Result<Vec<Pauli>> {
    Pauli::parse_list(bases.trim()).with_context(|| format!("Invalid bases: '{bases}'"))
}

/// Write `contents` to `path`, creating missing parent directories.
pub fn write_output(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write file: {}", path.display()))
}

/// Label of a table row: `column=value` for each requested column present
/// in the row, joined by `, `.
pub fn row_label(row: &Row, columns: &[String]) -> String {
    columns
        .iter()
        .filter_map(|c| row.get(c).map(|v| format!("{c}={}", display_value(v))))
        .collect::<Vec<_>>()
        .join(", ")
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
