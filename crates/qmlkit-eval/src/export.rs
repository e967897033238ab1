//! Export Module: JSON records and SVG files.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{EvalError, EvalResult};
use crate::pareto::Row;
use crate::sweep::CvRecord;

/// Export configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Whether to pretty-print JSON output.
    pub pretty: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// Serialize sweep records to a JSON array.
pub fn records_to_json(records: &[CvRecord], config: &ExportConfig) -> EvalResult<String> {
    if config.pretty {
        serde_json::to_string_pretty(records).map_err(EvalError::from)
    } else {
        serde_json::to_string(records).map_err(EvalError::from)
    }
}

/// Write sweep records to a JSON file.
pub fn records_to_file(records: &[CvRecord], path: &Path, config: &ExportConfig) -> EvalResult<()> {
    let json = records_to_json(records, config)?;
    write_file(path, &json)
}

/// Read a JSON array of objects as table rows, e.g. a records file.
pub fn load_table(path: &Path) -> EvalResult<Vec<Row>> {
    let json = std::fs::read_to_string(path).map_err(|e| EvalError::io(path, e))?;
    Ok(serde_json::from_str(&json)?)
}

/// Sweep records as table rows.
pub fn records_to_rows(records: &[CvRecord]) -> EvalResult<Vec<Row>> {
    Ok(serde_json::from_value(serde_json::to_value(records)?)?)
}

/// Write a text artifact such as an SVG document.
pub fn write_file(path: &Path, contents: &str) -> EvalResult<()> {
    std::fs::write(path, contents).map_err(|e| EvalError::io(path, e))
}
