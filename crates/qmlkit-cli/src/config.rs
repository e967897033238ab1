//! Sweep configuration.
//!
//! Loaded from a YAML file, then overridden by environment variables with
//! the `QMLKIT_` prefix. Precedence (highest to lowest):
//! 1. Environment variables
//! 2. Configuration file
//! 3. Default values

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use qmlkit_eval::{BlochBases, DEFAULT_FOLDS, SweepGrid};

/// Dataset path override.
pub const ENV_DATASET: &str = "QMLKIT_DATASET";
/// Records path override.
pub const ENV_OUTPUT: &str = "QMLKIT_OUTPUT";
/// Fold count override.
pub const ENV_FOLDS: &str = "QMLKIT_FOLDS";

/// A cross-validation sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Dataset JSON file.
    pub dataset: PathBuf,

    /// Records JSON file to write.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Stratified folds per configuration.
    #[serde(default = "default_folds")]
    pub folds: usize,

    /// Configurations to score.
    #[serde(default)]
    pub grid: GridConfig,
}

/// Grid axes; every combination is scored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_num_qubits")]
    pub num_qubits: Vec<usize>,

    /// Defaults to the dataset's feature count when empty.
    #[serde(default)]
    pub num_features: Vec<usize>,

    #[serde(default = "default_num_layers")]
    pub num_layers: Vec<usize>,

    #[serde(default = "default_seeds")]
    pub seeds: Vec<u64>,

    #[serde(default = "default_bases")]
    pub bases: Vec<String>,
}

fn default_output() -> PathBuf {
    PathBuf::from("records.json")
}

fn default_folds() -> usize {
    DEFAULT_FOLDS
}

fn default_num_qubits() -> Vec<usize> {
    vec![2, 3]
}

fn default_num_layers() -> Vec<usize> {
    vec![1, 2, 3]
}

fn default_seeds() -> Vec<u64> {
    vec![0]
}

fn default_bases() -> Vec<String> {
    vec!["Z".into(), "XZ".into(), "XYZ".into()]
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            num_qubits: default_num_qubits(),
            num_features: Vec::new(),
            num_layers: default_num_layers(),
            seeds: default_seeds(),
            bases: default_bases(),
        }
    }
}

impl GridConfig {
    /// The grid to sweep, with an empty feature axis filled from the dataset.
    pub fn to_grid(&self, dataset_features: usize) -> SweepGrid {
        let num_features = if self.num_features.is_empty() {
            vec![dataset_features]
        } else {
            self.num_features.clone()
        };
        SweepGrid {
            num_qubits: self.num_qubits.clone(),
            num_features,
            num_layers: self.num_layers.clone(),
            seeds: self.seeds.clone(),
            bases: self.bases.clone(),
        }
    }
}

impl SweepConfig {
    /// A configuration with default grid and output for `dataset`.
    pub fn new(dataset: impl Into<PathBuf>) -> Self {
        Self {
            dataset: dataset.into(),
            output: default_output(),
            folds: default_folds(),
            grid: GridConfig::default(),
        }
    }

    /// Parse a YAML document without validating it.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml_ng::from_str(yaml).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Load a YAML file, apply environment overrides and validate.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("{}: {e}", path.display())))?;
        let config = Self::from_yaml(&contents)?.merge_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply the process environment's `QMLKIT_*` overrides.
    pub fn merge_env(self) -> Result<Self, ConfigError> {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, which maps a variable name to its
    /// value when set.
    pub fn merge_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        if let Some(v) = lookup(ENV_DATASET) {
            self.dataset = PathBuf::from(v);
        }
        if let Some(v) = lookup(ENV_OUTPUT) {
            self.output = PathBuf::from(v);
        }
        if let Some(v) = lookup(ENV_FOLDS) {
            self.folds = v
                .trim()
                .parse()
                .map_err(|_| ConfigError::ValidationError(format!("{ENV_FOLDS} is not a count: '{v}'")))?;
        }
        Ok(self)
    }

    /// Check the fold count and every grid axis.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dataset.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError("dataset path is empty".into()));
        }
        if self.folds < 2 {
            return Err(ConfigError::ValidationError(format!(
                "folds must be at least 2, got {}",
                self.folds
            )));
        }

        let grid = &self.grid;
        for (axis, empty) in [
            ("num_qubits", grid.num_qubits.is_empty()),
            ("num_layers", grid.num_layers.is_empty()),
            ("seeds", grid.seeds.is_empty()),
            ("bases", grid.bases.is_empty()),
        ] {
            if empty {
                return Err(ConfigError::ValidationError(format!("grid.{axis} is empty")));
            }
        }
        if grid.num_layers.contains(&0) {
            return Err(ConfigError::ValidationError("grid.num_layers contains 0".into()));
        }
        for bases in &grid.bases {
            bases
                .parse::<BlochBases>()
                .map_err(|e| ConfigError::ValidationError(format!("grid.bases: {e}")))?;
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const EXAMPLE: &str = r#"
dataset: data.json
output: records.json
folds: 5
grid:
  num_qubits: [2, 3]
  num_features: [2]
  num_layers: [1, 2, 3]
  seeds: [0, 1]
  bases: ["Z", "XZ", "XYZ"]
"#;

    #[test]
    fn test_parse_full_config() {
        let config = SweepConfig::from_yaml(EXAMPLE).unwrap();
        assert_eq!(config.dataset, PathBuf::from("data.json"));
        assert_eq!(config.folds, 5);
        assert_eq!(config.grid.seeds, vec![0, 1]);
        assert!(config.validate().is_ok());
        assert_eq!(config.grid.to_grid(7).len(), 2 * 3 * 2 * 3);
    }

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config = SweepConfig::from_yaml("dataset: d.json\n").unwrap();
        assert_eq!(config, SweepConfig::new("d.json"));
        assert_eq!(config.folds, DEFAULT_FOLDS);
        assert_eq!(config.grid.to_grid(4).num_features, vec![4]);
    }

    #[test]
    fn test_missing_dataset_is_a_parse_error() {
        assert!(matches!(
            SweepConfig::from_yaml("folds: 3\n"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_env_overrides_file() {
        let vars: HashMap<&str, &str> = [(ENV_DATASET, "other.json"), (ENV_FOLDS, "3")].into();
        let config = SweepConfig::from_yaml(EXAMPLE)
            .unwrap()
            .merge_vars(|k| vars.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.dataset, PathBuf::from("other.json"));
        assert_eq!(config.folds, 3);
        assert_eq!(config.output, PathBuf::from("records.json"));
    }

    #[test]
    fn test_bad_fold_override() {
        let result = SweepConfig::new("d.json").merge_vars(|k| (k == ENV_FOLDS).then(|| "many".to_string()));
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_validation() {
        let mut config = SweepConfig::new("d.json");
        config.folds = 1;
        assert!(config.validate().is_err());

        let mut config = SweepConfig::new("d.json");
        config.grid.bases = vec!["XQ".into()];
        assert!(config.validate().is_err());

        let mut config = SweepConfig::new("d.json");
        config.grid.seeds.clear();
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("grid.seeds"));

        let mut config = SweepConfig::new("d.json");
        config.grid.num_layers = vec![0, 1];
        assert!(config.validate().is_err());
    }
}
