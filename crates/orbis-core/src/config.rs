//! Pipeline configuration, loadable from TOML.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use orbis_clean::CoercionConfig;
use orbis_validate::ValidationConfig;

use crate::merge::DEFAULT_PROVENANCE_COLUMN;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("{name} must be between 0 and 1, got {value}")]
    OutOfRange { name: &'static str, value: f64 },

    #[error(
        "mixed-type threshold {mixed} must be below coercion threshold {coercion}"
    )]
    ThresholdOrder { mixed: f64, coercion: f64 },

    #[error("provenance column name must not be empty")]
    EmptyProvenance,
}

/// Settings for one run.
///
/// ```toml
/// provenance_column = "source_file"
/// write_raw_merged = true
///
/// [cleaning]
/// coercion_threshold = 0.9
///
/// [validation]
/// null_rate_threshold = 0.5
/// mixed_type_threshold = 0.5
/// sample_values = 5
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Name of the column recording each row's source file.
    pub provenance_column: String,
    /// Persist the raw merged table next to the cleaned one.
    pub write_raw_merged: bool,
    pub cleaning: CoercionConfig,
    pub validation: ValidationConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            provenance_column: DEFAULT_PROVENANCE_COLUMN.to_string(),
            write_raw_merged: true,
            cleaning: CoercionConfig::default(),
            validation: ValidationConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Reads a TOML config file. Keys left out take their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        tracing::info!(path = %path.display(), "loaded pipeline config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let coercion = self.cleaning.coercion_threshold;
        let mixed = self.validation.mixed_type_threshold;
        for (name, value) in [
            ("coercion_threshold", coercion),
            ("mixed_type_threshold", mixed),
            ("null_rate_threshold", self.validation.null_rate_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfRange { name, value });
            }
        }
        if mixed >= coercion {
            return Err(ConfigError::ThresholdOrder { mixed, coercion });
        }
        if self.provenance_column.trim().is_empty() {
            return Err(ConfigError::EmptyProvenance);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_are_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.cleaning.coercion_threshold, 0.9);
        assert_eq!(config.validation.null_rate_threshold, 0.5);
    }

    #[test]
    fn loads_partial_toml() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "write_raw_merged = false\n\n[validation]\nnull_rate_threshold = 0.25\n\n[validation.checks]\nnegative_values = false\n"
        )
        .unwrap();

        let config = PipelineConfig::load(file.path()).unwrap();

        assert!(!config.write_raw_merged);
        assert_eq!(config.validation.null_rate_threshold, 0.25);
        assert!(!config.validation.checks.negative_values);
        assert!(config.validation.checks.high_null_rate);
        assert_eq!(config.provenance_column, "source_file");
    }

    #[test]
    fn rejects_bad_toml() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "write_raw_merged = \"maybe\"").unwrap();
        assert!(matches!(
            PipelineConfig::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        let mut config = PipelineConfig::default();
        config.validation.null_rate_threshold = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange {
                name: "null_rate_threshold",
                ..
            })
        ));
    }

    #[test]
    fn rejects_mixed_threshold_above_coercion() {
        let mut config = PipelineConfig::default();
        config.validation.mixed_type_threshold = 0.95;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ThresholdOrder { .. })
        ));
    }
}
