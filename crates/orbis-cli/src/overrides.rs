//! Command line overrides layered on top of the TOML configuration.

use std::path::Path;

use orbis_core::{ConfigError, PipelineConfig};

/// Values given on the command line. Unset fields keep the configured value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub coercion_threshold: Option<f64>,
    pub null_rate_threshold: Option<f64>,
    pub mixed_type_threshold: Option<f64>,
    pub provenance_column: Option<String>,
    pub no_raw_export: bool,
}

impl ConfigOverrides {
    pub fn apply(&self, mut config: PipelineConfig) -> PipelineConfig {
        if let Some(value) = self.coercion_threshold {
            config.cleaning.coercion_threshold = value;
        }
        if let Some(value) = self.null_rate_threshold {
            config.validation.null_rate_threshold = value;
        }
        if let Some(value) = self.mixed_type_threshold {
            config.validation.mixed_type_threshold = value;
        }
        if let Some(name) = &self.provenance_column {
            config.provenance_column.clone_from(name);
        }
        if self.no_raw_export {
            config.write_raw_merged = false;
        }
        config
    }
}

/// Loads the config file when given, applies `overrides`, then validates.
pub fn resolve_config(
    path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<PipelineConfig, ConfigError> {
    let base = match path {
        Some(path) => PipelineConfig::load(path)?,
        None => PipelineConfig::default(),
    };
    let config = overrides.apply(base);
    config.validate()?;
    Ok(config)
}
