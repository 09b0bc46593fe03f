//! Integration tests for config resolution.

use std::fs;

use orbis_cli::overrides::{ConfigOverrides, resolve_config};
use orbis_core::ConfigError;
use tempfile::TempDir;

#[test]
fn flags_take_precedence_over_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("orbis.toml");
    fs::write(
        &path,
        "provenance_column = \"origin\"\n\n[cleaning]\ncoercion_threshold = 0.95\n\n[validation]\nnull_rate_threshold = 0.3\n",
    )
    .unwrap();
    let overrides = ConfigOverrides {
        null_rate_threshold: Some(0.2),
        ..ConfigOverrides::default()
    };

    let config = resolve_config(Some(&path), &overrides).unwrap();

    assert_eq!(config.provenance_column, "origin");
    assert_eq!(config.cleaning.coercion_threshold, 0.95);
    assert_eq!(config.validation.null_rate_threshold, 0.2);
    assert!(config.write_raw_merged);
}

#[test]
fn missing_config_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let err = resolve_config(Some(&dir.path().join("absent.toml")), &ConfigOverrides::default())
        .unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn out_of_range_flag_is_rejected() {
    let overrides = ConfigOverrides {
        coercion_threshold: Some(1.5),
        ..ConfigOverrides::default()
    };
    let err = resolve_config(None, &overrides).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"coercion_threshold must be between 0 and 1, got 1.5");
}
