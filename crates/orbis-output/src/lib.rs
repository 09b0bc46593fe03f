//! Persistence of Orbis runs.
//!
//! Each run is written to `<output_dir>/<run_id>/`:
//!
//! - `merged.csv` (optional) and `merged_cleaned.csv`
//! - `validation_columns.csv` and `validation_issues.csv`
//! - `run.json`, the [`RunMetadata`](orbis_model::RunMetadata) manifest
//!
//! Earlier runs are never overwritten. With the `duckdb` feature the run can
//! also be appended to a DuckDB database.

#[cfg(feature = "duckdb")]
mod database;
mod error;
mod manifest;
mod tables;
mod writer;

#[cfg(feature = "duckdb")]
pub use database::export_to_duckdb;
pub use error::{OutputError, Result};
pub use manifest::{latest_run, list_runs, read_run_metadata, write_manifest};
pub use tables::{
    ISSUE_HEADER, PROFILE_HEADER, write_issues_csv, write_profiles_csv, write_table_csv,
};
pub use writer::{WriteOptions, ensure_run_dir, write_run};

/// Whether this build can export to DuckDB.
pub const DUCKDB_SUPPORTED: bool = cfg!(feature = "duckdb");
