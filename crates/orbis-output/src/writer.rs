//! Persists a finished run into its own directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{info, warn};

use orbis_model::artifact::{
    CLEANED_FILE, MANIFEST_FILE, MERGED_FILE, VALIDATION_COLUMNS_FILE, VALIDATION_ISSUES_FILE,
};
use orbis_model::{Run, RunMetadata};

use crate::error::{OutputError, Result};
use crate::manifest::write_manifest;
use crate::tables::{write_issues_csv, write_profiles_csv, write_table_csv};

/// What to persist besides the cleaned table and the reports.
#[derive(Debug, Clone, Default)]
pub struct WriteOptions {
    /// Also write the raw merged table.
    pub write_raw_merged: bool,
    /// DuckDB database to export the run into.
    pub duckdb_path: Option<PathBuf>,
}

/// Creates `<output_dir>/<name>`, failing if it already exists.
pub fn ensure_run_dir(output_dir: &Path, name: &str) -> Result<PathBuf> {
    fs::create_dir_all(output_dir).map_err(|source| OutputError::CreateDir {
        path: output_dir.to_path_buf(),
        source,
    })?;
    let dir = output_dir.join(name);
    if dir.exists() {
        return Err(OutputError::RunExists { path: dir });
    }
    fs::create_dir(&dir).map_err(|source| OutputError::CreateDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}

/// Writes every artifact of `run` under `<output_dir>/<run_id>/` and returns
/// the manifest that was stored alongside them.
pub fn write_run(run: &Run, output_dir: &Path, options: &WriteOptions) -> Result<RunMetadata> {
    let start = Instant::now();
    let run_dir = ensure_run_dir(output_dir, run.id().as_str())?;
    let mut metadata = run.metadata();

    if options.write_raw_merged {
        let path = run_dir.join(MERGED_FILE);
        write_table_csv(&path, run.merged())?;
        metadata.artifacts.merged = Some(path);
    }

    let cleaned = run_dir.join(CLEANED_FILE);
    write_table_csv(&cleaned, run.cleaned())?;
    metadata.artifacts.cleaned = Some(cleaned);

    let columns = run_dir.join(VALIDATION_COLUMNS_FILE);
    write_profiles_csv(&columns, run.profiles())?;
    metadata.artifacts.validation_columns = Some(columns);

    let issues = run_dir.join(VALIDATION_ISSUES_FILE);
    write_issues_csv(&issues, run.issues())?;
    metadata.artifacts.validation_issues = Some(issues);

    let manifest = run_dir.join(MANIFEST_FILE);
    if let Some(db_path) = &options.duckdb_path {
        if let Err(err) = export_database(db_path, run) {
            warn!(run_dir = %run_dir.display(), error = %err, "database export failed");
            write_manifest(&manifest, &metadata)?;
            return Err(err);
        }
        metadata.artifacts.duckdb = Some(db_path.clone());
    }

    write_manifest(&manifest, &metadata)?;
    info!(
        run_dir = %run_dir.display(),
        duration_ms = start.elapsed().as_millis(),
        "run artifacts written"
    );
    Ok(metadata)
}

#[cfg(feature = "duckdb")]
fn export_database(db_path: &Path, run: &Run) -> Result<()> {
    crate::database::export_to_duckdb(db_path, run)
}

#[cfg(not(feature = "duckdb"))]
fn export_database(_db_path: &Path, _run: &Run) -> Result<()> {
    Err(OutputError::DuckdbUnavailable)
}
