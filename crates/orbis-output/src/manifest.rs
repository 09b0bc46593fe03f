//! Run manifests: `run.json` files describing finished runs.

use std::fs;
use std::path::Path;

use orbis_model::RunMetadata;
use orbis_model::artifact::MANIFEST_FILE;

use crate::error::{OutputError, Result};

/// Writes `metadata` as pretty JSON to `path`.
pub fn write_manifest(path: &Path, metadata: &RunMetadata) -> Result<()> {
    let json = serde_json::to_string_pretty(metadata).map_err(|source| OutputError::Manifest {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads one manifest.
pub fn read_run_metadata(path: &Path) -> Result<RunMetadata> {
    let content = fs::read_to_string(path).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| OutputError::Manifest {
        path: path.to_path_buf(),
        source,
    })
}

/// Lists the runs recorded under `output_dir`, oldest first.
///
/// Subdirectories without a `run.json` are ignored. A manifest that exists
/// but cannot be parsed is an error.
pub fn list_runs(output_dir: &Path) -> Result<Vec<RunMetadata>> {
    let entries = fs::read_dir(output_dir).map_err(|source| OutputError::Io {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let mut runs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| OutputError::Io {
            path: output_dir.to_path_buf(),
            source,
        })?;
        let manifest = entry.path().join(MANIFEST_FILE);
        if !manifest.is_file() {
            continue;
        }
        runs.push(read_run_metadata(&manifest)?);
    }
    runs.sort_by(|a, b| a.run_id.cmp(&b.run_id));
    Ok(runs)
}

/// The most recent run under `output_dir`, if any.
pub fn latest_run(output_dir: &Path) -> Result<Option<RunMetadata>> {
    Ok(list_runs(output_dir)?.pop())
}
