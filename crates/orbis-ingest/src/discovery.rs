//! Source file discovery.

use std::fs::DirEntry;
use std::path::{Path, PathBuf};

use orbis_model::artifact::is_csv_artifact;

use crate::error::{IngestError, Result};

/// Lists the source CSV files directly inside `dir`, ordered by file name.
///
/// The `.csv` extension matches in any case. Subdirectories and files the
/// pipeline writes itself are left out.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }
    let read_err = |source: std::io::Error| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    };

    let mut sources = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_err)? {
        if let Some(path) = source_csv(&entry.map_err(read_err)?) {
            sources.push(path);
        }
    }
    sources.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(sources)
}

fn source_csv(entry: &DirEntry) -> Option<PathBuf> {
    let path = entry.path();
    if !path.is_file() {
        return None;
    }
    let extension = path.extension().and_then(|ext| ext.to_str())?;
    if !extension.eq_ignore_ascii_case("csv") {
        return None;
    }
    let file_name = path.file_name().and_then(|name| name.to_str())?;
    if is_csv_artifact(file_name) {
        tracing::debug!(file = file_name, "skipping pipeline artifact");
        return None;
    }
    Some(path)
}
