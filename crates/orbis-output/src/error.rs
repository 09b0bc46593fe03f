use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid run manifest {path}: {source}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("run output directory already exists: {path}")]
    RunExists { path: PathBuf },

    #[error("DuckDB export requested but this build lacks the `duckdb` feature")]
    DuckdbUnavailable,

    #[cfg(feature = "duckdb")]
    #[error("DuckDB export to {path} failed: {source}")]
    Database {
        path: PathBuf,
        #[source]
        source: duckdb::Error,
    },
}

pub type Result<T> = std::result::Result<T, OutputError>;
