use std::path::PathBuf;

use thiserror::Error;

use orbis_clean::CleanError;
use orbis_ingest::IngestError;
use orbis_model::{ModelError, StructuralError};

use crate::config::ConfigError;
use crate::merge::MergeError;

/// Errors that abort a run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The inputs cannot produce a meaningful run.
    #[error("{source} ({dir})")]
    Structural {
        dir: PathBuf,
        #[source]
        source: StructuralError,
    },

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl PipelineError {
    pub fn structural(dir: impl Into<PathBuf>, source: StructuralError) -> Self {
        Self::Structural {
            dir: dir.into(),
            source,
        }
    }

    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Structural { .. })
    }

    pub(crate) fn from_merge(dir: impl Into<PathBuf>, err: MergeError) -> Self {
        match err {
            MergeError::Structural(source) => Self::structural(dir, source),
            MergeError::Model(err) => Self::Model(err),
        }
    }

    pub(crate) fn from_clean(dir: impl Into<PathBuf>, err: CleanError) -> Self {
        match err {
            CleanError::NoColumns => Self::structural(dir, StructuralError::NoColumns),
            CleanError::Model(err) => Self::Model(err),
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
