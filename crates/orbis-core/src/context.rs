//! Per-run state shared by every stage.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use tracing::{Span, info_span};

use orbis_model::RunId;

use crate::config::PipelineConfig;

/// Identity and settings of one run.
///
/// The run id is fixed at construction and tags every log event emitted
/// inside [`RunContext::span`] and every persisted artifact.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_id: RunId,
    pub input_dir: PathBuf,
    pub config: PipelineConfig,
    pub started_at: DateTime<Utc>,
}

impl RunContext {
    /// Creates a context with a freshly generated run id.
    pub fn new(input_dir: impl Into<PathBuf>, config: PipelineConfig) -> Self {
        Self {
            run_id: RunId::generate(),
            input_dir: input_dir.into(),
            config,
            started_at: Utc::now(),
        }
    }

    /// Span carrying the run id.
    pub fn span(&self) -> Span {
        info_span!("run", run_id = %self.run_id)
    }
}
