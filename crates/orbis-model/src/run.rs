//! Run identity and the immutable record of one pipeline execution.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ModelError;
use crate::report::{IssueRecord, ProfileRecord};
use crate::table::Table;

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const TIMESTAMP_LEN: usize = 15;
const SUFFIX_LEN: usize = 8;

/// Unique identifier of a run: `YYYYMMDD_HHMMSS_<8 hex digits>`.
///
/// Ids generated later sort after earlier ones when compared as strings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RunId(String);

impl RunId {
    /// Generates a fresh id from the local clock and a random suffix.
    pub fn generate() -> Self {
        let suffix = Uuid::new_v4().simple().to_string();
        Self::from_parts(Local::now().naive_local(), &suffix[..SUFFIX_LEN])
    }

    fn from_parts(timestamp: NaiveDateTime, suffix: &str) -> Self {
        Self(format!("{}_{}", timestamp.format(TIMESTAMP_FORMAT), suffix))
    }

    pub fn parse(value: &str) -> Result<Self, ModelError> {
        let invalid = || ModelError::InvalidRunId(value.to_string());
        if value.len() != TIMESTAMP_LEN + 1 + SUFFIX_LEN || !value.is_ascii() {
            return Err(invalid());
        }
        let (timestamp, rest) = value.split_at(TIMESTAMP_LEN);
        let suffix = rest.strip_prefix('_').ok_or_else(invalid)?;
        NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT).map_err(|_| invalid())?;
        if !suffix
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
        {
            return Err(invalid());
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RunId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RunId {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RunId> for String {
    fn from(id: RunId) -> Self {
        id.0
    }
}

/// Locations of the files a run persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunArtifacts {
    pub merged: Option<PathBuf>,
    pub cleaned: Option<PathBuf>,
    pub validation_columns: Option<PathBuf>,
    pub validation_issues: Option<PathBuf>,
    pub duckdb: Option<PathBuf>,
}

/// Manifest describing a finished run. Stored as `run.json` next to its artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    pub run_id: RunId,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub input_dir: PathBuf,
    pub sources: Vec<String>,
    pub merged_rows: usize,
    pub merged_columns: usize,
    pub cleaned_rows: usize,
    pub cleaned_columns: usize,
    pub duplicates_removed: usize,
    pub dropped_columns: Vec<String>,
    pub issue_count: usize,
    #[serde(default)]
    pub artifacts: RunArtifacts,
}

/// Everything needed to assemble a [`Run`].
#[derive(Debug, Clone)]
pub struct RunParts {
    pub id: RunId,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub input_dir: PathBuf,
    pub sources: Vec<String>,
    pub merged: Table,
    pub cleaned: Table,
    pub profiles: Vec<ProfileRecord>,
    pub issues: Vec<IssueRecord>,
    pub duplicates_removed: usize,
    pub dropped_columns: Vec<String>,
}

/// One execution of the pipeline. Read-only once assembled.
#[derive(Debug, Clone)]
pub struct Run {
    parts: RunParts,
}

impl Run {
    pub fn assemble(parts: RunParts) -> Self {
        Self { parts }
    }

    pub fn id(&self) -> &RunId {
        &self.parts.id
    }

    pub fn input_dir(&self) -> &PathBuf {
        &self.parts.input_dir
    }

    pub fn sources(&self) -> &[String] {
        &self.parts.sources
    }

    pub fn merged(&self) -> &Table {
        &self.parts.merged
    }

    pub fn cleaned(&self) -> &Table {
        &self.parts.cleaned
    }

    pub fn profiles(&self) -> &[ProfileRecord] {
        &self.parts.profiles
    }

    pub fn issues(&self) -> &[IssueRecord] {
        &self.parts.issues
    }

    pub fn duplicates_removed(&self) -> usize {
        self.parts.duplicates_removed
    }

    pub fn dropped_columns(&self) -> &[String] {
        &self.parts.dropped_columns
    }

    /// Builds the manifest for this run. Artifact paths are filled in by the writer.
    pub fn metadata(&self) -> RunMetadata {
        RunMetadata {
            run_id: self.parts.id.clone(),
            started_at: self.parts.started_at,
            finished_at: self.parts.finished_at,
            input_dir: self.parts.input_dir.clone(),
            sources: self.parts.sources.clone(),
            merged_rows: self.parts.merged.row_count(),
            merged_columns: self.parts.merged.column_count(),
            cleaned_rows: self.parts.cleaned.row_count(),
            cleaned_columns: self.parts.cleaned.column_count(),
            duplicates_removed: self.parts.duplicates_removed,
            dropped_columns: self.parts.dropped_columns.clone(),
            issue_count: self.parts.issues.len(),
            artifacts: RunArtifacts::default(),
        }
    }
}
