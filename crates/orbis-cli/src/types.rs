use std::path::PathBuf;

use orbis_model::{Run, RunMetadata};

#[derive(Debug)]
pub struct RunOutcome {
    pub run: Run,
    /// Folder holding run directories.
    pub output_dir: PathBuf,
    /// `None` for dry runs.
    pub stored: Option<RunMetadata>,
}
