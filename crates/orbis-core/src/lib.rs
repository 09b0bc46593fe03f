//! Orchestration of an Orbis run.
//!
//! A run reads every CSV of an input directory, merges them into one table
//! with a provenance column, cleans it, then profiles and checks the cleaned
//! table. Profiling and issue detection run on separate threads.
//!
//! # Example
//!
//! ```ignore
//! use orbis_core::{PipelineConfig, RunContext, execute_run};
//!
//! let context = RunContext::new("data/faf5", PipelineConfig::default());
//! let run = execute_run(&context)?;
//! println!("{} issues", run.issues().len());
//! ```

mod config;
mod context;
mod error;
mod merge;
mod pipeline;

pub use config::{ConfigError, PipelineConfig};
pub use context::RunContext;
pub use error::{PipelineError, Result};
pub use merge::{DEFAULT_PROVENANCE_COLUMN, MergeError, merge_sources};
pub use pipeline::{execute_run, process_sources};
