//! Source ingestion for the Orbis pipeline.
//!
//! Discovers the CSV files of an input directory and loads each into a text
//! [`Table`](orbis_model::Table) tagged with its file name. Type decisions are
//! left to the cleaning pass, so nothing is inferred here.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use orbis_ingest::read_sources;
//!
//! let sources = read_sources(Path::new("data/faf5"))?;
//! for source in &sources {
//!     println!("{}: {} rows", source.source, source.table.row_count());
//! }
//! ```

mod discovery;
mod error;
mod reader;

use std::path::Path;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use reader::{SourceTable, read_csv_table, read_source, validate_encoding};

// === File Discovery ===
pub use discovery::list_csv_files;

/// Discovers and reads every source file in `dir`, in file name order.
///
/// Fails on the first file that cannot be read.
pub fn read_sources(dir: &Path) -> Result<Vec<SourceTable>> {
    let files = list_csv_files(dir)?;
    tracing::info!(dir = %dir.display(), file_count = files.len(), "discovered source files");
    files.iter().map(|path| read_source(path)).collect()
}
