//! Deterministic cleaning for merged tables.
//!
//! [`clean_table`] applies three stages in a fixed order:
//!
//! 1. [`normalize_columns`]: canonical, collision-free column names
//! 2. [`coerce_columns`]: text to numeric when enough values parse
//! 3. [`sanitize`]: trimming, blank to missing, empty column and duplicate row removal

mod coerce;
mod error;
mod normalize;
mod pipeline;
mod sanitize;

pub use coerce::{CoercionConfig, DEFAULT_COERCION_THRESHOLD, coerce_columns};
pub use error::{CleanError, Result};
pub use normalize::{FALLBACK_NAME, canonicalize, normalize_columns};
pub use pipeline::{CleanOutcome, clean_table};
pub use sanitize::{SanitizeStats, sanitize};

pub use orbis_model::CoercionDecision;
