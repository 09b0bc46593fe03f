//! CLI library components for Orbis.

pub mod logging;
pub mod overrides;
