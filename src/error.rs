//! Error types.
//!
//! Window, grouping and scale operations are total and never fail; the only
//! fallible surface is turning a settings document into runtime options.

use thiserror::Error;

/// Errors raised while loading or validating chart settings
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Week start is not a recognizable weekday name
    #[error("Unknown week start: {0:?}")]
    UnknownWeekStart(String),

    /// Time zone is not a known IANA zone name
    #[error("Unknown time zone: {0:?}")]
    UnknownTimeZone(String),

    /// The y-scale settle delay must be positive
    #[error("Settle delay must be positive, got {0}ms")]
    InvalidSettleDelay(u64),

    /// At least one page of lead/lag is needed to build the 3-page window
    #[error("Lead pages must be at least 1, got {0}")]
    InvalidLeadPages(u32),

    /// Settings file could not be read
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file is not valid JSON for this schema
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}
