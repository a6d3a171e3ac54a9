//! Error types for Kino ABR

use thiserror::Error;

/// Result type alias for estimation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Estimation error types
///
/// Missing data never shows up here: it is reported as an unknown
/// (`None`) estimate. These variants are caller contract violations.
#[derive(Error, Debug)]
pub enum Error {
    // Input errors
    #[error("Invalid chunk timing: end {end_us}us must be after start {start_us}us")]
    InvalidChunkTiming { start_us: u64, end_us: u64 },

    #[error("Lookahead sequences ({sequences}) and formats ({formats}) differ in length")]
    LengthMismatch { sequences: usize, formats: usize },

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to parse configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl Error {
    /// Returns the error code for diagnostics
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::InvalidChunkTiming { .. } => "INVALID_CHUNK_TIMING",
            Error::LengthMismatch { .. } => "LENGTH_MISMATCH",
            Error::InvalidConfig(_) => "INVALID_CONFIG",
            Error::Config(_) => "CONFIG_PARSE",
        }
    }
}
