//! Error types for tokenscan.

use thiserror::Error;

/// tokenscan error types.
#[derive(Error, Debug)]
pub enum ScanError {
    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Snapshot file could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Query and stored signature have different lengths
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Configuration value outside its accepted range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Empty input where non-empty was required
    #[error("Empty input: {0}")]
    EmptyInput(String),
}

/// Result type alias for tokenscan operations.
pub type Result<T> = std::result::Result<T, ScanError>;
