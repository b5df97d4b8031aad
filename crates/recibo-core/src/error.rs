//! Error types for the recibo-core library.
//!
//! Extraction itself is total over string input and never produces an
//! error; only configuration loading and value parsing can fail.

use thiserror::Error;

/// Main error type for the recibo library.
#[derive(Error, Debug)]
pub enum ReciboError {
    /// I/O error (configuration files).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Failed to parse a value.
    #[error("failed to parse {field}: {value}")]
    Parse { field: String, value: String },
}

/// Result type for the recibo library.
pub type Result<T> = std::result::Result<T, ReciboError>;
