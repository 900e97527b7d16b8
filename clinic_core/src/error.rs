//! Error types for the clinic_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for clinic_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Form submission rejected
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Access gate rejected the supplied password
    #[error("Access denied")]
    AccessDenied,

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Reasons a form submission is rejected.
///
/// These are informational: the session keeps running and the record store
/// is left untouched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Age, Weight, and Height are required (missing {field})")]
    MissingRequiredField { field: &'static str },
}
