//! Error types for promptkit.
//!
//! This module defines a unified error enum for the failures that stop a
//! command: configuration, I/O, and malformed input the tool cannot work
//! around. Findings about the prompt repository itself (missing partials,
//! schema violations, ...) are diagnostics, not errors, and live in
//! `promptkit-validator`.

use thiserror::Error;

/// Unified error type for promptkit.
///
/// All fallible functions in the workspace return `Result<T, AppError>`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Partials engine errors
    #[error("Partials error: {0}")]
    Partials(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
