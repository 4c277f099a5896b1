//! # Error Types
//!
//! This module defines error types used throughout the inkplan library.
//!
//! The geometry core only ever produces the first four variants. They are
//! local, synchronous failures: nothing is retried, and no partial geometry
//! is returned alongside an error. The remaining variants belong to the
//! outer surfaces (JSON export, PNG preview, CLI file output).

use thiserror::Error;

/// Main error type for inkplan operations
#[derive(Debug, Error)]
pub enum InkplanError {
    /// Device or layout name not present in the profile registry
    #[error("Unknown profile '{0}'")]
    UnknownProfile(String),

    /// Physical quantity that cannot be converted to device units
    #[error("Invalid unit value {0}: millimeters must be finite and non-negative")]
    InvalidUnit(f64),

    /// Template or calendar parameter outside its domain
    #[error("Invalid parameter {key}={value}: {constraint}")]
    InvalidParam {
        key: String,
        value: String,
        constraint: String,
    },

    /// No acceptable layout (strict mode, or even after maximal fallback)
    #[error("Layout rejected: {0}")]
    Rejected(String),

    /// Preview rasterization or encoding error
    #[error("Image error: {0}")]
    Image(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl InkplanError {
    /// Shorthand for [`InkplanError::InvalidParam`].
    pub fn invalid_param(
        key: impl Into<String>,
        value: impl ToString,
        constraint: impl Into<String>,
    ) -> Self {
        Self::InvalidParam {
            key: key.into(),
            value: value.to_string(),
            constraint: constraint.into(),
        }
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, InkplanError>;
