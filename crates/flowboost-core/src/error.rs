//! Core error types for flowboost-core.
//!
//! Typed error hierarchy using thiserror. Nothing in the library is fatal:
//! callers either surface these at the CLI boundary or deliberately swallow
//! them (telemetry, notification delivery).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for flowboost-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Preferences/configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// FlowBoost API errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Preferences/configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load the preferences file
    #[error("Failed to load preferences from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save the preferences file
    #[error("Failed to save preferences to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Value outside the recognized range, or of the wrong shape
    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Dot-path key that does not name a preference
    #[error("Unknown preference key: {0}")]
    UnknownKey(String),

    /// Failed to parse the preferences file
    #[error("Failed to parse preferences: {0}")]
    ParseFailed(String),
}

/// FlowBoost API errors.
#[derive(Error, Debug)]
pub enum ApiError {
    /// No session token stored; endpoint requires sign-in
    #[error("Not signed in: no session token stored (run `flowboost auth login`)")]
    NotAuthenticated,

    /// Base URL or endpoint path could not be parsed
    #[error("Invalid API URL: {0}")]
    Url(#[from] url::ParseError),

    /// Transport-level failure
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("{endpoint} answered HTTP {status}")]
    Status { endpoint: String, status: u16 },

    /// Response body did not have the expected shape
    #[error("Unexpected response from {endpoint}: {message}")]
    BadResponse { endpoint: String, message: String },

    /// OS keyring access failed
    #[error("Credential store error: {0}")]
    Credentials(String),
}

impl From<keyring::Error> for ApiError {
    fn from(err: keyring::Error) -> Self {
        ApiError::Credentials(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
