// src/error.rs

//! Unified error handling for the feedhook application.

use std::fmt;

use thiserror::Error;

/// Result type alias for feedhook operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// RSS feed decoding failed
    #[error("Feed parse error: {0}")]
    Feed(#[from] rss::Error),

    /// Ledger read or write failed
    #[error("Ledger error: {0}")]
    Store(#[from] rusqlite::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A template or rule referenced a field the resolver does not know
    #[error("Unknown {scope} field: '{field}'")]
    UnknownField { scope: &'static str, field: String },

    /// External command could not be started
    #[error("Command error for '{executable}': {message}")]
    Command { executable: String, message: String },
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an unknown-field error.
    pub fn unknown_field(scope: &'static str, field: impl Into<String>) -> Self {
        Self::UnknownField {
            scope,
            field: field.into(),
        }
    }

    /// Create an external-command error.
    pub fn command(executable: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Command {
            executable: executable.into(),
            message: message.to_string(),
        }
    }
}
