//! Error types for gearlog-core

use thiserror::Error;

/// Result type alias using gearlog-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in gearlog-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// `SQLite` error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP transport error talking to the backend
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend rejected a request (non-2xx response)
    #[error("Backend API error: {0}")]
    Api(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}
