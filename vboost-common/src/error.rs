//! Common error types for Volume Boost

use thiserror::Error;

/// Common result type for Volume Boost operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types shared by the page and background contexts
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Message did not match any known control request
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// JSON encoding or decoding failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
