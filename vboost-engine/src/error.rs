//! Error types for vboost-engine
//!
//! Nothing in the engine panics or escapes the page context: every failure is
//! one of these variants, and the control channel turns them into reply values.

use thiserror::Error;
use vboost_common::events::TabId;

/// Main error type for the engine crate
#[derive(Error, Debug)]
pub enum Error {
    /// Discovery found zero media elements, or gain was requested before
    /// any element was routed
    #[error("No audio source found on this page")]
    NoAudioSource,

    /// The engine side of the control channel is not listening (yet)
    #[error("Control channel unavailable for {0}")]
    ChannelUnavailable(TabId),

    /// Tab is not known to the host
    #[error("Tab not found: {0}")]
    TabNotFound(TabId),

    /// Database connection or query errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Errors from the shared library (config, protocol decoding)
    #[error(transparent)]
    Common(#[from] vboost_common::Error),

    /// Invalid argument or state for operation
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl Error {
    /// Whether the control surface should attach the engine and retry
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::ChannelUnavailable(_))
    }
}

/// Convenience Result type using the engine Error
pub type Result<T> = std::result::Result<T, Error>;
