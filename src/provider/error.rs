//! Provider error types.
//!
//! Every failure mode of a completion call collapses into [`ProviderError`].
//! The debate engine treats all variants identically: the current turn fails
//! and the session moves forward in its state machine. There is no retry
//! logic anywhere on this path.

use thiserror::Error;

/// Result alias for provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Errors produced while obtaining or consuming a completion stream.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// API key contains characters that cannot form a valid header.
    #[error("invalid API key")]
    InvalidApiKey,

    /// Transport-level failure (connect, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint returned a non-success status.
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Endpoint returned 429.
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// The SSE stream broke mid-response.
    #[error("stream error: {0}")]
    Stream(String),

    /// The stream completed without yielding any content.
    #[error("empty response from model")]
    Empty,
}
