//! Error types for the notification stream.

use thiserror::Error;

/// Errors that can occur on the notification feed.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    #[error("disconnected: {0}")]
    Disconnected(String),

    #[error("failed to parse event payload: {0}")]
    Parse(String),

    #[error("failed to connect after multiple attempts")]
    RetriesExhausted,

    #[error("channel closed")]
    ChannelClosed,
}

impl From<reqwest::Error> for StreamError {
    fn from(err: reqwest::Error) -> Self {
        StreamError::ConnectionFailed(err.to_string())
    }
}

impl From<serde_json::Error> for StreamError {
    fn from(err: serde_json::Error) -> Self {
        StreamError::Parse(err.to_string())
    }
}

impl StreamError {
    /// Returns true if this error is transient and another connection attempt
    /// may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            StreamError::ConnectionFailed(_) | StreamError::Disconnected(_)
        )
    }
}
