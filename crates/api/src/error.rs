//! Error types for backend API calls.

use thiserror::Error;

/// Errors that can occur while talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {code}: {message}")]
    Status { code: u16, message: String },

    #[error("failed to parse response: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Parse(err.to_string())
    }
}

impl ApiError {
    /// HTTP status code, when the backend answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Status { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Whether the call failed because the session is not (or no longer)
    /// authenticated.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status_code(), Some(401) | Some(403))
    }
}
