//! Stream connection configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the notification feed connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Backend base URL.
    pub base_url: String,
    /// Path of the SSE endpoint.
    pub stream_path: String,
    /// Base delay before the first reconnect attempt (ms).
    pub reconnect_base_delay_ms: u64,
    /// Cap on the reconnect delay (ms).
    pub reconnect_max_delay_ms: u64,
    /// Maximum automatic reconnection attempts before giving up.
    pub max_reconnect_attempts: u32,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            stream_path: "/api/notifications/stream".to_string(),
            reconnect_base_delay_ms: 1000,
            reconnect_max_delay_ms: 30_000,
            max_reconnect_attempts: 5,
        }
    }
}

impl StreamConfig {
    /// Config pointing at a specific backend.
    pub fn for_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Full subscription URL for a user. The endpoint is parameterized by
    /// user id and username as query parameters.
    pub fn stream_url(&self, user_id: &str, username: &str) -> String {
        format!(
            "{}{}?userId={}&username={}",
            self.base_url, self.stream_path, user_id, username
        )
    }
}
