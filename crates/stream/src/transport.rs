//! SSE client for the backend notification feed.

use crate::{ReconnectPolicy, StreamConfig, StreamError};
use eventsource_stream::Eventsource;
use futures_util::StreamExt;
use rand::distributions::Alphanumeric;
use rand::Rng;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use walletdash_core::Notification;

/// Name of the SSE event carrying a notification payload. Anything else on
/// the stream (comments, heartbeats) is ignored.
const NOTIFICATION_EVENT: &str = "notification";

/// Message received from the notification feed.
#[derive(Debug, Clone)]
pub enum StreamMessage {
    /// A parsed notification, with its local id already assigned.
    Notification(Notification),
    /// Subscription established (first time).
    Connected,
    /// Subscription re-established after a drop.
    Reconnected,
    /// Connection lost; a reconnect attempt may follow.
    Disconnected,
    /// Terminal error. No further attempts will be made until the consumer
    /// reconnects explicitly.
    Error(String),
}

/// SSE client for a single user's notification subscription.
///
/// Owns the reconnect loop: transient transport failures are retried with
/// exponential backoff until the attempt budget is exhausted, at which point
/// a terminal [`StreamMessage::Error`] is emitted and the client stops.
pub struct SseClient {
    config: StreamConfig,
    user_id: String,
    username: String,
    http: reqwest::Client,
    tx: mpsc::Sender<StreamMessage>,
}

impl SseClient {
    pub fn new(
        config: StreamConfig,
        user_id: impl Into<String>,
        username: impl Into<String>,
        tx: mpsc::Sender<StreamMessage>,
    ) -> Self {
        Self {
            config,
            user_id: user_id.into(),
            username: username.into(),
            http: reqwest::Client::new(),
            tx,
        }
    }

    /// Connect and run until the consumer goes away or retries are exhausted.
    pub async fn run(self) -> Result<(), StreamError> {
        let mut policy = ReconnectPolicy::new(
            self.config.reconnect_base_delay_ms,
            self.config.reconnect_max_delay_ms,
            self.config.max_reconnect_attempts,
        );
        let mut has_connected_once = false;

        loop {
            match self.connect_and_handle(&mut policy, has_connected_once).await {
                Ok(()) => {
                    debug!(user_id = %self.user_id, "notification consumer gone, stopping feed");
                    return Ok(());
                }
                Err(e) => {
                    has_connected_once = true;
                    if self.tx.send(StreamMessage::Disconnected).await.is_err() {
                        return Ok(());
                    }

                    match policy.next_delay() {
                        Some(delay) => {
                            warn!(
                                user_id = %self.user_id,
                                attempt = policy.attempts(),
                                "notification feed error: {e}. Reconnecting in {:.1}s",
                                delay.as_secs_f64()
                            );
                            tokio::time::sleep(delay).await;
                        }
                        None => {
                            warn!(user_id = %self.user_id, "notification feed error: {e}. Giving up");
                            let _ = self
                                .tx
                                .send(StreamMessage::Error(
                                    StreamError::RetriesExhausted.to_string(),
                                ))
                                .await;
                            return Err(StreamError::RetriesExhausted);
                        }
                    }
                }
            }
        }
    }

    /// One subscription attempt: connect, then pump events until the stream
    /// breaks. Returns Ok only when the consumer side of the channel is gone.
    async fn connect_and_handle(
        &self,
        policy: &mut ReconnectPolicy,
        is_reconnect: bool,
    ) -> Result<(), StreamError> {
        let url = self.config.stream_url(&self.user_id, &self.username);
        debug!(user_id = %self.user_id, %url, "connecting to notification feed");

        let response = self
            .http
            .get(&url)
            .header(reqwest::header::ACCEPT, "text/event-stream")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StreamError::ConnectionFailed(format!(
                "HTTP {}",
                response.status()
            )));
        }

        // Connection is up: the failure counter starts over.
        policy.reset();
        info!(user_id = %self.user_id, reconnect = is_reconnect, "notification feed connected");
        let opened = if is_reconnect {
            StreamMessage::Reconnected
        } else {
            StreamMessage::Connected
        };
        if self.tx.send(opened).await.is_err() {
            return Ok(());
        }

        let mut events = response.bytes_stream().eventsource();
        while let Some(event) = events.next().await {
            match event {
                Ok(event) if event.event == NOTIFICATION_EVENT => {
                    // Malformed payloads are dropped without touching
                    // connection state.
                    match serde_json::from_str::<Notification>(&event.data) {
                        Ok(mut notification) => {
                            notification.assign_id(&random_suffix());
                            if self
                                .tx
                                .send(StreamMessage::Notification(notification))
                                .await
                                .is_err()
                            {
                                return Ok(());
                            }
                        }
                        Err(e) => {
                            debug!(user_id = %self.user_id, "dropping malformed notification: {e}");
                        }
                    }
                }
                Ok(other) => {
                    debug!(event = %other.event, "ignoring unnamed feed event");
                }
                Err(e) => {
                    return Err(StreamError::Disconnected(e.to_string()));
                }
            }
        }

        Err(StreamError::Disconnected("stream ended".to_string()))
    }
}

/// Random alphanumeric suffix for locally assigned notification ids.
fn random_suffix() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_suffix_shape() {
        let a = random_suffix();
        let b = random_suffix();
        assert_eq!(a.len(), 9);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        // Not a strict guarantee, but 62^9 collisions do not happen in tests.
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_sse_client_creation() {
        let (tx, _rx) = mpsc::channel(16);
        let _client = SseClient::new(StreamConfig::default(), "u-1", "alice", tx);
    }
}
