//! Notification stream facade.
//!
//! [`NotificationStream`] owns the SSE transport task and the router task
//! that folds feed messages into the shared [`NotificationCenter`]. The
//! connection exists only between `connect` and `disconnect`; dropping the
//! stream tears everything down, including any reconnect timer pending
//! inside the transport task.

use crate::{NotificationCenter, SseClient, StreamConfig, StreamMessage};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;
use walletdash_core::{ConnectionState, Notification};

/// Callback invoked with the new points balance on every accepted
/// BALANCE_UPDATE event.
pub type BalanceCallback = Arc<dyn Fn(f64) + Send + Sync>;

const CHANNEL_BUFFER: usize = 256;
const STATUS_CONNECTION_LOST: &str = "Connection lost";

/// State shared between the facade, the router task, and expiry timers.
struct Shared {
    center: Mutex<NotificationCenter>,
    state: Mutex<ConnectionState>,
}

/// Recover the guard even if a holder panicked; the list stays usable.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Live, auto-reconnecting subscription to a user's notification feed.
pub struct NotificationStream {
    config: StreamConfig,
    shared: Arc<Shared>,
    on_balance_update: Option<BalanceCallback>,
    transport: Option<JoinHandle<()>>,
    router: Option<JoinHandle<()>>,
}

impl NotificationStream {
    pub fn new(config: StreamConfig) -> Self {
        Self {
            config,
            shared: Arc::new(Shared {
                center: Mutex::new(NotificationCenter::new()),
                state: Mutex::new(ConnectionState::Disconnected),
            }),
            on_balance_update: None,
            transport: None,
            router: None,
        }
    }

    /// Stream that refreshes a balance through `callback` whenever the
    /// backend pushes a BALANCE_UPDATE carrying a points balance.
    pub fn with_balance_callback(
        config: StreamConfig,
        callback: impl Fn(f64) + Send + Sync + 'static,
    ) -> Self {
        let mut stream = Self::new(config);
        stream.on_balance_update = Some(Arc::new(callback));
        stream
    }

    /// Establish the subscription for the given user.
    ///
    /// Idempotent: while a connection is pending or open the call is a
    /// silent no-op and returns false, so there is never more than one
    /// transport. Returns true when a new connection was started. Must be
    /// called from within a tokio runtime.
    pub fn connect(&mut self, user_id: &str, username: &str) -> bool {
        if self.is_active() {
            debug!(user_id, "notification stream already connected or connecting");
            return false;
        }

        *lock(&self.shared.state) = ConnectionState::Connecting;

        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER);
        let client = SseClient::new(self.config.clone(), user_id, username, tx);
        self.transport = Some(tokio::spawn(async move {
            // Terminal outcomes are reported through the channel.
            let _ = client.run().await;
        }));

        let shared = self.shared.clone();
        let callback = self.on_balance_update.clone();
        self.router = Some(tokio::spawn(route(shared, callback, rx)));
        true
    }

    /// Tear down the subscription.
    ///
    /// Idempotent and safe from cleanup paths. Aborting the transport task
    /// cancels any reconnect sleep pending inside it, so no connection
    /// attempt can fire after this returns.
    pub fn disconnect(&mut self) {
        if let Some(handle) = self.transport.take() {
            handle.abort();
        }
        if let Some(handle) = self.router.take() {
            handle.abort();
        }
        *lock(&self.shared.state) = ConnectionState::Disconnected;
    }

    /// Whether a transport task is pending or open.
    pub fn is_active(&self) -> bool {
        self.transport
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Snapshot of visible notifications, newest first.
    pub fn notifications(&self) -> Vec<Notification> {
        lock(&self.shared.center).snapshot()
    }

    pub fn is_connected(&self) -> bool {
        lock(&self.shared.state).is_connected()
    }

    /// Current connection status.
    pub fn state(&self) -> ConnectionState {
        lock(&self.shared.state).clone()
    }

    /// Non-blocking status string when the connection is down or failed.
    pub fn connection_error(&self) -> Option<String> {
        lock(&self.shared.state).error_message().map(str::to_string)
    }

    /// Dismiss the notification at `index`. Out-of-range is a no-op.
    pub fn dismiss(&self, index: usize) {
        lock(&self.shared.center).dismiss(index);
    }

    /// Dismiss all notifications.
    pub fn dismiss_all(&self) {
        lock(&self.shared.center).dismiss_all();
    }
}

impl Drop for NotificationStream {
    fn drop(&mut self) {
        self.disconnect();
    }
}

/// Apply feed messages to the shared state until the transport goes away.
async fn route(
    shared: Arc<Shared>,
    on_balance_update: Option<BalanceCallback>,
    mut rx: mpsc::Receiver<StreamMessage>,
) {
    while let Some(msg) = rx.recv().await {
        match msg {
            StreamMessage::Notification(notification) => {
                let inserted = lock(&shared.center).insert(notification.clone());
                if !inserted {
                    continue;
                }

                if notification.kind.is_balance_update() {
                    if let (Some(balance), Some(callback)) =
                        (notification.points_balance, on_balance_update.as_ref())
                    {
                        callback(balance);
                    }
                }

                if let (Some(delay), Some(id)) = (
                    notification.auto_expire_after(),
                    notification.assigned_id.clone(),
                ) {
                    let shared = shared.clone();
                    tokio::spawn(async move {
                        tokio::time::sleep(delay).await;
                        lock(&shared.center).remove_by_id(&id);
                    });
                }
            }
            StreamMessage::Connected | StreamMessage::Reconnected => {
                *lock(&shared.state) = ConnectionState::Connected;
            }
            StreamMessage::Disconnected => {
                *lock(&shared.state) =
                    ConnectionState::Error(STATUS_CONNECTION_LOST.to_string());
            }
            StreamMessage::Error(message) => {
                *lock(&shared.state) = ConnectionState::Error(message);
            }
        }
    }
}
