//! Live notification delivery for the wallet dashboard.
//!
//! Maintains an auto-reconnecting server-sent-events subscription to the
//! backend notification feed, folds pushed events into a bounded,
//! deduplicated, lifecycle-aware list, and fires a balance-refresh callback
//! on balance updates.
//!
//! ## Architecture
//!
//! - `transport` - SSE connection loop with reconnect backoff, emits `StreamMessage`
//! - `center` - bounded notification list state machine (dedupe, collapse, expiry)
//! - `stream` - `NotificationStream` facade owning the tasks and shared state

pub mod backoff;
pub mod center;
pub mod config;
pub mod error;
pub mod stream;
pub mod transport;

pub use backoff::ReconnectPolicy;
pub use center::{NotificationCenter, MAX_VISIBLE};
pub use config::StreamConfig;
pub use error::StreamError;
pub use stream::{BalanceCallback, NotificationStream};
pub use transport::{SseClient, StreamMessage};
