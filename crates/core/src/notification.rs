//! Server-pushed notification events.
//!
//! The backend publishes account activity over a server-sent-events feed.
//! Each event is a JSON object whose `type` discriminates the lifecycle stage
//! it describes; related stages of one operation share a correlation hash
//! (the on-chain transaction hash).

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Kind of a pushed notification event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    System,
    DepositDetected,
    DepositConfirmed,
    WithdrawalCreated,
    WithdrawalProcessing,
    WithdrawalCompleted,
    WithdrawalFailed,
    PointsTransfer,
    BalanceUpdate,
}

impl NotificationKind {
    /// Wire name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::System => "SYSTEM",
            NotificationKind::DepositDetected => "DEPOSIT_DETECTED",
            NotificationKind::DepositConfirmed => "DEPOSIT_CONFIRMED",
            NotificationKind::WithdrawalCreated => "WITHDRAWAL_CREATED",
            NotificationKind::WithdrawalProcessing => "WITHDRAWAL_PROCESSING",
            NotificationKind::WithdrawalCompleted => "WITHDRAWAL_COMPLETED",
            NotificationKind::WithdrawalFailed => "WITHDRAWAL_FAILED",
            NotificationKind::PointsTransfer => "POINTS_TRANSFER",
            NotificationKind::BalanceUpdate => "BALANCE_UPDATE",
        }
    }

    /// Earlier lifecycle stages that an event of this kind replaces.
    ///
    /// When an event arrives, visible entries of a returned kind that carry
    /// the same correlation hash are removed instead of kept alongside it:
    /// a confirmed deposit replaces its detection, a completed or failed
    /// withdrawal replaces its processing entry.
    pub fn supersedes(self) -> &'static [NotificationKind] {
        match self {
            NotificationKind::DepositConfirmed => &[NotificationKind::DepositDetected],
            NotificationKind::WithdrawalCompleted | NotificationKind::WithdrawalFailed => {
                &[NotificationKind::WithdrawalProcessing]
            }
            _ => &[],
        }
    }

    /// Whether this kind carries a points balance the UI should refresh from.
    pub fn is_balance_update(self) -> bool {
        matches!(self, NotificationKind::BalanceUpdate)
    }
}

/// A single server-pushed notification.
///
/// Field names mirror the backend payload; `timestamp` is the time of the
/// underlying event as an opaque string. It participates in duplicate
/// detection as-is and is never parsed into a time value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub withdrawal_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points_balance: Option<f64>,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_hide: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide_after_ms: Option<u64>,
    /// Locally generated identity, assigned on receipt. Never sent or
    /// received over the wire.
    #[serde(skip)]
    pub assigned_id: Option<String>,
}

impl Notification {
    /// Assign the local instance identity: kind, event timestamp, and a
    /// caller-supplied random suffix. Auto-expiry removes by this id so a
    /// re-delivered or re-inserted event never cancels the wrong entry.
    pub fn assign_id(&mut self, suffix: &str) {
        self.assigned_id = Some(format!("{}_{}_{}", self.kind.as_str(), self.timestamp, suffix));
    }

    /// How long this notification should stay visible, if it expires on its
    /// own. Requires the backend to have flagged the event auto-hide with a
    /// positive delay.
    pub fn auto_expire_after(&self) -> Option<Duration> {
        if self.auto_hide == Some(true) {
            match self.hide_after_ms {
                Some(ms) if ms > 0 => Some(Duration::from_millis(ms)),
                _ => None,
            }
        } else {
            None
        }
    }

    /// Duplicate-detection key: two events with the same kind, event
    /// timestamp, and message text are the same fact delivered twice.
    pub fn dedupe_key(&self) -> (NotificationKind, &str, &str) {
        (self.kind, self.timestamp.as_str(), self.message.as_str())
    }
}
