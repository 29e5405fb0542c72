//! Bounded, deduplicated notification list.
//!
//! Pure state machine over the visible list; the transport and timers drive
//! it, UI code reads snapshots from it. Newest entries come first.

use tracing::debug;
use walletdash_core::Notification;

/// Hard cap on visible notifications. Oldest entries are evicted first.
pub const MAX_VISIBLE: usize = 10;

/// Ordered collection of visible notifications.
#[derive(Debug, Default)]
pub struct NotificationCenter {
    entries: Vec<Notification>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an incoming event to the list.
    ///
    /// Exact duplicates (same kind, event timestamp, and message) are
    /// rejected. An event whose kind supersedes earlier lifecycle stages
    /// removes those stages for the same correlation hash before being
    /// inserted, so a completed withdrawal replaces its processing entry
    /// rather than joining it. The list is then trimmed to [`MAX_VISIBLE`].
    ///
    /// Returns true if the event was inserted.
    pub fn insert(&mut self, notification: Notification) -> bool {
        let key = notification.dedupe_key();
        if self.entries.iter().any(|e| e.dedupe_key() == key) {
            debug!(kind = notification.kind.as_str(), "duplicate notification ignored");
            return false;
        }

        let superseded = notification.kind.supersedes();
        if !superseded.is_empty() {
            // Collapse only when both sides carry the hash; an entry without
            // a correlation hash is never removed by coincidence.
            if let Some(hash) = notification.tx_hash.as_deref() {
                self.entries.retain(|e| {
                    !(superseded.contains(&e.kind) && e.tx_hash.as_deref() == Some(hash))
                });
            }
        }

        self.entries.insert(0, notification);
        self.entries.truncate(MAX_VISIBLE);
        true
    }

    /// Remove the entry at `index`. Out-of-range indices are a no-op.
    pub fn dismiss(&mut self, index: usize) {
        if index < self.entries.len() {
            self.entries.remove(index);
        }
    }

    /// Empty the list.
    pub fn dismiss_all(&mut self) {
        self.entries.clear();
    }

    /// Remove the entry with the given assigned id, if still present.
    /// Auto-expiry removes by identity so interleaved insertions and
    /// dismissals cannot make it drop the wrong entry.
    pub fn remove_by_id(&mut self, assigned_id: &str) {
        self.entries
            .retain(|e| e.assigned_id.as_deref() != Some(assigned_id));
    }

    /// Snapshot of the visible list, newest first.
    pub fn snapshot(&self) -> Vec<Notification> {
        self.entries.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Borrow the entry at `index`.
    pub fn get(&self, index: usize) -> Option<&Notification> {
        self.entries.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use walletdash_core::NotificationKind;

    fn event(kind: NotificationKind, timestamp: &str, message: &str) -> Notification {
        Notification {
            kind,
            title: "title".to_string(),
            message: message.to_string(),
            tx_hash: None,
            withdrawal_id: None,
            amount: None,
            points_amount: None,
            points_balance: None,
            timestamp: timestamp.to_string(),
            auto_hide: None,
            hide_after_ms: None,
            assigned_id: None,
        }
    }

    fn event_with_hash(
        kind: NotificationKind,
        timestamp: &str,
        message: &str,
        hash: &str,
    ) -> Notification {
        Notification {
            tx_hash: Some(hash.to_string()),
            ..event(kind, timestamp, message)
        }
    }

    #[test]
    fn test_newest_first_order() {
        let mut center = NotificationCenter::new();
        center.insert(event(NotificationKind::System, "t1", "first"));
        center.insert(event(NotificationKind::System, "t2", "second"));
        assert_eq!(center.get(0).unwrap().message, "second");
        assert_eq!(center.get(1).unwrap().message, "first");
    }

    #[test]
    fn test_cap_never_exceeded_oldest_evicted() {
        let mut center = NotificationCenter::new();
        for i in 0..25 {
            center.insert(event(NotificationKind::System, &format!("t{i}"), "m"));
            assert!(center.len() <= MAX_VISIBLE);
        }
        assert_eq!(center.len(), MAX_VISIBLE);
        // The most recent insertion is visible, the earliest are gone.
        assert_eq!(center.get(0).unwrap().timestamp, "t24");
        assert!(center.snapshot().iter().all(|n| n.timestamp != "t0"));
    }

    #[test]
    fn test_exact_duplicate_rejected() {
        let mut center = NotificationCenter::new();
        assert!(center.insert(event(NotificationKind::DepositDetected, "t1", "seen")));
        assert!(!center.insert(event(NotificationKind::DepositDetected, "t1", "seen")));
        assert_eq!(center.len(), 1);
    }

    #[test]
    fn test_same_key_different_message_is_not_a_duplicate() {
        let mut center = NotificationCenter::new();
        center.insert(event(NotificationKind::DepositDetected, "t1", "seen"));
        assert!(center.insert(event(NotificationKind::DepositDetected, "t1", "other text")));
        assert_eq!(center.len(), 2);
    }

    #[test]
    fn test_withdrawal_lifecycle_collapse() {
        let mut center = NotificationCenter::new();
        center.insert(event_with_hash(
            NotificationKind::WithdrawalProcessing,
            "t1",
            "processing",
            "0xabc",
        ));
        assert_eq!(center.len(), 1);

        center.insert(event_with_hash(
            NotificationKind::WithdrawalCompleted,
            "t2",
            "completed",
            "0xabc",
        ));
        assert_eq!(center.len(), 1);
        assert_eq!(center.get(0).unwrap().kind, NotificationKind::WithdrawalCompleted);
    }

    #[test]
    fn test_withdrawal_failed_also_collapses_processing() {
        let mut center = NotificationCenter::new();
        center.insert(event_with_hash(
            NotificationKind::WithdrawalProcessing,
            "t1",
            "processing",
            "0xabc",
        ));
        center.insert(event_with_hash(
            NotificationKind::WithdrawalFailed,
            "t2",
            "failed",
            "0xabc",
        ));
        assert_eq!(center.len(), 1);
        assert_eq!(center.get(0).unwrap().kind, NotificationKind::WithdrawalFailed);
    }

    #[test]
    fn test_deposit_lifecycle_collapse() {
        let mut center = NotificationCenter::new();
        center.insert(event_with_hash(
            NotificationKind::DepositDetected,
            "t1",
            "detected",
            "0xdep",
        ));
        center.insert(event_with_hash(
            NotificationKind::DepositConfirmed,
            "t2",
            "confirmed",
            "0xdep",
        ));
        assert_eq!(center.len(), 1);
        assert_eq!(center.get(0).unwrap().kind, NotificationKind::DepositConfirmed);
    }

    #[test]
    fn test_collapse_only_matches_same_hash() {
        let mut center = NotificationCenter::new();
        center.insert(event_with_hash(
            NotificationKind::WithdrawalProcessing,
            "t1",
            "processing A",
            "0xaaa",
        ));
        center.insert(event_with_hash(
            NotificationKind::WithdrawalProcessing,
            "t2",
            "processing B",
            "0xbbb",
        ));
        center.insert(event_with_hash(
            NotificationKind::WithdrawalCompleted,
            "t3",
            "completed A",
            "0xaaa",
        ));
        assert_eq!(center.len(), 2);
        assert!(center
            .snapshot()
            .iter()
            .any(|n| n.tx_hash.as_deref() == Some("0xbbb")
                && n.kind == NotificationKind::WithdrawalProcessing));
    }

    #[test]
    fn test_hashless_entries_never_collapsed() {
        let mut center = NotificationCenter::new();
        center.insert(event(NotificationKind::WithdrawalProcessing, "t1", "no hash"));
        center.insert(event(NotificationKind::WithdrawalCompleted, "t2", "also no hash"));
        assert_eq!(center.len(), 2);
    }

    #[test]
    fn test_dismiss_and_out_of_range_noop() {
        let mut center = NotificationCenter::new();
        center.insert(event(NotificationKind::System, "t1", "a"));
        center.insert(event(NotificationKind::System, "t2", "b"));

        center.dismiss(5);
        assert_eq!(center.len(), 2);

        center.dismiss(0);
        assert_eq!(center.len(), 1);
        assert_eq!(center.get(0).unwrap().message, "a");
    }

    #[test]
    fn test_dismiss_all() {
        let mut center = NotificationCenter::new();
        center.insert(event(NotificationKind::System, "t1", "a"));
        center.insert(event(NotificationKind::System, "t2", "b"));
        center.dismiss_all();
        assert!(center.is_empty());
    }

    #[test]
    fn test_remove_by_id_targets_identity_not_position() {
        let mut center = NotificationCenter::new();
        let mut expiring = event(NotificationKind::System, "t1", "expiring");
        expiring.assign_id("zzz");
        let id = expiring.assigned_id.clone().unwrap();
        center.insert(expiring);

        // Later insertions shift positions; removal must still hit the right one.
        center.insert(event(NotificationKind::System, "t2", "later"));
        center.insert(event(NotificationKind::System, "t3", "latest"));

        center.remove_by_id(&id);
        assert_eq!(center.len(), 2);
        assert!(center.snapshot().iter().all(|n| n.message != "expiring"));

        // Removing again is a no-op.
        center.remove_by_id(&id);
        assert_eq!(center.len(), 2);
    }
}
