//! Exponential backoff policy for reconnection attempts.

use std::time::Duration;

/// Tracks consecutive connection failures and yields the delay before the
/// next attempt.
///
/// The counter increments on each failure before the delay is computed, so a
/// fresh policy with the default parameters yields 2s, 4s, 8s, 16s, then 30s
/// (capped). Once the attempt limit is reached no further delay is yielded;
/// the caller must stop and surface a terminal error. A successful connection
/// resets the counter.
#[derive(Debug, Clone)]
pub struct ReconnectPolicy {
    base_delay_ms: u64,
    max_delay_ms: u64,
    max_attempts: u32,
    attempts: u32,
}

impl ReconnectPolicy {
    pub fn new(base_delay_ms: u64, max_delay_ms: u64, max_attempts: u32) -> Self {
        Self {
            base_delay_ms,
            max_delay_ms,
            max_attempts,
            attempts: 0,
        }
    }

    /// Record a failure. Returns the delay to wait before retrying, or `None`
    /// when the attempt budget is exhausted.
    pub fn next_delay(&mut self) -> Option<Duration> {
        if self.attempts >= self.max_attempts {
            return None;
        }
        self.attempts += 1;
        // Saturate the shift rather than overflow for absurd attempt counts.
        let factor = 1u64.checked_shl(self.attempts).unwrap_or(u64::MAX);
        let delay_ms = self
            .base_delay_ms
            .saturating_mul(factor)
            .min(self.max_delay_ms);
        Some(Duration::from_millis(delay_ms))
    }

    /// Record a successful connection.
    pub fn reset(&mut self) {
        self.attempts = 0;
    }

    /// Failures recorded since the last reset.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Whether the attempt budget is used up.
    pub fn is_exhausted(&self) -> bool {
        self.attempts >= self.max_attempts
    }
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self::new(1000, 30_000, 5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_delay_sequence_is_capped_exponential() {
        let mut policy = ReconnectPolicy::default();
        let delays: Vec<u64> = std::iter::from_fn(|| policy.next_delay())
            .map(|d| d.as_millis() as u64)
            .collect();
        assert_eq!(delays, vec![2000, 4000, 8000, 16000, 30000]);
        assert!(policy.is_exhausted());
    }

    #[test]
    fn test_no_sixth_attempt() {
        let mut policy = ReconnectPolicy::default();
        for _ in 0..5 {
            assert!(policy.next_delay().is_some());
        }
        assert_eq!(policy.next_delay(), None);
        assert_eq!(policy.next_delay(), None);
    }

    #[test]
    fn test_reset_restores_budget_and_sequence() {
        let mut policy = ReconnectPolicy::default();
        policy.next_delay();
        policy.next_delay();
        policy.reset();
        assert_eq!(policy.attempts(), 0);
        assert_eq!(policy.next_delay(), Some(Duration::from_millis(2000)));
    }

    #[test]
    fn test_custom_parameters() {
        let mut policy = ReconnectPolicy::new(100, 250, 3);
        assert_eq!(policy.next_delay(), Some(Duration::from_millis(200)));
        assert_eq!(policy.next_delay(), Some(Duration::from_millis(250)));
        assert_eq!(policy.next_delay(), Some(Duration::from_millis(250)));
        assert_eq!(policy.next_delay(), None);
    }
}
