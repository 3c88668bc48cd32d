//! Timestamp freshness checks against replayed requests.
//!
//! The guard keeps no per-request state: a captured request can be replayed
//! inside the window, and clock skew between client and server is not
//! compensated. Clients whose clocks drift must resynchronize.

use crate::error::IntegrityError;
use chrono::Utc;

/// Source of the server's current time in milliseconds since epoch.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// A clock pinned to one instant, for tests and deterministic tooling.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

/// Symmetric freshness window check.
#[derive(Debug, Clone, Copy)]
pub struct ReplayGuard {
    max_skew_ms: u64,
}

impl ReplayGuard {
    pub fn new(max_skew_ms: u64) -> Self {
        Self { max_skew_ms }
    }

    pub fn max_skew_ms(&self) -> u64 {
        self.max_skew_ms
    }

    /// Check the raw `X-Timestamp` text against `now_ms`.
    ///
    /// Text that is not an integer counts as a missing header. A timestamp
    /// more than `max_skew_ms` away from `now_ms` in either direction is
    /// expired; exactly `max_skew_ms` away is still fresh.
    pub fn check(&self, timestamp: &str, now_ms: i64) -> Result<i64, IntegrityError> {
        let declared: i64 = timestamp
            .parse()
            .map_err(|_| IntegrityError::MissingHeaders)?;

        if now_ms.abs_diff(declared) > self.max_skew_ms {
            return Err(IntegrityError::Expired);
        }

        Ok(declared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000_000;

    fn guard() -> ReplayGuard {
        ReplayGuard::new(60_000)
    }

    #[test]
    fn accepts_current_timestamp() {
        assert_eq!(guard().check("1700000000000", NOW), Ok(NOW));
    }

    #[test]
    fn window_edges_are_inclusive() {
        assert!(guard().check(&(NOW - 60_000).to_string(), NOW).is_ok());
        assert!(guard().check(&(NOW + 60_000).to_string(), NOW).is_ok());
    }

    #[test]
    fn rejects_past_and_future_beyond_window() {
        assert_eq!(
            guard().check(&(NOW - 60_001).to_string(), NOW),
            Err(IntegrityError::Expired)
        );
        assert_eq!(
            guard().check(&(NOW + 60_001).to_string(), NOW),
            Err(IntegrityError::Expired)
        );
    }

    #[test]
    fn non_integer_timestamps_count_as_missing() {
        for raw in ["", "abc", "17e11", "1700000000000.5", " 1700000000000"] {
            assert_eq!(
                guard().check(raw, NOW),
                Err(IntegrityError::MissingHeaders),
                "{raw:?} should not parse"
            );
        }
    }

    #[test]
    fn extreme_values_do_not_overflow() {
        assert_eq!(
            guard().check(&i64::MIN.to_string(), NOW),
            Err(IntegrityError::Expired)
        );
        assert_eq!(
            guard().check(&i64::MAX.to_string(), i64::MIN),
            Err(IntegrityError::Expired)
        );
    }

    #[test]
    fn system_clock_is_close_to_chrono_now() {
        let now = Utc::now().timestamp_millis();
        assert!(SystemClock.now_millis().abs_diff(now) < 5_000);
    }
}
