//! Quota readings reported by the API.

use chrono::{DateTime, TimeZone, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// One quota reading for one endpoint.
///
/// # Example
///
/// ```
/// use chorus_core::RateLimitStatus;
///
/// let a = RateLimitStatus::new(180, 120, 1_700_000_900);
/// let b = RateLimitStatus::new(180, 90, 1_700_000_900);
/// assert_eq!(a.merge(b), b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct RateLimitStatus {
    /// Requests allowed per window
    limit: u32,
    /// Requests left in the current window
    remaining: u32,
    /// Unix epoch seconds when the window resets
    reset: i64,
}

impl RateLimitStatus {
    /// Build a reading.
    pub fn new(limit: u32, remaining: u32, reset: i64) -> Self {
        Self {
            limit,
            remaining,
            reset,
        }
    }

    /// Reset instant as a UTC timestamp.
    pub fn reset_time(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.reset, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// True when `self` shows no more remaining capacity than `other`.
    ///
    /// Lower `remaining` is more constrained; on equal `remaining` the
    /// earlier reset is more constrained.
    pub fn is_at_least_as_constrained_as(&self, other: &Self) -> bool {
        self.remaining < other.remaining
            || (self.remaining == other.remaining && self.reset <= other.reset)
    }

    /// Pessimistic merge: keep whichever reading is more constrained.
    pub fn merge(self, other: Self) -> Self {
        if other.is_at_least_as_constrained_as(&self) {
            other
        } else {
            self
        }
    }

    /// Pessimistic merge over optional readings.
    pub fn merge_opt(current: Option<Self>, observed: Option<Self>) -> Option<Self> {
        match (current, observed) {
            (Some(current), Some(observed)) => Some(current.merge(observed)),
            (current, observed) => current.or(observed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lower_remaining_wins() {
        let high = RateLimitStatus::new(15, 12, 1000);
        let low = RateLimitStatus::new(15, 3, 2000);
        assert_eq!(high.merge(low), low);
        assert_eq!(low.merge(high), low);
    }

    #[test]
    fn earlier_reset_wins_on_equal_remaining() {
        let early = RateLimitStatus::new(15, 5, 1000);
        let late = RateLimitStatus::new(15, 5, 2000);
        assert_eq!(late.merge(early), early);
        assert_eq!(early.merge(late), early);
    }

    #[test]
    fn merge_opt_fills_missing_side() {
        let status = RateLimitStatus::new(180, 170, 1000);
        assert_eq!(RateLimitStatus::merge_opt(None, Some(status)), Some(status));
        assert_eq!(RateLimitStatus::merge_opt(Some(status), None), Some(status));
        assert_eq!(RateLimitStatus::merge_opt(None, None), None);
    }

    #[test]
    fn reset_time_round_trips_epoch() {
        let status = RateLimitStatus::new(15, 15, 1_700_000_000);
        assert_eq!(status.reset_time().timestamp(), 1_700_000_000);
    }
}
