//! Per-endpoint quota readings shared across concurrent fetchers.

use crate::{Endpoint, MIN_WAIT_SECS, wait_seconds};
use chorus_core::RateLimitStatus;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

#[derive(Debug, Clone, Copy, Default)]
struct Readings {
    current: Option<RateLimitStatus>,
    previous: Option<RateLimitStatus>,
}

/// Keeps the most constrained quota reading per endpoint for the current
/// round, plus the reading the previous round ended with.
///
/// Cloning shares the underlying state, so one tracker can be handed to every
/// worker. [`record`](Self::record) compares and merges under a single lock,
/// so concurrent observations never overwrite a more constrained reading.
#[derive(Debug, Clone, Default)]
pub struct RateLimitTracker {
    readings: Arc<Mutex<HashMap<Endpoint, Readings>>>,
}

impl RateLimitTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold an observation into the current round.
    ///
    /// The stored reading is replaced only when `status` is at least as
    /// constrained. Returns whether it was replaced.
    #[instrument(skip(self))]
    pub fn record(&self, endpoint: Endpoint, status: RateLimitStatus) -> bool {
        let mut readings = self.readings.lock();
        let entry = readings.entry(endpoint).or_default();
        let accepted = match entry.current {
            Some(current) => status.is_at_least_as_constrained_as(&current),
            None => true,
        };
        if accepted {
            entry.current = Some(status);
        }
        debug!(accepted, "Recorded rate limit observation");
        accepted
    }

    /// Fold an optional observation; `None` is ignored.
    pub fn record_opt(&self, endpoint: Endpoint, status: Option<RateLimitStatus>) {
        if let Some(status) = status {
            self.record(endpoint, status);
        }
    }

    /// Most constrained reading seen this round.
    pub fn current(&self, endpoint: Endpoint) -> Option<RateLimitStatus> {
        self.readings.lock().get(&endpoint).and_then(|r| r.current)
    }

    /// Reading the previous round ended with.
    pub fn previous(&self, endpoint: Endpoint) -> Option<RateLimitStatus> {
        self.readings.lock().get(&endpoint).and_then(|r| r.previous)
    }

    /// Close the round: the current reading becomes the previous one.
    ///
    /// A round without observations keeps the old previous reading so the
    /// next comparison still has a baseline.
    #[instrument(skip(self))]
    pub fn begin_round(&self, endpoint: Endpoint) {
        let mut readings = self.readings.lock();
        if let Some(entry) = readings.get_mut(&endpoint)
            && let Some(current) = entry.current.take()
        {
            entry.previous = Some(current);
            debug!(remaining = current.remaining(), "Rotated rate limit reading");
        }
    }

    /// How long to wait before polling `endpoint` again.
    ///
    /// Falls back to [`MIN_WAIT_SECS`] when either reading is missing.
    pub fn wait_duration(&self, endpoint: Endpoint, now: DateTime<Utc>) -> Duration {
        let Readings { current, previous } =
            self.readings.lock().get(&endpoint).copied().unwrap_or_default();

        let secs = match (previous, current) {
            (Some(previous), Some(current)) => wait_seconds(&previous, &current, now.timestamp()),
            _ => MIN_WAIT_SECS,
        };
        debug!(%endpoint, secs, "Computed wait before next round");
        Duration::from_secs(secs)
    }
}
