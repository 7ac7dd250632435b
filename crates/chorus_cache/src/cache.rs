//! Follower-id cache implementation.

use chorus_core::FollowerIds;
use derive_getters::Getters;
use parking_lot::Mutex;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Stored id set with its expiration.
#[derive(Debug, Clone, Getters)]
pub struct CacheEntry {
    ids: FollowerIds,
    created_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    /// Check if this entry is expired.
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.ttl
    }

    /// Get remaining time until expiration.
    pub fn time_remaining(&self) -> Option<Duration> {
        self.ttl.checked_sub(self.created_at.elapsed())
    }
}

/// Configuration for the follower-id cache.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
pub struct IdCacheConfig {
    /// TTL used when `set_ids` is given a zero duration (seconds)
    #[serde(default = "default_ttl_secs")]
    #[builder(default = "default_ttl_secs()")]
    default_ttl_secs: u64,

    /// Maximum number of ids returned by `pick_ids`
    #[serde(default = "default_max_pick")]
    #[builder(default = "default_max_pick()")]
    max_pick: usize,
}

fn default_ttl_secs() -> u64 {
    900 // 15 minutes
}

fn default_max_pick() -> usize {
    1000
}

impl Default for IdCacheConfig {
    fn default() -> Self {
        Self {
            default_ttl_secs: default_ttl_secs(),
            max_pick: default_max_pick(),
        }
    }
}

/// Cache for one account's follower ids.
///
/// Reads and writes take the same lock, so a reader never sees ids from one
/// write paired with the expiry of another.
///
/// # Example
///
/// ```
/// use chorus_cache::{IdCache, IdCacheConfig};
/// use chorus_core::FollowerIds;
/// use std::time::Duration;
///
/// let cache = IdCache::new(IdCacheConfig::default());
/// assert!(cache.pick_ids().is_none());
///
/// cache.set_ids(FollowerIds::from(vec![100, 200, 300]), Duration::ZERO);
/// let picked = cache.pick_ids().unwrap();
/// assert_eq!(picked.len(), 3);
/// ```
#[derive(Debug)]
pub struct IdCache {
    config: IdCacheConfig,
    entry: Mutex<Option<CacheEntry>>,
}

impl IdCache {
    /// Create an empty cache.
    pub fn new(config: IdCacheConfig) -> Self {
        tracing::debug!(
            default_ttl_secs = config.default_ttl_secs,
            max_pick = config.max_pick,
            "Creating new IdCache"
        );
        Self {
            config,
            entry: Mutex::new(None),
        }
    }

    /// Cache configuration.
    pub fn config(&self) -> &IdCacheConfig {
        &self.config
    }

    /// Replace the stored ids.
    ///
    /// A zero `ttl` uses the configured default.
    #[tracing::instrument(skip(self, ids), fields(count = ids.len()))]
    pub fn set_ids(&self, ids: FollowerIds, ttl: Duration) {
        let ttl = if ttl.is_zero() {
            Duration::from_secs(self.config.default_ttl_secs)
        } else {
            ttl
        };

        *self.entry.lock() = Some(CacheEntry {
            ids,
            created_at: Instant::now(),
            ttl,
        });
        tracing::debug!(ttl = ?ttl, "Stored follower ids");
    }

    /// Every stored id in stored order, or `None` when absent or expired.
    pub fn get_ids(&self) -> Option<FollowerIds> {
        self.live_entry().map(|entry| entry.ids)
    }

    /// A shuffled subset of at most `max_pick` ids, or `None` when absent or
    /// expired.
    #[tracing::instrument(skip(self))]
    pub fn pick_ids(&self) -> Option<FollowerIds> {
        let entry = self.live_entry()?;
        let time_remaining = entry.time_remaining();

        let mut ids = entry.ids.into_inner();
        ids.shuffle(&mut rand::thread_rng());
        ids.truncate(self.config.max_pick);

        tracing::debug!(
            picked = ids.len(),
            time_remaining = ?time_remaining,
            "Cache hit"
        );
        Some(FollowerIds::from(ids))
    }

    /// Remaining lifetime of the stored ids.
    pub fn time_remaining(&self) -> Option<Duration> {
        self.live_entry()?.time_remaining()
    }

    /// Number of stored ids (zero when absent or expired).
    pub fn len(&self) -> usize {
        self.live_entry().map(|entry| entry.ids.len()).unwrap_or(0)
    }

    /// True when nothing usable is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop the stored ids.
    pub fn clear(&self) {
        *self.entry.lock() = None;
        tracing::info!("Cleared follower id cache");
    }

    /// Snapshot of the entry if it has not expired. Expired entries are
    /// dropped.
    fn live_entry(&self) -> Option<CacheEntry> {
        let mut slot = self.entry.lock();
        match slot.as_ref() {
            Some(entry) if entry.is_expired() => {
                tracing::debug!("Cache entry expired, removing");
                *slot = None;
                None
            }
            Some(entry) => Some(entry.clone()),
            None => None,
        }
    }
}

impl Default for IdCache {
    fn default() -> Self {
        Self::new(IdCacheConfig::default())
    }
}
