//! Follower-id caching with TTL and randomized sampling.
//!
//! Fetching the full follower list costs one request per 5000 ids, so the
//! list is kept for a while. Each read hands back a shuffled, size-capped
//! subset so that large accounts rotate through their followers across
//! polling rounds instead of always looking up the same prefix.

#![warn(missing_docs)]

mod cache;

pub use cache::{CacheEntry, IdCache, IdCacheConfig, IdCacheConfigBuilder};
