//! Paginated follower-id fetching behind the id cache.

use crate::TwitterClient;
use chorus_cache::IdCache;
use chorus_core::{FollowerIdPage, FollowerIds, RateLimitStatus, UserId};
use chorus_error::ChorusResult;
use chorus_interface::ApiRequest;
use chorus_rate_limit::{Endpoint, RateLimitTracker};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Ids requested per `followers/ids` page.
pub const FOLLOWER_PAGE_SIZE: usize = 5000;

/// Fetches an account's follower ids, consulting the cache first.
#[derive(Debug, Clone)]
pub struct FollowerIdFetcher {
    client: TwitterClient,
    cache: Arc<IdCache>,
    tracker: RateLimitTracker,
    cache_ttl: Duration,
}

impl FollowerIdFetcher {
    /// Create a fetcher. Page readings are folded into `tracker`.
    pub fn new(client: TwitterClient, cache: Arc<IdCache>, tracker: RateLimitTracker) -> Self {
        Self {
            client,
            cache,
            tracker,
            cache_ttl: Duration::ZERO,
        }
    }

    /// TTL for freshly fetched ids. Zero uses the cache's default.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// The cache this fetcher populates.
    pub fn cache(&self) -> &Arc<IdCache> {
        &self.cache
    }

    /// Follower ids for `user_id`, sampled by the cache.
    ///
    /// A cache hit costs no request and carries no quota reading. A miss
    /// walks every page, caches the complete set and returns a sample of it
    /// with the most constrained page reading.
    ///
    /// # Errors
    ///
    /// Any failing page aborts the fetch; nothing is cached.
    #[instrument(skip(self))]
    pub async fn fetch(
        &self,
        user_id: UserId,
    ) -> ChorusResult<(FollowerIds, Option<RateLimitStatus>)> {
        if let Some(ids) = self.cache.pick_ids() {
            debug!(count = ids.len(), "Using cached follower ids");
            return Ok((ids, None));
        }

        let (ids, rate_limit) = self.fetch_all(user_id).await?;
        info!(count = ids.len(), "Fetched follower ids");

        self.cache.set_ids(ids.clone(), self.cache_ttl);
        let picked = self.cache.pick_ids().unwrap_or(ids);
        Ok((picked, rate_limit))
    }

    async fn fetch_all(
        &self,
        user_id: UserId,
    ) -> ChorusResult<(FollowerIds, Option<RateLimitStatus>)> {
        let mut ids = FollowerIds::new();
        let mut rate_limit = None;
        let mut cursor: Option<String> = None;

        loop {
            let mut request = ApiRequest::get(Endpoint::FollowersIds.path())
                .param("user_id", user_id.to_string())
                .param("count", FOLLOWER_PAGE_SIZE.to_string());
            if let Some(cursor) = &cursor {
                request = request.param("cursor", cursor.clone());
            }

            let (page, status): (FollowerIdPage, _) = self.client.request(&request).await?;
            self.tracker.record_opt(Endpoint::FollowersIds, status);
            rate_limit = RateLimitStatus::merge_opt(rate_limit, status);

            debug!(
                page_ids = page.ids().len(),
                next_cursor = %page.next_cursor_str(),
                "Fetched follower page"
            );

            if page.is_last() {
                ids.extend_unique(page.into_ids());
                break;
            }
            cursor = Some(page.next_cursor_str().clone());
            ids.extend_unique(page.into_ids());
        }

        Ok((ids, rate_limit))
    }
}
