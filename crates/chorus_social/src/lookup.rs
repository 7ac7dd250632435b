//! Batched user lookup and recency filtering.

use crate::TwitterClient;
use chorus_core::{Author, Post, RateLimitStatus, UserId, UserRecord};
use chorus_error::{ChorusResult, ValidationError, ValidationErrorKind};
use chorus_interface::ApiRequest;
use chorus_rate_limit::Endpoint;
use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

/// Most ids `users/lookup` accepts in one call.
pub const MAX_LOOKUP_IDS: usize = 100;

/// Resolves ids to users and keeps each user's latest post when it is recent.
#[derive(Debug, Clone)]
pub struct BatchLookupFetcher {
    client: TwitterClient,
}

impl BatchLookupFetcher {
    /// Create a fetcher.
    pub fn new(client: TwitterClient) -> Self {
        Self { client }
    }

    /// Latest posts of `ids` created strictly after `latest_seen_at`.
    ///
    /// Users without a post, or whose post is not newer than the cutoff, are
    /// skipped. An empty batch returns immediately.
    ///
    /// # Errors
    ///
    /// - more than [`MAX_LOOKUP_IDS`] ids fails before any request is sent
    /// - request, status and decode failures from the client
    /// - an unparsable `created_at` on any returned post
    #[instrument(skip(self, ids), fields(batch = ids.len()))]
    pub async fn lookup(
        &self,
        ids: &[UserId],
        latest_seen_at: DateTime<Utc>,
    ) -> ChorusResult<(Vec<Post>, Option<RateLimitStatus>)> {
        if ids.len() > MAX_LOOKUP_IDS {
            return Err(ValidationError::new(ValidationErrorKind::TooManyIds {
                count: ids.len(),
                max: MAX_LOOKUP_IDS,
            })
            .into());
        }
        if ids.is_empty() {
            return Ok((Vec::new(), None));
        }

        let joined = ids
            .iter()
            .map(UserId::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let request = ApiRequest::post(Endpoint::UsersLookup.path()).param("user_id", joined);

        let (users, rate_limit): (Vec<UserRecord>, _) = self.client.request(&request).await?;

        let mut posts = Vec::new();
        for user in &users {
            let Some(record) = user.status() else {
                continue;
            };
            let post = Post::from_record(record, Author::from(user))?;
            if *post.created_at() > latest_seen_at {
                posts.push(post);
            }
        }

        debug!(users = users.len(), recent = posts.len(), "Looked up batch");
        Ok((posts, rate_limit))
    }
}
