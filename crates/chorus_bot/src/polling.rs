//! The polling loop.

use crate::{BotConfig, KeywordReaction};
use chorus_cache::IdCache;
use chorus_core::{Post, RateLimitStatus, Timeline, UserId};
use chorus_error::ChorusResult;
use chorus_interface::{Reaction, Transport};
use chorus_rate_limit::{Endpoint, RateLimitTracker};
use chorus_social::{HttpTransport, TimelineAssembler, TwitterClient};
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Endpoint whose quota paces the loop.
const PACING_ENDPOINT: Endpoint = Endpoint::UsersLookup;

/// A reply produced by the reaction for one post.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Reply {
    /// Post being answered
    post_id: u64,
    /// Screen name of the post's author
    author: String,
    /// Reply text
    text: String,
}

impl Reply {
    fn for_post(post: &Post, text: String) -> Self {
        Self {
            post_id: *post.id(),
            author: post.author().screen_name().clone(),
            text,
        }
    }
}

/// Outcome of one polling round.
#[derive(Debug, Clone, Getters)]
pub struct RoundReport {
    /// New posts, oldest first
    posts: Timeline,
    /// Replies, in timeline order
    replies: Vec<Reply>,
    /// Most constrained lookup reading this round
    rate_limit: Option<RateLimitStatus>,
    /// Pause before the next round
    wait: Duration,
}

/// Repeatedly assembles an account's follower timeline and reacts to it.
pub struct PollingLoop {
    account_id: UserId,
    client: TwitterClient,
    assembler: TimelineAssembler,
    reaction: Arc<dyn Reaction>,
    latest_seen_at: DateTime<Utc>,
}

impl std::fmt::Debug for PollingLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollingLoop")
            .field("account_id", &self.account_id)
            .field("latest_seen_at", &self.latest_seen_at)
            .finish_non_exhaustive()
    }
}

impl PollingLoop {
    /// Create a loop that reacts only to posts made from now on.
    pub fn new(
        account_id: UserId,
        client: TwitterClient,
        assembler: TimelineAssembler,
        reaction: impl Reaction + 'static,
    ) -> Self {
        Self {
            account_id,
            client,
            assembler,
            reaction: Arc::new(reaction),
            latest_seen_at: Utc::now(),
        }
    }

    /// Build the client, cache, tracker and assembler from configuration.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the assembler settings are out of
    /// range.
    pub fn from_config(
        account_id: UserId,
        config: &BotConfig,
        transport: impl Transport + 'static,
        reaction: impl Reaction + 'static,
    ) -> ChorusResult<Self> {
        let client = TwitterClient::new(transport);
        let assembler = TimelineAssembler::from_client(
            client.clone(),
            Arc::new(IdCache::new(config.cache.clone())),
            RateLimitTracker::new(),
            config.assembler,
        )?;
        Ok(Self::new(account_id, client, assembler, reaction))
    }

    /// Start from a different cutoff.
    pub fn with_latest_seen_at(mut self, latest_seen_at: DateTime<Utc>) -> Self {
        self.latest_seen_at = latest_seen_at;
        self
    }

    /// Creation time of the newest post seen so far.
    pub fn latest_seen_at(&self) -> DateTime<Utc> {
        self.latest_seen_at
    }

    /// Shared quota tracker.
    pub fn tracker(&self) -> &RateLimitTracker {
        self.assembler.tracker()
    }

    /// Record the current lookup quota as the pacing baseline.
    ///
    /// A response without a lookup entry is logged and leaves the tracker
    /// empty, so the first wait falls back to the floor.
    ///
    /// # Errors
    ///
    /// Request and decode failures of the quota query.
    #[instrument(skip(self), fields(account_id = self.account_id))]
    pub async fn prime(&self) -> ChorusResult<Option<RateLimitStatus>> {
        let (quota, _) = self
            .client
            .rate_limit_status(&[PACING_ENDPOINT.family()])
            .await?;

        let baseline = quota.get(PACING_ENDPOINT.family(), PACING_ENDPOINT.path());
        match baseline {
            Some(status) => {
                let tracker = self.tracker();
                tracker.record(PACING_ENDPOINT, status);
                tracker.begin_round(PACING_ENDPOINT);
                info!(
                    limit = status.limit(),
                    remaining = status.remaining(),
                    reset = %status.reset_time(),
                    "Primed rate limit baseline"
                );
            }
            None => warn!(endpoint = %PACING_ENDPOINT, "No baseline quota reported"),
        }
        Ok(baseline)
    }

    /// One assembly and reaction pass.
    ///
    /// # Errors
    ///
    /// Any assembly failure. The cutoff is left unchanged.
    #[instrument(skip(self), fields(account_id = self.account_id, since = %self.latest_seen_at))]
    pub async fn run_round(&mut self) -> ChorusResult<RoundReport> {
        let (posts, rate_limit) = self
            .assembler
            .assemble(self.account_id, self.latest_seen_at)
            .await?;

        let mut replies = Vec::new();
        for post in &posts {
            if let Some(text) = self.reaction.react(post) {
                info!(
                    post_id = post.id(),
                    author = %post.author().screen_name(),
                    reply = %text,
                    "Replying"
                );
                replies.push(Reply::for_post(post, text));
            }
        }

        if let Some(latest) = posts.latest_created_at() {
            self.latest_seen_at = latest;
        }

        let tracker = self.tracker();
        let wait = tracker.wait_duration(PACING_ENDPOINT, Utc::now());
        tracker.begin_round(PACING_ENDPOINT);

        info!(
            posts = posts.len(),
            replies = replies.len(),
            wait_secs = wait.as_secs(),
            "Round complete"
        );
        Ok(RoundReport {
            posts,
            replies,
            rate_limit,
            wait,
        })
    }

    /// Prime, then poll until a round fails.
    ///
    /// # Errors
    ///
    /// The first priming or round failure ends the loop.
    pub async fn run(mut self) -> ChorusResult<Infallible> {
        self.prime().await?;
        loop {
            let report = self.run_round().await?;
            debug!(wait = ?report.wait, "Sleeping until next round");
            tokio::time::sleep(report.wait).await;
        }
    }
}

/// Poll `account_id` with layered configuration until a fatal error.
///
/// # Errors
///
/// Configuration, transport construction and round failures.
pub async fn run_polling_loop(
    account_id: UserId,
    reaction: impl Reaction + 'static,
) -> ChorusResult<Infallible> {
    let config = BotConfig::load()?;
    run_polling_loop_with_config(account_id, &config, reaction).await
}

/// Poll `account_id` over HTTP with the given configuration.
///
/// When `config` carries keyword rules and `reaction` declines a post, the
/// keyword rules get a chance to answer it.
///
/// # Errors
///
/// Transport construction and round failures.
pub async fn run_polling_loop_with_config(
    account_id: UserId,
    config: &BotConfig,
    reaction: impl Reaction + 'static,
) -> ChorusResult<Infallible> {
    let transport = HttpTransport::new(config.api.clone())?;
    let keywords = KeywordReaction::new(config.reactions.clone());
    let combined = move |post: &Post| reaction.react(post).or_else(|| keywords.react(post));
    PollingLoop::from_config(account_id, config, transport, combined)?
        .run()
        .await
}
