//! Concurrent fan-out/fan-in over follower batches.

use crate::{BatchLookupFetcher, FollowerIdFetcher, MAX_LOOKUP_IDS, TwitterClient};
use chorus_cache::IdCache;
use chorus_core::{Post, RateLimitStatus, Timeline, UserId};
use chorus_error::{ChorusResult, TaskError, ValidationError, ValidationErrorKind};
use chorus_rate_limit::{Endpoint, RateLimitTracker};
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

/// Worker pool sizing for timeline assembly.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
pub struct AssemblerConfig {
    /// Concurrent lookup workers
    #[serde(default = "default_workers")]
    #[builder(default = "default_workers()")]
    workers: usize,

    /// Ids per lookup call, at most 100
    #[serde(default = "default_batch_size")]
    #[builder(default = "default_batch_size()")]
    batch_size: usize,
}

fn default_workers() -> usize {
    5
}

fn default_batch_size() -> usize {
    MAX_LOOKUP_IDS
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            batch_size: default_batch_size(),
        }
    }
}

impl AssemblerConfig {
    /// Check the pool settings.
    ///
    /// # Errors
    ///
    /// Zero workers, a zero batch size, or a batch size above
    /// [`MAX_LOOKUP_IDS`] are rejected.
    pub fn validate(&self) -> ChorusResult<()> {
        if self.workers == 0 {
            return Err(ValidationError::new(ValidationErrorKind::OutOfRange {
                field: "workers".to_string(),
                reason: "must be at least 1".to_string(),
            })
            .into());
        }
        if self.batch_size == 0 || self.batch_size > MAX_LOOKUP_IDS {
            return Err(ValidationError::new(ValidationErrorKind::OutOfRange {
                field: "batch_size".to_string(),
                reason: format!("must be between 1 and {}", MAX_LOOKUP_IDS),
            })
            .into());
        }
        Ok(())
    }
}

type BatchReport = (Vec<Post>, Option<RateLimitStatus>);

/// Builds an account's follower timeline.
///
/// Follower ids come from a [`FollowerIdFetcher`]; they are split into
/// batches and looked up by a fixed pool of workers sharing one work queue.
/// The first failing batch cancels the rest and fails the whole assembly.
#[derive(Debug, Clone)]
pub struct TimelineAssembler {
    followers: FollowerIdFetcher,
    lookup: BatchLookupFetcher,
    tracker: RateLimitTracker,
    config: AssemblerConfig,
}

impl TimelineAssembler {
    /// Assemble from already built fetchers.
    ///
    /// # Errors
    ///
    /// Returns a validation error when `config` is out of range.
    pub fn new(
        followers: FollowerIdFetcher,
        lookup: BatchLookupFetcher,
        tracker: RateLimitTracker,
        config: AssemblerConfig,
    ) -> ChorusResult<Self> {
        config.validate()?;
        Ok(Self {
            followers,
            lookup,
            tracker,
            config,
        })
    }

    /// Build both fetchers over one client.
    ///
    /// # Errors
    ///
    /// Returns a validation error when `config` is out of range.
    pub fn from_client(
        client: TwitterClient,
        cache: Arc<IdCache>,
        tracker: RateLimitTracker,
        config: AssemblerConfig,
    ) -> ChorusResult<Self> {
        let followers = FollowerIdFetcher::new(client.clone(), cache, tracker.clone());
        let lookup = BatchLookupFetcher::new(client);
        Self::new(followers, lookup, tracker, config)
    }

    /// Shared quota tracker.
    pub fn tracker(&self) -> &RateLimitTracker {
        &self.tracker
    }

    /// Pool settings.
    pub fn config(&self) -> &AssemblerConfig {
        &self.config
    }

    /// Posts by `user_id`'s followers made after `latest_seen_at`, oldest
    /// first, with the most constrained lookup reading of the round.
    ///
    /// # Errors
    ///
    /// Fails when the follower ids cannot be fetched, when any batch lookup
    /// fails, or when a worker task dies. No partial timeline is returned.
    #[instrument(skip(self))]
    pub async fn assemble(
        &self,
        user_id: UserId,
        latest_seen_at: DateTime<Utc>,
    ) -> ChorusResult<(Timeline, Option<RateLimitStatus>)> {
        let (ids, _) = self.followers.fetch(user_id).await?;
        if ids.is_empty() {
            debug!("No followers, skipping lookups");
            return Ok((Timeline::default(), None));
        }

        let batches: Vec<Vec<UserId>> = ids
            .batches(self.config.batch_size)
            .map(<[UserId]>::to_vec)
            .collect();
        debug!(followers = ids.len(), batches = batches.len(), "Dispatching lookups");

        let (posts, rate_limit) = self.fan_out(batches, latest_seen_at).await?;
        let timeline = Timeline::from_unsorted(posts);
        info!(posts = timeline.len(), "Assembled timeline");
        Ok((timeline, rate_limit))
    }

    async fn fan_out(
        &self,
        batches: Vec<Vec<UserId>>,
        latest_seen_at: DateTime<Utc>,
    ) -> ChorusResult<BatchReport> {
        let total = batches.len();
        let workers = self.config.workers.min(total);
        let cancel = CancellationToken::new();

        let (work_tx, work_rx) = mpsc::channel::<Vec<UserId>>(workers);
        let work_rx = Arc::new(Mutex::new(work_rx));
        let (results_tx, mut results_rx) = mpsc::channel::<ChorusResult<BatchReport>>(workers);

        let mut tasks = JoinSet::new();
        tasks.spawn(feed(batches, work_tx, cancel.clone()));
        for worker in 0..workers {
            tasks.spawn(lookup_worker(
                worker,
                Arc::clone(&work_rx),
                results_tx.clone(),
                cancel.clone(),
                self.lookup.clone(),
                self.tracker.clone(),
                latest_seen_at,
            ));
        }
        drop(results_tx);

        let outcome = collect(&mut results_rx, total, &cancel).await;

        drop(results_rx);
        cancel.cancel();
        let joined = join_all(&mut tasks).await;

        let report = outcome?;
        joined?;
        Ok(report)
    }
}

/// Enqueue every batch, then close the queue by dropping the sender.
async fn feed(
    batches: Vec<Vec<UserId>>,
    work_tx: mpsc::Sender<Vec<UserId>>,
    cancel: CancellationToken,
) {
    for batch in batches {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            sent = work_tx.send(batch) => {
                if sent.is_err() {
                    break;
                }
            }
        }
    }
}

async fn next_batch(work_rx: &Mutex<mpsc::Receiver<Vec<UserId>>>) -> Option<Vec<UserId>> {
    work_rx.lock().await.recv().await
}

async fn lookup_worker(
    worker: usize,
    work_rx: Arc<Mutex<mpsc::Receiver<Vec<UserId>>>>,
    results_tx: mpsc::Sender<ChorusResult<BatchReport>>,
    cancel: CancellationToken,
    lookup: BatchLookupFetcher,
    tracker: RateLimitTracker,
    latest_seen_at: DateTime<Utc>,
) {
    loop {
        let batch = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            batch = next_batch(&work_rx) => batch,
        };
        let Some(batch) = batch else {
            break;
        };

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            result = lookup.lookup(&batch, latest_seen_at) => result,
        };
        if let Ok((_, status)) = &result {
            tracker.record_opt(Endpoint::UsersLookup, *status);
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            sent = results_tx.send(result) => {
                if sent.is_err() {
                    break;
                }
            }
        }
    }
    debug!(worker, "Lookup worker finished");
}

/// Drain batch results until every batch has reported or one fails.
async fn collect(
    results_rx: &mut mpsc::Receiver<ChorusResult<BatchReport>>,
    total: usize,
    cancel: &CancellationToken,
) -> ChorusResult<BatchReport> {
    let mut posts = Vec::new();
    let mut rate_limit = None;
    let mut reported = 0;

    while reported < total {
        match results_rx.recv().await {
            Some(Ok((batch_posts, status))) => {
                posts.extend(batch_posts);
                rate_limit = RateLimitStatus::merge_opt(rate_limit, status);
                reported += 1;
            }
            Some(Err(e)) => {
                warn!(error = %e, reported, total, "Batch lookup failed, cancelling");
                cancel.cancel();
                return Err(e);
            }
            None => break,
        }
    }

    if reported < total {
        return Err(TaskError::new(format!(
            "Only {} of {} batches reported",
            reported, total
        ))
        .into());
    }
    Ok((posts, rate_limit))
}

async fn join_all(tasks: &mut JoinSet<()>) -> ChorusResult<()> {
    let mut failure = None;
    while let Some(joined) = tasks.join_next().await {
        if let Err(e) = joined {
            warn!(error = %e, "Assembly task did not complete");
            failure.get_or_insert_with(|| TaskError::new(format!("Assembly task failed: {}", e)));
        }
    }
    match failure {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}
