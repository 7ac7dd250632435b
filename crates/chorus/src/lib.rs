//! Chorus - follower-timeline bot
//!
//! Chorus polls a social-graph REST API on behalf of one account, assembles a
//! chronologically ordered timeline of the latest posts by that account's
//! followers, hands each new post to a reaction, and paces itself so the
//! remaining request quota lasts until the window resets.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use chorus::{Post, run_polling_loop};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let reaction = |post: &Post| {
//!         post.text().contains("launch").then(|| format!("Congrats @{}!", post.author().screen_name()))
//!     };
//!     run_polling_loop(783214, reaction).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `chorus_error` - Error types
//! - `chorus_core` - API records, posts, timelines, quota readings
//! - `chorus_interface` - `Transport` and `Reaction` traits
//! - `chorus_rate_limit` - Quota tracking and adaptive pacing
//! - `chorus_cache` - Follower-id cache with sampling
//! - `chorus_social` - Follower fetch, batch lookup and concurrent assembly
//! - `chorus_bot` - Configuration, reactions and the polling loop
//!
//! This crate re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub use chorus_error::{
    ChorusError, ChorusErrorKind, ChorusResult, ConfigError, HttpError, HttpErrorKind, JsonError,
    TaskError, TimestampError, ValidationError, ValidationErrorKind,
};

pub use chorus_core::{
    Author, FollowerIdPage, FollowerIds, Post, QuotaStatus, RateLimitStatus, Timeline,
    TweetRecord, UserId, UserRecord, format_created_at, parse_created_at,
};

pub use chorus_interface::{ApiRequest, ApiResponse, HttpMethod, Reaction, Transport};

pub use chorus_rate_limit::{
    Endpoint, MIN_WAIT_SECS, RateLimitTracker, detect_rate_limit, wait_seconds,
};

pub use chorus_cache::{IdCache, IdCacheConfig};

pub use chorus_social::{
    AssemblerConfig, BatchLookupFetcher, FollowerIdFetcher, HttpTransport, HttpTransportConfig,
    MAX_LOOKUP_IDS, TimelineAssembler, TwitterClient,
};

pub use chorus_bot::{
    BEARER_TOKEN_ENV, BotConfig, KeywordReaction, KeywordRule, PollingLoop, Reply, RoundReport,
    run_polling_loop, run_polling_loop_with_config,
};
