//! Core data types for the Chorus follower-timeline bot.
//!
//! This crate provides the typed API records, the follower-id set, posts,
//! timelines and quota readings shared by every other Chorus crate.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod ids;
mod post;
mod rate_limit;
mod records;
mod timeline;

pub use ids::{FollowerIds, UserId};
pub use post::{Author, Post, format_created_at, parse_created_at};
pub use rate_limit::RateLimitStatus;
pub use records::{
    FollowerIdPage, FollowerIdPageBuilder, QuotaStatus, TweetRecord, TweetRecordBuilder,
    UserRecord, UserRecordBuilder,
};
pub use timeline::Timeline;
