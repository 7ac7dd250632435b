//! Typed API payloads.
//!
//! These mirror the JSON shapes returned by the REST endpoints Chorus calls.
//! Required fields fail decoding when absent; everything else defaults.

use crate::{RateLimitStatus, UserId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A post as embedded in a user record.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct TweetRecord {
    /// Creation time in RubyDate form (`Mon Jan 02 15:04:05 +0000 2006`)
    created_at: String,
    /// Numeric post id
    #[serde(default)]
    #[builder(default)]
    id: u64,
    /// Post id as a string
    #[serde(default)]
    #[builder(default)]
    id_str: String,
    /// Post body
    #[serde(default)]
    #[builder(default)]
    text: String,
    /// Like count
    #[serde(default)]
    #[builder(default)]
    favorite_count: u64,
    /// Repost count
    #[serde(default)]
    #[builder(default)]
    retweet_count: u64,
    /// Whether the authenticated account liked it
    #[serde(default)]
    #[builder(default)]
    favorited: bool,
    /// Whether the authenticated account reposted it
    #[serde(default)]
    #[builder(default)]
    retweeted: bool,
    /// Detected language
    #[serde(default)]
    #[builder(default)]
    lang: Option<String>,
    /// Client that created the post
    #[serde(default)]
    #[builder(default)]
    source: Option<String>,
    /// Parent post id when this is a reply
    #[serde(default)]
    #[builder(default)]
    in_reply_to_status_id_str: Option<String>,
    /// Parent author when this is a reply
    #[serde(default)]
    #[builder(default)]
    in_reply_to_screen_name: Option<String>,
}

/// A user as returned by `users/lookup`.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct UserRecord {
    /// Numeric user id
    id: UserId,
    /// User id as a string
    #[serde(default)]
    #[builder(default)]
    id_str: String,
    /// Handle without `@`
    #[serde(default)]
    #[builder(default)]
    screen_name: String,
    /// Display name
    #[serde(default)]
    #[builder(default)]
    name: String,
    /// Follower count
    #[serde(default)]
    #[builder(default)]
    followers_count: u64,
    /// Following count
    #[serde(default)]
    #[builder(default)]
    friends_count: u64,
    /// Lifetime post count
    #[serde(default)]
    #[builder(default)]
    statuses_count: u64,
    /// Protected account
    #[serde(default)]
    #[builder(default)]
    protected: bool,
    /// Verified account
    #[serde(default)]
    #[builder(default)]
    verified: bool,
    /// Most recent post, absent for accounts that never posted
    #[serde(default)]
    #[builder(default, setter(strip_option))]
    status: Option<TweetRecord>,
}

/// One page of `followers/ids`.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct FollowerIdPage {
    /// Follower ids on this page
    ids: Vec<UserId>,
    /// Cursor for the next page, `"0"` on the last page
    next_cursor_str: String,
    /// Cursor for the previous page
    #[serde(default)]
    #[builder(default = "\"0\".to_string()")]
    previous_cursor_str: String,
}

impl FollowerIdPage {
    /// Cursor value that marks the final page.
    pub const LAST_CURSOR: &'static str = "0";

    /// True when no further pages follow.
    pub fn is_last(&self) -> bool {
        self.next_cursor_str == Self::LAST_CURSOR
    }

    /// Take the ids out of the page.
    pub fn into_ids(self) -> Vec<UserId> {
        self.ids
    }
}

/// Payload of `application/rate_limit_status`.
///
/// Resources are grouped by family (`users`, `followers`, ...) and keyed by
/// endpoint path (`/users/lookup`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuotaStatus {
    /// Readings by family, then endpoint path
    #[serde(default)]
    pub resources: HashMap<String, HashMap<String, RateLimitStatus>>,
}

impl QuotaStatus {
    /// Reading for one endpoint path within a family.
    pub fn get(&self, family: &str, path: &str) -> Option<RateLimitStatus> {
        self.resources.get(family)?.get(path).copied()
    }
}
