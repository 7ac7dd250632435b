//! Posts attached to their authors.

use crate::{TweetRecord, UserId, UserRecord};
use chorus_error::{ChorusResult, TimestampError};
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::Serialize;

/// Wire format of `created_at` values.
const CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Parse an API `created_at` value into UTC.
///
/// # Example
///
/// ```
/// use chorus_core::parse_created_at;
///
/// let at = parse_created_at("Wed Oct 10 20:19:24 +0000 2018").unwrap();
/// assert_eq!(at.timestamp(), 1_539_202_764);
/// ```
pub fn parse_created_at(value: &str) -> ChorusResult<DateTime<Utc>> {
    DateTime::parse_from_str(value, CREATED_AT_FORMAT)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| TimestampError::new(value, e.to_string()).into())
}

/// Render a UTC instant in the API's `created_at` format.
pub fn format_created_at(at: &DateTime<Utc>) -> String {
    at.format(CREATED_AT_FORMAT).to_string()
}

/// Snapshot of the account that wrote a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct Author {
    /// Numeric user id
    id: UserId,
    /// Handle without `@`
    screen_name: String,
    /// Display name
    name: String,
}

impl From<&UserRecord> for Author {
    fn from(user: &UserRecord) -> Self {
        Self {
            id: *user.id(),
            screen_name: user.screen_name().clone(),
            name: user.name().clone(),
        }
    }
}

/// A follower's post, ready for ordering and reaction.
///
/// Constructed once from an API record and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Getters)]
pub struct Post {
    /// Numeric post id
    id: u64,
    /// Post id as a string
    id_str: String,
    /// Parsed creation time
    created_at: DateTime<Utc>,
    /// Post body
    text: String,
    /// Who wrote it
    author: Author,
    /// Like count
    favorite_count: u64,
    /// Repost count
    retweet_count: u64,
    /// Detected language
    lang: Option<String>,
    /// Parent post id when this is a reply
    in_reply_to_status_id_str: Option<String>,
}

impl Post {
    /// Build a post from its wire record and author.
    ///
    /// # Errors
    ///
    /// Returns a timestamp error when `created_at` is not in RubyDate form.
    pub fn from_record(record: &TweetRecord, author: Author) -> ChorusResult<Self> {
        Ok(Self {
            id: *record.id(),
            id_str: record.id_str().clone(),
            created_at: parse_created_at(record.created_at())?,
            text: record.text().clone(),
            author,
            favorite_count: *record.favorite_count(),
            retweet_count: *record.retweet_count(),
            lang: record.lang().clone(),
            in_reply_to_status_id_str: record.in_reply_to_status_id_str().clone(),
        })
    }

    /// True when the post is a reply to another post.
    pub fn is_reply(&self) -> bool {
        self.in_reply_to_status_id_str.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TweetRecordBuilder, UserRecordBuilder};
    use chorus_error::ChorusErrorKind;
    use chrono::TimeZone;

    #[test]
    fn format_and_parse_agree() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        let text = format_created_at(&at);
        assert_eq!(text, "Sat Mar 09 07:05:01 +0000 2024");
        assert_eq!(parse_created_at(&text).unwrap(), at);
    }

    #[test]
    fn offsets_are_normalised_to_utc() {
        let at = parse_created_at("Mon Jan 02 15:04:05 -0700 2006").unwrap();
        assert_eq!(at, Utc.with_ymd_and_hms(2006, 1, 2, 22, 4, 5).unwrap());
    }

    #[test]
    fn bad_timestamp_is_a_timestamp_error() {
        let record = TweetRecordBuilder::default()
            .created_at("2024-03-09T07:05:01Z")
            .build()
            .unwrap();
        let user = UserRecordBuilder::default().id(7u64).build().unwrap();
        let err = Post::from_record(&record, Author::from(&user)).unwrap_err();
        assert!(matches!(err.kind(), ChorusErrorKind::Timestamp(_)));
    }

    #[test]
    fn post_carries_author_snapshot() {
        let record = TweetRecordBuilder::default()
            .created_at("Sat Mar 09 07:05:01 +0000 2024")
            .id(99u64)
            .text("hello")
            .build()
            .unwrap();
        let user = UserRecordBuilder::default()
            .id(7u64)
            .screen_name("alice")
            .build()
            .unwrap();
        let post = Post::from_record(&record, Author::from(&user)).unwrap();
        assert_eq!(post.author().screen_name(), "alice");
        assert_eq!(*post.id(), 99);
        assert!(!post.is_reply());
    }
}
