//! Chronologically ordered posts.

use crate::Post;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Posts sorted ascending by creation time.
///
/// The only way to build one is [`Timeline::from_unsorted`], so the order
/// invariant always holds.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Timeline(Vec<Post>);

impl Timeline {
    /// Sort posts by creation time (stable) and wrap them.
    pub fn from_unsorted(mut posts: Vec<Post>) -> Self {
        posts.sort_by_key(|post| *post.created_at());
        Self(posts)
    }

    /// Creation time of the newest post.
    pub fn latest_created_at(&self) -> Option<DateTime<Utc>> {
        self.0.last().map(|post| *post.created_at())
    }

    /// Posts in order.
    pub fn posts(&self) -> &[Post] {
        &self.0
    }

    /// Iterate posts oldest first.
    pub fn iter(&self) -> std::slice::Iter<'_, Post> {
        self.0.iter()
    }

    /// Number of posts.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no posts qualified.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Unwrap into the sorted vector.
    pub fn into_posts(self) -> Vec<Post> {
        self.0
    }
}

impl IntoIterator for Timeline {
    type Item = Post;
    type IntoIter = std::vec::IntoIter<Post>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a Post;
    type IntoIter = std::slice::Iter<'a, Post>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
