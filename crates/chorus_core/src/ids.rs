//! Follower identifiers.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Numeric account identifier.
pub type UserId = u64;

/// Ordered, duplicate-free set of follower ids.
///
/// Order is the order ids were first seen (pagination order), not numeric
/// order.
///
/// # Example
///
/// ```
/// use chorus_core::FollowerIds;
///
/// let ids = FollowerIds::from(vec![3, 1, 3, 2]);
/// assert_eq!(ids.as_slice(), &[3, 1, 2]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<UserId>", into = "Vec<UserId>")]
pub struct FollowerIds(Vec<UserId>);

impl FollowerIds {
    /// Empty set.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append ids, skipping any already present.
    pub fn extend_unique(&mut self, ids: impl IntoIterator<Item = UserId>) {
        let mut seen: HashSet<UserId> = self.0.iter().copied().collect();
        for id in ids {
            if seen.insert(id) {
                self.0.push(id);
            }
        }
    }

    /// Consecutive chunks of at most `size` ids, in set order.
    ///
    /// A `size` of zero is treated as one.
    pub fn batches(&self, size: usize) -> impl Iterator<Item = &[UserId]> {
        self.0.chunks(size.max(1))
    }

    /// Ids as a slice.
    pub fn as_slice(&self) -> &[UserId] {
        &self.0
    }

    /// Number of ids.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the set holds no ids.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Unwrap into the underlying vector.
    pub fn into_inner(self) -> Vec<UserId> {
        self.0
    }
}

impl From<Vec<UserId>> for FollowerIds {
    fn from(ids: Vec<UserId>) -> Self {
        let mut set = Self::new();
        set.extend_unique(ids);
        set
    }
}

impl From<FollowerIds> for Vec<UserId> {
    fn from(ids: FollowerIds) -> Self {
        ids.0
    }
}

impl FromIterator<UserId> for FollowerIds {
    fn from_iter<I: IntoIterator<Item = UserId>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend_unique(iter);
        set
    }
}
