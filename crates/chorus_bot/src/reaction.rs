//! Keyword-triggered replies.

use chorus_core::Post;
use chorus_interface::Reaction;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Placeholder replaced by the author's screen name.
const AUTHOR_PLACEHOLDER: &str = "{author}";

/// Reply with `reply` to posts mentioning `keyword`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct KeywordRule {
    /// Matched case-insensitively anywhere in the post text
    keyword: String,
    /// Reply template; `{author}` becomes the author's screen name
    reply: String,
}

impl KeywordRule {
    /// Create a rule.
    pub fn new(keyword: impl Into<String>, reply: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            reply: reply.into(),
        }
    }
}

/// Ordered keyword rules; the first matching rule answers.
///
/// # Example
///
/// ```
/// use chorus_bot::{KeywordReaction, KeywordRule};
///
/// let reaction = KeywordReaction::new(vec![KeywordRule::new("launch", "Congrats @{author}!")]);
/// assert_eq!(reaction.rules().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct KeywordReaction {
    rules: Vec<KeywordRule>,
    lowered: Vec<String>,
}

impl KeywordReaction {
    /// Build from rules. Rules with an empty keyword never match.
    pub fn new(rules: Vec<KeywordRule>) -> Self {
        let lowered = rules.iter().map(|r| r.keyword.to_lowercase()).collect();
        Self { rules, lowered }
    }

    /// Configured rules, in match order.
    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }
}

impl Reaction for KeywordReaction {
    fn react(&self, post: &Post) -> Option<String> {
        let text = post.text().to_lowercase();
        self.rules
            .iter()
            .zip(&self.lowered)
            .find(|(_, keyword)| !keyword.is_empty() && text.contains(keyword.as_str()))
            .map(|(rule, _)| {
                rule.reply
                    .replace(AUTHOR_PLACEHOLDER, post.author().screen_name())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chorus_core::{Author, TweetRecordBuilder, UserRecordBuilder};

    fn post(text: &str) -> Post {
        let record = TweetRecordBuilder::default()
            .created_at("Sat Mar 09 07:05:01 +0000 2024")
            .text(text)
            .build()
            .unwrap();
        let user = UserRecordBuilder::default()
            .id(7u64)
            .screen_name("alice")
            .build()
            .unwrap();
        Post::from_record(&record, Author::from(&user)).unwrap()
    }

    #[test]
    fn matches_case_insensitively() {
        let reaction = KeywordReaction::new(vec![KeywordRule::new("Launch", "nice")]);
        assert_eq!(reaction.react(&post("we LAUNCHED today")), Some("nice".into()));
        assert_eq!(reaction.react(&post("quiet day")), None);
    }

    #[test]
    fn first_matching_rule_wins() {
        let reaction = KeywordReaction::new(vec![
            KeywordRule::new("rust", "crab"),
            KeywordRule::new("release", "ship it"),
        ]);
        assert_eq!(
            reaction.react(&post("new release of our rust crate")),
            Some("crab".into())
        );
    }

    #[test]
    fn author_placeholder_is_substituted() {
        let reaction = KeywordReaction::new(vec![KeywordRule::new("hello", "Hi @{author}!")]);
        assert_eq!(reaction.react(&post("hello world")), Some("Hi @alice!".into()));
    }

    #[test]
    fn empty_keyword_never_matches() {
        let reaction = KeywordReaction::new(vec![KeywordRule::new("", "always")]);
        assert_eq!(reaction.react(&post("anything")), None);
        assert!(KeywordReaction::default().react(&post("anything")).is_none());
    }
}
