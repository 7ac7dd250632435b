//! Collaborator traits.

use crate::{ApiRequest, ApiResponse};
use async_trait::async_trait;
use chorus_core::Post;
use chorus_error::ChorusResult;

/// Sends API requests and returns raw responses.
///
/// Implementations handle authentication, the wire format suffix and quota
/// header extraction. They do not interpret the status code; a non-200
/// response is returned as `Ok` and judged by the caller.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request.
    ///
    /// # Errors
    ///
    /// Returns an HTTP transport error when no response was received.
    async fn send(&self, request: &ApiRequest) -> ChorusResult<ApiResponse>;
}

/// Decides how to respond to a follower's post.
///
/// `None` means no action. Closures of the right shape implement this trait:
///
/// ```
/// use chorus_interface::Reaction;
/// use chorus_core::Post;
///
/// fn shout(post: &Post) -> Option<String> {
///     post.text().contains('!').then(|| "calm down".to_string())
/// }
///
/// fn accepts(_: &dyn Reaction) {}
/// accepts(&shout);
/// ```
pub trait Reaction: Send + Sync {
    /// Optional reply text for `post`.
    fn react(&self, post: &Post) -> Option<String>;
}

impl<F> Reaction for F
where
    F: Fn(&Post) -> Option<String> + Send + Sync,
{
    fn react(&self, post: &Post) -> Option<String> {
        self(post)
    }
}
