//! Typed request/decode layer over a transport.

use chorus_core::{QuotaStatus, RateLimitStatus};
use chorus_error::{ChorusResult, HttpError, HttpErrorKind, JsonError};
use chorus_interface::{ApiRequest, Transport};
use chorus_rate_limit::Endpoint;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, instrument};

/// API client that judges status codes and decodes payloads.
///
/// Cloning is cheap; clones share the transport.
#[derive(Clone)]
pub struct TwitterClient {
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for TwitterClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwitterClient").finish_non_exhaustive()
    }
}

impl TwitterClient {
    /// Wrap a transport.
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    /// Wrap an already shared transport.
    pub fn from_shared(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Send `request` and decode the body as `D`.
    ///
    /// Returns the decoded payload together with the response's quota
    /// reading, when it carried one.
    ///
    /// # Errors
    ///
    /// - transport failures are propagated unchanged
    /// - any status other than 200 becomes an HTTP status error
    /// - a body that does not decode as `D` becomes a JSON error
    #[instrument(skip(self, request), fields(method = %request.method(), path = %request.path()))]
    pub async fn request<D: DeserializeOwned>(
        &self,
        request: &ApiRequest,
    ) -> ChorusResult<(D, Option<RateLimitStatus>)> {
        debug!(params = ?request.params(), "Sending request");
        let response = self.transport.send(request).await?;

        if !response.is_ok() {
            tracing::warn!(status = %response.status_text(), "Request failed");
            return Err(HttpError::new(HttpErrorKind::Status {
                status: response.status_text().clone(),
                path: request.path().clone(),
            })
            .into());
        }

        if let Some(status) = response.rate_limit() {
            debug!(
                limit = status.limit(),
                remaining = status.remaining(),
                reset = %status.reset_time(),
                "Rate limit reported"
            );
        }

        let data = serde_json::from_str(response.body()).map_err(|e| {
            tracing::error!("Failed to parse response: {}", e);
            JsonError::new(format!(
                "Failed to decode response from {}: {}",
                request.path(),
                e
            ))
        })?;

        Ok((data, *response.rate_limit()))
    }

    /// Query current quotas for the given resource families.
    #[instrument(skip(self))]
    pub async fn rate_limit_status(
        &self,
        resources: &[&str],
    ) -> ChorusResult<(QuotaStatus, Option<RateLimitStatus>)> {
        let request = ApiRequest::get(Endpoint::RateLimitStatus.path())
            .param("resources", resources.join(","));
        self.request(&request).await
    }
}
