//! reqwest-backed transport.

use async_trait::async_trait;
use chorus_error::{ChorusResult, HttpError, HttpErrorKind};
use chorus_interface::{ApiRequest, ApiResponse, HttpMethod, Transport};
use chorus_rate_limit::detect_rate_limit;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

/// Connection settings for [`HttpTransport`].
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_", strip_option, into)]
#[builder(setter(into))]
pub struct HttpTransportConfig {
    /// API root, without a trailing slash
    #[serde(default = "default_base_url")]
    #[builder(default = "default_base_url()")]
    base_url: String,

    /// Application bearer token
    #[serde(default)]
    #[builder(default)]
    bearer_token: Option<String>,

    /// Per-request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    #[builder(default = "default_timeout_secs()")]
    timeout_secs: u64,

    /// User-Agent header
    #[serde(default = "default_user_agent")]
    #[builder(default = "default_user_agent()")]
    user_agent: String,
}

fn default_base_url() -> String {
    "https://api.twitter.com/1.1".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("chorus/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            bearer_token: None,
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Sends requests over HTTPS and extracts quota headers.
///
/// Paths are appended to the configured base URL with a `.json` suffix.
/// GET parameters go in the query string, POST parameters in a url-encoded
/// form body.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    config: HttpTransportConfig,
}

impl HttpTransport {
    /// Build a transport.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the underlying client cannot be built.
    pub fn new(config: HttpTransportConfig) -> ChorusResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| {
                HttpError::new(HttpErrorKind::Transport(format!(
                    "Failed to build HTTP client: {}",
                    e
                )))
            })?;
        Ok(Self { client, config })
    }

    /// Connection settings.
    pub fn config(&self) -> &HttpTransportConfig {
        &self.config
    }

    /// Full URL for an API path.
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}.json",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, request), fields(method = %request.method(), path = %request.path()))]
    async fn send(&self, request: &ApiRequest) -> ChorusResult<ApiResponse> {
        let url = self.url_for(request.path());
        let mut builder = match request.method() {
            HttpMethod::Get => self.client.get(&url).query(request.params()),
            HttpMethod::Post => self.client.post(&url).form(request.params()),
        };
        if let Some(token) = &self.config.bearer_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::error!(error = %e, "HTTP request failed");
            HttpError::new(HttpErrorKind::Transport(e.to_string()))
        })?;

        let status = response.status();
        let rate_limit = detect_rate_limit(response.headers());
        let body = response.text().await.map_err(|e| {
            HttpError::new(HttpErrorKind::Transport(format!(
                "Failed to read response body: {}",
                e
            )))
        })?;

        debug!(status = %status, bytes = body.len(), "Received response");
        Ok(ApiResponse::new(
            status.as_u16(),
            status.to_string(),
            body,
            rate_limit,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_gets_json_suffix() {
        let transport = HttpTransport::new(HttpTransportConfig::default()).unwrap();
        assert_eq!(
            transport.url_for("/followers/ids"),
            "https://api.twitter.com/1.1/followers/ids.json"
        );
    }

    #[test]
    fn trailing_slash_in_base_is_ignored() {
        let config = HttpTransportConfig::default().with_base_url("http://localhost:8080/1.1/");
        let transport = HttpTransport::new(config).unwrap();
        assert_eq!(
            transport.url_for("/users/lookup"),
            "http://localhost:8080/1.1/users/lookup.json"
        );
    }

    #[test]
    fn config_defaults_fill_missing_fields() {
        let config: HttpTransportConfig =
            serde_json::from_str(r#"{"bearer_token": "abc"}"#).unwrap();
        assert_eq!(config.bearer_token().as_deref(), Some("abc"));
        assert_eq!(*config.timeout_secs(), 30);
        assert_eq!(config.base_url(), "https://api.twitter.com/1.1");
    }
}
