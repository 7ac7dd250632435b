//! Request and response envelopes exchanged with a [`Transport`](crate::Transport).

use chorus_core::RateLimitStatus;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// HTTP verb for an API call.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::AsRefStr,
)]
#[strum(serialize_all = "UPPERCASE")]
pub enum HttpMethod {
    /// Parameters travel in the query string.
    Get,
    /// Parameters travel as a url-encoded form body.
    Post,
}

/// An unsigned API call.
///
/// `path` is relative to the API root and carries no format suffix
/// (`/followers/ids`, not `/1.1/followers/ids.json`).
///
/// # Example
///
/// ```
/// use chorus_interface::{ApiRequest, HttpMethod};
///
/// let req = ApiRequest::get("/followers/ids")
///     .param("user_id", "12")
///     .param("count", "5000");
/// assert_eq!(*req.method(), HttpMethod::Get);
/// assert_eq!(req.param_value("count"), Some("5000"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct ApiRequest {
    method: HttpMethod,
    path: String,
    params: Vec<(String, String)>,
}

impl ApiRequest {
    /// Start a GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            params: Vec::new(),
        }
    }

    /// Start a POST request.
    pub fn post(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Post,
            path: path.into(),
            params: Vec::new(),
        }
    }

    /// Append a parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// First value for `key`, if present.
    pub fn param_value(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// What came back from the API.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct ApiResponse {
    /// Numeric status code
    status: u16,
    /// Status line, e.g. "200 OK"
    status_text: String,
    /// Raw response body
    body: String,
    /// Quota reading, when the endpoint reports one
    rate_limit: Option<RateLimitStatus>,
}

impl ApiResponse {
    /// Build a response.
    pub fn new(
        status: u16,
        status_text: impl Into<String>,
        body: impl Into<String>,
        rate_limit: Option<RateLimitStatus>,
    ) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            body: body.into(),
            rate_limit,
        }
    }

    /// A `200 OK` response.
    pub fn ok(body: impl Into<String>, rate_limit: Option<RateLimitStatus>) -> Self {
        Self::new(200, "200 OK", body, rate_limit)
    }

    /// True for status 200.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}
