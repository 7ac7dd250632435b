//! Scripted transport for testing.

use async_trait::async_trait;
use chorus_core::{RateLimitStatus, UserId, format_created_at};
use chorus_error::{ChorusResult, HttpError, HttpErrorKind};
use chorus_interface::{ApiRequest, ApiResponse, Transport};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

type Route = Arc<dyn Fn(&ApiRequest) -> ChorusResult<ApiResponse> + Send + Sync>;

/// Transport that answers from per-path handlers.
///
/// Clones share routes and call records, so a test can keep one handle and
/// give another to the client under test. Unrouted paths answer 404.
#[derive(Clone, Default)]
pub struct MockTransport {
    routes: Arc<Mutex<HashMap<String, Route>>>,
    requests: Arc<Mutex<Vec<ApiRequest>>>,
    fail_on_call: Arc<Mutex<HashMap<String, usize>>>,
    delay: Option<Duration>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl MockTransport {
    /// Create a transport with no routes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `path` with `handler`.
    pub fn with_route(
        self,
        path: &str,
        handler: impl Fn(&ApiRequest) -> ChorusResult<ApiResponse> + Send + Sync + 'static,
    ) -> Self {
        self.routes.lock().insert(path.to_string(), Arc::new(handler));
        self
    }

    /// Answer `path` with a fixed 200 body.
    pub fn with_json(self, path: &str, body: Value, rate_limit: Option<RateLimitStatus>) -> Self {
        let body = body.to_string();
        self.with_route(path, move |_| Ok(ApiResponse::ok(body.clone(), rate_limit)))
    }

    /// Answer `path` with a fixed status and empty body.
    pub fn with_status(self, path: &str, status: u16, status_text: &str) -> Self {
        let status_text = status_text.to_string();
        self.with_route(path, move |_| {
            Ok(ApiResponse::new(status, status_text.clone(), "", None))
        })
    }

    /// Fail every request to `path` before a response exists.
    pub fn with_transport_failure(self, path: &str) -> Self {
        self.with_route(path, |_| {
            Err(HttpError::new(HttpErrorKind::Transport("connection reset".into())).into())
        })
    }

    /// Answer the `index`th call (zero-based) to `path` with an immediate
    /// 503, skipping any configured delay.
    pub fn with_failure_on_call(self, path: &str, index: usize) -> Self {
        self.fail_on_call.lock().insert(path.to_string(), index);
        self
    }

    /// Sleep this long inside every request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Every request sent so far.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().clone()
    }

    /// Requests sent to `path`.
    pub fn requests_to(&self, path: &str) -> Vec<ApiRequest> {
        self.requests
            .lock()
            .iter()
            .filter(|r| r.path() == path)
            .cloned()
            .collect()
    }

    /// Number of requests sent to `path`.
    pub fn calls_to(&self, path: &str) -> usize {
        self.requests_to(path).len()
    }

    /// Peak number of concurrent requests.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: &ApiRequest) -> ChorusResult<ApiResponse> {
        let index = {
            let mut requests = self.requests.lock();
            let index = requests.iter().filter(|r| r.path() == request.path()).count();
            requests.push(request.clone());
            index
        };
        if self.fail_on_call.lock().get(request.path()) == Some(&index) {
            return Ok(ApiResponse::new(503, "503 Service Unavailable", "", None));
        }

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let _guard = InFlight(&self.in_flight);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let route = self.routes.lock().get(request.path()).cloned();
        match route {
            Some(handler) => handler(request),
            None => Ok(ApiResponse::new(404, "404 Not Found", "", None)),
        }
    }
}

/// One `followers/ids` page body.
pub fn follower_page(ids: &[UserId], next_cursor: &str) -> Value {
    json!({
        "ids": ids,
        "next_cursor_str": next_cursor,
        "previous_cursor_str": "0",
    })
}

/// A `users/lookup` user entry with an embedded post.
pub fn user_with_post(id: UserId, created_at: DateTime<Utc>, text: &str) -> Value {
    json!({
        "id": id,
        "id_str": id.to_string(),
        "screen_name": format!("user{}", id),
        "name": format!("User {}", id),
        "status": {
            "created_at": format_created_at(&created_at),
            "id": id * 1000,
            "id_str": (id * 1000).to_string(),
            "text": text,
        }
    })
}

/// An instant `minutes` before now.
pub fn minutes_ago(minutes: i64) -> DateTime<Utc> {
    Utc::now() - ChronoDuration::minutes(minutes)
}

/// A quota reading resetting a minute from now.
pub fn quota(limit: u32, remaining: u32) -> RateLimitStatus {
    RateLimitStatus::new(limit, remaining, Utc::now().timestamp() + 60)
}

/// A `users/lookup` handler serving `users` by id.
///
/// Ids without an entry are left out of the response, as the API does for
/// suspended accounts. `rate_limit` is attached to every response.
pub fn lookup_route(
    users: HashMap<UserId, Value>,
    rate_limit: Option<RateLimitStatus>,
) -> impl Fn(&ApiRequest) -> ChorusResult<ApiResponse> + Send + Sync + 'static {
    move |request| {
        let body: Vec<Value> = request
            .param_value("user_id")
            .unwrap_or_default()
            .split(',')
            .filter_map(|id| id.parse::<UserId>().ok())
            .filter_map(|id| users.get(&id).cloned())
            .collect();
        Ok(ApiResponse::ok(Value::Array(body).to_string(), rate_limit))
    }
}
