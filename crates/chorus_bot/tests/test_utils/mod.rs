//! Test utilities for Chorus bot tests.

#![allow(dead_code)]

use async_trait::async_trait;
use chorus_core::{RateLimitStatus, UserId, format_created_at};
use chorus_error::ChorusResult;
use chorus_interface::{ApiRequest, ApiResponse, Transport};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;

type Route = Arc<dyn Fn(&ApiRequest) -> ChorusResult<ApiResponse> + Send + Sync>;

/// Transport answering from per-path handlers; unrouted paths answer 404.
#[derive(Clone, Default)]
pub struct MockTransport {
    routes: Arc<Mutex<HashMap<String, Route>>>,
    requests: Arc<Mutex<Vec<ApiRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_route(
        self,
        path: &str,
        handler: impl Fn(&ApiRequest) -> ChorusResult<ApiResponse> + Send + Sync + 'static,
    ) -> Self {
        self.routes.lock().insert(path.to_string(), Arc::new(handler));
        self
    }

    pub fn with_json(self, path: &str, body: Value, rate_limit: Option<RateLimitStatus>) -> Self {
        let body = body.to_string();
        self.with_route(path, move |_| Ok(ApiResponse::ok(body.clone(), rate_limit)))
    }

    pub fn with_status(self, path: &str, status: u16, status_text: &str) -> Self {
        let status_text = status_text.to_string();
        self.with_route(path, move |_| {
            Ok(ApiResponse::new(status, status_text.clone(), "", None))
        })
    }

    pub fn calls_to(&self, path: &str) -> usize {
        self.requests
            .lock()
            .iter()
            .filter(|r| r.path() == path)
            .count()
    }

    pub fn requests_to(&self, path: &str) -> Vec<ApiRequest> {
        self.requests
            .lock()
            .iter()
            .filter(|r| r.path() == path)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: &ApiRequest) -> ChorusResult<ApiResponse> {
        self.requests.lock().push(request.clone());
        let route = self.routes.lock().get(request.path()).cloned();
        match route {
            Some(handler) => handler(request),
            None => Ok(ApiResponse::new(404, "404 Not Found", "", None)),
        }
    }
}

pub fn follower_page(ids: &[UserId]) -> Value {
    json!({ "ids": ids, "next_cursor_str": "0" })
}

pub fn user_with_post(id: UserId, created_at: DateTime<Utc>, text: &str) -> Value {
    json!({
        "id": id,
        "screen_name": format!("user{}", id),
        "status": {
            "created_at": format_created_at(&created_at),
            "id": id * 1000,
            "text": text,
        }
    })
}

/// `application/rate_limit_status` body with a `users/lookup` entry.
pub fn lookup_quota(limit: u32, remaining: u32, reset: i64) -> Value {
    json!({
        "resources": {
            "users": {
                "/users/lookup": { "limit": limit, "remaining": remaining, "reset": reset }
            }
        }
    })
}

/// Now truncated to whole seconds, as `created_at` values are.
pub fn now_secs() -> DateTime<Utc> {
    DateTime::from_timestamp(Utc::now().timestamp(), 0).unwrap_or_else(Utc::now)
}

pub fn minutes_ago(minutes: i64) -> DateTime<Utc> {
    now_secs() - ChronoDuration::minutes(minutes)
}
