//! Quota extraction from response headers.

use chorus_core::RateLimitStatus;
use reqwest::header::HeaderMap;
use tracing::debug;

/// Requests allowed in the current window.
pub const LIMIT_HEADER: &str = "x-rate-limit-limit";
/// Requests remaining in the current window.
pub const REMAINING_HEADER: &str = "x-rate-limit-remaining";
/// Unix timestamp when the window resets.
pub const RESET_HEADER: &str = "x-rate-limit-reset";

/// Build a quota reading from response headers.
///
/// Returns `None` unless all three headers are present and numeric. Some
/// endpoints (notably POST requests) omit them entirely.
///
/// # Example
///
/// ```
/// use chorus_rate_limit::detect_rate_limit;
/// use reqwest::header::{HeaderMap, HeaderValue};
///
/// let mut headers = HeaderMap::new();
/// headers.insert("x-rate-limit-limit", HeaderValue::from_static("15"));
/// headers.insert("x-rate-limit-remaining", HeaderValue::from_static("14"));
/// headers.insert("x-rate-limit-reset", HeaderValue::from_static("1700000900"));
///
/// let status = detect_rate_limit(&headers).unwrap();
/// assert_eq!(*status.remaining(), 14);
/// ```
pub fn detect_rate_limit(headers: &HeaderMap) -> Option<RateLimitStatus> {
    let limit = parse_header_u32(headers, LIMIT_HEADER)?;
    let remaining = parse_header_u32(headers, REMAINING_HEADER)?;
    let reset = parse_header_i64(headers, RESET_HEADER)?;
    debug!(limit, remaining, reset, "Detected rate limit from headers");
    Some(RateLimitStatus::new(limit, remaining, reset))
}

/// Helper to parse u32 from header value.
fn parse_header_u32(headers: &HeaderMap, key: &str) -> Option<u32> {
    headers.get(key)?.to_str().ok()?.trim().parse().ok()
}

/// Helper to parse i64 from header value.
fn parse_header_i64(headers: &HeaderMap, key: &str) -> Option<i64> {
    headers.get(key)?.to_str().ok()?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn headers(limit: &'static str, remaining: &'static str, reset: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(LIMIT_HEADER, HeaderValue::from_static(limit));
        headers.insert(REMAINING_HEADER, HeaderValue::from_static(remaining));
        headers.insert(RESET_HEADER, HeaderValue::from_static(reset));
        headers
    }

    #[test]
    fn missing_headers_yield_none() {
        assert!(detect_rate_limit(&HeaderMap::new()).is_none());
    }

    #[test]
    fn partial_headers_yield_none() {
        let mut partial = HeaderMap::new();
        partial.insert(LIMIT_HEADER, HeaderValue::from_static("15"));
        assert!(detect_rate_limit(&partial).is_none());
    }

    #[test]
    fn non_numeric_yields_none() {
        assert!(detect_rate_limit(&headers("15", "lots", "1700000000")).is_none());
    }

    #[test]
    fn full_headers_parse() {
        let status = detect_rate_limit(&headers("900", "899", "1700000000")).unwrap();
        assert_eq!(status, RateLimitStatus::new(900, 899, 1_700_000_000));
    }
}
