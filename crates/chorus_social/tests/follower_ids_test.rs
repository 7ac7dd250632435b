//! Tests for follower-id pagination and caching.

mod test_utils;

use chorus_cache::{IdCache, IdCacheConfig};
use chorus_error::{ChorusErrorKind, HttpErrorKind};
use chorus_interface::ApiResponse;
use chorus_rate_limit::{Endpoint, RateLimitTracker};
use chorus_social::{FOLLOWER_PAGE_SIZE, FollowerIdFetcher, TwitterClient};
use std::sync::Arc;
use test_utils::{MockTransport, follower_page, quota};

const FOLLOWERS: &str = "/followers/ids";

fn fetcher(transport: &MockTransport) -> (FollowerIdFetcher, Arc<IdCache>, RateLimitTracker) {
    let cache = Arc::new(IdCache::new(IdCacheConfig::default()));
    let tracker = RateLimitTracker::new();
    let fetcher = FollowerIdFetcher::new(
        TwitterClient::new(transport.clone()),
        Arc::clone(&cache),
        tracker.clone(),
    );
    (fetcher, cache, tracker)
}

fn two_page_transport() -> MockTransport {
    MockTransport::new().with_route(FOLLOWERS, |request| {
        let (page, remaining) = match request.param_value("cursor") {
            None => (follower_page(&[1, 2, 3], "42"), 14),
            Some("42") => (follower_page(&[3, 4], "0"), 13),
            Some(other) => panic!("unexpected cursor {}", other),
        };
        Ok(ApiResponse::ok(page.to_string(), Some(quota(15, remaining))))
    })
}

fn sorted(ids: &[u64]) -> Vec<u64> {
    let mut ids = ids.to_vec();
    ids.sort_unstable();
    ids
}

#[tokio::test]
async fn test_pagination_follows_cursor_until_zero() {
    let transport = two_page_transport();
    let (fetcher, cache, _) = fetcher(&transport);

    let (ids, _) = fetcher.fetch(12).await.expect("fetch should succeed");

    assert_eq!(sorted(ids.as_slice()), vec![1, 2, 3, 4]);
    assert_eq!(cache.get_ids().unwrap().as_slice(), &[1, 2, 3, 4]);

    let requests = transport.requests_to(FOLLOWERS);
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].param_value("cursor"), None);
    assert_eq!(requests[1].param_value("cursor"), Some("42"));
    for request in &requests {
        assert_eq!(request.param_value("user_id"), Some("12"));
        assert_eq!(
            request.param_value("count"),
            Some(FOLLOWER_PAGE_SIZE.to_string().as_str())
        );
    }
}

#[tokio::test]
async fn test_second_fetch_within_ttl_hits_cache() {
    let transport = two_page_transport();
    let (fetcher, _, _) = fetcher(&transport);

    let (first, first_status) = fetcher.fetch(12).await.unwrap();
    let (second, second_status) = fetcher.fetch(12).await.unwrap();

    assert_eq!(transport.calls_to(FOLLOWERS), 2, "one pagination sequence only");
    assert_eq!(sorted(first.as_slice()), sorted(second.as_slice()));
    assert!(first_status.is_some());
    assert!(second_status.is_none(), "cache hits carry no reading");
}

#[tokio::test]
async fn test_page_readings_merge_pessimistically() {
    let transport = two_page_transport();
    let (fetcher, _, tracker) = fetcher(&transport);

    let (_, status) = fetcher.fetch(12).await.unwrap();

    assert_eq!(*status.unwrap().remaining(), 13);
    assert_eq!(
        *tracker.current(Endpoint::FollowersIds).unwrap().remaining(),
        13
    );
    assert!(tracker.current(Endpoint::UsersLookup).is_none());
}

#[tokio::test]
async fn test_failing_page_caches_nothing() {
    let transport = MockTransport::new().with_route(FOLLOWERS, |request| {
        match request.param_value("cursor") {
            None => Ok(ApiResponse::ok(follower_page(&[1, 2], "7").to_string(), None)),
            Some(_) => Ok(ApiResponse::new(503, "503 Service Unavailable", "", None)),
        }
    });
    let (fetcher, cache, _) = fetcher(&transport);

    let err = fetcher.fetch(12).await.unwrap_err();

    match err.kind() {
        ChorusErrorKind::Http(e) => assert!(matches!(e.kind, HttpErrorKind::Status { .. })),
        other => panic!("expected HTTP error, got {:?}", other),
    }
    assert!(cache.is_empty());
    assert!(cache.get_ids().is_none());
}

#[tokio::test]
async fn test_transport_failure_propagates() {
    let transport = MockTransport::new().with_transport_failure(FOLLOWERS);
    let (fetcher, cache, _) = fetcher(&transport);

    let err = fetcher.fetch(12).await.unwrap_err();

    assert!(matches!(err.kind(), ChorusErrorKind::Http(_)));
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_large_follower_set_is_sampled() {
    let ids: Vec<u64> = (1..=1111).collect();
    let transport = MockTransport::new().with_json(FOLLOWERS, follower_page(&ids, "0"), None);
    let (fetcher, cache, _) = fetcher(&transport);

    let (picked, _) = fetcher.fetch(12).await.unwrap();

    assert_eq!(picked.len(), 1000);
    assert_eq!(cache.len(), 1111, "the full set is cached");
    assert!(picked.as_slice().iter().all(|id| (1..=1111).contains(id)));
}

#[tokio::test]
async fn test_malformed_page_is_json_error() {
    let transport = MockTransport::new().with_route(FOLLOWERS, |_| {
        Ok(ApiResponse::ok(r#"{"ids": "nope"}"#, None))
    });
    let (fetcher, cache, _) = fetcher(&transport);

    let err = fetcher.fetch(12).await.unwrap_err();

    assert!(matches!(err.kind(), ChorusErrorKind::Json(_)));
    assert!(cache.is_empty());
}
