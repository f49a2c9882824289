//! Transport behavior tests: quota tracking, the local rate gate, error
//! classification, empty bodies, cancellation and concurrent use.
//!
//! Every test runs against a wiremock server; no real network calls.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::{Duration, Instant};

use pipedrive_sdk::api::{Deal, DealListOptions, IdResult};
use pipedrive_sdk::types::{ApiToken, Envelope, Timestamp};
use pipedrive_sdk::{Pipedrive, PipedriveError, Rate};
use reqwest::Method;
use tower::{Layer, Service};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn create_test_client(mock_server: &MockServer) -> Pipedrive {
    Pipedrive::builder()
        .api_token(ApiToken::new("test-token").unwrap())
        .base_url(format!("{}/v1/", mock_server.uri()))
        .build()
        .unwrap()
}

fn epoch_in(offset_secs: i64) -> i64 {
    chrono::Utc::now().timestamp() + offset_secs
}

fn deals_json() -> serde_json::Value {
    serde_json::json!({
        "success": true,
        "data": [{"id": 1, "title": "First deal"}, {"id": 2, "title": "Second deal"}],
        "additional_data": {
            "pagination": {"start": 0, "limit": 2, "more_items_in_collection": true, "next_start": 2}
        }
    })
}

fn with_quota(template: ResponseTemplate, limit: i64, remaining: i64, reset: i64) -> ResponseTemplate {
    template
        .insert_header("X-RateLimit-Limit", limit.to_string().as_str())
        .insert_header("X-RateLimit-Remaining", remaining.to_string().as_str())
        .insert_header("X-RateLimit-Reset", reset.to_string().as_str())
}

// ============================================================
// 1. Quota tracking
// ============================================================

#[tokio::test]
async fn test_rate_recorded_from_response_headers() {
    let mock_server = MockServer::start().await;
    let reset = epoch_in(2);

    Mock::given(method("GET"))
        .and(path("/v1/deals"))
        .and(query_param("api_token", "test-token"))
        .respond_with(with_quota(
            ResponseTemplate::new(200).set_body_json(deals_json()),
            80,
            79,
            reset,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let pipedrive = create_test_client(&mock_server);
    assert_eq!(pipedrive.rate(), Rate::default());

    let deals = pipedrive.deals().list(&DealListOptions::default()).await.unwrap();
    assert_eq!(deals.data.len(), 2);
    assert_eq!(deals.data[1].title, "Second deal");
    assert_eq!(
        deals.additional_data.as_ref().and_then(|a| a.next_start()),
        Some(2)
    );

    let rate = pipedrive.rate();
    assert_eq!(rate.limit, 80);
    assert_eq!(rate.remaining, 79);
    assert_eq!(rate.reset, Timestamp::from_unix(reset));
}

#[tokio::test]
async fn test_missing_quota_headers_reset_to_zero() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/deals/1"))
        .respond_with(with_quota(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true, "data": {"id": 1}
            })),
            80,
            10,
            epoch_in(2),
        ))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/deals/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true, "data": {"id": 2}
        })))
        .mount(&mock_server)
        .await;

    let pipedrive = create_test_client(&mock_server);
    pipedrive.deals().get_by_id(1).await.unwrap();
    assert_eq!(pipedrive.rate().remaining, 10);

    pipedrive.deals().get_by_id(2).await.unwrap();
    assert_eq!(pipedrive.rate(), Rate::default());
}

#[tokio::test]
async fn test_rate_state_is_isolated_per_instance() {
    let busy_server = MockServer::start().await;
    let quiet_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/deals"))
        .respond_with(with_quota(
            ResponseTemplate::new(200).set_body_json(deals_json()),
            80,
            0,
            epoch_in(3600),
        ))
        .mount(&busy_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/deals"))
        .respond_with(with_quota(
            ResponseTemplate::new(200).set_body_json(deals_json()),
            80,
            50,
            epoch_in(2),
        ))
        .expect(1)
        .mount(&quiet_server)
        .await;

    let busy = create_test_client(&busy_server);
    let quiet = create_test_client(&quiet_server);

    busy.deals().list(&DealListOptions::default()).await.unwrap();
    assert_eq!(busy.rate().remaining, 0);
    assert_eq!(quiet.rate(), Rate::default());

    // The exhausted quota of `busy` must not gate `quiet`.
    quiet.deals().list(&DealListOptions::default()).await.unwrap();
    assert_eq!(quiet.rate().remaining, 50);
}

// ============================================================
// 2. Local rate gate
// ============================================================

#[tokio::test]
async fn test_exhausted_quota_blocks_without_network_call() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/deals"))
        .respond_with(with_quota(
            ResponseTemplate::new(200).set_body_json(deals_json()),
            80,
            0,
            epoch_in(3600),
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let pipedrive = create_test_client(&mock_server);

    // The response that spends the quota is still a success.
    pipedrive.deals().list(&DealListOptions::default()).await.unwrap();

    let err = pipedrive
        .deals()
        .list(&DealListOptions::default())
        .await
        .unwrap_err();

    match err {
        PipedriveError::RateLimitExceeded { rate, .. } => {
            assert_eq!(rate.remaining, 0);
            assert_eq!(rate.limit, 80);
        }
        other => panic!("expected RateLimitExceeded, got {other:?}"),
    }

    let received = mock_server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
}

#[tokio::test]
async fn test_gate_opens_once_reset_has_passed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/deals"))
        .respond_with(with_quota(
            ResponseTemplate::new(200).set_body_json(deals_json()),
            80,
            0,
            epoch_in(-10),
        ))
        .expect(2)
        .mount(&mock_server)
        .await;

    let pipedrive = create_test_client(&mock_server);

    pipedrive.deals().list(&DealListOptions::default()).await.unwrap();
    pipedrive.deals().list(&DealListOptions::default()).await.unwrap();
}

#[tokio::test]
async fn test_gate_ignores_zero_remaining_without_reset() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/deals"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-RateLimit-Remaining", "0")
                .set_body_json(deals_json()),
        )
        .expect(2)
        .mount(&mock_server)
        .await;

    let pipedrive = create_test_client(&mock_server);

    pipedrive.deals().list(&DealListOptions::default()).await.unwrap();
    pipedrive.deals().list(&DealListOptions::default()).await.unwrap();
}

// ============================================================
// 3. Error classification
// ============================================================

#[tokio::test]
async fn test_forbidden_with_zero_remaining_is_rate_limit() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/deals/1"))
        .respond_with(with_quota(
            ResponseTemplate::new(403).set_body_json(serde_json::json!({
                "success": false,
                "error": "Request over limit"
            })),
            80,
            0,
            epoch_in(2),
        ))
        .mount(&mock_server)
        .await;

    let pipedrive = create_test_client(&mock_server);
    let err = pipedrive.deals().get_by_id(1).await.unwrap_err();

    match err {
        PipedriveError::RateLimitExceeded { rate, message } => {
            assert_eq!(rate.remaining, 0);
            assert_eq!(message, "Request over limit");
        }
        other => panic!("expected RateLimitExceeded, got {other:?}"),
    }
    assert_eq!(pipedrive.rate().remaining, 0);
}

#[tokio::test]
async fn test_forbidden_with_quota_left_is_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/deals/1"))
        .respond_with(with_quota(
            ResponseTemplate::new(403).set_body_json(serde_json::json!({
                "success": false,
                "error": "You do not have permission",
                "error_info": "Ask an admin"
            })),
            80,
            42,
            epoch_in(2),
        ))
        .mount(&mock_server)
        .await;

    let pipedrive = create_test_client(&mock_server);
    let err = pipedrive.deals().get_by_id(1).await.unwrap_err();

    assert!(!err.is_rate_limited());
    assert_eq!(err.status(), Some(403));
}

#[tokio::test]
async fn test_not_found_carries_error_and_info() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/persons/999"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "success": false,
            "error": "Person not found",
            "error_info": "Please check developers.pipedrive.com for more information about Pipedrive API.",
            "data": null,
            "additional_data": null
        })))
        .mount(&mock_server)
        .await;

    let pipedrive = create_test_client(&mock_server);
    let err = pipedrive.persons().get_by_id(999).await.unwrap_err();

    match err {
        PipedriveError::Api {
            status,
            error,
            error_info,
        } => {
            assert_eq!(status, 404);
            assert_eq!(error, "Person not found");
            assert!(error_info.contains("developers.pipedrive.com"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_with_html_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/deals/1"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad gateway</html>"))
        .mount(&mock_server)
        .await;

    let pipedrive = create_test_client(&mock_server);
    let err = pipedrive.deals().get_by_id(1).await.unwrap_err();

    match err {
        PipedriveError::Api { status, error, .. } => {
            assert_eq!(status, 502);
            assert!(error.is_empty());
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_success_body_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/deals/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"success\": true, \"data\": "))
        .mount(&mock_server)
        .await;

    let pipedrive = create_test_client(&mock_server);
    let err = pipedrive.deals().get_by_id(1).await.unwrap_err();

    assert!(matches!(err, PipedriveError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_host_is_transport_error() {
    let pipedrive = Pipedrive::builder()
        .api_token(ApiToken::new("test-token").unwrap())
        .base_url("http://127.0.0.1:1/v1/")
        .connect_timeout(Duration::from_secs(2))
        .build()
        .unwrap();

    let err = pipedrive.deals().get_by_id(1).await.unwrap_err();

    assert!(matches!(err, PipedriveError::Transport(_)));
    assert_eq!(pipedrive.rate(), Rate::default());
}

// ============================================================
// 4. Body handling
// ============================================================

#[tokio::test]
async fn test_no_content_yields_default_envelope() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v1/deals/5"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let pipedrive = create_test_client(&mock_server);
    let deleted = pipedrive.deals().delete(5).await.unwrap();

    assert!(!deleted.success);
    assert_eq!(deleted.data, IdResult::default());
}

#[tokio::test]
async fn test_success_false_on_2xx_is_returned_as_is() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/deals/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": false,
            "data": {"id": 1, "title": "Odd"}
        })))
        .mount(&mock_server)
        .await;

    let pipedrive = create_test_client(&mock_server);
    let deal = pipedrive.deals().get_by_id(1).await.unwrap();

    assert!(!deal.success);
    assert_eq!(deal.data.title, "Odd");
}

#[tokio::test]
async fn test_null_data_decodes_to_empty_list() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/deals"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": null,
            "additional_data": {
                "pagination": {"start": 0, "limit": 100, "more_items_in_collection": false}
            }
        })))
        .mount(&mock_server)
        .await;

    let pipedrive = create_test_client(&mock_server);
    let deals = pipedrive.deals().list(&DealListOptions::default()).await.unwrap();

    assert!(deals.data.is_empty());
    assert_eq!(deals.additional_data.and_then(|a| a.next_start()), None);
}

// ============================================================
// 5. Cancellation
// ============================================================

#[tokio::test]
async fn test_cancel_abandons_slow_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/deals"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(deals_json())
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let pipedrive = create_test_client(&mock_server);
    let client = pipedrive.client();
    let request = client
        .build_request::<(), ()>(Method::GET, "/deals", None, None)
        .unwrap();

    let started = Instant::now();
    let result = client
        .execute_with_cancel::<Envelope<Vec<Deal>>, _>(
            request,
            tokio::time::sleep(Duration::from_millis(50)),
        )
        .await;

    assert!(matches!(result, Err(PipedriveError::Cancelled)));
    assert!(started.elapsed() < Duration::from_secs(4));
    assert_eq!(pipedrive.rate(), Rate::default());
}

#[tokio::test]
async fn test_already_cancelled_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/deals"))
        .respond_with(ResponseTemplate::new(200).set_body_json(deals_json()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let pipedrive = create_test_client(&mock_server);
    let client = pipedrive.client();
    let request = client
        .build_request::<(), ()>(Method::GET, "/deals", None, None)
        .unwrap();

    let result = client
        .execute_with_cancel::<Envelope<Vec<Deal>>, _>(request, std::future::ready(()))
        .await;

    assert!(matches!(result, Err(PipedriveError::Cancelled)));
}

/// Raises a flag when the wrapped transport fails, so a cancel signal can be
/// made to fire at exactly that moment.
#[derive(Clone)]
struct FlagOnFailure {
    failed: Arc<AtomicBool>,
}

impl<S> Layer<S> for FlagOnFailure {
    type Service = FlagOnFailureService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        FlagOnFailureService {
            inner,
            failed: self.failed.clone(),
        }
    }
}

#[derive(Clone)]
struct FlagOnFailureService<S> {
    inner: S,
    failed: Arc<AtomicBool>,
}

impl<S> Service<reqwest::Request> for FlagOnFailureService<S>
where
    S: Service<reqwest::Request, Response = reqwest::Response, Error = reqwest::Error>
        + Clone
        + Send
        + 'static,
    S::Future: Send,
{
    type Response = reqwest::Response;
    type Error = reqwest::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: reqwest::Request) -> Self::Future {
        let mut inner = self.inner.clone();
        let failed = self.failed.clone();
        Box::pin(async move {
            let result = inner.call(request).await;
            if result.is_err() {
                failed.store(true, Ordering::SeqCst);
            }
            result
        })
    }
}

#[tokio::test]
async fn test_cancel_racing_transport_failure_wins() {
    let failed = Arc::new(AtomicBool::new(false));
    let pipedrive = Pipedrive::builder()
        .api_token(ApiToken::new("test-token").unwrap())
        .base_url("http://127.0.0.1:1/v1/")
        .connect_timeout(Duration::from_secs(2))
        .with_middleware(FlagOnFailure {
            failed: failed.clone(),
        })
        .build()
        .unwrap();

    let client = pipedrive.client();
    let request = client
        .build_request::<(), ()>(Method::GET, "/deals", None, None)
        .unwrap();

    // Pending while the request is in flight, ready once the connection has failed.
    let signal = failed.clone();
    let cancel = std::future::poll_fn(move |_| {
        if signal.load(Ordering::SeqCst) {
            Poll::Ready(())
        } else {
            Poll::Pending
        }
    });

    let result = client
        .execute_with_cancel::<Envelope<Vec<Deal>>, _>(request, cancel)
        .await;

    assert!(failed.load(Ordering::SeqCst));
    assert!(matches!(result, Err(PipedriveError::Cancelled)));
    assert_eq!(pipedrive.rate(), Rate::default());
}

#[tokio::test]
async fn test_cancel_that_never_fires_completes_normally() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/deals"))
        .respond_with(ResponseTemplate::new(200).set_body_json(deals_json()))
        .mount(&mock_server)
        .await;

    let pipedrive = create_test_client(&mock_server);
    let client = pipedrive.client();
    let request = client
        .build_request::<(), ()>(Method::GET, "/deals", None, None)
        .unwrap();

    let response = client
        .execute_with_cancel::<Envelope<Vec<Deal>>, _>(
            request,
            tokio::time::sleep(Duration::from_secs(30)),
        )
        .await
        .unwrap();

    assert_eq!(response.status.as_u16(), 200);
    assert_eq!(response.data.data.len(), 2);
}

// ============================================================
// 6. Concurrency
// ============================================================

#[tokio::test]
async fn test_concurrent_calls_share_one_client() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/deals"))
        .respond_with(with_quota(
            ResponseTemplate::new(200).set_body_json(deals_json()),
            80,
            70,
            epoch_in(2),
        ))
        .expect(10)
        .mount(&mock_server)
        .await;

    let pipedrive = create_test_client(&mock_server);
    let options = DealListOptions::default();

    let calls = (0..10).map(|_| {
        let pipedrive = pipedrive.clone();
        let options = options.clone();
        async move { pipedrive.deals().list(&options).await }
    });
    let results = futures::future::join_all(calls).await;

    assert!(results.iter().all(|r| r.is_ok()));
    assert_eq!(pipedrive.rate().remaining, 70);
}

#[tokio::test]
async fn test_spawned_tasks_see_shared_rate() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/users/me"))
        .respond_with(with_quota(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "data": {"id": 1, "name": "Me"}
            })),
            40,
            39,
            epoch_in(2),
        ))
        .expect(4)
        .mount(&mock_server)
        .await;

    let pipedrive = create_test_client(&mock_server);

    let mut handles = Vec::new();
    for _ in 0..4 {
        let pipedrive = pipedrive.clone();
        handles.push(tokio::spawn(async move { pipedrive.users().me().await }));
    }
    for handle in handles {
        assert!(handle.await.unwrap().is_ok());
    }

    assert_eq!(pipedrive.rate().limit, 40);
}
