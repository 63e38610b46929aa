//! Retry behaviour over real HTTP.

use std::time::{Duration, Instant};

use kaiten::resources::NewCard;
use kaiten::{Error, ErrorKind};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{api, client, client_with_policy, fast_retries, request_count};

const CARD: &str = r#"{"id":42,"title":"Fix login"}"#;

#[tokio::test]
async fn test_rate_limited_then_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api("cards/42")))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api("cards/42")))
        .respond_with(ResponseTemplate::new(200).set_body_raw(CARD, "application/json"))
        .mount(&server)
        .await;

    let card = client(&server).cards().get(42).await.unwrap();

    assert_eq!(card.title, "Fix login");
    assert_eq!(request_count(&server).await, 2);
}

#[tokio::test]
async fn test_rate_limit_exhausted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .mount(&server)
        .await;

    let err = client(&server).spaces().list().await.unwrap_err();

    assert!(matches!(err, Error::RateLimited { retry_after: Some(d) } if d == Duration::ZERO));
    assert!(err.is_retriable());
    assert_eq!(request_count(&server).await, 3);
}

#[tokio::test]
async fn test_exhausted_rate_limit_window_uses_reset_header() {
    let server = MockServer::start().await;
    // A reset in the past means "retry now".
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("X-RateLimit-Remaining", "0")
                .insert_header("X-RateLimit-Reset", "1000")
                .insert_header("Retry-After", "3600"),
        )
        .mount(&server)
        .await;

    let started = Instant::now();
    let err = client_with_policy(&server, fast_retries(2)).spaces().list().await.unwrap_err();

    assert_eq!(err.retry_after(), Some(Duration::ZERO));
    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(request_count(&server).await, 2);
}

#[tokio::test]
async fn test_server_error_then_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("[]", "application/json"))
        .mount(&server)
        .await;

    let spaces = client(&server).spaces().list().await.unwrap();

    assert!(spaces.is_empty());
    assert_eq!(request_count(&server).await, 3);
}

#[tokio::test]
async fn test_server_error_exhausted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let err = client_with_policy(&server, fast_retries(4)).cards().get(1).await.unwrap_err();

    assert!(matches!(err, Error::ServerError { status_code: 503, .. }));
    assert_eq!(request_count(&server).await, 4);
}

#[tokio::test]
async fn test_writes_are_sent_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api("cards")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client(&server).cards().create(&NewCard::new("x", 10)).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ServerError);
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn test_write_rate_limited_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "7"))
        .mount(&server)
        .await;

    let err = client(&server).cards().delete(42).await.unwrap_err();

    assert_eq!(err.retry_after(), Some(Duration::from_secs(7)));
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn test_client_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400).set_body_string(r#"{"message":"bad filter"}"#))
        .mount(&server)
        .await;

    let err = client(&server).spaces().list().await.unwrap_err();

    assert!(matches!(
        err,
        Error::UnexpectedResponse { status_code: 400, body: Some(ref b) } if b.contains("bad filter")
    ));
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn test_disabled_policy_sends_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET")).respond_with(ResponseTemplate::new(500)).mount(&server).await;

    let policy = kaiten::RetryPolicy::disabled();
    let err = client_with_policy(&server, policy).spaces().list().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ServerError);
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn test_unreachable_host_is_network_error() {
    // Bind then drop a listener so the port is very likely closed.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = kaiten::Client::builder()
        .url(format!("http://127.0.0.1:{port}/api/latest"))
        .token("t")
        .retry_policy(fast_retries(2))
        .build()
        .unwrap();

    let err = client.spaces().list().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NetworkError);
    assert!(err.is_retriable());
}
