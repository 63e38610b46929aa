//! Authentication over real HTTP.

use kaiten::ErrorKind;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{TOKEN, api, client, request_count};

#[tokio::test]
async fn test_bearer_token_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api("users/current")))
        .and(header("authorization", format!("Bearer {TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_raw(r#"{"id":7}"#, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let me = client(&server).users().current().await.unwrap();
    assert_eq!(me.id, 7);
}

#[tokio::test]
async fn test_token_sent_exactly_once_across_retries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("[]", "application/json"))
        .mount(&server)
        .await;

    client(&server).spaces().list().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    for request in requests {
        assert_eq!(request.headers.get_all("authorization").iter().count(), 1);
    }
}

#[tokio::test]
async fn test_401_is_unauthorized_and_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"message":"Card not found"}"#))
        .mount(&server)
        .await;

    let err = client(&server).cards().get(42).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Unauthorized);
    assert!(!err.is_retriable());
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn test_403_is_unexpected_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET")).respond_with(ResponseTemplate::new(403)).mount(&server).await;

    let err = client(&server).spaces().list().await.unwrap_err();
    assert_eq!(err.status_code(), Some(403));
    assert_eq!(err.kind(), ErrorKind::UnexpectedResponse);
}
