//! Auto-pagination over real HTTP.

use futures::{StreamExt, TryStreamExt};
use kaiten::ErrorKind;
use kaiten::resources::{CardFilter, UserQuery};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{api, client_with_policy, fast_retries, request_count};

fn users(ids: std::ops::Range<i64>) -> ResponseTemplate {
    let body: Vec<_> = ids.map(|id| json!({"id": id})).collect();
    ResponseTemplate::new(200).set_body_json(body)
}

#[tokio::test]
async fn test_all_users_across_pages() {
    let server = MockServer::start().await;
    for (offset, ids) in [("0", 0..3), ("3", 3..6), ("6", 6..7)] {
        Mock::given(method("GET"))
            .and(path(api("users")))
            .and(query_param("offset", offset))
            .and(query_param("limit", "3"))
            .respond_with(users(ids))
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = client_with_policy(&server, fast_retries(3));
    let all: Vec<_> = client.users().all(UserQuery::default(), 3).try_collect().await.unwrap();

    assert_eq!(all.iter().map(|u| u.id).collect::<Vec<_>>(), (0..7).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_failing_page_ends_stream() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("offset", "0"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"id": 1, "title": "a"}, {"id": 2, "title": "b"}])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("offset", "2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_with_policy(&server, fast_retries(2));
    let results: Vec<_> = client.cards().all(CardFilter::board(1), 2).collect().await;

    assert_eq!(results.len(), 3);
    assert!(results[..2].iter().all(Result::is_ok));
    assert!(matches!(&results[2], Err(e) if e.kind() == ErrorKind::ServerError));
    // One request for the first page plus two attempts for the second.
    assert_eq!(request_count(&server).await, 3);
}
