//! Resource calls over real HTTP.

use kaiten::resources::{CardFilter, CardState, ChecklistItemUpdate, NewCard};
use kaiten::{Error, ErrorKind};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{api, client};

fn ok_json(body: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

#[tokio::test]
async fn test_list_cards_with_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api("cards")))
        .and(query_param("board_id", "10"))
        .and(query_param("states", "2,3"))
        .and(query_param("offset", "0"))
        .and(query_param("limit", "2"))
        .respond_with(ok_json(json!([{"id": 1, "title": "a"}, {"id": 2, "title": "b"}])))
        .expect(1)
        .mount(&server)
        .await;

    let filter = CardFilter {
        board_id: Some(10),
        states: vec![CardState::InProgress, CardState::Done],
        ..Default::default()
    };
    let page = client(&server).cards().list(&filter, 0, 2).await.unwrap();

    assert_eq!(page.len(), 2);
    assert!(page.has_more());
}

#[tokio::test]
async fn test_create_card_sends_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api("cards")))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"title": "Write docs", "board_id": 10})))
        .respond_with(ok_json(json!({"id": 99, "title": "Write docs", "board_id": 10})))
        .expect(1)
        .mount(&server)
        .await;

    let card = client(&server).cards().create(&NewCard::new("Write docs", 10)).await.unwrap();
    assert_eq!(card.id, 99);
    assert_eq!(card.board_id, Some(10));
}

#[tokio::test]
async fn test_missing_card_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api("cards/404")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client(&server).cards().get(404).await.unwrap_err();

    assert!(matches!(err, Error::NotFound { resource: "card", id: 404 }));
    assert_eq!(err.to_string(), "card with id 404 not found");
}

#[tokio::test]
async fn test_schema_mismatch_is_decoding_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ok_json(json!({"unexpected": true})))
        .mount(&server)
        .await;

    let err = client(&server).cards().get(1).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DecodingError);
}

#[tokio::test]
async fn test_unknown_fields_survive() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api("boards/5")))
        .respond_with(ok_json(json!({
            "id": 5,
            "title": "Main",
            "columns": [{"id": 1, "title": "To do"}],
            "external_id": "B-5"
        })))
        .mount(&server)
        .await;

    let board = client(&server).boards().get(5).await.unwrap();

    assert_eq!(board.extra["external_id"], "B-5");
    let round_trip = serde_json::to_value(&board).unwrap();
    assert_eq!(round_trip["columns"][0]["title"], "To do");
}

#[tokio::test]
async fn test_tick_checklist_item() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path(api("cards/1/checklists/2/items/3")))
        .and(body_json(json!({"checked": true})))
        .respond_with(ok_json(json!({"id": 3, "text": "ship", "checked": true})))
        .expect(1)
        .mount(&server)
        .await;

    let update = ChecklistItemUpdate { checked: Some(true), ..Default::default() };
    let item = client(&server).checklists().update_item(1, 2, 3, &update).await.unwrap();
    assert!(item.checked);
}

#[tokio::test]
async fn test_delete_ignores_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(api("cards/1/tags/2")))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .expect(1)
        .mount(&server)
        .await;

    client(&server).tags().remove(1, 2).await.unwrap();
}
