//! Board lanes (swimlanes).

use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::{Extra, LaneCondition, WipLimitType};
use crate::client::{Client, Lookup};
use crate::Error;

/// Client for board lane operations.
#[derive(Clone)]
pub struct LanesClient {
    client: Client,
}

impl LanesClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Lists the lanes of a board, optionally only those in `condition`.
    pub async fn list(
        &self,
        board_id: i64,
        condition: Option<LaneCondition>,
    ) -> Result<Vec<Lane>, Error> {
        let inner = self.client.inner();
        let path = format!("boards/{board_id}/lanes");
        let query: Vec<_> =
            condition.map(|c| ("condition", c.code().to_string())).into_iter().collect();
        let req = inner.request_with_query("lanes.list", Method::GET, &path, &query)?;
        inner.send_json(req, Some(Lookup::new("board", board_id))).await
    }

    /// Adds a lane to a board.
    pub async fn create(&self, board_id: i64, lane: &NewLane) -> Result<Lane, Error> {
        let inner = self.client.inner();
        let path = format!("boards/{board_id}/lanes");
        let req = inner.json_body(inner.request("lanes.create", Method::POST, &path)?, lane)?;
        inner.send_json(req, Some(Lookup::new("board", board_id))).await
    }

    /// Updates the fields set in `update`.
    pub async fn update(&self, board_id: i64, id: i64, update: &LaneUpdate) -> Result<Lane, Error> {
        let inner = self.client.inner();
        let path = format!("boards/{board_id}/lanes/{id}");
        let req = inner.json_body(inner.request("lanes.update", Method::PATCH, &path)?, update)?;
        inner.send_json(req, Some(Lookup::new("lane", id))).await
    }

    /// Removes a lane.
    pub async fn delete(&self, board_id: i64, id: i64) -> Result<(), Error> {
        let inner = self.client.inner();
        let path = format!("boards/{board_id}/lanes/{id}");
        let req = inner.request("lanes.delete", Method::DELETE, &path)?;
        inner.send_unit(req, Some(Lookup::new("lane", id))).await
    }
}

impl std::fmt::Debug for LanesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanesClient").finish_non_exhaustive()
    }
}

/// A board lane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lane {
    /// The lane id.
    pub id: i64,
    /// Display title.
    pub title: String,
    /// Owning board.
    pub board_id: Option<i64>,
    /// Position among sibling lanes.
    pub sort_order: Option<f64>,
    /// Lifecycle state.
    pub condition: Option<LaneCondition>,
    /// WIP limit, if any.
    pub wip_limit: Option<i64>,
    /// What the WIP limit counts.
    pub wip_limit_type: Option<WipLimitType>,
    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: Extra,
}

/// Body of a lane creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewLane {
    /// Display title.
    pub title: String,
    /// Position among sibling lanes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<f64>,
    /// WIP limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wip_limit: Option<i64>,
    /// What the WIP limit counts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wip_limit_type: Option<WipLimitType>,
}

impl NewLane {
    /// A lane called `title`.
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), ..Default::default() }
    }
}

/// Partial update of a lane. Setting `condition` archives or restores it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LaneUpdate {
    /// New title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<f64>,
    /// New lifecycle state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<LaneCondition>,
    /// New WIP limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wip_limit: Option<i64>,
    /// New WIP limit kind.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wip_limit_type: Option<WipLimitType>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::test_support::{client_with, json, sent_json, status, target};

    #[tokio::test]
    async fn test_list_without_filter() {
        let transport = json(r#"[{"id":1,"title":"Default","condition":1}]"#);
        let lanes = client_with(&transport).lanes().list(10, None).await.unwrap();

        assert_eq!(target(&transport), "GET /api/latest/boards/10/lanes");
        assert_eq!(lanes[0].condition, Some(LaneCondition::Live));
    }

    #[tokio::test]
    async fn test_list_tolerates_unmodelled_codes() {
        let transport = json(r#"[{"id":1,"title":"Swimlane","condition":5,"wip_limit_type":7}]"#);
        let lanes = client_with(&transport).lanes().list(10, None).await.unwrap();

        assert_eq!(lanes[0].condition, Some(LaneCondition::Unknown(5)));
        assert_eq!(lanes[0].wip_limit_type, Some(WipLimitType::Unknown(7)));
    }

    #[tokio::test]
    async fn test_list_with_condition() {
        let transport = json("[]");
        client_with(&transport).lanes().list(10, Some(LaneCondition::Archived)).await.unwrap();
        assert_eq!(target(&transport), "GET /api/latest/boards/10/lanes?condition=2");
    }

    #[tokio::test]
    async fn test_archive_via_update() {
        let transport = json(r#"{"id":4,"title":"Old","condition":2}"#);
        let update = LaneUpdate { condition: Some(LaneCondition::Archived), ..Default::default() };
        let lane = client_with(&transport).lanes().update(10, 4, &update).await.unwrap();

        assert_eq!(target(&transport), "PATCH /api/latest/boards/10/lanes/4");
        assert_eq!(sent_json(&transport), serde_json::json!({"condition": 2}));
        assert_eq!(lane.condition, Some(LaneCondition::Archived));
    }

    #[tokio::test]
    async fn test_missing_board() {
        let transport = status(404);
        let err = client_with(&transport).lanes().list(77, None).await.unwrap_err();
        assert!(matches!(err, Error::NotFound { resource: "board", id: 77 }));
    }
}
