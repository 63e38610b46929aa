//! Card blockers.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::Extra;
use crate::client::{Client, Lookup};
use crate::Error;

/// Client for card blockers.
#[derive(Clone)]
pub struct BlockersClient {
    client: Client,
}

impl BlockersClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Lists the blockers on a card.
    pub async fn list(&self, card_id: i64) -> Result<Vec<Blocker>, Error> {
        let inner = self.client.inner();
        let path = format!("cards/{card_id}/blockers");
        let req = inner.request("blockers.list", Method::GET, &path)?;
        inner.send_json(req, Some(Lookup::new("card", card_id))).await
    }

    /// Blocks a card, with a reason, another card, or both.
    pub async fn create(&self, card_id: i64, blocker: &NewBlocker) -> Result<Blocker, Error> {
        let inner = self.client.inner();
        let path = format!("cards/{card_id}/blockers");
        let req = inner.request("blockers.create", Method::POST, &path)?;
        let req = inner.json_body(req, blocker)?;
        inner.send_json(req, Some(Lookup::new("card", card_id))).await
    }

    /// Releases a blocker.
    pub async fn delete(&self, card_id: i64, id: i64) -> Result<(), Error> {
        let inner = self.client.inner();
        let path = format!("cards/{card_id}/blockers/{id}");
        let req = inner.request("blockers.delete", Method::DELETE, &path)?;
        inner.send_unit(req, Some(Lookup::new("blocker", id))).await
    }
}

impl std::fmt::Debug for BlockersClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockersClient").finish_non_exhaustive()
    }
}

/// A blocker on a card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blocker {
    /// The blocker id.
    pub id: i64,
    /// Free-text reason.
    pub reason: Option<String>,
    /// The card causing the block.
    pub blocker_card_id: Option<i64>,
    /// Whether the blocker has been released.
    pub released: Option<bool>,
    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: Extra,
}

/// Body of a blocker creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewBlocker {
    /// Free-text reason.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// The card causing the block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocker_card_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::test_support::{client_with, json, sent_json, target};

    #[tokio::test]
    async fn test_list() {
        let transport = json(r#"[{"id":1,"reason":"waiting on vendor","released":false}]"#);
        let blockers = client_with(&transport).blockers().list(42).await.unwrap();

        assert_eq!(target(&transport), "GET /api/latest/cards/42/blockers");
        assert_eq!(blockers[0].reason.as_deref(), Some("waiting on vendor"));
    }

    #[tokio::test]
    async fn test_create_by_card() {
        let transport = json(r#"{"id":2,"blocker_card_id":17}"#);
        let blocker = NewBlocker { blocker_card_id: Some(17), ..Default::default() };
        client_with(&transport).blockers().create(42, &blocker).await.unwrap();

        assert_eq!(sent_json(&transport), serde_json::json!({"blocker_card_id": 17}));
    }

    #[tokio::test]
    async fn test_delete() {
        let transport = json("");
        client_with(&transport).blockers().delete(42, 2).await.unwrap();
        assert_eq!(target(&transport), "DELETE /api/latest/cards/42/blockers/2");
    }
}
