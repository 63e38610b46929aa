//! Parent/child links between cards.

use reqwest::Method;
use serde::Serialize;

use super::{Card, Deleted};
use crate::client::{Client, Lookup};
use crate::Error;

/// Client for the children of a card.
///
/// Children are ordinary cards; the payload adds `card_id` (the parent) and
/// `depends_on_card_id`, which land in [`Card::extra`].
#[derive(Clone)]
pub struct CardChildrenClient {
    client: Client,
}

impl CardChildrenClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Lists the children of a card.
    pub async fn list(&self, card_id: i64) -> Result<Vec<Card>, Error> {
        let inner = self.client.inner();
        let path = format!("cards/{card_id}/children");
        let req = inner.request("children.list", Method::GET, &path)?;
        inner.send_json(req, Some(Lookup::new("card", card_id))).await
    }

    /// Makes `child_card_id` a child of `card_id`.
    pub async fn add(&self, card_id: i64, child_card_id: i64) -> Result<Card, Error> {
        #[derive(Serialize)]
        struct Body {
            card_id: i64,
        }

        let inner = self.client.inner();
        let path = format!("cards/{card_id}/children");
        let req = inner.json_body(
            inner.request("children.add", Method::POST, &path)?,
            &Body { card_id: child_card_id },
        )?;
        inner.send_json(req, Some(Lookup::new("card", card_id))).await
    }

    /// Detaches a child and returns its id. Both cards survive.
    pub async fn remove(&self, card_id: i64, child_id: i64) -> Result<i64, Error> {
        let inner = self.client.inner();
        let path = format!("cards/{card_id}/children/{child_id}");
        let req = inner.request("children.remove", Method::DELETE, &path)?;
        let deleted: Deleted = inner.send_json(req, Some(Lookup::new("card child", child_id))).await?;
        Ok(deleted.id)
    }
}

impl std::fmt::Debug for CardChildrenClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardChildrenClient").finish_non_exhaustive()
    }
}
