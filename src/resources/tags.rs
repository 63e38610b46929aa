//! Card tags.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::Extra;
use crate::client::{Client, Lookup};
use crate::Error;

/// Client for card tags.
#[derive(Clone)]
pub struct TagsClient {
    client: Client,
}

impl TagsClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Lists the tags on a card.
    pub async fn list(&self, card_id: i64) -> Result<Vec<Tag>, Error> {
        let inner = self.client.inner();
        let path = format!("cards/{card_id}/tags");
        let req = inner.request("tags.list", Method::GET, &path)?;
        inner.send_json(req, Some(Lookup::new("card", card_id))).await
    }

    /// Tags a card by name, creating the tag if the company has none by
    /// that name.
    pub async fn add(&self, card_id: i64, name: &str) -> Result<Tag, Error> {
        #[derive(Serialize)]
        struct Body<'a> {
            name: &'a str,
        }

        let inner = self.client.inner();
        let path = format!("cards/{card_id}/tags");
        let req = inner.json_body(inner.request("tags.add", Method::POST, &path)?, &Body { name })?;
        inner.send_json(req, Some(Lookup::new("card", card_id))).await
    }

    /// Removes a tag from a card.
    pub async fn remove(&self, card_id: i64, tag_id: i64) -> Result<(), Error> {
        let inner = self.client.inner();
        let path = format!("cards/{card_id}/tags/{tag_id}");
        let req = inner.request("tags.remove", Method::DELETE, &path)?;
        inner.send_unit(req, Some(Lookup::new("tag", tag_id))).await
    }
}

impl std::fmt::Debug for TagsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagsClient").finish_non_exhaustive()
    }
}

/// A tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    /// The tag id.
    pub id: i64,
    /// Tag name.
    pub name: String,
    /// Palette index.
    pub color: Option<i64>,
    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: Extra,
}
