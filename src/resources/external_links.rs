//! External links attached to cards.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::{Deleted, Extra};
use crate::client::{Client, Lookup};
use crate::Error;

/// Client for card external links.
#[derive(Clone)]
pub struct ExternalLinksClient {
    client: Client,
}

impl ExternalLinksClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Lists the links on a card.
    pub async fn list(&self, card_id: i64) -> Result<Vec<ExternalLink>, Error> {
        let inner = self.client.inner();
        let path = format!("cards/{card_id}/external-links");
        let req = inner.request("external_links.list", Method::GET, &path)?;
        inner.send_json(req, Some(Lookup::new("card", card_id))).await
    }

    /// Attaches a link to a card.
    pub async fn create(&self, card_id: i64, link: &NewExternalLink) -> Result<ExternalLink, Error> {
        let inner = self.client.inner();
        let path = format!("cards/{card_id}/external-links");
        let req = inner.json_body(inner.request("external_links.create", Method::POST, &path)?, link)?;
        inner.send_json(req, Some(Lookup::new("card", card_id))).await
    }

    /// Changes a link's URL or description.
    pub async fn update(
        &self,
        card_id: i64,
        link_id: i64,
        update: &ExternalLinkUpdate,
    ) -> Result<ExternalLink, Error> {
        let inner = self.client.inner();
        let path = format!("cards/{card_id}/external-links/{link_id}");
        let req =
            inner.json_body(inner.request("external_links.update", Method::PATCH, &path)?, update)?;
        inner.send_json(req, Some(Lookup::new("external link", link_id))).await
    }

    /// Removes a link and returns its id.
    pub async fn remove(&self, card_id: i64, link_id: i64) -> Result<i64, Error> {
        let inner = self.client.inner();
        let path = format!("cards/{card_id}/external-links/{link_id}");
        let req = inner.request("external_links.remove", Method::DELETE, &path)?;
        let deleted: Deleted = inner.send_json(req, Some(Lookup::new("external link", link_id))).await?;
        Ok(deleted.id)
    }
}

impl std::fmt::Debug for ExternalLinksClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExternalLinksClient").finish_non_exhaustive()
    }
}

/// A link from a card to an outside resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalLink {
    /// The link id.
    pub id: i64,
    /// Target URL.
    pub url: String,
    /// Label shown instead of the URL.
    pub description: Option<String>,
    /// The card the link is attached to.
    pub card_id: Option<i64>,
    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: Extra,
}

/// Body of [`ExternalLinksClient::create`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewExternalLink {
    /// Target URL.
    pub url: String,
    /// Optional label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NewExternalLink {
    /// A link with no description.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), description: None }
    }
}

/// Body of [`ExternalLinksClient::update`]; `None` fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExternalLinkUpdate {
    /// New URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// New label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
