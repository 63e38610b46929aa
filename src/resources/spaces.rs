//! Spaces: the top-level containers of boards.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::Extra;
use crate::client::{Client, Lookup};
use crate::Error;

/// Client for space operations.
///
/// Access via [`Client::spaces`].
#[derive(Clone)]
pub struct SpacesClient {
    client: Client,
}

impl SpacesClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Lists every space visible to the token.
    pub async fn list(&self) -> Result<Vec<Space>, Error> {
        let inner = self.client.inner();
        let req = inner.request("spaces.list", Method::GET, "spaces")?;
        inner.send_json(req, None).await
    }

    /// Fetches one space.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if no space has this id.
    pub async fn get(&self, id: i64) -> Result<Space, Error> {
        let inner = self.client.inner();
        let req = inner.request("spaces.get", Method::GET, &format!("spaces/{id}"))?;
        inner.send_json(req, Some(Lookup::new("space", id))).await
    }

    /// Creates a space.
    pub async fn create(&self, space: &NewSpace) -> Result<Space, Error> {
        let inner = self.client.inner();
        let req = inner.request("spaces.create", Method::POST, "spaces")?;
        let req = inner.json_body(req, space)?;
        inner.send_json(req, None).await
    }

    /// Updates the fields set in `update`.
    pub async fn update(&self, id: i64, update: &SpaceUpdate) -> Result<Space, Error> {
        let inner = self.client.inner();
        let req = inner.request("spaces.update", Method::PATCH, &format!("spaces/{id}"))?;
        let req = inner.json_body(req, update)?;
        inner.send_json(req, Some(Lookup::new("space", id))).await
    }

    /// Deletes a space.
    pub async fn delete(&self, id: i64) -> Result<(), Error> {
        let inner = self.client.inner();
        let req = inner.request("spaces.delete", Method::DELETE, &format!("spaces/{id}"))?;
        inner.send_unit(req, Some(Lookup::new("space", id))).await
    }
}

impl std::fmt::Debug for SpacesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpacesClient").finish_non_exhaustive()
    }
}

/// A space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Space {
    /// The space id.
    pub id: i64,
    /// Display title.
    pub title: String,
    /// Globally unique id.
    pub uid: Option<String>,
    /// Whether the space is archived.
    pub archived: Option<bool>,
    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: Extra,
}

/// Body of a space creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewSpace {
    /// Display title.
    pub title: String,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NewSpace {
    /// A space called `title`.
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), ..Default::default() }
    }
}

/// Partial update of a space. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SpaceUpdate {
    /// New title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
