//! Company sprints.

use futures::stream::{BoxStream, StreamExt};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::Extra;
use crate::client::{Client, Lookup};
use crate::pagination::{Page, paginate};
use crate::Error;

/// Client for sprints.
#[derive(Clone)]
pub struct SprintsClient {
    client: Client,
}

impl SprintsClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Fetches one page of sprints. `active: Some(true)` keeps only running
    /// sprints.
    pub async fn list(&self, active: Option<bool>, offset: u32, limit: u32) -> Result<Page<Sprint>, Error> {
        let inner = self.client.inner();
        let mut params = vec![("offset", offset.to_string()), ("limit", limit.to_string())];
        if let Some(active) = active {
            params.push(("active", active.to_string()));
        }
        let req = inner.request_with_query("sprints.list", Method::GET, "sprints", &params)?;
        let items = inner.send_json(req, None).await?;
        Ok(Page::new(items, offset, limit))
    }

    /// Streams every sprint.
    pub fn all(&self, active: Option<bool>, page_size: u32) -> BoxStream<'static, Result<Sprint, Error>> {
        let sprints = self.clone();
        paginate(page_size, move |offset, limit| {
            let sprints = sprints.clone();
            async move { sprints.list(active, offset, limit).await }
        })
        .boxed()
    }

    /// Fetches one sprint.
    pub async fn get(&self, id: i64) -> Result<Sprint, Error> {
        let inner = self.client.inner();
        let path = format!("sprints/{id}");
        let req = inner.request("sprints.get", Method::GET, &path)?;
        inner.send_json(req, Some(Lookup::new("sprint", id))).await
    }
}

impl std::fmt::Debug for SprintsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SprintsClient").finish_non_exhaustive()
    }
}

/// A sprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sprint {
    /// The sprint id.
    pub id: i64,
    /// Title.
    pub title: Option<String>,
    /// Sprint goal.
    pub goal: Option<String>,
    /// Whether the sprint is running.
    #[serde(default)]
    pub active: bool,
    /// Board the sprint belongs to.
    pub board_id: Option<i64>,
    /// Fields not modelled above, including the start and finish dates.
    #[serde(flatten)]
    pub extra: Extra,
}
