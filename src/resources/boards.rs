//! Boards within a space.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::Extra;
use crate::client::{Client, Lookup};
use crate::Error;

/// Client for board operations.
///
/// Access via [`Client::boards`]. Listing, creation, update and deletion are
/// addressed through the owning space; a single board can be fetched by id
/// alone.
///
/// ## Example
///
/// ```rust,no_run
/// # async fn example(client: kaiten::Client) -> Result<(), kaiten::Error> {
/// for board in client.boards().list(7).await? {
///     println!("{}: {}", board.id, board.title);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct BoardsClient {
    client: Client,
}

impl BoardsClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Lists the boards of a space.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] naming the space if it does not exist.
    pub async fn list(&self, space_id: i64) -> Result<Vec<Board>, Error> {
        let inner = self.client.inner();
        let path = format!("spaces/{space_id}/boards");
        let req = inner.request("boards.list", Method::GET, &path)?;
        inner.send_json(req, Some(Lookup::new("space", space_id))).await
    }

    /// Fetches a board, including its columns and lanes.
    pub async fn get(&self, id: i64) -> Result<Board, Error> {
        let inner = self.client.inner();
        let req = inner.request("boards.get", Method::GET, &format!("boards/{id}"))?;
        inner.send_json(req, Some(Lookup::new("board", id))).await
    }

    /// Creates a board in a space.
    pub async fn create(&self, space_id: i64, board: &NewBoard) -> Result<Board, Error> {
        let inner = self.client.inner();
        let path = format!("spaces/{space_id}/boards");
        let req = inner.json_body(inner.request("boards.create", Method::POST, &path)?, board)?;
        inner.send_json(req, Some(Lookup::new("space", space_id))).await
    }

    /// Updates the fields set in `update`.
    pub async fn update(&self, space_id: i64, id: i64, update: &BoardUpdate) -> Result<Board, Error> {
        let inner = self.client.inner();
        let path = format!("spaces/{space_id}/boards/{id}");
        let req = inner.json_body(inner.request("boards.update", Method::PATCH, &path)?, update)?;
        inner.send_json(req, Some(Lookup::new("board", id))).await
    }

    /// Deletes a board.
    pub async fn delete(&self, space_id: i64, id: i64) -> Result<(), Error> {
        let inner = self.client.inner();
        let path = format!("spaces/{space_id}/boards/{id}");
        let req = inner.request("boards.delete", Method::DELETE, &path)?;
        inner.send_unit(req, Some(Lookup::new("board", id))).await
    }
}

impl std::fmt::Debug for BoardsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoardsClient").finish_non_exhaustive()
    }
}

/// A board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    /// The board id.
    pub id: i64,
    /// Display title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Owning space, when the endpoint reports it.
    pub space_id: Option<i64>,
    /// Fields not modelled above, such as `columns` and `lanes`.
    #[serde(flatten)]
    pub extra: Extra,
}

/// Body of a board creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewBoard {
    /// Display title.
    pub title: String,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NewBoard {
    /// A board called `title`.
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), ..Default::default() }
    }
}

/// Partial update of a board.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BoardUpdate {
    /// New title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
