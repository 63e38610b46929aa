//! Board columns.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::{ColumnType, Extra, WipLimitType};
use crate::client::{Client, Lookup};
use crate::Error;

/// Client for board column operations.
#[derive(Clone)]
pub struct ColumnsClient {
    client: Client,
}

impl ColumnsClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Lists the columns of a board.
    pub async fn list(&self, board_id: i64) -> Result<Vec<Column>, Error> {
        let inner = self.client.inner();
        let path = format!("boards/{board_id}/columns");
        let req = inner.request("columns.list", Method::GET, &path)?;
        inner.send_json(req, Some(Lookup::new("board", board_id))).await
    }

    /// Adds a column to a board.
    pub async fn create(&self, board_id: i64, column: &NewColumn) -> Result<Column, Error> {
        let inner = self.client.inner();
        let path = format!("boards/{board_id}/columns");
        let req = inner.json_body(inner.request("columns.create", Method::POST, &path)?, column)?;
        inner.send_json(req, Some(Lookup::new("board", board_id))).await
    }

    /// Updates the fields set in `update`.
    pub async fn update(
        &self,
        board_id: i64,
        id: i64,
        update: &ColumnUpdate,
    ) -> Result<Column, Error> {
        let inner = self.client.inner();
        let path = format!("boards/{board_id}/columns/{id}");
        let req = inner.json_body(inner.request("columns.update", Method::PATCH, &path)?, update)?;
        inner.send_json(req, Some(Lookup::new("column", id))).await
    }

    /// Removes a column.
    pub async fn delete(&self, board_id: i64, id: i64) -> Result<(), Error> {
        let inner = self.client.inner();
        let path = format!("boards/{board_id}/columns/{id}");
        let req = inner.request("columns.delete", Method::DELETE, &path)?;
        inner.send_unit(req, Some(Lookup::new("column", id))).await
    }
}

impl std::fmt::Debug for ColumnsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColumnsClient").finish_non_exhaustive()
    }
}

/// A board column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// The column id.
    pub id: i64,
    /// Display title.
    pub title: String,
    /// Owning board.
    pub board_id: Option<i64>,
    /// Position among sibling columns.
    pub sort_order: Option<f64>,
    /// Column kind.
    #[serde(rename = "type")]
    pub column_type: Option<ColumnType>,
    /// WIP limit, if any.
    pub wip_limit: Option<i64>,
    /// What the WIP limit counts.
    pub wip_limit_type: Option<WipLimitType>,
    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: Extra,
}

/// Body of a column creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewColumn {
    /// Display title.
    pub title: String,
    /// Position among sibling columns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<f64>,
    /// Column kind.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub column_type: Option<ColumnType>,
    /// WIP limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wip_limit: Option<i64>,
    /// What the WIP limit counts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wip_limit_type: Option<WipLimitType>,
}

impl NewColumn {
    /// A column called `title` of the given kind.
    pub fn new(title: impl Into<String>, column_type: ColumnType) -> Self {
        Self { title: title.into(), column_type: Some(column_type), ..Default::default() }
    }
}

/// Partial update of a column.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ColumnUpdate {
    /// New title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<f64>,
    /// New kind.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub column_type: Option<ColumnType>,
    /// New WIP limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wip_limit: Option<i64>,
    /// New WIP limit kind.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wip_limit_type: Option<WipLimitType>,
}
