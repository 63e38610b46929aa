//! Cards: listing with filters, paging and CRUD.

use chrono::{DateTime, Utc};
use futures::stream::{BoxStream, StreamExt};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::{CardCondition, CardPosition, CardState, Extra, TextFormatType};
use crate::client::{Client, Lookup};
use crate::pagination::{Page, paginate};
use crate::Error;

/// Client for card operations.
///
/// Access via [`Client::cards`].
///
/// ## Example
///
/// ```rust,no_run
/// use futures::TryStreamExt;
/// use kaiten::resources::{CardFilter, CardState};
///
/// # async fn example(client: kaiten::Client) -> Result<(), kaiten::Error> {
/// let filter = CardFilter {
///     board_id: Some(10),
///     states: vec![CardState::InProgress],
///     ..Default::default()
/// };
///
/// // One page
/// let page = client.cards().list(&filter, 0, 50).await?;
/// println!("{} cards, more: {}", page.len(), page.has_more());
///
/// // Every matching card, fetched page by page
/// let mut cards = client.cards().all(filter, 100);
/// while let Some(card) = cards.try_next().await? {
///     println!("{}: {}", card.id, card.title);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct CardsClient {
    client: Client,
}

impl CardsClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Fetches one page of cards matching `filter`.
    pub async fn list(
        &self,
        filter: &CardFilter,
        offset: u32,
        limit: u32,
    ) -> Result<Page<Card>, Error> {
        let inner = self.client.inner();
        let mut query = filter.to_query();
        query.push(("offset", offset.to_string()));
        query.push(("limit", limit.to_string()));
        let req = inner.request_with_query("cards.list", Method::GET, "cards", &query)?;
        let items = inner.send_json(req, None).await?;
        Ok(Page::new(items, offset, limit))
    }

    /// Streams every card matching `filter`, `page_size` at a time.
    pub fn all(&self, filter: CardFilter, page_size: u32) -> BoxStream<'static, Result<Card, Error>> {
        let cards = self.clone();
        paginate(page_size, move |offset, limit| {
            let cards = cards.clone();
            let filter = filter.clone();
            async move { cards.list(&filter, offset, limit).await }
        })
        .boxed()
    }

    /// Fetches a card.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if no card has this id.
    pub async fn get(&self, id: i64) -> Result<Card, Error> {
        let inner = self.client.inner();
        let req = inner.request("cards.get", Method::GET, &format!("cards/{id}"))?;
        inner.send_json(req, Some(Lookup::new("card", id))).await
    }

    /// Creates a card.
    pub async fn create(&self, card: &NewCard) -> Result<Card, Error> {
        let inner = self.client.inner();
        let req = inner.json_body(inner.request("cards.create", Method::POST, "cards")?, card)?;
        inner.send_json(req, None).await
    }

    /// Updates the fields set in `update`, including moving the card.
    pub async fn update(&self, id: i64, update: &CardUpdate) -> Result<Card, Error> {
        let inner = self.client.inner();
        let path = format!("cards/{id}");
        let req = inner.json_body(inner.request("cards.update", Method::PATCH, &path)?, update)?;
        inner.send_json(req, Some(Lookup::new("card", id))).await
    }

    /// Deletes a card.
    pub async fn delete(&self, id: i64) -> Result<(), Error> {
        let inner = self.client.inner();
        let req = inner.request("cards.delete", Method::DELETE, &format!("cards/{id}"))?;
        inner.send_unit(req, Some(Lookup::new("card", id))).await
    }

    /// Lists every board, column and lane the card has been in, oldest
    /// first.
    pub async fn location_history(&self, id: i64) -> Result<Vec<CardLocation>, Error> {
        let inner = self.client.inner();
        let path = format!("cards/{id}/location-history");
        let req = inner.request("cards.location_history", Method::GET, &path)?;
        inner.send_json(req, Some(Lookup::new("card", id))).await
    }
}

impl std::fmt::Debug for CardsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardsClient").finish_non_exhaustive()
    }
}

/// Criteria for [`CardsClient::list`]. Unset criteria do not constrain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardFilter {
    /// Only cards in this space.
    pub space_id: Option<i64>,
    /// Only cards on this board.
    pub board_id: Option<i64>,
    /// Only cards in this column.
    pub column_id: Option<i64>,
    /// Only cards in this lane.
    pub lane_id: Option<i64>,
    /// On board or archived.
    pub condition: Option<CardCondition>,
    /// Any of these workflow states.
    pub states: Vec<CardState>,
    /// Full-text search.
    pub query: Option<String>,
}

impl CardFilter {
    /// Cards on one board.
    pub fn board(board_id: i64) -> Self {
        Self { board_id: Some(board_id), ..Default::default() }
    }

    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        let ids = [
            ("space_id", self.space_id),
            ("board_id", self.board_id),
            ("column_id", self.column_id),
            ("lane_id", self.lane_id),
        ];
        query.extend(ids.into_iter().filter_map(|(k, v)| v.map(|v| (k, v.to_string()))));
        if let Some(condition) = self.condition {
            query.push(("condition", condition.code().to_string()));
        }
        if !self.states.is_empty() {
            let states: Vec<String> = self.states.iter().map(|s| s.code().to_string()).collect();
            query.push(("states", states.join(",")));
        }
        if let Some(text) = self.query.as_deref().filter(|q| !q.is_empty()) {
            query.push(("query", text.to_string()));
        }
        query
    }
}

/// A card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// The card id.
    pub id: i64,
    /// Title.
    pub title: String,
    /// Description in the card's text format.
    pub description: Option<String>,
    /// Board the card is on.
    pub board_id: Option<i64>,
    /// Column the card is in.
    pub column_id: Option<i64>,
    /// Lane the card is in.
    pub lane_id: Option<i64>,
    /// On board or archived.
    pub condition: Option<CardCondition>,
    /// Workflow state.
    pub state: Option<CardState>,
    /// Position within its cell.
    pub sort_order: Option<f64>,
    /// Creation time.
    pub created: Option<DateTime<Utc>>,
    /// Last modification time.
    pub updated: Option<DateTime<Utc>>,
    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: Extra,
}

/// One entry of [`CardsClient::location_history`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardLocation {
    /// The entry id.
    pub id: i64,
    /// Board the card moved to.
    pub board_id: Option<i64>,
    /// Column the card moved to.
    pub column_id: Option<i64>,
    /// Lane the card moved to.
    pub lane_id: Option<i64>,
    /// User who moved the card.
    pub author_id: Option<i64>,
    /// When the move happened.
    pub changed: Option<DateTime<Utc>>,
    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: Extra,
}

/// Body of a card creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewCard {
    /// Title.
    pub title: String,
    /// Board to create the card on.
    pub board_id: i64,
    /// Column; the board's first column when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_id: Option<i64>,
    /// Lane; the board's first lane when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lane_id: Option<i64>,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Markup of `description`.
    #[serde(rename = "text_format_type_id", skip_serializing_if = "Option::is_none")]
    pub text_format: Option<TextFormatType>,
    /// Top or bottom of the cell.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<CardPosition>,
    /// Due date as `YYYY-MM-DD` or an ISO 8601 timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    /// Card type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_id: Option<i64>,
}

impl NewCard {
    /// A card called `title` on `board_id`.
    pub fn new(title: impl Into<String>, board_id: i64) -> Self {
        Self { title: title.into(), board_id, ..Default::default() }
    }
}

/// Partial update of a card.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CardUpdate {
    /// New title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Move to this board.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board_id: Option<i64>,
    /// Move to this column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_id: Option<i64>,
    /// Move to this lane.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lane_id: Option<i64>,
    /// Archive or restore.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<CardCondition>,
    /// New position within the cell.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<f64>,
    /// New due date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}
