//! Card checklists and their items.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::Extra;
use crate::client::{Client, Lookup};
use crate::Error;

/// Client for checklists and checklist items.
///
/// Access via [`Client::checklists`]. Every call is scoped to a card.
#[derive(Clone)]
pub struct ChecklistsClient {
    client: Client,
}

impl ChecklistsClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Adds a checklist to a card.
    pub async fn create(&self, card_id: i64, checklist: &NewChecklist) -> Result<Checklist, Error> {
        let inner = self.client.inner();
        let path = format!("cards/{card_id}/checklists");
        let req = inner.request("checklists.create", Method::POST, &path)?;
        let req = inner.json_body(req, checklist)?;
        inner.send_json(req, Some(Lookup::new("card", card_id))).await
    }

    /// Fetches a checklist with its items.
    pub async fn get(&self, card_id: i64, id: i64) -> Result<Checklist, Error> {
        let inner = self.client.inner();
        let path = format!("cards/{card_id}/checklists/{id}");
        let req = inner.request("checklists.get", Method::GET, &path)?;
        inner.send_json(req, Some(Lookup::new("checklist", id))).await
    }

    /// Renames or reorders a checklist.
    pub async fn update(
        &self,
        card_id: i64,
        id: i64,
        update: &ChecklistUpdate,
    ) -> Result<Checklist, Error> {
        let inner = self.client.inner();
        let path = format!("cards/{card_id}/checklists/{id}");
        let req = inner.request("checklists.update", Method::PATCH, &path)?;
        let req = inner.json_body(req, update)?;
        inner.send_json(req, Some(Lookup::new("checklist", id))).await
    }

    /// Removes a checklist and its items.
    pub async fn remove(&self, card_id: i64, id: i64) -> Result<(), Error> {
        let inner = self.client.inner();
        let path = format!("cards/{card_id}/checklists/{id}");
        let req = inner.request("checklists.remove", Method::DELETE, &path)?;
        inner.send_unit(req, Some(Lookup::new("checklist", id))).await
    }

    /// Appends an item to a checklist.
    pub async fn create_item(
        &self,
        card_id: i64,
        checklist_id: i64,
        item: &NewChecklistItem,
    ) -> Result<ChecklistItem, Error> {
        let inner = self.client.inner();
        let path = format!("cards/{card_id}/checklists/{checklist_id}/items");
        let req = inner.request("checklists.create_item", Method::POST, &path)?;
        let req = inner.json_body(req, item)?;
        inner.send_json(req, Some(Lookup::new("checklist", checklist_id))).await
    }

    /// Edits, checks or unchecks an item.
    pub async fn update_item(
        &self,
        card_id: i64,
        checklist_id: i64,
        id: i64,
        update: &ChecklistItemUpdate,
    ) -> Result<ChecklistItem, Error> {
        let inner = self.client.inner();
        let path = format!("cards/{card_id}/checklists/{checklist_id}/items/{id}");
        let req = inner.request("checklists.update_item", Method::PATCH, &path)?;
        let req = inner.json_body(req, update)?;
        inner.send_json(req, Some(Lookup::new("checklist item", id))).await
    }

    /// Removes an item.
    pub async fn remove_item(&self, card_id: i64, checklist_id: i64, id: i64) -> Result<(), Error> {
        let inner = self.client.inner();
        let path = format!("cards/{card_id}/checklists/{checklist_id}/items/{id}");
        let req = inner.request("checklists.remove_item", Method::DELETE, &path)?;
        inner.send_unit(req, Some(Lookup::new("checklist item", id))).await
    }
}

impl std::fmt::Debug for ChecklistsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChecklistsClient").finish_non_exhaustive()
    }
}

/// A checklist on a card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checklist {
    /// The checklist id.
    pub id: i64,
    /// Checklist name.
    pub name: String,
    /// Position among the card's checklists.
    pub sort_order: Option<f64>,
    /// Items, in order.
    #[serde(default)]
    pub items: Vec<ChecklistItem>,
    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: Extra,
}

/// One line of a checklist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
    /// The item id.
    pub id: i64,
    /// Item text.
    pub text: String,
    /// Whether the item is ticked.
    #[serde(default)]
    pub checked: bool,
    /// Position within the checklist.
    pub sort_order: Option<f64>,
    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: Extra,
}

/// Body of a checklist creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewChecklist {
    /// Checklist name.
    pub name: String,
    /// Position among the card's checklists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<f64>,
}

impl NewChecklist {
    /// A checklist called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), sort_order: None }
    }
}

/// Partial update of a checklist.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChecklistUpdate {
    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<f64>,
}

/// Body of a checklist item creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewChecklistItem {
    /// Item text.
    pub text: String,
    /// Create the item already ticked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    /// Position within the checklist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<f64>,
}

impl NewChecklistItem {
    /// An unticked item reading `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), ..Default::default() }
    }
}

/// Partial update of a checklist item.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChecklistItemUpdate {
    /// New text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Tick or untick.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    /// New position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<f64>,
}
