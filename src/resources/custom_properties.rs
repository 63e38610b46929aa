//! Company-wide custom card properties.

use futures::stream::{BoxStream, StreamExt};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::Extra;
use crate::client::{Client, Lookup};
use crate::pagination::{Page, paginate};
use crate::Error;

/// Client for custom property definitions.
#[derive(Clone)]
pub struct CustomPropertiesClient {
    client: Client,
}

impl CustomPropertiesClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Fetches one page of property definitions.
    pub async fn list(
        &self,
        query: &CustomPropertyQuery,
        offset: u32,
        limit: u32,
    ) -> Result<Page<CustomProperty>, Error> {
        let inner = self.client.inner();
        let mut params = vec![("offset", offset.to_string()), ("limit", limit.to_string())];
        if let Some(text) = query.query.as_deref().filter(|q| !q.is_empty()) {
            params.push(("query", text.to_string()));
        }
        let req = inner.request_with_query(
            "custom_properties.list",
            Method::GET,
            "company/custom-properties",
            &params,
        )?;
        let items = inner.send_json(req, None).await?;
        Ok(Page::new(items, offset, limit))
    }

    /// Streams every property definition.
    pub fn all(
        &self,
        query: CustomPropertyQuery,
        page_size: u32,
    ) -> BoxStream<'static, Result<CustomProperty, Error>> {
        let properties = self.clone();
        paginate(page_size, move |offset, limit| {
            let properties = properties.clone();
            let query = query.clone();
            async move { properties.list(&query, offset, limit).await }
        })
        .boxed()
    }

    /// Fetches one property definition.
    pub async fn get(&self, id: i64) -> Result<CustomProperty, Error> {
        let inner = self.client.inner();
        let path = format!("company/custom-properties/{id}");
        let req = inner.request("custom_properties.get", Method::GET, &path)?;
        inner.send_json(req, Some(Lookup::new("custom property", id))).await
    }

    /// Fetches one page of the options of a select property.
    ///
    /// Always enables the API's `v2_select_search` mode, without which
    /// `offset`, `limit` and the query are ignored.
    pub async fn list_select_values(
        &self,
        property_id: i64,
        query: &SelectValueQuery,
        offset: u32,
        limit: u32,
    ) -> Result<Page<SelectValue>, Error> {
        let inner = self.client.inner();
        let mut params = vec![
            ("v2_select_search", "true".to_string()),
            ("offset", offset.to_string()),
            ("limit", limit.to_string()),
        ];
        if let Some(text) = query.query.as_deref().filter(|q| !q.is_empty()) {
            params.push(("query", text.to_string()));
        }
        if let Some(field) = query.order_by.as_deref() {
            params.push(("order_by", field.to_string()));
        }
        let path = format!("company/custom-properties/{property_id}/select-values");
        let req = inner.request_with_query("custom_properties.select_values", Method::GET, &path, &params)?;
        let items = inner.send_json(req, Some(Lookup::new("custom property", property_id))).await?;
        Ok(Page::new(items, offset, limit))
    }

    /// Streams every option of a select property.
    pub fn all_select_values(
        &self,
        property_id: i64,
        query: SelectValueQuery,
        page_size: u32,
    ) -> BoxStream<'static, Result<SelectValue, Error>> {
        let properties = self.clone();
        paginate(page_size, move |offset, limit| {
            let properties = properties.clone();
            let query = query.clone();
            async move { properties.list_select_values(property_id, &query, offset, limit).await }
        })
        .boxed()
    }

    /// Fetches one option of a select property.
    pub async fn get_select_value(&self, property_id: i64, id: i64) -> Result<SelectValue, Error> {
        let inner = self.client.inner();
        let path = format!("company/custom-properties/{property_id}/select-values/{id}");
        let req = inner.request("custom_properties.select_value", Method::GET, &path)?;
        inner.send_json(req, Some(Lookup::new("select value", id))).await
    }
}

impl std::fmt::Debug for CustomPropertiesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomPropertiesClient").finish_non_exhaustive()
    }
}

/// Criteria for [`CustomPropertiesClient::list`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomPropertyQuery {
    /// Match on name.
    pub query: Option<String>,
}

/// A custom property definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomProperty {
    /// The property id.
    pub id: i64,
    /// Property name.
    pub name: String,
    /// Value kind as reported by the API, e.g. `"select"` or `"string"`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: Extra,
}

/// Criteria for [`CustomPropertiesClient::list_select_values`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectValueQuery {
    /// Match on the option text.
    pub query: Option<String>,
    /// Field to sort by, e.g. `"sort_order"`.
    pub order_by: Option<String>,
}

/// One option of a select custom property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectValue {
    /// The option id.
    pub id: i64,
    /// The property the option belongs to.
    pub custom_property_id: Option<i64>,
    /// Option text.
    pub value: String,
    /// Palette index.
    pub color: Option<i64>,
    /// `"active"` or `"deleted"`.
    pub condition: Option<String>,
    /// Position in the option list.
    pub sort_order: Option<f64>,
    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: Extra,
}
