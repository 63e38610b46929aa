//! Company card types.

use futures::stream::{BoxStream, StreamExt};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::Extra;
use crate::client::Client;
use crate::pagination::{Page, paginate};
use crate::Error;

/// Client for card type definitions.
#[derive(Clone)]
pub struct CardTypesClient {
    client: Client,
}

impl CardTypesClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Fetches one page of card types.
    pub async fn list(&self, offset: u32, limit: u32) -> Result<Page<CardType>, Error> {
        let inner = self.client.inner();
        let params = [("offset", offset.to_string()), ("limit", limit.to_string())];
        let req = inner.request_with_query("card_types.list", Method::GET, "card-types", &params)?;
        let items = inner.send_json(req, None).await?;
        Ok(Page::new(items, offset, limit))
    }

    /// Streams every card type.
    pub fn all(&self, page_size: u32) -> BoxStream<'static, Result<CardType, Error>> {
        let card_types = self.clone();
        paginate(page_size, move |offset, limit| {
            let card_types = card_types.clone();
            async move { card_types.list(offset, limit).await }
        })
        .boxed()
    }
}

impl std::fmt::Debug for CardTypesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardTypesClient").finish_non_exhaustive()
    }
}

/// A card type such as "Bug" or "Feature".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardType {
    /// The type id, referenced by [`NewCard::type_id`](super::NewCard::type_id).
    pub id: i64,
    /// Type name.
    pub name: String,
    /// Short badge shown on cards.
    pub letter: Option<String>,
    /// Palette index.
    pub color: Option<i64>,
    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: Extra,
}
