//! The Kaiten API client.
//!
//! [`Client`] owns the base URL, the credential and the middleware chain.
//! Resource operations live on lightweight sub-clients obtained from it:
//!
//! | Accessor                    | Resource                          |
//! |-----------------------------|-----------------------------------|
//! | [`spaces()`](Client::spaces)            | spaces                |
//! | [`boards()`](Client::boards)            | boards                |
//! | [`columns()`](Client::columns)          | board columns         |
//! | [`lanes()`](Client::lanes)              | board lanes           |
//! | [`cards()`](Client::cards)              | cards                 |
//! | [`card_children()`](Client::card_children) | child cards        |
//! | [`card_types()`](Client::card_types)    | card types            |
//! | [`card_members()`](Client::card_members) | card members         |
//! | [`comments()`](Client::comments)        | card comments         |
//! | [`tags()`](Client::tags)                | card tags             |
//! | [`checklists()`](Client::checklists)    | card checklists       |
//! | [`blockers()`](Client::blockers)        | card blockers         |
//! | [`external_links()`](Client::external_links) | card links       |
//! | [`sprints()`](Client::sprints)          | sprints               |
//! | [`users()`](Client::users)              | company users         |
//! | [`custom_properties()`](Client::custom_properties) | custom properties and select values |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kaiten::Client;
//!
//! # async fn example() -> Result<(), kaiten::Error> {
//! let client = Client::builder()
//!     .url("https://team.kaiten.ru/api/latest")
//!     .token("your-api-token")
//!     .build()?;
//!
//! let card = client.cards().get(42).await?;
//! println!("{}", card.title);
//! # Ok(())
//! # }
//! ```

mod builder;
mod inner;

pub use builder::{ClientBuilder, HasToken, HasUrl, NoToken, NoUrl};
pub(crate) use inner::Lookup;

use std::sync::Arc;

use url::Url;

use crate::resources::{
    BlockersClient, BoardsClient, CardChildrenClient, CardMembersClient, CardTypesClient,
    CardsClient, ChecklistsClient, ColumnsClient, CommentsClient, CustomPropertiesClient,
    ExternalLinksClient, LanesClient, SpacesClient, SprintsClient, TagsClient, UsersClient,
};
use crate::{Config, Error, RetryPolicy};

/// The Kaiten API client.
///
/// Cheap to clone; clones share the connection pool and configuration.
#[derive(Clone)]
pub struct Client {
    inner: Arc<inner::ClientInner>,
}

impl Client {
    /// Creates a new client builder.
    pub fn builder() -> ClientBuilder<NoUrl, NoToken> {
        ClientBuilder::new()
    }

    /// Creates a client from a resolved [`Config`] with default settings.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidUrl`] or [`Error::MissingConfiguration`] if the values
    /// are unusable.
    pub fn from_config(config: Config) -> Result<Self, Error> {
        Self::builder().url(config.base_url).token(config.token).build()
    }

    /// Creates a client from `KAITEN_URL` and `KAITEN_TOKEN`.
    ///
    /// # Errors
    ///
    /// [`Error::MissingConfiguration`] naming the absent variable, or
    /// [`Error::InvalidUrl`].
    pub fn from_env() -> Result<Self, Error> {
        Self::from_config(Config::from_env()?)
    }

    /// Returns the normalised base URL (always ending in `/`).
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Returns the retry policy in effect.
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.inner.retry_policy
    }

    /// Space operations.
    pub fn spaces(&self) -> SpacesClient {
        SpacesClient::new(self.clone())
    }

    /// Board operations.
    pub fn boards(&self) -> BoardsClient {
        BoardsClient::new(self.clone())
    }

    /// Board column operations.
    pub fn columns(&self) -> ColumnsClient {
        ColumnsClient::new(self.clone())
    }

    /// Board lane operations.
    pub fn lanes(&self) -> LanesClient {
        LanesClient::new(self.clone())
    }

    /// Card operations.
    pub fn cards(&self) -> CardsClient {
        CardsClient::new(self.clone())
    }

    /// Child card operations.
    pub fn card_children(&self) -> CardChildrenClient {
        CardChildrenClient::new(self.clone())
    }

    /// Card type operations.
    pub fn card_types(&self) -> CardTypesClient {
        CardTypesClient::new(self.clone())
    }

    /// Card member operations.
    pub fn card_members(&self) -> CardMembersClient {
        CardMembersClient::new(self.clone())
    }

    /// Card comment operations.
    pub fn comments(&self) -> CommentsClient {
        CommentsClient::new(self.clone())
    }

    /// Card tag operations.
    pub fn tags(&self) -> TagsClient {
        TagsClient::new(self.clone())
    }

    /// Checklist operations.
    pub fn checklists(&self) -> ChecklistsClient {
        ChecklistsClient::new(self.clone())
    }

    /// Card blocker operations.
    pub fn blockers(&self) -> BlockersClient {
        BlockersClient::new(self.clone())
    }

    /// Card external link operations.
    pub fn external_links(&self) -> ExternalLinksClient {
        ExternalLinksClient::new(self.clone())
    }

    /// Sprint operations.
    pub fn sprints(&self) -> SprintsClient {
        SprintsClient::new(self.clone())
    }

    /// User operations.
    pub fn users(&self) -> UsersClient {
        UsersClient::new(self.clone())
    }

    /// Custom property operations.
    pub fn custom_properties(&self) -> CustomPropertiesClient {
        CustomPropertiesClient::new(self.clone())
    }

    pub(crate) fn from_inner(inner: inner::ClientInner) -> Self {
        Self { inner: Arc::new(inner) }
    }

    pub(crate) fn inner(&self) -> &inner::ClientInner {
        &self.inner
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.inner.base_url.as_str())
            .field("retry_policy", &self.inner.retry_policy)
            .finish_non_exhaustive()
    }
}
