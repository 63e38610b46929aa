//! Company users.

use futures::stream::{BoxStream, StreamExt};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::Extra;
use crate::client::Client;
use crate::pagination::{Page, paginate};
use crate::Error;

/// Client for user lookups.
#[derive(Clone)]
pub struct UsersClient {
    client: Client,
}

impl UsersClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Fetches one page of company users.
    pub async fn list(&self, query: &UserQuery, offset: u32, limit: u32) -> Result<Page<User>, Error> {
        let inner = self.client.inner();
        let mut params = vec![("offset", offset.to_string()), ("limit", limit.to_string())];
        if let Some(text) = query.query.as_deref().filter(|q| !q.is_empty()) {
            params.push(("query", text.to_string()));
        }
        if query.include_inactive {
            params.push(("include_inactive", "true".to_string()));
        }
        let req = inner.request_with_query("users.list", Method::GET, "users", &params)?;
        let items = inner.send_json(req, None).await?;
        Ok(Page::new(items, offset, limit))
    }

    /// Streams every matching user.
    pub fn all(&self, query: UserQuery, page_size: u32) -> BoxStream<'static, Result<User, Error>> {
        let users = self.clone();
        paginate(page_size, move |offset, limit| {
            let users = users.clone();
            let query = query.clone();
            async move { users.list(&query, offset, limit).await }
        })
        .boxed()
    }

    /// Returns the user the token belongs to.
    pub async fn current(&self) -> Result<User, Error> {
        let inner = self.client.inner();
        let req = inner.request("users.current", Method::GET, "users/current")?;
        inner.send_json(req, None).await
    }
}

impl std::fmt::Debug for UsersClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UsersClient").finish_non_exhaustive()
    }
}

/// Criteria for [`UsersClient::list`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserQuery {
    /// Match on name, login or email.
    pub query: Option<String>,
    /// Include deactivated users.
    pub include_inactive: bool,
}

/// A company user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// The user id.
    pub id: i64,
    /// Full name.
    pub full_name: Option<String>,
    /// Login.
    pub username: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Whether the account is active.
    pub activated: Option<bool>,
    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: Extra,
}
