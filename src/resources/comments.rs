//! Card comments.

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::Extra;
use crate::client::{Client, Lookup};
use crate::Error;

/// Client for card comments.
#[derive(Clone)]
pub struct CommentsClient {
    client: Client,
}

#[derive(Serialize)]
struct CommentText<'a> {
    text: &'a str,
}

impl CommentsClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Lists the comments on a card, oldest first.
    pub async fn list(&self, card_id: i64) -> Result<Vec<Comment>, Error> {
        let inner = self.client.inner();
        let path = format!("cards/{card_id}/comments");
        let req = inner.request("comments.list", Method::GET, &path)?;
        inner.send_json(req, Some(Lookup::new("card", card_id))).await
    }

    /// Posts a comment. `text` is markdown.
    pub async fn create(&self, card_id: i64, text: &str) -> Result<Comment, Error> {
        let inner = self.client.inner();
        let path = format!("cards/{card_id}/comments");
        let req = inner.request("comments.create", Method::POST, &path)?;
        let req = inner.json_body(req, &CommentText { text })?;
        inner.send_json(req, Some(Lookup::new("card", card_id))).await
    }

    /// Replaces a comment's text.
    pub async fn update(&self, card_id: i64, id: i64, text: &str) -> Result<Comment, Error> {
        let inner = self.client.inner();
        let path = format!("cards/{card_id}/comments/{id}");
        let req = inner.request("comments.update", Method::PATCH, &path)?;
        let req = inner.json_body(req, &CommentText { text })?;
        inner.send_json(req, Some(Lookup::new("comment", id))).await
    }

    /// Deletes a comment.
    pub async fn delete(&self, card_id: i64, id: i64) -> Result<(), Error> {
        let inner = self.client.inner();
        let path = format!("cards/{card_id}/comments/{id}");
        let req = inner.request("comments.delete", Method::DELETE, &path)?;
        inner.send_unit(req, Some(Lookup::new("comment", id))).await
    }
}

impl std::fmt::Debug for CommentsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommentsClient").finish_non_exhaustive()
    }
}

/// A comment on a card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// The comment id.
    pub id: i64,
    /// Body text.
    pub text: String,
    /// Author's user id.
    pub author_id: Option<i64>,
    /// Creation time.
    pub created: Option<DateTime<Utc>>,
    /// Last edit time.
    pub updated: Option<DateTime<Utc>>,
    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: Extra,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::test_support::{client_with, json, sent_json, status, target};

    #[tokio::test]
    async fn test_list() {
        let transport = json(
            r#"[{"id":1,"text":"first","author_id":7,"created":"2024-01-02T03:04:05Z"}]"#,
        );
        let comments = client_with(&transport).comments().list(42).await.unwrap();

        assert_eq!(target(&transport), "GET /api/latest/cards/42/comments");
        assert_eq!(comments[0].author_id, Some(7));
        assert!(comments[0].created.is_some());
    }

    #[tokio::test]
    async fn test_create_and_update() {
        let transport = json(r#"{"id":2,"text":"hello"}"#);
        let comments = client_with(&transport).comments();

        comments.create(42, "hello").await.unwrap();
        assert_eq!(target(&transport), "POST /api/latest/cards/42/comments");
        assert_eq!(sent_json(&transport), serde_json::json!({"text": "hello"}));

        comments.update(42, 2, "edited").await.unwrap();
        assert_eq!(target(&transport), "PATCH /api/latest/cards/42/comments/2");
        assert_eq!(sent_json(&transport), serde_json::json!({"text": "edited"}));
    }

    #[tokio::test]
    async fn test_delete_missing_comment() {
        let transport = status(404);
        let err = client_with(&transport).comments().delete(42, 2).await.unwrap_err();
        assert!(matches!(err, Error::NotFound { resource: "comment", id: 2 }));
    }
}
