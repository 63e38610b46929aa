//! Card members and their roles.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::{CardMemberRoleType, Extra};
use crate::client::{Client, Lookup};
use crate::Error;

/// Client for card membership.
#[derive(Clone)]
pub struct CardMembersClient {
    client: Client,
}

#[derive(Serialize)]
struct AddMember {
    user_id: i64,
}

#[derive(Serialize)]
struct SetRole {
    #[serde(rename = "type")]
    role: CardMemberRoleType,
}

impl CardMembersClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Lists the members of a card.
    pub async fn list(&self, card_id: i64) -> Result<Vec<CardMember>, Error> {
        let inner = self.client.inner();
        let path = format!("cards/{card_id}/members");
        let req = inner.request("card_members.list", Method::GET, &path)?;
        inner.send_json(req, Some(Lookup::new("card", card_id))).await
    }

    /// Adds a user to a card as a plain member.
    pub async fn add(&self, card_id: i64, user_id: i64) -> Result<CardMember, Error> {
        let inner = self.client.inner();
        let path = format!("cards/{card_id}/members");
        let req = inner.request("card_members.add", Method::POST, &path)?;
        let req = inner.json_body(req, &AddMember { user_id })?;
        inner.send_json(req, Some(Lookup::new("card", card_id))).await
    }

    /// Changes a member's role, e.g. to make them responsible.
    pub async fn update_role(
        &self,
        card_id: i64,
        user_id: i64,
        role: CardMemberRoleType,
    ) -> Result<CardMember, Error> {
        let inner = self.client.inner();
        let path = format!("cards/{card_id}/members/{user_id}");
        let req = inner.request("card_members.update_role", Method::PATCH, &path)?;
        let req = inner.json_body(req, &SetRole { role })?;
        inner.send_json(req, Some(Lookup::new("card member", user_id))).await
    }

    /// Removes a user from a card.
    pub async fn remove(&self, card_id: i64, user_id: i64) -> Result<(), Error> {
        let inner = self.client.inner();
        let path = format!("cards/{card_id}/members/{user_id}");
        let req = inner.request("card_members.remove", Method::DELETE, &path)?;
        inner.send_unit(req, Some(Lookup::new("card member", user_id))).await
    }
}

impl std::fmt::Debug for CardMembersClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardMembersClient").finish_non_exhaustive()
    }
}

/// A user's membership on a card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardMember {
    /// The user id.
    pub id: i64,
    /// Full name.
    pub full_name: Option<String>,
    /// Login.
    pub username: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Role on the card.
    #[serde(rename = "type")]
    pub role: Option<CardMemberRoleType>,
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
        let transport = json(r#"[{"id":7,"full_name":"Ann","type":2},{"id":8,"type":1}]"#);
        let members = client_with(&transport).card_members().list(42).await.unwrap();

        assert_eq!(target(&transport), "GET /api/latest/cards/42/members");
        assert_eq!(members[0].role, Some(CardMemberRoleType::Responsible));
        assert_eq!(members[1].full_name, None);
    }

    #[tokio::test]
    async fn test_list_tolerates_unmodelled_role() {
        let transport = json(r#"[{"id":7,"full_name":"Ann","type":3}]"#);
        let members = client_with(&transport).card_members().list(42).await.unwrap();
        assert_eq!(members[0].role, Some(CardMemberRoleType::Unknown(3)));
    }

    #[tokio::test]
    async fn test_add() {
        let transport = json(r#"{"id":7,"type":1}"#);
        client_with(&transport).card_members().add(42, 7).await.unwrap();

        assert_eq!(target(&transport), "POST /api/latest/cards/42/members");
        assert_eq!(sent_json(&transport), serde_json::json!({"user_id": 7}));
    }

    #[tokio::test]
    async fn test_update_role() {
        let transport = json(r#"{"id":7,"type":2}"#);
        let member = client_with(&transport)
            .card_members()
            .update_role(42, 7, CardMemberRoleType::Responsible)
            .await
            .unwrap();

        assert_eq!(target(&transport), "PATCH /api/latest/cards/42/members/7");
        assert_eq!(sent_json(&transport), serde_json::json!({"type": 2}));
        assert_eq!(member.role, Some(CardMemberRoleType::Responsible));
    }

    #[tokio::test]
    async fn test_remove_missing_member() {
        let transport = status(404);
        let err = client_with(&transport).card_members().remove(42, 7).await.unwrap_err();
        assert!(matches!(err, Error::NotFound { resource: "card member", id: 7 }));
    }
}
