//! Kaiten resources and the sub-clients that operate on them.
//!
//! Each sub-client is a thin handle over a [`Client`](crate::Client) clone,
//! obtained from the client's accessor methods. Domain types type the fields
//! the SDK relies on and keep every other field the API returns in a
//! flattened `extra` map, so nothing is lost when a payload is read and
//! written back.

mod blockers;
mod boards;
mod card_types;
mod cards;
mod checklists;
mod children;
mod codes;
mod columns;
mod comments;
mod custom_properties;
mod external_links;
mod lanes;
mod members;
mod spaces;
mod sprints;
mod tags;
mod users;

pub use blockers::{Blocker, BlockersClient, NewBlocker};
pub use boards::{Board, BoardUpdate, BoardsClient, NewBoard};
pub use card_types::{CardType, CardTypesClient};
pub use cards::{Card, CardFilter, CardLocation, CardUpdate, CardsClient, NewCard};
pub use checklists::{
    Checklist, ChecklistItem, ChecklistItemUpdate, ChecklistUpdate, ChecklistsClient,
    NewChecklist, NewChecklistItem,
};
pub use children::CardChildrenClient;
pub use codes::{
    CardCondition, CardMemberRoleType, CardPosition, CardState, ColumnType, LaneCondition,
    TextFormatType, UnknownCode, UnknownLabel, WipLimitType,
};
pub use columns::{Column, ColumnUpdate, ColumnsClient, NewColumn};
pub use comments::{Comment, CommentsClient};
pub use custom_properties::{
    CustomPropertiesClient, CustomProperty, CustomPropertyQuery, SelectValue, SelectValueQuery,
};
pub use external_links::{ExternalLink, ExternalLinkUpdate, ExternalLinksClient, NewExternalLink};
pub use lanes::{Lane, LaneUpdate, LanesClient, NewLane};
pub use members::{CardMember, CardMembersClient};
pub use spaces::{NewSpace, Space, SpaceUpdate, SpacesClient};
pub use sprints::{Sprint, SprintsClient};
pub use tags::{Tag, TagsClient};
pub use users::{User, UserQuery, UsersClient};

/// Unknown JSON fields carried alongside the typed ones.
pub type Extra = serde_json::Map<String, serde_json::Value>;

/// Body of removals that echo the removed id.
#[derive(serde::Deserialize)]
struct Deleted {
    id: i64,
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use bytes::Bytes;
    use reqwest::StatusCode;

    use crate::Client;
    use crate::middleware::Response;
    use crate::testing::MockTransport;

    pub(crate) fn client_with(transport: &MockTransport) -> Client {
        Client::builder()
            .url("https://team.kaiten.ru/api/latest")
            .token("test-token")
            .transport(Arc::new(transport.clone()))
            .build()
            .unwrap()
    }

    pub(crate) fn json(body: impl Into<Bytes>) -> MockTransport {
        MockTransport::returning(StatusCode::OK, body)
    }

    pub(crate) fn status(code: u16) -> MockTransport {
        MockTransport::new(move |_, _| Ok(Response::new(StatusCode::from_u16(code).unwrap())))
    }

    /// Path and query of the only recorded request.
    pub(crate) fn target(transport: &MockTransport) -> String {
        let req = transport.last_request().unwrap();
        match req.url().query() {
            Some(query) => format!("{} {}?{query}", req.method(), req.url().path()),
            None => format!("{} {}", req.method(), req.url().path()),
        }
    }

    pub(crate) fn sent_json(transport: &MockTransport) -> serde_json::Value {
        let req = transport.last_request().unwrap();
        serde_json::from_slice(req.body().unwrap()).unwrap()
    }
}
