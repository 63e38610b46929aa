//! Prelude module for convenient imports.
//!
//! ```rust
//! use kaiten::prelude::*;
//! ```
//!
//! This provides the client, its configuration, the error types and the
//! resource types most programs touch.

pub use crate::{
    client::{Client, ClientBuilder},
    config::{Config, PartialConfig, RetryPolicy},
    error::{Error, ErrorKind, Result},
    pagination::Page,
    resources::{
        Board, Card, CardCondition, CardFilter, CardMemberRoleType, CardState, CardUpdate, Column,
        Comment, Lane, NewCard, Space, User,
    },
};
