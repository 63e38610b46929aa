//! # Kaiten Rust SDK
//!
//! Typed client for the [Kaiten](https://kaiten.ru) project-management REST
//! API.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kaiten::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> kaiten::Result<()> {
//!     let client = Client::builder()
//!         .url("https://team.kaiten.ru/api/latest")
//!         .token("your-api-token")
//!         .build()?;
//!
//!     for space in client.spaces().list().await? {
//!         println!("{}: {}", space.id, space.title);
//!     }
//!
//!     let card = client.cards().get(42).await?;
//!     println!("{}", card.title);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Key Concepts
//!
//! - **Client hierarchy**: `Client` → resource sub-clients (`cards()`,
//!   `boards()`, …). Everything shares one connection pool.
//! - **Request chain**: user middleware → retry → auth → transport. Only
//!   `GET` and `HEAD` are retried; writes are sent exactly once.
//! - **One error type**: every call returns [`Result<T>`]; match on
//!   [`Error`] or its [`ErrorKind`].
//! - **Configuration**: [`Config`] resolves `KAITEN_URL`/`KAITEN_TOKEN`
//!   from flags, the environment and a JSON file, in that order.
//!
//! ## Features
//!
//! - `rustls` (default): Use rustls for TLS
//! - `native-tls`: Use the platform TLS stack

#![cfg_attr(docsrs, feature(doc_cfg))]

// Core modules
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod resources;

// Request pipeline
pub mod middleware;
pub mod transport;

// Listing helpers
pub mod pagination;

// Testing utilities
pub mod testing;

// Prelude for convenient imports
pub mod prelude;

mod user_agent;

// Re-export main types at crate root for convenience
pub use auth::Credential;
pub use client::{Client, ClientBuilder};
pub use config::{Config, ENV_TOKEN, ENV_URL, PartialConfig, RetryPolicy};
pub use error::{Error, ErrorKind, Result};
pub use pagination::Page;
pub use user_agent::user_agent;

// HTTP vocabulary used in the public API
pub use reqwest::{Method, StatusCode};
