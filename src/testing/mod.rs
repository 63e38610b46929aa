//! Testing utilities for code built on the Kaiten SDK.
//!
//! - [`MockTransport`]: a [`Transport`](crate::transport::Transport) that
//!   records every request and answers from a script, so the full client
//!   (middleware, retries, classification) runs without a network.
//!
//! ## Quick Start
//!
//! ```rust
//! use kaiten::Client;
//! use kaiten::testing::MockTransport;
//! use reqwest::StatusCode;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), kaiten::Error> {
//! let transport = MockTransport::returning(StatusCode::OK, r#"[{"id": 1, "title": "Team"}]"#);
//! let client = Client::builder()
//!     .url("https://team.kaiten.ru/api/latest")
//!     .token("test-token")
//!     .transport(Arc::new(transport.clone()))
//!     .build()?;
//!
//! let spaces = client.spaces().list().await?;
//! assert_eq!(spaces[0].id, 1);
//! assert_eq!(transport.recorded_requests()[0].url().path(), "/api/latest/spaces");
//! # Ok(())
//! # }
//! ```
//!
//! ## Scripting Responses
//!
//! | Constructor                  | Behaviour                                        |
//! |------------------------------|--------------------------------------------------|
//! | `returning(status, body)`    | the same response for every call                 |
//! | `sequence(responses)`        | one response per call, the last one repeats      |
//! | `new(|request, call| ...)`   | any logic, including transport errors            |

mod mock_transport;

pub use mock_transport::MockTransport;
