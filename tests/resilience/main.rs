//! End-to-end tests for the Kaiten SDK request pipeline.
//!
//! Every test starts a local [`wiremock`] server and drives the real client
//! (HTTP transport, retry and auth interceptors, response classification)
//! against it. No Kaiten account is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test resilience
//!
//! # With SDK logs
//! RUST_LOG=kaiten=debug cargo test --test resilience -- --nocapture
//! ```

mod auth_tests;
mod client_tests;
mod common;
mod pagination_tests;
mod retry_tests;
