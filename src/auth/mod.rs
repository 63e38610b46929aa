//! Authentication for the Kaiten SDK.
//!
//! Kaiten authenticates every request with a static API token sent as an
//! `Authorization: Bearer <token>` header. The token is wrapped in a
//! [`Credential`], which is immutable, cheap to clone and never printed.
//!
//! ```rust
//! use kaiten::Credential;
//!
//! let credential = Credential::new("secret-token")?;
//! assert_eq!(format!("{credential:?}"), "Credential([REDACTED])");
//! # Ok::<(), kaiten::Error>(())
//! ```
//!
//! Header injection and 401 detection live in
//! [`AuthInterceptor`](crate::middleware::AuthInterceptor).

mod credentials;

pub use credentials::Credential;
