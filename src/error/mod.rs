//! Error types for the Kaiten SDK.
//!
//! Every SDK call ends in either a decoded value or exactly one [`Error`].
//! [`Error`] is a flat sum type; [`ErrorKind`] is its payload-free
//! discriminant for cheap matching and retry decisions.
//!
//! ## Who raises what
//!
//! | Variant                | Raised by                                   |
//! |------------------------|---------------------------------------------|
//! | `Unauthorized`         | auth interceptor (any 401)                  |
//! | `RateLimited`          | retry interceptor (429, attempts exhausted) |
//! | `ServerError`          | retry interceptor (5xx, attempts exhausted) |
//! | `NetworkError`         | transport, surfaced by the retry interceptor|
//! | `NotFound`             | operation layer (404 + known resource)      |
//! | `DecodingError`        | operation layer (body does not match type)  |
//! | `UnexpectedResponse`   | operation layer (any unmodelled status)     |
//! | `MissingConfiguration` | client construction                         |
//! | `InvalidUrl`           | client construction                         |
//!
//! ```rust,ignore
//! match client.cards().get(42).await {
//!     Ok(card) => println!("{}", card.title),
//!     Err(kaiten::Error::NotFound { resource, id }) => eprintln!("no {resource} {id}"),
//!     Err(err) if err.is_retriable() => eprintln!("try again later: {err}"),
//!     Err(err) => eprintln!("{err}"),
//! }
//! ```

mod classified;
mod kind;
mod transport;

pub use classified::Error;
pub use kind::ErrorKind;
pub use transport::{TransportError, TransportErrorKind};

/// A specialized `Result` type for Kaiten SDK operations.
pub type Result<T> = std::result::Result<T, Error>;
