//! Base URL and token sources: explicit values, environment, JSON file.

use std::fmt;
use std::io;
use std::path::Path;

use serde::Deserialize;

use crate::Error;

/// Environment variable holding the API base URL.
pub const ENV_URL: &str = "KAITEN_URL";

/// Environment variable holding the API token.
pub const ENV_TOKEN: &str = "KAITEN_TOKEN";

/// Connection settings for a [`Client`](crate::Client).
///
/// ## Example
///
/// ```rust,no_run
/// use kaiten::{Client, Config};
///
/// # async fn example() -> Result<(), kaiten::Error> {
/// let client = Client::from_config(Config::from_env()?)?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// The API base URL, e.g. `https://example.kaiten.ru/api/latest`.
    pub base_url: String,
    /// The API token.
    pub token: String,
}

impl Config {
    /// Creates a configuration from explicit values.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), token: token.into() }
    }

    /// Reads `KAITEN_URL` and `KAITEN_TOKEN`.
    ///
    /// # Errors
    ///
    /// [`Error::MissingConfiguration`] naming the first variable that is
    /// unset or empty.
    pub fn from_env() -> Result<Self, Error> {
        PartialConfig::from_env().into_config()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// A configuration layer in which either value may be absent.
///
/// Layers combine with [`or`](Self::or); the earlier layer wins per field.
///
/// ```rust
/// use kaiten::PartialConfig;
///
/// let flags = PartialConfig { url: Some("https://a.example/api".into()), token: None };
/// let file = PartialConfig { url: Some("https://b.example/api".into()), token: Some("t".into()) };
///
/// let config = flags.or(file).into_config()?;
/// assert_eq!(config.base_url, "https://a.example/api");
/// assert_eq!(config.token, "t");
/// # Ok::<(), kaiten::Error>(())
/// ```
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PartialConfig {
    /// The API base URL.
    #[serde(default)]
    pub url: Option<String>,
    /// The API token.
    #[serde(default)]
    pub token: Option<String>,
}

impl PartialConfig {
    /// A layer from explicit values, e.g. command-line flags. Blank values
    /// count as unset.
    pub fn new(url: Option<String>, token: Option<String>) -> Self {
        Self { url, token }.normalized()
    }

    /// Reads whichever of `KAITEN_URL` and `KAITEN_TOKEN` are set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self { url: lookup(ENV_URL), token: lookup(ENV_TOKEN) }.normalized()
    }

    /// Reads a JSON file of the form `{"url": "...", "token": "..."}`.
    ///
    /// A file that does not exist yields an empty layer.
    ///
    /// # Errors
    ///
    /// [`Error::DecodingError`] if the file cannot be read or is not valid
    /// JSON of that shape.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let contents = match std::fs::read(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "config file not found");
                return Ok(Self::default());
            },
            Err(err) => return Err(serde_json::Error::io(err).into()),
        };
        let layer: Self = serde_json::from_slice(&contents)?;
        Ok(layer.normalized())
    }

    /// Fills absent fields from `fallback`.
    #[must_use]
    pub fn or(self, fallback: PartialConfig) -> Self {
        Self { url: self.url.or(fallback.url), token: self.token.or(fallback.token) }
    }

    /// Completes the layer into a [`Config`].
    ///
    /// # Errors
    ///
    /// [`Error::MissingConfiguration`] with key `KAITEN_URL` or
    /// `KAITEN_TOKEN` for the first absent value.
    pub fn into_config(self) -> Result<Config, Error> {
        let base_url = self.url.ok_or_else(|| Error::missing_configuration(ENV_URL))?;
        let token = self.token.ok_or_else(|| Error::missing_configuration(ENV_TOKEN))?;
        Ok(Config { base_url, token })
    }

    fn normalized(self) -> Self {
        let keep = |value: Option<String>| {
            value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
        };
        Self { url: keep(self.url), token: keep(self.token) }
    }
}

impl fmt::Debug for PartialConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartialConfig")
            .field("url", &self.url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
