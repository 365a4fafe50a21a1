//! Bot credentials.
//!
//! The token is redacted in Debug output to prevent accidental exposure in
//! logs.

use crate::error::{Error, ErrorKind, Result};
use crate::DEFAULT_API_BASE_URL;

/// Bot token plus the API host it is sent to.
#[derive(Clone, PartialEq, Eq)]
pub struct BotCredentials {
    token: String,
    api_base_url: String,
}

impl std::fmt::Debug for BotCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotCredentials")
            .field("token", &"[REDACTED]")
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

impl BotCredentials {
    /// Create credentials for the default API host.
    ///
    /// Fails with `InvalidCredentials` if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::with_base_url(token, DEFAULT_API_BASE_URL)
    }

    /// Create credentials for a custom API host (e.g. a local Bot API server).
    pub fn with_base_url(token: impl Into<String>, api_base_url: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.is_empty() {
            return Err(Error::new(ErrorKind::InvalidCredentials(
                "Telegram bot token cannot be empty.".to_string(),
            )));
        }

        Ok(Self {
            token,
            api_base_url: api_base_url.into(),
        })
    }

    /// Get the bot token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Get the API base URL.
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// Build the URL of a Bot API method: `{base}/bot{token}/{endpoint}`.
    ///
    /// A trailing `/` on the base URL is ignored. The token is percent-encoded
    /// as a single path segment, so `/`, `?` or `#` inside it cannot change the
    /// path or start a query.
    pub fn endpoint_url(&self, endpoint: &str) -> Result<String> {
        let mut url = url::Url::parse(&self.api_base_url)?;
        url.path_segments_mut()
            .map_err(|()| {
                Error::new(ErrorKind::Config(format!(
                    "API base URL cannot carry a path: {}",
                    self.api_base_url
                )))
            })?
            .pop_if_empty()
            .push(&format!("bot{}", self.token))
            .push(endpoint);
        Ok(url.into())
    }
}
