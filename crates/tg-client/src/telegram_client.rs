//! High-level Telegram client with typed call methods.
//!
//! `TelegramClient` combines bot credentials with the HTTP transport. It is
//! the single seam through which every Bot API method is called; endpoint
//! crates build on [`TelegramClient::call`].
//!
//! ## Security
//!
//! - The bot token is redacted in Debug output
//! - Tracing spans record the endpoint name only, never the URL or payload

use serde::de::DeserializeOwned;
use tracing::{instrument, warn};

use crate::client::TgHttpClient;
use crate::config::{ClientConfig, TelegramConfig};
use crate::credentials::BotCredentials;
use crate::error::Result;
use crate::payload::{Attachment, Payload};
use crate::request::{RequestBuilder, RequestMethod};
use crate::response::ResponseEnvelope;

/// Low-level Telegram Bot API client.
///
/// Cloning is cheap and clones share the connection pool, so one client can
/// serve many concurrent tasks.
///
/// # Example
///
/// ```rust,ignore
/// use tgbot_client::{Payload, TelegramClient};
///
/// let client = TelegramClient::new("123456:ABC-DEF")?;
/// let envelope = client
///     .post("sendMessage", Payload::new().with("chat_id", 42).with("text", "hi"))
///     .await?;
/// println!("{}", envelope.result());
/// ```
#[derive(Clone)]
pub struct TelegramClient {
    http: TgHttpClient,
    credentials: BotCredentials,
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramClient")
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

impl TelegramClient {
    /// Create a client for the default API host.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::with_config(BotCredentials::new(token)?, ClientConfig::default())
    }

    /// Create a client for a custom API host.
    pub fn with_base_url(token: impl Into<String>, api_base_url: impl Into<String>) -> Result<Self> {
        Self::with_config(
            BotCredentials::with_base_url(token, api_base_url)?,
            ClientConfig::default(),
        )
    }

    /// Create a client with custom HTTP configuration.
    pub fn with_config(credentials: BotCredentials, config: ClientConfig) -> Result<Self> {
        Self::with_http(credentials, TgHttpClient::new(config)?)
    }

    /// Create a client around an existing transport.
    ///
    /// Fails with a `Config` error if the base URL does not parse.
    pub fn with_http(credentials: BotCredentials, http: TgHttpClient) -> Result<Self> {
        url::Url::parse(credentials.api_base_url())?;
        Ok(Self { http, credentials })
    }

    /// Create a client from process-level configuration.
    pub fn from_config(config: &TelegramConfig) -> Result<Self> {
        Self::with_config(config.credentials.clone(), config.client_config())
    }

    /// Get the bot token.
    pub fn bot_token(&self) -> &str {
        self.credentials.token()
    }

    /// Get the API base URL.
    pub fn api_base_url(&self) -> &str {
        self.credentials.api_base_url()
    }

    /// Get the credentials.
    pub fn credentials(&self) -> &BotCredentials {
        &self.credentials
    }

    /// Get the underlying HTTP client.
    pub fn http(&self) -> &TgHttpClient {
        &self.http
    }

    // =========================================================================
    // Calls
    // =========================================================================

    /// Call a Bot API method and return its envelope.
    #[instrument(skip(self, payload, attachments))]
    pub async fn call(
        &self,
        method: RequestMethod,
        endpoint: &str,
        payload: Payload,
        attachments: Vec<(String, Attachment)>,
    ) -> Result<ResponseEnvelope> {
        let request = RequestBuilder::new(&self.credentials)
            .post_encoding(self.http.config().post_encoding)
            .build(method, endpoint, payload, attachments)?;

        self.http.execute(&request).await
    }

    /// GET a Bot API method with query parameters.
    pub async fn get(&self, endpoint: &str, payload: Payload) -> Result<ResponseEnvelope> {
        self.call(RequestMethod::Get, endpoint, payload, Vec::new())
            .await
    }

    /// POST a Bot API method.
    pub async fn post(&self, endpoint: &str, payload: Payload) -> Result<ResponseEnvelope> {
        self.call(RequestMethod::Post, endpoint, payload, Vec::new())
            .await
    }

    /// POST a Bot API method as `multipart/form-data`.
    pub async fn post_multipart(
        &self,
        endpoint: &str,
        payload: Payload,
        attachments: Vec<(String, Attachment)>,
    ) -> Result<ResponseEnvelope> {
        self.call(RequestMethod::Post, endpoint, payload, attachments)
            .await
    }

    /// Call a Bot API method and decode `result` into `T`.
    pub async fn call_typed<T: DeserializeOwned>(
        &self,
        method: RequestMethod,
        endpoint: &str,
        payload: Payload,
        attachments: Vec<(String, Attachment)>,
    ) -> Result<T> {
        self.call(method, endpoint, payload, attachments)
            .await?
            .result_as()
    }
}

/// Merge caller options over the required fields of `endpoint`.
///
/// Options win on collision; every overridden field is logged by name.
pub fn merge_options(endpoint: &str, required: Payload, options: Payload) -> Payload {
    let mut merged = required;
    for field in merged.merge(options) {
        warn!(endpoint, field = %field, "Option overrides a required field");
    }
    merged
}
