//! Telegram Bot API method client.
//!
//! This client wraps `TelegramClient` from `tgbot-client` and provides one
//! method per Bot API endpoint. Each method only shapes the payload; request
//! encoding, retry, and error classification live in `tgbot-client`.

use tgbot_client::{
    merge_options, BotCredentials, ClientConfig, Payload, RequestMethod, ResponseEnvelope,
    TelegramClient, TelegramConfig,
};

use crate::error::Result;

mod media;
mod messages;
mod updates;
mod webhook;

/// Per-bot defaults used by the `*_from_config` style helpers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotDefaults {
    /// Chat used by `send_message_to_default_chat`.
    pub default_chat_id: Option<String>,
    /// URL registered by `set_webhook_from_config`.
    pub webhook_url: Option<String>,
    /// `max_connections` sent with the webhook.
    pub webhook_max_connections: u32,
    /// `allowed_updates` sent with the webhook; empty means Telegram's default.
    pub webhook_allowed_updates: Vec<String>,
}

impl Default for BotDefaults {
    fn default() -> Self {
        Self {
            default_chat_id: None,
            webhook_url: None,
            webhook_max_connections: 40,
            webhook_allowed_updates: Vec::new(),
        }
    }
}

impl From<&TelegramConfig> for BotDefaults {
    fn from(config: &TelegramConfig) -> Self {
        Self {
            default_chat_id: config.default_chat_id.clone(),
            webhook_url: config.webhook_url.clone(),
            webhook_max_connections: config.webhook_max_connections,
            webhook_allowed_updates: config.webhook_allowed_updates.clone(),
        }
    }
}

/// Telegram Bot API client.
///
/// Every method has the shape `(required..., options) -> ResponseEnvelope`.
/// Options are merged over the required fields, so an option may override a
/// required field; the override is logged by field name.
///
/// # Example
///
/// ```rust,ignore
/// use tgbot_methods::{InputFile, Payload, TelegramBotClient};
///
/// let bot = TelegramBotClient::new("123456:ABC-DEF")?;
///
/// bot.send_message(682299441, "Hello", Payload::new().with("parse_mode", "HTML"))
///     .await?;
///
/// let photo = InputFile::upload("cat.jpg", std::fs::read("cat.jpg")?);
/// bot.send_photo(682299441, photo, Payload::new()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct TelegramBotClient {
    client: TelegramClient,
    defaults: BotDefaults,
}

impl TelegramBotClient {
    /// Create a new bot client for the default API host.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Ok(Self::from_client(TelegramClient::new(token)?))
    }

    /// Create a new bot client for a custom API host.
    pub fn with_base_url(token: impl Into<String>, api_base_url: impl Into<String>) -> Result<Self> {
        Ok(Self::from_client(TelegramClient::with_base_url(
            token,
            api_base_url,
        )?))
    }

    /// Create a new bot client with custom HTTP configuration.
    pub fn with_config(credentials: BotCredentials, config: ClientConfig) -> Result<Self> {
        Ok(Self::from_client(TelegramClient::with_config(
            credentials,
            config,
        )?))
    }

    /// Create a bot client from process-level configuration, including its
    /// default chat and webhook settings.
    pub fn from_config(config: &TelegramConfig) -> Result<Self> {
        let client = TelegramClient::from_config(config)?;
        Ok(Self::from_client(client).with_defaults(BotDefaults::from(config)))
    }

    /// Create a bot client from an existing TelegramClient.
    pub fn from_client(client: TelegramClient) -> Self {
        Self {
            client,
            defaults: BotDefaults::default(),
        }
    }

    /// Replace the per-bot defaults.
    pub fn with_defaults(mut self, defaults: BotDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Get the underlying TelegramClient.
    pub fn inner(&self) -> &TelegramClient {
        &self.client
    }

    /// Get the per-bot defaults.
    pub fn defaults(&self) -> &BotDefaults {
        &self.defaults
    }

    /// Get the bot token.
    pub fn bot_token(&self) -> &str {
        self.client.bot_token()
    }

    /// Get the API base URL.
    pub fn api_base_url(&self) -> &str {
        self.client.api_base_url()
    }

    /// Merge options over required fields and call `endpoint`.
    async fn dispatch(
        &self,
        method: RequestMethod,
        endpoint: &str,
        required: Payload,
        options: Payload,
    ) -> Result<ResponseEnvelope> {
        let payload = merge_options(endpoint, required, options);
        self.client
            .call(method, endpoint, payload, Vec::new())
            .await
    }
}
