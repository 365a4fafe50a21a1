//! Client configuration.

use std::time::Duration;

use crate::credentials::BotCredentials;
use crate::error::{Error, ErrorKind, Result};
use crate::retry::RetryConfig;
use crate::DEFAULT_API_BASE_URL;

/// How a POST without attachments encodes its body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostEncoding {
    /// `application/json` object of string values.
    #[default]
    Json,
    /// `application/x-www-form-urlencoded`.
    Form,
}

/// Configuration for the HTTP client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Retry configuration.
    pub retry: Option<RetryConfig>,
    /// Per-attempt request timeout.
    pub timeout: Duration,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Pool idle timeout.
    pub pool_idle_timeout: Duration,
    /// Maximum idle connections per host.
    pub pool_max_idle_per_host: usize,
    /// Accept gzip/deflate compressed responses.
    pub accept_compressed: bool,
    /// User-Agent header value.
    pub user_agent: String,
    /// Body encoding for POSTs without attachments.
    pub post_encoding: PostEncoding,
    /// Whether to enable request/response tracing.
    pub enable_tracing: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            retry: Some(RetryConfig::default()),
            timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(10),
            pool_idle_timeout: Duration::from_secs(90),
            pool_max_idle_per_host: 10,
            accept_compressed: true,
            user_agent: crate::USER_AGENT.to_string(),
            post_encoding: PostEncoding::default(),
            enable_tracing: true,
        }
    }
}

impl ClientConfig {
    /// Create a new client config builder.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Builder for ClientConfig.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the retry configuration.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.config.retry = Some(retry);
        self
    }

    /// Disable retries.
    pub fn without_retry(mut self) -> Self {
        self.config.retry = None;
        self
    }

    /// Accept compressed responses.
    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.config.accept_compressed = enabled;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set connection timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Set pool idle timeout.
    pub fn with_pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.config.pool_idle_timeout = timeout;
        self
    }

    /// Set maximum idle connections per host.
    pub fn with_pool_max_idle(mut self, max: usize) -> Self {
        self.config.pool_max_idle_per_host = max;
        self
    }

    /// Set custom User-Agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Set the body encoding for POSTs without attachments.
    pub fn with_post_encoding(mut self, encoding: PostEncoding) -> Self {
        self.config.post_encoding = encoding;
        self
    }

    /// Enable or disable request/response tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.config.enable_tracing = enabled;
        self
    }

    /// Build the client configuration.
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

/// Process-level bot configuration, usually loaded once from the environment.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// Token and API host.
    pub credentials: BotCredentials,
    /// Per-attempt timeout.
    pub http_timeout: Duration,
    /// Attempts per call.
    pub http_retries: u32,
    /// Delay between attempts.
    pub http_retry_delay: Duration,
    /// Chat used by `send_message_to_default_chat`.
    pub default_chat_id: Option<String>,
    /// URL registered by `set_webhook_from_config`.
    pub webhook_url: Option<String>,
    /// `max_connections` sent with the webhook.
    pub webhook_max_connections: u32,
    /// `allowed_updates` sent with the webhook.
    pub webhook_allowed_updates: Vec<String>,
}

impl TelegramConfig {
    /// Create a config with defaults for everything but the credentials.
    pub fn new(credentials: BotCredentials) -> Self {
        Self {
            credentials,
            http_timeout: Duration::from_secs(10),
            http_retries: 3,
            http_retry_delay: Duration::from_millis(500),
            default_chat_id: None,
            webhook_url: None,
            webhook_max_connections: 40,
            webhook_allowed_updates: Vec::new(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// `TELEGRAM_BOT_TOKEN` is required. Optional: `TELEGRAM_API_BASE_URL`,
    /// `TELEGRAM_HTTP_TIMEOUT` (seconds), `TELEGRAM_HTTP_RETRIES`,
    /// `TELEGRAM_HTTP_RETRY_DELAY` (milliseconds), `TELEGRAM_DEFAULT_CHAT_ID`,
    /// `TELEGRAM_WEBHOOK_URL`, `TELEGRAM_WEBHOOK_MAX_CONNECTIONS`,
    /// `TELEGRAM_WEBHOOK_ALLOWED_UPDATES` (comma-separated).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let token = get("TELEGRAM_BOT_TOKEN").ok_or_else(|| {
            Error::new(ErrorKind::InvalidCredentials(
                "The Telegram bot token is missing. Set TELEGRAM_BOT_TOKEN.".to_string(),
            ))
        })?;
        let base_url =
            get("TELEGRAM_API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let mut config = Self::new(BotCredentials::with_base_url(token, base_url)?);

        if let Some(secs) = parse_var::<u64>(&get, "TELEGRAM_HTTP_TIMEOUT")? {
            config.http_timeout = Duration::from_secs(secs);
        }
        if let Some(retries) = parse_var::<u32>(&get, "TELEGRAM_HTTP_RETRIES")? {
            config.http_retries = retries;
        }
        if let Some(ms) = parse_var::<u64>(&get, "TELEGRAM_HTTP_RETRY_DELAY")? {
            config.http_retry_delay = Duration::from_millis(ms);
        }
        if let Some(max) = parse_var::<u32>(&get, "TELEGRAM_WEBHOOK_MAX_CONNECTIONS")? {
            config.webhook_max_connections = max;
        }

        config.default_chat_id = get("TELEGRAM_DEFAULT_CHAT_ID");
        config.webhook_url = get("TELEGRAM_WEBHOOK_URL");
        config.webhook_allowed_updates = get("TELEGRAM_WEBHOOK_ALLOWED_UPDATES")
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(config)
    }

    /// HTTP client configuration derived from these settings.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::builder()
            .with_timeout(self.http_timeout)
            .with_retry(
                RetryConfig::default()
                    .with_max_attempts(self.http_retries)
                    .with_delay(self.http_retry_delay),
            )
            .build()
    }
}

fn parse_var<T: std::str::FromStr>(
    get: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>> {
    match get(key) {
        None => Ok(None),
        Some(raw) => raw.trim().parse::<T>().map(Some).map_err(|_| {
            Error::new(ErrorKind::Config(format!(
                "{key} must be a non-negative integer, got '{raw}'"
            )))
        }),
    }
}
