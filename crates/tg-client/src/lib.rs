//! # tgbot-client
//!
//! Core HTTP client infrastructure for the Telegram Bot API.
//!
//! This crate provides the foundational client with:
//! - Payload normalization and encoding selection (query, JSON, form, multipart)
//! - Envelope parsing with classified errors
//! - Retry of transient transport failures
//! - Compression support (gzip, deflate)
//! - Connection pooling
//! - Token redaction in logs and errors
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Application Layer                        │
//! │  (tgbot-methods: sendMessage, sendPhoto, setWebhook, ...)   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    TelegramClient                           │
//! │  - Holds credentials + HTTP client                          │
//! │  - call / get / post / post_multipart / call_typed          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  RequestBuilder → TgHttpClient → ResponseNormalizer         │
//! │  - Payload shaping, retry, envelope parsing                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use tgbot_client::{Payload, TelegramClient, TelegramConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), tgbot_client::Error> {
//!     let config = TelegramConfig::from_env()?;
//!     let client = TelegramClient::from_config(&config)?;
//!
//!     let me = client.get("getMe", Payload::new()).await?;
//!     println!("{}", me.result());
//!
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod credentials;
mod error;
mod payload;
mod request;
mod response;
mod retry;
pub mod security;
mod telegram_client;

pub use client::TgHttpClient;
pub use config::{ClientConfig, ClientConfigBuilder, PostEncoding, TelegramConfig};
pub use credentials::BotCredentials;
pub use error::{Error, ErrorKind, Result};
pub use payload::{Attachment, NormalizedValue, Payload, PayloadValue};
pub use request::{RequestBody, RequestBuilder, RequestMethod, TransportRequest};
pub use response::{
    RawResponse, ResponseEnvelope, ResponseNormalizer, ResponseParameters,
    UNKNOWN_ERROR_DESCRIPTION,
};
pub use retry::{BackoffStrategy, RetryConfig, RetryPolicy};
pub use telegram_client::{merge_options, TelegramClient};

/// Default Telegram Bot API host
pub const DEFAULT_API_BASE_URL: &str = "https://api.telegram.org";

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("tgbot-api/", env!("CARGO_PKG_VERSION"));
