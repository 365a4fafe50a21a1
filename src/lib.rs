//! # tgbot-api
//!
//! A Telegram Bot API client library for Rust.
//!
//! This library builds authenticated Bot API requests, uploads files as
//! multipart bodies, and turns every response into either a
//! [`ResponseEnvelope`] or one classified [`Error`].
//!
//! ## Security
//!
//! The bot token is part of every request path, so:
//! - Tokens are redacted in Debug output
//! - Tracing records endpoint names, never URLs or payload values
//! - Error messages pass through token redaction
//!
//! ## Crates
//!
//! - **tgbot-client** - Core client: payload encoding, retry, response normalization
//! - **tgbot-methods** - One method per Bot API endpoint
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tgbot_api::{Payload, TelegramBotClient, TelegramConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), tgbot_api::Error> {
//!     // TELEGRAM_BOT_TOKEN, TELEGRAM_DEFAULT_CHAT_ID, ...
//!     let config = TelegramConfig::from_env()?;
//!     let bot = TelegramBotClient::from_config(&config)?;
//!
//!     bot.send_message_to_default_chat("Deployed!", Payload::new())
//!         .await?;
//!
//!     match bot.send_message(-1, "hello", Payload::new()).await {
//!         Err(err) if err.is_api_error() => eprintln!("rejected: {err}"),
//!         other => println!("{other:?}"),
//!     }
//!
//!     Ok(())
//! }
//! ```

// Re-export all crates for convenient access
pub use tgbot_client as client;
pub use tgbot_methods as methods;

// Re-export commonly used types at the top level
pub use tgbot_client::{
    Attachment, BotCredentials, ClientConfig, Error, ErrorKind, Payload, PayloadValue,
    ResponseEnvelope, Result, RetryConfig, TelegramClient, TelegramConfig,
};
pub use tgbot_methods::{BotDefaults, InputFile, TelegramBotClient};
