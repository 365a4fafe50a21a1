//! # tgbot-methods
//!
//! Telegram Bot API methods built on `tgbot-client`.
//!
//! ## Features
//!
//! - **Messages** - `sendMessage`, `sendLocation`, `sendContact`
//! - **Media** - `sendPhoto`, `sendVideo`, `sendDocument` by URL, `file_id`, or upload
//! - **Webhooks** - `setWebhook`, `getWebhookInfo`, `deleteWebhook`
//! - **Updates** - `getUpdates` long polling
//!
//! ## Example
//!
//! ```rust,ignore
//! use tgbot_methods::{InputFile, Payload, TelegramBotClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), tgbot_methods::Error> {
//!     let bot = TelegramBotClient::new("123456:ABC-DEF")?;
//!
//!     // Text
//!     bot.send_message(682299441, "Hello", Payload::new()).await?;
//!
//!     // Upload
//!     let photo = InputFile::upload("cat.jpg", std::fs::read("cat.jpg").unwrap());
//!     bot.send_photo(682299441, photo, Payload::new().with("caption", "cat"))
//!         .await?;
//!
//!     // Poll
//!     let updates = bot.get_updates_with(Some(0), Some(100), Some(30)).await?;
//!     println!("{}", updates.result());
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

// Main client
pub use client::{BotDefaults, TelegramBotClient};

// Argument types
pub use types::InputFile;

// Error types
pub use error::{Error, ErrorKind, Result};

// Payload and envelope types callers need for every method
pub use tgbot_client::{Attachment, Payload, PayloadValue, ResponseEnvelope};
