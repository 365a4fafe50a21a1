//! Error types for tgbot-methods.
//!
//! Endpoint methods fail only in the ways the underlying client does, so the
//! client's error type is used unchanged.

pub use tgbot_client::{Error, ErrorKind, Result};
