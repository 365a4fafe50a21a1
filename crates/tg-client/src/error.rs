//! Error types for tg-client.
//!
//! Every failure a Telegram call can produce is one [`ErrorKind`]. Transport
//! messages may carry the request URL and are passed through
//! [`redact_token`](crate::security::redact_token) before they are stored.
//! Telegram's own `description` is kept exactly as received.

use std::time::Duration;

use crate::security::{redact_token, sanitize_error_message};

/// Result type alias for tg-client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for tg-client operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// Shorthand for an [`ErrorKind::InvalidPayloadValue`] error.
    pub fn invalid_payload(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidPayloadValue {
            field: field.into(),
            reason: reason.into(),
        })
    }

    /// Shorthand for an [`ErrorKind::Transport`] error.
    pub fn transport(status: Option<u16>, message: impl AsRef<str>) -> Self {
        Self::new(ErrorKind::Transport {
            status,
            message: redact_token(message.as_ref()),
        })
    }

    /// Returns true if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    /// Returns true if the remote service explicitly rejected the request.
    pub fn is_api_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Api { .. })
    }

    /// Returns true if the request never produced a usable response.
    pub fn is_transport_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Transport { .. })
    }

    /// Telegram `error_code` for API errors.
    pub fn error_code(&self) -> Option<i64> {
        match &self.kind {
            ErrorKind::Api { error_code, .. } => Some(*error_code),
            _ => None,
        }
    }

    /// HTTP status attached to a transport error, if one was received.
    pub fn status(&self) -> Option<u16> {
        match &self.kind {
            ErrorKind::Transport { status, .. } => *status,
            _ => None,
        }
    }

    /// Flood-control wait requested by Telegram (`parameters.retry_after`).
    pub fn retry_after(&self) -> Option<Duration> {
        match &self.kind {
            ErrorKind::Api { retry_after, .. } => *retry_after,
            _ => None,
        }
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Missing or empty bot token.
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// A payload field holds a value that cannot be sent.
    #[error("Invalid payload value for field '{field}': {reason}")]
    InvalidPayloadValue { field: String, reason: String },

    /// The request failed before a parseable response was obtained.
    #[error("Transport error{}: {message}", status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    Transport {
        status: Option<u16>,
        message: String,
    },

    /// The response body is not a Telegram envelope.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Telegram answered with `ok: false`.
    #[error("Telegram API error: {description} (Code: {error_code})")]
    Api {
        error_code: i64,
        description: String,
        retry_after: Option<Duration>,
        migrate_to_chat_id: Option<i64>,
    },

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ErrorKind {
    /// Returns true if this error kind is retryable.
    ///
    /// Only transport failures qualify: connection errors and timeouts carry
    /// no status, server errors carry a 5xx gateway status.
    pub fn is_retryable(&self) -> bool {
        match self {
            ErrorKind::Transport { status: None, .. } => true,
            ErrorKind::Transport {
                status: Some(status),
                ..
            } => is_retryable_status(*status),
            _ => false,
        }
    }
}

/// Check if an HTTP status code is typically retryable.
fn is_retryable_status(status: u16) -> bool {
    matches!(status, 500 | 502 | 503 | 504)
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // The request URL embeds the bot token.
        let err = err.without_url();
        let kind = if err.is_timeout() {
            ErrorKind::Transport {
                status: None,
                message: "request timed out".to_string(),
            }
        } else if err.is_connect() {
            ErrorKind::Transport {
                status: None,
                message: format!(
                    "connection failed: {}",
                    sanitize_error_message(&err.to_string())
                ),
            }
        } else if let Some(status) = err.status() {
            ErrorKind::Transport {
                status: Some(status.as_u16()),
                message: sanitize_error_message(&err.to_string()),
            }
        } else if err.is_builder() {
            ErrorKind::Config(sanitize_error_message(&err.to_string()))
        } else {
            ErrorKind::Transport {
                status: None,
                message: sanitize_error_message(&err.to_string()),
            }
        };

        Error::with_source(kind, err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(ErrorKind::Config(format!("Invalid URL: {}", err)), err)
    }
}
