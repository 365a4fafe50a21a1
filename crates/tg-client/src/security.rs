//! Security utilities for Telegram Bot API operations.
//!
//! The bot token is part of every request path (`/bot<token>/<method>`), so
//! anything that renders a URL, such as a reqwest error, can leak it. Every
//! such string MUST go through [`redact_token`] before it is logged or stored
//! in an error.
//!
//! ```rust
//! use tgbot_client::security::redact_token;
//!
//! let line = "POST https://api.telegram.org/bot123456789:AAHk3-secret_value/sendMessage";
//! assert_eq!(
//!     redact_token(line),
//!     "POST https://api.telegram.org/bot[REDACTED]/sendMessage"
//! );
//! ```

use std::sync::LazyLock;

use regex_lite::Regex;

/// Maximum length of an upstream message kept in an error.
const MAX_MESSAGE_LENGTH: usize = 500;

/// Bot tokens look like `<numeric bot id>:<35 url-safe chars>`.
static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(bot)?[0-9]{3,}:[A-Za-z0-9_-]{8,}").expect("token pattern is a valid regex")
});

/// Replace anything that looks like a bot token with `[REDACTED]`.
///
/// A `bot` prefix (as found in request paths) is preserved so redacted URLs
/// stay readable.
#[must_use]
pub fn redact_token(message: &str) -> String {
    TOKEN_PATTERN
        .replace_all(message, |caps: &regex_lite::Captures<'_>| {
            if caps.get(1).is_some() {
                "bot[REDACTED]".to_string()
            } else {
                "[REDACTED]".to_string()
            }
        })
        .into_owned()
}

/// Redact tokens and truncate a transport error message before storing it.
#[must_use]
pub fn sanitize_error_message(message: &str) -> String {
    let mut sanitized = redact_token(message);

    if sanitized.len() > MAX_MESSAGE_LENGTH {
        let mut cut = MAX_MESSAGE_LENGTH;
        while !sanitized.is_char_boundary(cut) {
            cut -= 1;
        }
        sanitized.truncate(cut);
        sanitized.push_str("...[truncated]");
    }

    sanitized
}

/// Validate a Bot API method name used as the final path segment.
///
/// Method names are plain ASCII identifiers such as `sendMessage`; anything
/// else would let a caller rewrite the request path.
#[must_use]
pub fn is_valid_endpoint(endpoint: &str) -> bool {
    !endpoint.is_empty() && endpoint.chars().all(|c| c.is_ascii_alphanumeric())
}
