//! Argument types shared by the media methods.

use bytes::Bytes;
use tgbot_client::{Attachment, PayloadValue};

/// A file argument for `sendPhoto`, `sendVideo` and `sendDocument`.
///
/// There is no fallback between the two: a URL is never downloaded and
/// re-uploaded, and an upload is never replaced by a URL.
#[derive(Debug, Clone, PartialEq)]
pub enum InputFile {
    /// An HTTP URL or a `file_id` already stored on Telegram's servers.
    Url(String),
    /// Bytes uploaded as a multipart part.
    Upload(Attachment),
}

impl InputFile {
    /// Reference a file by URL or `file_id`.
    pub fn url(url: impl Into<String>) -> Self {
        InputFile::Url(url.into())
    }

    /// Upload in-memory bytes under `file_name`.
    pub fn upload(file_name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        InputFile::Upload(Attachment::new(file_name, content))
    }

    /// Returns true if this file is sent as a multipart upload.
    pub fn is_upload(&self) -> bool {
        matches!(self, InputFile::Upload(_))
    }
}

impl From<Attachment> for InputFile {
    fn from(attachment: Attachment) -> Self {
        InputFile::Upload(attachment)
    }
}

impl From<&str> for InputFile {
    fn from(url: &str) -> Self {
        InputFile::Url(url.to_string())
    }
}

impl From<String> for InputFile {
    fn from(url: String) -> Self {
        InputFile::Url(url)
    }
}

impl From<InputFile> for PayloadValue {
    fn from(file: InputFile) -> Self {
        match file {
            InputFile::Url(url) => PayloadValue::Text(url),
            InputFile::Upload(attachment) => PayloadValue::Binary(attachment),
        }
    }
}
