//! Request payloads and binary attachments.
//!
//! A [`Payload`] maps field names to [`PayloadValue`]s. Before a request is
//! built every value is narrowed by [`PayloadValue::normalize`]: scalars become
//! strings, nested objects and arrays are kept for JSON encoding, and binary
//! attachments are split out into multipart parts.

use std::collections::btree_map::{self, BTreeMap};
use std::path::Path;

use bytes::Bytes;
use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, ErrorKind, Result};

/// A named binary blob uploaded as one multipart part.
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    file_name: String,
    content: Bytes,
    mime_type: Option<String>,
}

impl std::fmt::Debug for Attachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attachment")
            .field("file_name", &self.file_name)
            .field("len", &self.content.len())
            .field("mime_type", &self.mime_type)
            .finish()
    }
}

impl Attachment {
    /// Create an attachment from a file name and its content.
    pub fn new(file_name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
            mime_type: None,
        }
    }

    /// Set the MIME type sent with the part (e.g. `image/jpeg`).
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Read an attachment from disk. The file name is the path's last segment.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                Error::new(ErrorKind::Config(format!(
                    "Attachment path has no file name: {}",
                    path.display()
                )))
            })?
            .to_string();

        let content = tokio::fs::read(path).await.map_err(|e| {
            Error::with_source(
                ErrorKind::Config(format!("Failed to read attachment {}", path.display())),
                e,
            )
        })?;

        Ok(Self::new(file_name, content))
    }

    /// The file name reported to Telegram.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// The raw file content.
    pub fn content(&self) -> &Bytes {
        &self.content
    }

    /// The MIME type, if one was set.
    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }
}

/// One payload field value.
#[derive(Debug, Clone, PartialEq)]
pub enum PayloadValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Null,
    /// A JSON object or array, sent as a JSON-encoded string.
    Nested(Value),
    Binary(Attachment),
}

/// A payload value after normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedValue {
    /// Scalar rendered as its string form.
    Scalar(String),
    /// JSON object or array, encoded when the body is built.
    Nested(Value),
}

impl NormalizedValue {
    /// Render as the string sent on the wire.
    pub fn into_wire_string(self) -> String {
        match self {
            NormalizedValue::Scalar(s) => s,
            NormalizedValue::Nested(value) => value.to_string(),
        }
    }
}

impl PayloadValue {
    /// Narrow a value for encoding.
    ///
    /// `Binary` is not handled here; the request builder moves attachments
    /// out of the payload before normalizing.
    pub fn normalize(&self, field: &str) -> Result<NormalizedValue> {
        match self {
            PayloadValue::Text(s) => Ok(NormalizedValue::Scalar(s.clone())),
            PayloadValue::Integer(n) => Ok(NormalizedValue::Scalar(n.to_string())),
            PayloadValue::Float(f) if f.is_finite() => Ok(NormalizedValue::Scalar(f.to_string())),
            PayloadValue::Float(f) => Err(Error::invalid_payload(
                field,
                format!("non-finite number {f} cannot be sent"),
            )),
            PayloadValue::Boolean(b) => Ok(NormalizedValue::Scalar(b.to_string())),
            PayloadValue::Null => Ok(NormalizedValue::Scalar(String::new())),
            PayloadValue::Nested(value) => Ok(normalize_json(value)),
            PayloadValue::Binary(_) => Err(Error::invalid_payload(
                field,
                "binary attachments can only be sent in a multipart POST body",
            )),
        }
    }

    /// Returns true if this value is a nested object or array.
    pub fn is_nested(&self) -> bool {
        matches!(self, PayloadValue::Nested(Value::Object(_) | Value::Array(_)))
    }
}

fn normalize_json(value: &Value) -> NormalizedValue {
    match value {
        Value::Object(_) | Value::Array(_) => NormalizedValue::Nested(value.clone()),
        Value::String(s) => NormalizedValue::Scalar(s.clone()),
        Value::Null => NormalizedValue::Scalar(String::new()),
        Value::Bool(b) => NormalizedValue::Scalar(b.to_string()),
        Value::Number(n) => NormalizedValue::Scalar(n.to_string()),
    }
}

impl From<&str> for PayloadValue {
    fn from(value: &str) -> Self {
        PayloadValue::Text(value.to_string())
    }
}

impl From<String> for PayloadValue {
    fn from(value: String) -> Self {
        PayloadValue::Text(value)
    }
}

impl From<&String> for PayloadValue {
    fn from(value: &String) -> Self {
        PayloadValue::Text(value.clone())
    }
}

impl From<bool> for PayloadValue {
    fn from(value: bool) -> Self {
        PayloadValue::Boolean(value)
    }
}

macro_rules! integer_payload_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for PayloadValue {
                fn from(value: $ty) -> Self {
                    PayloadValue::Integer(i64::from(value))
                }
            }
        )*
    };
}

integer_payload_value!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for PayloadValue {
    fn from(value: f32) -> Self {
        PayloadValue::Float(f64::from(value))
    }
}

impl From<f64> for PayloadValue {
    fn from(value: f64) -> Self {
        PayloadValue::Float(value)
    }
}

impl From<Attachment> for PayloadValue {
    fn from(value: Attachment) -> Self {
        PayloadValue::Binary(value)
    }
}

impl<T: Into<PayloadValue>> From<Option<T>> for PayloadValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(PayloadValue::Null, Into::into)
    }
}

impl From<Value> for PayloadValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => PayloadValue::Null,
            Value::Bool(b) => PayloadValue::Boolean(b),
            Value::String(s) => PayloadValue::Text(s),
            Value::Number(n) => match n.as_i64() {
                Some(i) => PayloadValue::Integer(i),
                None => PayloadValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            nested => PayloadValue::Nested(nested),
        }
    }
}

/// Field name → value mapping for one request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload {
    fields: BTreeMap<String, PayloadValue>,
}

impl Payload {
    /// Create an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<PayloadValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a value, returning the previous value for the key.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<PayloadValue>,
    ) -> Option<PayloadValue> {
        self.fields.insert(key.into(), value.into())
    }

    /// Insert any serializable value (e.g. a `reply_markup` struct).
    ///
    /// Fails with `InvalidPayloadValue` when the value has no JSON
    /// representation.
    pub fn try_insert<T: Serialize + ?Sized>(
        &mut self,
        key: impl Into<String>,
        value: &T,
    ) -> Result<Option<PayloadValue>> {
        let key = key.into();
        let json = serde_json::to_value(value)
            .map_err(|e| Error::invalid_payload(key.clone(), e.to_string()))?;
        Ok(self.fields.insert(key, PayloadValue::from(json)))
    }

    /// Get a value.
    pub fn get(&self, key: &str) -> Option<&PayloadValue> {
        self.fields.get(key)
    }

    /// Remove a value.
    pub fn remove(&mut self, key: &str) -> Option<PayloadValue> {
        self.fields.remove(key)
    }

    /// Returns true if the key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the payload has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over fields in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, PayloadValue> {
        self.fields.iter()
    }

    /// Merge `options` into this payload; options win on key collision.
    ///
    /// Returns the keys that replaced an existing field.
    pub fn merge(&mut self, options: Payload) -> Vec<String> {
        let mut overridden = Vec::new();
        for (key, value) in options.fields {
            if self.fields.insert(key.clone(), value).is_some() {
                overridden.push(key);
            }
        }
        overridden
    }
}

impl IntoIterator for Payload {
    type Item = (String, PayloadValue);
    type IntoIter = btree_map::IntoIter<String, PayloadValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<'a> IntoIterator for &'a Payload {
    type Item = (&'a String, &'a PayloadValue);
    type IntoIter = btree_map::Iter<'a, String, PayloadValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl<K: Into<String>, V: Into<PayloadValue>> FromIterator<(K, V)> for Payload {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Build a payload from a JSON object; scalars map to scalar variants and
/// nested values stay nested.
impl TryFrom<Value> for Payload {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(map.into_iter().collect()),
            other => Err(Error::invalid_payload(
                "<payload>",
                format!("expected a JSON object, got {other}"),
            )),
        }
    }
}
