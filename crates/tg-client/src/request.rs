//! Request building: payload normalization and encoding selection.
//!
//! | Method | Attachments | Encoding |
//! |--------|-------------|----------|
//! | GET    | none        | query string (scalars only) |
//! | POST   | none        | JSON object or urlencoded form ([`PostEncoding`]) |
//! | POST   | some        | `multipart/form-data` |

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::config::PostEncoding;
use crate::credentials::BotCredentials;
use crate::error::{Error, ErrorKind, Result};
use crate::payload::{Attachment, NormalizedValue, Payload, PayloadValue};
use crate::security::{is_valid_endpoint, redact_token};

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
}

impl RequestMethod {
    /// Convert to reqwest::Method.
    pub fn to_reqwest(&self) -> reqwest::Method {
        match self {
            RequestMethod::Get => reqwest::Method::GET,
            RequestMethod::Post => reqwest::Method::POST,
        }
    }
}

/// Request body content.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// No body (GET).
    Empty,
    /// JSON object whose values are wire strings.
    Json(Value),
    /// Pre-encoded `application/x-www-form-urlencoded` body.
    Form(String),
    /// `multipart/form-data` text and binary parts.
    Multipart {
        fields: Vec<(String, String)>,
        files: Vec<(String, Attachment)>,
    },
}

/// A transport-ready request. Cheap to clone, so every retry re-sends the
/// same request.
#[derive(Clone, PartialEq)]
pub struct TransportRequest {
    pub(crate) method: RequestMethod,
    pub(crate) endpoint: String,
    pub(crate) url: String,
    pub(crate) body: RequestBody,
}

impl std::fmt::Debug for TransportRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportRequest")
            .field("method", &self.method)
            .field("endpoint", &self.endpoint)
            .field("url", &redact_token(&self.url))
            .field("body", &self.body)
            .finish()
    }
}

impl TransportRequest {
    /// The HTTP method.
    pub fn method(&self) -> RequestMethod {
        self.method
    }

    /// The Bot API method name (e.g. `sendMessage`).
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The full URL, including the token. Do not log it.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The request body.
    pub fn body(&self) -> &RequestBody {
        &self.body
    }

    /// Returns true if the body is `multipart/form-data`.
    pub fn is_multipart(&self) -> bool {
        matches!(self.body, RequestBody::Multipart { .. })
    }

    /// Number of binary parts in a multipart body.
    pub fn binary_part_count(&self) -> usize {
        match &self.body {
            RequestBody::Multipart { files, .. } => files.len(),
            _ => 0,
        }
    }
}

/// Shapes a payload and attachments into a [`TransportRequest`].
#[derive(Debug, Clone, Copy)]
pub struct RequestBuilder<'a> {
    credentials: &'a BotCredentials,
    post_encoding: PostEncoding,
}

impl<'a> RequestBuilder<'a> {
    /// Create a builder for the given credentials.
    pub fn new(credentials: &'a BotCredentials) -> Self {
        Self {
            credentials,
            post_encoding: PostEncoding::default(),
        }
    }

    /// Set the body encoding used for POSTs without attachments.
    pub fn post_encoding(mut self, encoding: PostEncoding) -> Self {
        self.post_encoding = encoding;
        self
    }

    /// Build a request for `endpoint`.
    ///
    /// `Binary` values inside `payload` are treated as attachments for their
    /// field. Fails with `InvalidPayloadValue` when a value cannot be encoded
    /// for the chosen method.
    pub fn build(
        &self,
        method: RequestMethod,
        endpoint: &str,
        payload: Payload,
        attachments: impl IntoIterator<Item = (String, Attachment)>,
    ) -> Result<TransportRequest> {
        if !is_valid_endpoint(endpoint) {
            return Err(Error::invalid_payload(
                "endpoint",
                format!("'{endpoint}' is not a Bot API method name"),
            ));
        }

        let mut files: BTreeMap<String, Attachment> = BTreeMap::new();
        let mut fields: Vec<(String, NormalizedValue)> = Vec::with_capacity(payload.len());

        for (key, value) in payload {
            match value {
                PayloadValue::Binary(attachment) => {
                    files.insert(key, attachment);
                }
                other => {
                    let normalized = other.normalize(&key)?;
                    fields.push((key, normalized));
                }
            }
        }

        for (key, attachment) in attachments {
            if fields.iter().any(|(k, _)| *k == key) || files.contains_key(&key) {
                return Err(Error::invalid_payload(
                    key,
                    "field is given both as a value and as an attachment",
                ));
            }
            files.insert(key, attachment);
        }

        let url = self.credentials.endpoint_url(endpoint)?;

        let (url, body) = match method {
            RequestMethod::Get => (build_query_url(&url, fields, &files)?, RequestBody::Empty),
            RequestMethod::Post if files.is_empty() => (url, self.encode_body(fields)?),
            RequestMethod::Post => (url, encode_multipart(fields, files)?),
        };

        Ok(TransportRequest {
            method,
            endpoint: endpoint.to_string(),
            url,
            body,
        })
    }

    fn encode_body(&self, fields: Vec<(String, NormalizedValue)>) -> Result<RequestBody> {
        match self.post_encoding {
            PostEncoding::Json => {
                let object: Map<String, Value> = fields
                    .into_iter()
                    .map(|(k, v)| (k, Value::String(v.into_wire_string())))
                    .collect();
                Ok(RequestBody::Json(Value::Object(object)))
            }
            PostEncoding::Form => {
                let pairs: Vec<(String, String)> = fields
                    .into_iter()
                    .map(|(k, v)| (k, v.into_wire_string()))
                    .collect();
                let encoded = serde_urlencoded::to_string(&pairs).map_err(|e| {
                    Error::with_source(
                        ErrorKind::InvalidPayloadValue {
                            field: "<payload>".to_string(),
                            reason: e.to_string(),
                        },
                        e,
                    )
                })?;
                Ok(RequestBody::Form(encoded))
            }
        }
    }
}

/// GET requests only carry scalar query parameters.
fn build_query_url(
    url: &str,
    fields: Vec<(String, NormalizedValue)>,
    files: &BTreeMap<String, Attachment>,
) -> Result<String> {
    if let Some(field) = files.keys().next() {
        return Err(Error::invalid_payload(
            field.clone(),
            "binary attachments cannot be sent with GET",
        ));
    }

    if fields.is_empty() {
        return Ok(url.to_string());
    }

    let mut parsed = url::Url::parse(url)?;
    {
        let mut query = parsed.query_pairs_mut();
        for (key, value) in fields {
            match value {
                NormalizedValue::Scalar(s) => {
                    query.append_pair(&key, &s);
                }
                NormalizedValue::Nested(_) => {
                    return Err(Error::invalid_payload(
                        key,
                        "nested objects and arrays are not allowed in GET query parameters",
                    ));
                }
            }
        }
    }

    Ok(parsed.into())
}

fn encode_multipart(
    fields: Vec<(String, NormalizedValue)>,
    files: BTreeMap<String, Attachment>,
) -> Result<RequestBody> {
    for (field, attachment) in &files {
        if let Some(mime) = attachment.mime_type() {
            // Same parser the transport applies to each part.
            reqwest::multipart::Part::text("").mime_str(mime).map_err(|e| {
                Error::invalid_payload(field.clone(), format!("invalid MIME type: {e}"))
            })?;
        }
    }

    Ok(RequestBody::Multipart {
        fields: fields
            .into_iter()
            .map(|(k, v)| (k, v.into_wire_string()))
            .collect(),
        files: files.into_iter().collect(),
    })
}
