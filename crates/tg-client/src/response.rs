//! Response normalization into the Telegram envelope.
//!
//! Every Bot API method answers with
//! `{"ok": bool, "result": ..., "error_code": int, "description": str}`.
//! [`ResponseNormalizer::parse`] either returns a successful envelope or a
//! classified error; it never returns a partial envelope.

use std::time::Duration;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, ErrorKind, Result};

/// Default description when Telegram omits one.
pub const UNKNOWN_ERROR_DESCRIPTION: &str = "Unknown error";

/// Status and body bytes of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Bytes,
}

impl RawResponse {
    /// Create a raw response.
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns true if the response status is successful (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Extra information Telegram attaches to some errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseParameters {
    /// The group was migrated to a supergroup with this identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub migrate_to_chat_id: Option<i64>,
    /// Seconds to wait before repeating a flood-limited request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
}

/// The uniform success/failure wrapper returned by every method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<ResponseParameters>,
}

impl ResponseEnvelope {
    /// The `result` value, or `null` if absent.
    pub fn result(&self) -> &Value {
        self.result.as_ref().unwrap_or(&Value::Null)
    }

    /// Take ownership of the `result` value.
    pub fn into_result(self) -> Value {
        self.result.unwrap_or(Value::Null)
    }

    /// Decode `result` into a typed value.
    pub fn result_as<T: DeserializeOwned>(&self) -> Result<T> {
        T::deserialize(self.result()).map_err(|e| {
            Error::with_source(
                ErrorKind::MalformedResponse(format!("unexpected result shape: {e}")),
                e,
            )
        })
    }
}

/// Parses raw responses into envelopes or classified errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseNormalizer;

impl ResponseNormalizer {
    /// Parse a raw response.
    ///
    /// - non-2xx with an `ok: false` object body → `Api`
    /// - non-2xx with an object body missing `ok` → `MalformedResponse`
    /// - any other non-2xx, or an empty body → `Transport { status }`
    /// - 2xx that is not a JSON object with a boolean `ok` → `MalformedResponse`
    pub fn parse(status: u16, body: &[u8]) -> Result<ResponseEnvelope> {
        let success = (200..300).contains(&status);

        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(transport_failure(status));
        }

        let object = match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(map)) => map,
            Ok(_) if !success => return Err(transport_failure(status)),
            Ok(other) => {
                return Err(Error::new(ErrorKind::MalformedResponse(format!(
                    "expected a JSON object, got {}",
                    json_type_name(&other)
                ))));
            }
            Err(_) if !success => return Err(transport_failure(status)),
            Err(e) => {
                return Err(Error::with_source(
                    ErrorKind::MalformedResponse("response body is not valid JSON".to_string()),
                    e,
                ));
            }
        };

        let ok = match object.get("ok") {
            None => {
                return Err(Error::new(ErrorKind::MalformedResponse(
                    "missing 'ok' field".to_string(),
                )));
            }
            Some(Value::Bool(ok)) => *ok,
            Some(other) if success => {
                return Err(Error::new(ErrorKind::MalformedResponse(format!(
                    "'ok' must be a boolean, got {}",
                    json_type_name(other)
                ))));
            }
            Some(_) => return Err(transport_failure(status)),
        };

        if !ok {
            return Err(api_error(&object));
        }

        if !success {
            return Err(transport_failure(status));
        }

        Ok(envelope_from_object(object))
    }

    /// Parse a [`RawResponse`].
    pub fn parse_raw(response: &RawResponse) -> Result<ResponseEnvelope> {
        Self::parse(response.status, &response.body)
    }
}

fn transport_failure(status: u16) -> Error {
    Error::transport(
        Some(status),
        format!("Failed to connect to Telegram API: {status}"),
    )
}

fn api_error(object: &Map<String, Value>) -> Error {
    let description = object
        .get("description")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_else(|| UNKNOWN_ERROR_DESCRIPTION.to_string());
    let error_code = object.get("error_code").and_then(Value::as_i64).unwrap_or(0);
    let parameters = parse_parameters(object);

    Error::new(ErrorKind::Api {
        error_code,
        description,
        retry_after: parameters
            .as_ref()
            .and_then(|p| p.retry_after)
            .map(Duration::from_secs),
        migrate_to_chat_id: parameters.and_then(|p| p.migrate_to_chat_id),
    })
}

fn parse_parameters(object: &Map<String, Value>) -> Option<ResponseParameters> {
    object
        .get("parameters")
        .and_then(|v| ResponseParameters::deserialize(v).ok())
}

fn envelope_from_object(mut object: Map<String, Value>) -> ResponseEnvelope {
    let parameters = parse_parameters(&object);
    ResponseEnvelope {
        ok: true,
        result: object.remove("result"),
        error_code: None,
        description: object
            .remove("description")
            .and_then(|v| v.as_str().map(String::from)),
        parameters,
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
