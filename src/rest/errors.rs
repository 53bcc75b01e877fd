//! The normalized failure type delivered by every resource operation.
//!
//! Three different causes collapse into one [`ApiError`] shape:
//!
//! - **Transport failure**: no response was received. `code` is
//!   [`TRANSPORT_FAILURE_CODE`] and `extra` is empty.
//! - **Interpretation failure**: a response was received but broke the
//!   operation's contract (unexpected status, missing or unparsable
//!   `Location`, missing payload). `code` is the received status.
//! - **Server-reported failure**: the server answered with an error status
//!   and a JSON payload such as `{"type": "NotFound", "message": "..."}`.
//!   `message` is taken from the payload and every other field is kept
//!   verbatim in `extra`.
//!
//! Callers tell these apart only through `code`, `message` and `extra`.
//!
//! # Example
//!
//! ```rust,ignore
//! match students.retrieve("1", None).await {
//!     Ok(student) => println!("{student}"),
//!     Err(e) if e.is_not_found() => println!("no such student"),
//!     Err(e) if e.is_transport_failure() => println!("server unreachable: {}", e.message),
//!     Err(e) => println!("{}: {} {:?}", e.code, e.message, e.extra),
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::clients::TransportError;

/// The `code` reported when no response was received.
pub const TRANSPORT_FAILURE_CODE: u16 = 0;

/// A failed resource operation.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use webapi_client::ApiError;
///
/// let payload = json!({"type": "NotFound", "message": "no student 1", "hint": "list first"});
/// let error = ApiError::unexpected_response(404, Some(&payload));
///
/// assert_eq!(error.code, 404);
/// assert_eq!(error.message, "no student 1");
/// assert_eq!(error.error_type(), Some("NotFound"));
/// assert_eq!(error.extra.get("hint"), Some(&json!("list first")));
/// ```
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{code}: {message}")]
pub struct ApiError {
    /// The HTTP status code, or [`TRANSPORT_FAILURE_CODE`].
    pub code: u16,
    /// A human readable description of the failure.
    pub message: String,
    /// Additional fields supplied by the server, copied verbatim.
    #[serde(default)]
    pub extra: Map<String, Value>,
}

impl ApiError {
    /// Builds the error for a request that received no response.
    #[must_use]
    pub fn transport(error: &TransportError) -> Self {
        Self {
            code: TRANSPORT_FAILURE_CODE,
            message: error.to_string(),
            extra: Map::new(),
        }
    }

    /// Builds the error for a response whose status did not match the
    /// operation.
    ///
    /// When `payload` is a JSON object its `message` field becomes the
    /// message and every other field is copied into `extra`. A bare JSON
    /// string payload is used as the message. Without a usable message the
    /// status code's canonical reason phrase is used.
    #[must_use]
    pub fn unexpected_response(code: u16, payload: Option<&Value>) -> Self {
        let mut message = None;
        let mut extra = Map::new();

        match payload {
            Some(Value::Object(fields)) => {
                for (key, value) in fields {
                    if key == "message" {
                        message = Some(match value {
                            Value::String(s) => s.clone(),
                            other => other.to_string(),
                        });
                    } else {
                        extra.insert(key.clone(), value.clone());
                    }
                }
            }
            Some(Value::String(s)) => message = Some(s.clone()),
            _ => {}
        }

        Self {
            code,
            message: message.unwrap_or_else(|| default_message(code)),
            extra,
        }
    }

    /// Builds the error for a response that had the expected status but
    /// broke the rest of the operation's contract.
    #[must_use]
    pub fn interpretation(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            extra: Map::new(),
        }
    }

    /// Returns `true` if no response was received.
    #[must_use]
    pub const fn is_transport_failure(&self) -> bool {
        self.code == TRANSPORT_FAILURE_CODE
    }

    /// Returns `true` if the server reported the resource as missing.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        self.code == 404
    }

    /// Returns the server's error type (the payload's `type` field), if any.
    #[must_use]
    pub fn error_type(&self) -> Option<&str> {
        self.extra.get("type").and_then(Value::as_str)
    }
}

impl From<TransportError> for ApiError {
    fn from(error: TransportError) -> Self {
        Self::transport(&error)
    }
}

fn default_message(code: u16) -> String {
    reqwest::StatusCode::from_u16(code)
        .ok()
        .and_then(|status| status.canonical_reason())
        .unwrap_or("Unexpected response")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::InvalidHttpRequestError;
    use serde_json::json;

    #[test]
    fn test_transport_error_uses_sentinel_code() {
        let transport = TransportError::from(InvalidHttpRequestError::MissingBody {
            method: "post".to_string(),
        });
        let error = ApiError::transport(&transport);

        assert_eq!(error.code, TRANSPORT_FAILURE_CODE);
        assert!(error.is_transport_failure());
        assert!(error.extra.is_empty());
        assert!(error.message.contains("post"));
    }

    #[test]
    fn test_payload_fields_are_merged_verbatim() {
        let payload = json!({
            "type": "BadRepresentation",
            "message": "unprocessable",
            "foo": "bar",
        });
        let error = ApiError::unexpected_response(400, Some(&payload));

        assert_eq!(error.code, 400);
        assert_eq!(error.message, "unprocessable");
        assert_eq!(error.error_type(), Some("BadRepresentation"));
        assert_eq!(error.extra.get("foo"), Some(&json!("bar")));
        assert!(!error.extra.contains_key("message"));
    }

    #[test]
    fn test_missing_payload_defaults_to_reason_phrase() {
        let error = ApiError::unexpected_response(404, None);
        assert_eq!(error.code, 404);
        assert_eq!(error.message, "Not Found");
        assert!(error.is_not_found());
        assert!(error.extra.is_empty());
    }

    #[test]
    fn test_unknown_status_defaults_to_generic_message() {
        let error = ApiError::unexpected_response(599, Some(&json!([1, 2])));
        assert_eq!(error.message, "Unexpected response");
        assert!(error.extra.is_empty());
    }

    #[test]
    fn test_non_string_message_is_rendered() {
        let error = ApiError::unexpected_response(500, Some(&json!({"message": 42})));
        assert_eq!(error.message, "42");
    }

    #[test]
    fn test_string_payload_becomes_message() {
        let error = ApiError::unexpected_response(409, Some(&json!("already exists")));
        assert_eq!(error.message, "already exists");
    }

    #[test]
    fn test_display_format() {
        let error = ApiError::interpretation(201, "Missing Location header");
        assert_eq!(error.to_string(), "201: Missing Location header");
    }

    #[test]
    fn test_error_is_serializable() {
        let error = ApiError::unexpected_response(404, Some(&json!({"type": "NotFound"})));
        let value = serde_json::to_value(&error).unwrap();
        assert_eq!(value["code"], json!(404));
        assert_eq!(value["extra"]["type"], json!("NotFound"));
    }
}
