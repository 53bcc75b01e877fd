//! Transport-level error types.
//!
//! A [`TransportError`] means no HTTP response was received: either the
//! request failed local validation before being sent, or the network round
//! trip failed. Any response that *was* received, whatever its status code,
//! is handed to the response interpreter instead.
//!
//! # Example
//!
//! ```rust,ignore
//! use webapi_client::clients::{HttpClient, TransportError};
//!
//! match client.send(&request).await {
//!     Ok(response) => println!("Status {}", response.code),
//!     Err(TransportError::InvalidRequest(e)) => println!("Invalid request: {e}"),
//!     Err(TransportError::Network(e)) => println!("Network error: {e}"),
//! }
//! ```

use thiserror::Error;

/// Error returned when an HTTP request fails validation before being sent.
///
/// # Example
///
/// ```rust
/// use webapi_client::clients::InvalidHttpRequestError;
///
/// let error = InvalidHttpRequestError::MissingBody {
///     method: "post".to_string(),
/// };
///
/// assert_eq!(error.to_string(), "Cannot use post without specifying data.");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A POST or PUT request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// A GET or DELETE request was given a body.
    #[error("Cannot send data with {method}.")]
    UnexpectedBody {
        /// The HTTP method that does not accept a body.
        method: String,
    },

    /// The representation could not be serialized as JSON.
    #[error("Cannot serialize representation: {reason}")]
    UnserializableBody {
        /// The serializer's error message.
        reason: String,
    },
}

/// Unified error type for "no response received" failures.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request failed validation before being sent.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// A network error occurred (connection refused, timeout, TLS, ...).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_request_error_messages() {
        let error = InvalidHttpRequestError::MissingBody {
            method: "put".to_string(),
        };
        assert_eq!(error.to_string(), "Cannot use put without specifying data.");

        let error = InvalidHttpRequestError::UnexpectedBody {
            method: "get".to_string(),
        };
        assert_eq!(error.to_string(), "Cannot send data with get.");

        let error = InvalidHttpRequestError::UnserializableBody {
            reason: "key must be a string".to_string(),
        };
        assert!(error.to_string().contains("key must be a string"));
    }

    #[test]
    fn test_transport_error_wraps_invalid_request_transparently() {
        let error: TransportError = InvalidHttpRequestError::MissingBody {
            method: "post".to_string(),
        }
        .into();

        assert!(matches!(error, TransportError::InvalidRequest(_)));
        assert_eq!(error.to_string(), "Cannot use post without specifying data.");
    }

    #[test]
    fn test_transport_error_implements_std_error() {
        let error: TransportError = InvalidHttpRequestError::UnexpectedBody {
            method: "delete".to_string(),
        }
        .into();
        let _: &dyn std::error::Error = &error;
    }
}
