//! Error types for client configuration.
//!
//! This module contains the errors raised while building an
//! [`ApiConfig`](crate::ApiConfig) or a [`ResourceRegistry`](crate::ResourceRegistry).
//! Failures that happen while talking to the server are reported through
//! [`ApiError`](crate::ApiError) instead.
//!
//! # Example
//!
//! ```rust
//! use webapi_client::{HostUrl, ConfigError};
//!
//! let result = HostUrl::new("not a url");
//! assert!(matches!(result, Err(ConfigError::InvalidHostUrl { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur while configuring the client.
///
/// Each variant carries enough context to point at the offending value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Host URL is invalid.
    #[error("Invalid host URL '{url}'. Please provide an absolute URL with scheme and host (e.g., 'http://localhost:8888').")]
    InvalidHostUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Base URL path is invalid.
    #[error("Invalid base URL path '{path}'. A base path must not contain a query or fragment.")]
    InvalidBaseUrlPath {
        /// The invalid path that was provided.
        path: String,
    },

    /// API version is invalid.
    #[error("Invalid API version '{version}'. Expected format: 'v<number>' (e.g., 'v1').")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// A resource was registered with an empty collection name.
    #[error("Resource '{name}' has an empty collection name.")]
    EmptyCollectionName {
        /// The logical name of the resource.
        name: String,
    },

    /// Two resources were registered under the same logical name.
    #[error("Resource '{name}' is registered more than once.")]
    DuplicateResource {
        /// The duplicated logical name.
        name: String,
    },
}
