//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use std::fmt;

/// A validated server origin (scheme and authority).
///
/// Requests are sent to `{host}{path}`, so the host must not carry a path,
/// query or fragment of its own. A single trailing `/` is tolerated and
/// dropped.
///
/// # Example
///
/// ```rust
/// use webapi_client::HostUrl;
///
/// let url = HostUrl::new("http://localhost:8888/").unwrap();
/// assert_eq!(url.as_ref(), "http://localhost:8888");
/// assert_eq!(url.scheme(), "http");
/// assert_eq!(url.host_name(), "localhost");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl HostUrl {
    /// Creates a new validated host URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHostUrl`] if the URL is invalid.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let trimmed = url.trim();
        let url = trimmed.strip_suffix('/').unwrap_or(trimmed).to_string();
        let invalid = || ConfigError::InvalidHostUrl { url: url.clone() };

        let scheme_end = url.find("://").ok_or_else(invalid)?;

        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(invalid());
        }

        let host_start = scheme_end + 3;
        if host_start >= url.len() {
            return Err(invalid());
        }

        let remainder = &url[host_start..];
        if remainder.contains(['/', '?', '#']) {
            return Err(invalid());
        }

        // Host ends at the port separator, if any
        let host_end = remainder.find(':').map_or(url.len(), |i| host_start + i);
        if host_end == host_start {
            return Err(invalid());
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (e.g., "http").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }
}

impl AsRef<str> for HostUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for HostUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// The URL path under which the web application is mounted.
///
/// The API lives at `{base_urlpath}/api/{version}/`. The path is normalized
/// to start with `/`; an empty string means the server root.
///
/// # Example
///
/// ```rust
/// use webapi_client::BaseUrlPath;
///
/// assert_eq!(BaseUrlPath::new("user/john").unwrap().as_ref(), "/user/john");
/// assert_eq!(BaseUrlPath::default().as_ref(), "/");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrlPath(String);

impl BaseUrlPath {
    /// Creates a new validated base path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrlPath`] if the path contains a
    /// query (`?`) or fragment (`#`) marker.
    pub fn new(path: impl Into<String>) -> Result<Self, ConfigError> {
        let path = path.into();
        let path = path.trim();
        if path.contains(['?', '#']) {
            return Err(ConfigError::InvalidBaseUrlPath {
                path: path.to_string(),
            });
        }

        if path.starts_with('/') {
            Ok(Self(path.to_string()))
        } else {
            Ok(Self(format!("/{path}")))
        }
    }
}

impl Default for BaseUrlPath {
    fn default() -> Self {
        Self("/".to_string())
    }
}

impl AsRef<str> for BaseUrlPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
