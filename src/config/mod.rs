//! Configuration types for the web API client.
//!
//! This module provides the configuration used to locate the versioned API
//! on the server and to tune the underlying transport.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ApiConfig`]: The immutable configuration passed to the client at startup
//! - [`ApiConfigBuilder`]: A builder for constructing [`ApiConfig`] instances
//! - [`HostUrl`]: A validated server origin
//! - [`BaseUrlPath`]: The path the web application is mounted under
//! - [`ApiVersion`]: The API version segment of the URL
//!
//! # Example
//!
//! ```rust
//! use webapi_client::{ApiConfig, ApiVersion, BaseUrlPath, HostUrl};
//!
//! let config = ApiConfig::builder()
//!     .host(HostUrl::new("http://localhost:8888").unwrap())
//!     .base_urlpath(BaseUrlPath::new("/user/john/").unwrap())
//!     .api_version(ApiVersion::V1)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.api_root(), "/user/john/api/v1");
//! ```

mod newtypes;
mod version;

pub use newtypes::{BaseUrlPath, HostUrl};
pub use version::ApiVersion;

use std::collections::HashMap;
use std::time::Duration;

use crate::error::ConfigError;
use crate::rest::url_path_join;

/// Configuration for the web API client.
///
/// Holds the location of the API (`{host}{base_urlpath}/api/{version}/`) and
/// transport settings. It is built once and shared by every resource.
///
/// # Thread Safety
///
/// `ApiConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    host: HostUrl,
    base_urlpath: BaseUrlPath,
    api_version: ApiVersion,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
    default_headers: HashMap<String, String>,
}

impl ApiConfig {
    /// Creates a new builder for constructing an `ApiConfig`.
    #[must_use]
    pub fn builder() -> ApiConfigBuilder {
        ApiConfigBuilder::new()
    }

    /// Returns the server origin.
    #[must_use]
    pub const fn host(&self) -> &HostUrl {
        &self.host
    }

    /// Returns the path the web application is mounted under.
    #[must_use]
    pub const fn base_urlpath(&self) -> &BaseUrlPath {
        &self.base_urlpath
    }

    /// Returns the API version.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the per-request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the extra headers sent with every request.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the path of the API root, without trailing slash.
    ///
    /// ```rust
    /// use webapi_client::{ApiConfig, HostUrl};
    ///
    /// let config = ApiConfig::builder()
    ///     .host(HostUrl::new("http://localhost").unwrap())
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(config.api_root(), "/api/v1");
    /// ```
    #[must_use]
    pub fn api_root(&self) -> String {
        url_path_join(&[
            self.base_urlpath.as_ref(),
            "api",
            self.api_version.as_str(),
        ])
    }
}

// Verify ApiConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiConfig>();
};

/// Builder for constructing [`ApiConfig`] instances.
///
/// The only required field is `host`.
///
/// # Defaults
///
/// - `base_urlpath`: `/`
/// - `api_version`: [`ApiVersion::latest`]
/// - `user_agent_prefix`: `None`
/// - `timeout`: `None` (no timeout)
/// - `default_headers`: empty
#[derive(Debug, Default)]
pub struct ApiConfigBuilder {
    host: Option<HostUrl>,
    base_urlpath: Option<BaseUrlPath>,
    api_version: Option<ApiVersion>,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
    default_headers: HashMap<String, String>,
}

impl ApiConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the server origin (required).
    #[must_use]
    pub fn host(mut self, host: HostUrl) -> Self {
        self.host = Some(host);
        self
    }

    /// Sets the path the web application is mounted under.
    #[must_use]
    pub fn base_urlpath(mut self, path: BaseUrlPath) -> Self {
        self.base_urlpath = Some(path);
        self
    }

    /// Sets the API version.
    #[must_use]
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets a timeout applied to each request.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Adds a header sent with every request.
    #[must_use]
    pub fn default_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Builds the [`ApiConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `host` is not set.
    pub fn build(self) -> Result<ApiConfig, ConfigError> {
        let host = self
            .host
            .ok_or(ConfigError::MissingRequiredField { field: "host" })?;

        Ok(ApiConfig {
            host,
            base_urlpath: self.base_urlpath.unwrap_or_default(),
            api_version: self.api_version.unwrap_or_else(ApiVersion::latest),
            user_agent_prefix: self.user_agent_prefix,
            timeout: self.timeout,
            default_headers: self.default_headers,
        })
    }
}
