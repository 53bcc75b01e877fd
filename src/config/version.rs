//! API version definitions.
//!
//! This module provides the [`ApiVersion`] enum identifying the version
//! segment of the API URL (`/api/{version}/`).

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Web API version.
///
/// The server exposes its API under a `v<N>` path segment. `V1` is the only
/// version the server currently publishes; `Custom` carries any other
/// well-formed version for forward compatibility.
///
/// # Example
///
/// ```rust
/// use webapi_client::ApiVersion;
///
/// let version: ApiVersion = "v1".parse().unwrap();
/// assert_eq!(version, ApiVersion::V1);
/// assert_eq!(ApiVersion::latest().to_string(), "v1");
///
/// let future: ApiVersion = "v2".parse().unwrap();
/// assert_eq!(future, ApiVersion::Custom("v2".to_string()));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    /// API version 1.
    V1,
    /// Any other `v<N>` version string.
    Custom(String),
}

impl ApiVersion {
    /// Returns the latest version published by the server.
    #[must_use]
    pub const fn latest() -> Self {
        Self::V1
    }

    /// Returns the version as it appears in the URL.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::V1 => "v1",
            Self::Custom(version) => version,
        }
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self::latest()
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('v').unwrap_or_default();
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(ConfigError::InvalidApiVersion {
                version: s.to_string(),
            });
        }

        match s {
            "v1" => Ok(Self::V1),
            other => Ok(Self::Custom(other.to_string())),
        }
    }
}
