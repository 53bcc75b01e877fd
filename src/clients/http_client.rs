//! HTTP client for web API communication.
//!
//! This module provides the [`HttpClient`] type, the transport used by every
//! resource. It performs exactly one round trip per call: no retries and no
//! caching.

use std::collections::HashMap;

use crate::clients::errors::TransportError;
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::ApiConfig;
use crate::rest::{url_path_join, with_end_slash, ResourcePath};

/// Client version from Cargo.toml.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to the web API.
///
/// The client handles:
/// - URL construction from the server origin and the API root path
/// - Default headers including User-Agent and Accept
/// - Conversion of the reqwest response into a raw [`HttpResponse`]
///
/// Any response that is received, whatever its status, is returned as
/// `Ok`; only failures to obtain a response are errors. Redirects are not
/// followed, so a 3xx reaches the caller as is.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use webapi_client::{ApiConfig, HostUrl};
/// use webapi_client::clients::{HttpClient, HttpMethod, HttpRequest};
///
/// let config = ApiConfig::builder()
///     .host(HostUrl::new("http://localhost:8888").unwrap())
///     .build()
///     .unwrap();
/// let client = HttpClient::new(&config);
///
/// let request = HttpRequest::builder(HttpMethod::Get, "/api/v1/students/")
///     .build()
///     .unwrap();
///
/// let response = client.send(&request).await?;
/// println!("Status: {}", response.code);
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Server origin (e.g., `http://localhost:8888`).
    base_uri: String,
    /// API root path (e.g., "/api/v1").
    base_path: String,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client for the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    #[must_use]
    pub fn new(config: &ApiConfig) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}webapi-client v{CLIENT_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        for (key, value) in config.default_headers() {
            default_headers.insert(key.clone(), value.clone());
        }

        let mut builder = reqwest::Client::builder()
            .use_rustls_tls()
            .redirect(reqwest::redirect::Policy::none());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().expect("Failed to create HTTP client");

        Self {
            client,
            base_uri: config.host().as_ref().to_string(),
            base_path: config.api_root(),
            default_headers,
        }
    }

    /// Returns the server origin for this client.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the API root path for this client.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the absolute URL path of `path` under the API root.
    ///
    /// Segments are percent-encoded and the result always ends with `/`.
    #[must_use]
    pub fn endpoint_path(&self, path: &ResourcePath) -> String {
        let encoded = path.encoded();
        with_end_slash(&url_path_join(&[self.base_path.as_str(), encoded.as_str()]))
    }

    /// Sends one HTTP request and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - No response could be obtained (`Network`)
    ///
    /// Non-2xx responses are **not** errors at this level.
    pub async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        request.verify()?;

        let url = format!("{}{}", self.base_uri, request.path_and_query());

        let mut headers = self.default_headers.clone();
        if request.body.is_some() {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                headers.insert(key.clone(), value.clone());
            }
        }

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        for (key, value) in &headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.to_string());
        }

        tracing::debug!("Sending {} request to {}", request.http_method, url);

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body_text = match res.text().await {
            Ok(text) => Some(text),
            Err(error) => {
                tracing::debug!("Could not read response body from {}: {}", url, error);
                None
            }
        };

        tracing::debug!("Received status {} from {}", code, url);

        Ok(HttpResponse::new(code, res_headers, body_text, url))
    }

    /// Parses response headers into a `HashMap`.
    ///
    /// Values that are not visible ASCII are dropped.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let Ok(value) = value.to_str() else {
                tracing::debug!("Skipping non-ASCII value of header {}", name);
                continue;
            };
            result
                .entry(name.as_str().to_lowercase())
                .or_default()
                .push(value.to_string());
        }
        result
    }
}
