//! HTTP response types.
//!
//! This module provides the [`HttpResponse`] type: the raw status, headers
//! and body text received from the server, before any interpretation.

use std::collections::HashMap;

/// A raw HTTP response from the web API.
///
/// Header names are stored lower-cased, so lookups through
/// [`HttpResponse::header`] are case-insensitive. The body is kept as text;
/// decoding is the response interpreter's job.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, keyed by lower-cased name (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The response body, if non-empty.
    pub body_text: Option<String>,
    /// The URL the request was sent to. Relative `Location` values resolve against it.
    pub url: String,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`, lower-casing header names.
    ///
    /// An empty body is stored as `None`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::HashMap;
    /// use webapi_client::clients::HttpResponse;
    ///
    /// let mut headers = HashMap::new();
    /// headers.insert("Location".to_string(), vec!["/api/v1/students/0/".to_string()]);
    ///
    /// let response = HttpResponse::new(201, headers, None, "http://localhost/api/v1/students/");
    /// assert_eq!(response.location(), Some("/api/v1/students/0/"));
    /// ```
    #[must_use]
    pub fn new(
        code: u16,
        headers: HashMap<String, Vec<String>>,
        body_text: Option<String>,
        url: impl Into<String>,
    ) -> Self {
        let mut normalized: HashMap<String, Vec<String>> = HashMap::new();
        for (name, values) in headers {
            normalized
                .entry(name.to_lowercase())
                .or_default()
                .extend(values);
        }

        Self {
            code,
            headers: normalized,
            body_text: body_text.filter(|text| !text.is_empty()),
            url: url.into(),
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of the header `name`, ignoring case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `Location` header value, if present.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.header("location")
    }
}
