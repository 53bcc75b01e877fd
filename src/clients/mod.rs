//! HTTP transport for web API communication.
//!
//! This module provides the transport layer: it turns a request description
//! into exactly one network round trip and hands back the raw response.
//! Interpretation of status codes and bodies lives in [`crate::rest`].
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`HttpClient`]: The async HTTP client
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: The raw response (status, headers, body text)
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, DELETE)
//! - [`TransportError`]: Failure to obtain any response
//!
//! # Failure Model
//!
//! A response with any status code, including 4xx and 5xx, is a successful
//! transport outcome. Only validation failures and network failures (no
//! response at all) are reported as [`TransportError`]. Requests are never
//! retried.

mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{InvalidHttpRequestError, TransportError};
pub use http_client::{HttpClient, CLIENT_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
