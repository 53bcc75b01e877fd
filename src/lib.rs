//! # Web API Client
//!
//! A Rust client for versioned CRUD web APIs, providing type-safe
//! configuration, a single-round-trip HTTP transport, and per-collection
//! resource façades with strict response interpretation.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ApiConfig`] and [`ApiConfigBuilder`]
//! - Validated newtypes for the server host and base URL path
//! - Async HTTP transport via [`clients::HttpClient`]
//! - Per-operation status checking and value extraction in [`rest`]
//! - [`Resource`] façades with `create`, `retrieve`, `update`, `delete`
//!   and `items`, looked up by name in a [`ResourceRegistry`]
//!
//! Every resource lives at `{base_urlpath}/api/{version}/{collection}/{id?}/`.
//!
//! ## Quick Start
//!
//! ```rust
//! use webapi_client::{ApiConfig, ApiVersion, BaseUrlPath, HostUrl};
//!
//! let config = ApiConfig::builder()
//!     .host(HostUrl::new("http://localhost:8888").unwrap())
//!     .base_urlpath(BaseUrlPath::new("/user/john").unwrap())
//!     .api_version(ApiVersion::latest())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.api_root(), "/user/john/api/v1");
//! ```
//!
//! ## Working with Resources
//!
//! ```rust,ignore
//! use serde_json::json;
//! use webapi_client::{ApiConfig, HostUrl, ResourceEntry, ResourceRegistry};
//!
//! let config = ApiConfig::builder()
//!     .host(HostUrl::new("http://localhost:8888").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let registry = ResourceRegistry::new(&config, [ResourceEntry::new("Student")])?;
//! let students = registry.get("Student").unwrap();
//!
//! // POST /api/v1/students/ -> 201, identifier from Location
//! let id = students.create(&json!({"name": "john wick", "age": 19}), None).await?;
//!
//! // GET /api/v1/students/{id}/ -> 200
//! let student = students.retrieve(&id, None).await?;
//! println!("{}", student["name"]);
//! ```
//!
//! ## Error Handling
//!
//! Transport failures, unexpected statuses and malformed successful
//! responses all surface as [`ApiError`]:
//!
//! ```rust,ignore
//! match students.retrieve("42", None).await {
//!     Ok(student) => println!("{student}"),
//!     Err(e) if e.is_not_found() => println!("no student 42"),
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration and registries are instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **One request per call**: No retries, no caching

pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use config::{ApiConfig, ApiConfigBuilder, ApiVersion, BaseUrlPath, HostUrl};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    HttpClient, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    InvalidHttpRequestError, TransportError,
};

// Re-export resource types
pub use rest::{
    ApiError, ItemsCollection, Outcome, QueryArguments, Resource, ResourceEntry,
    ResourceRegistry, SingletonResource,
};
