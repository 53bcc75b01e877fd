//! Resource protocol layer for versioned CRUD web APIs.
//!
//! This module turns calls on a named collection into HTTP requests and
//! turns the raw responses back into typed outcomes:
//!
//! - **Path building**: [`ResourcePath`], [`url_path_join`] and
//!   [`QueryArguments`] compute `{base_urlpath}/api/{version}/{collection}/{id?}/`
//!   and the query string
//! - **Response interpretation**: the `interpret_*` functions check each
//!   operation's expected status and extract its value
//! - **Façades**: [`Resource`] and [`SingletonResource`] compose both with
//!   the [`HttpClient`](crate::clients::HttpClient) transport
//! - **Registry**: [`ResourceRegistry`] maps logical names to façades
//!
//! Every failure, whatever its cause, is delivered as an [`ApiError`].
//!
//! # Example
//!
//! ```rust,ignore
//! use serde_json::json;
//! use webapi_client::{ApiConfig, HostUrl};
//! use webapi_client::rest::{QueryArguments, ResourceEntry, ResourceRegistry};
//!
//! let config = ApiConfig::builder()
//!     .host(HostUrl::new("http://localhost:8888").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let registry = ResourceRegistry::new(&config, [ResourceEntry::new("Student")])?;
//! let students = registry.get("Student").unwrap();
//!
//! let id = students.create(&json!({"name": "john wick", "age": 19}), None).await?;
//! students.update(&id, &json!({"name": "john wick", "age": 20}), None).await?;
//!
//! let query = QueryArguments::new().filter(&json!({"age": 20})).limit(5);
//! let found = students.items(Some(&query)).await?;
//! println!("{} of {:?}", found.len(), found.total);
//!
//! students.delete(&id, None).await?;
//! assert!(!students.exists(&id).await?);
//! ```

mod errors;
mod path;
mod registry;
mod resource;
mod response;

// Public exports
pub use errors::{ApiError, TRANSPORT_FAILURE_CODE};
pub use path::{
    encode_uri_components, url_path_join, with_end_slash, QueryArguments, QueryValue,
    ResourcePath,
};
pub use registry::{ResourceEntry, ResourceKind, ResourceRegistry};
pub use resource::{Resource, SingletonResource};
pub use response::{
    check_status, from_transport, interpret_create, interpret_delete, interpret_list,
    interpret_retrieve, interpret_singleton_create, interpret_update, parse_payload,
    ItemsCollection, Operation, Outcome,
};
