//! Resource façades bound to one remote collection.
//!
//! A [`Resource`] exposes the five operations of a collection:
//!
//! | Method       | Request                          | Success value       |
//! |--------------|----------------------------------|---------------------|
//! | `create`     | `POST {collection}/`             | new identifier      |
//! | `retrieve`   | `GET {collection}/{id}/`         | JSON representation |
//! | `update`     | `PUT {collection}/{id}/`         | `()`                |
//! | `delete`     | `DELETE {collection}/{id}/`      | `()`                |
//! | `items`      | `GET {collection}/`              | [`ItemsCollection`] |
//!
//! A [`SingletonResource`] is a collection with at most one instance,
//! addressed without an identifier.
//!
//! Every call issues exactly one request and resolves to one [`Outcome`].
//! Nothing is retried or cached, and the façades hold no mutable state, so
//! they can be cloned and shared freely between tasks.
//!
//! # Example
//!
//! ```rust,ignore
//! use serde_json::json;
//! use webapi_client::rest::{QueryArguments, ResourceEntry, ResourceRegistry};
//!
//! let registry = ResourceRegistry::new(&config, [ResourceEntry::new("Student")])?;
//! let students = registry.get("Student").unwrap();
//!
//! let id = students.create(&json!({"name": "john wick", "age": 19}), None).await?;
//! let student = students.retrieve(&id, None).await?;
//!
//! let page = students.items(Some(&QueryArguments::new().limit(10))).await?;
//! for (id, student) in page.iter() {
//!     println!("{id}: {student}");
//! }
//! ```

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::clients::{
    HttpClient, HttpRequest, HttpResponse, InvalidHttpRequestError, TransportError,
};
use crate::rest::errors::ApiError;
use crate::rest::path::{QueryArguments, ResourcePath};
use crate::rest::response::{
    from_transport, interpret_create, interpret_delete, interpret_list, interpret_retrieve,
    interpret_singleton_create, interpret_update, ItemsCollection, Operation, Outcome,
};

/// The shared request dispatch of both façades.
#[derive(Clone)]
struct Endpoint {
    client: Arc<HttpClient>,
    name: String,
    collection: ResourcePath,
}

impl Endpoint {
    fn new(client: Arc<HttpClient>, name: &str, collection: ResourcePath) -> Self {
        Self {
            client,
            name: name.to_string(),
            collection,
        }
    }

    fn target(&self, id: Option<&str>) -> String {
        let path = id.map_or_else(|| self.collection.clone(), |id| self.collection.child(id));
        self.client.endpoint_path(&path)
    }

    async fn dispatch(
        &self,
        operation: Operation,
        id: Option<&str>,
        body: Option<Value>,
        query: Option<&QueryArguments>,
    ) -> Outcome<HttpResponse> {
        let mut builder = HttpRequest::builder(operation.http_method(), self.target(id));
        if let Some(body) = body {
            builder = builder.body(body);
        }
        if let Some(query) = query {
            builder = builder.query(query.clone());
        }
        let request = builder.build().map_err(TransportError::from)?;

        tracing::debug!(
            resource = %self.name,
            operation = operation.as_str(),
            "Dispatching {} {}",
            request.http_method,
            request.path
        );

        from_transport(self.client.send(&request).await)
    }

    async fn retrieve(&self, id: Option<&str>, query: Option<&QueryArguments>) -> Outcome<Value> {
        let response = self.dispatch(Operation::Retrieve, id, None, query).await?;
        interpret_retrieve(&response)
    }

    async fn update(
        &self,
        id: Option<&str>,
        representation: Value,
        query: Option<&QueryArguments>,
    ) -> Outcome<()> {
        let response = self
            .dispatch(Operation::Update, id, Some(representation), query)
            .await?;
        interpret_update(&response)
    }

    async fn delete(&self, id: Option<&str>, query: Option<&QueryArguments>) -> Outcome<()> {
        let response = self.dispatch(Operation::Delete, id, None, query).await?;
        interpret_delete(&response)
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("name", &self.name)
            .field("collection", &self.collection)
            .field("base_path", &self.client.base_path())
            .finish()
    }
}

fn to_body<R: Serialize + ?Sized>(representation: &R) -> Outcome<Value> {
    serde_json::to_value(representation).map_err(|error| {
        ApiError::from(TransportError::from(
            InvalidHttpRequestError::UnserializableBody {
                reason: error.to_string(),
            },
        ))
    })
}

fn decode<T: DeserializeOwned>(representation: Value) -> Outcome<T> {
    serde_json::from_value(representation).map_err(|error| {
        ApiError::interpretation(
            Operation::Retrieve.expected_status(),
            format!("Could not decode representation: {error}"),
        )
    })
}

/// A façade over one remote collection.
///
/// Built by [`ResourceRegistry`](crate::rest::ResourceRegistry), or directly
/// with [`Resource::new`].
#[derive(Clone, Debug)]
pub struct Resource {
    endpoint: Endpoint,
}

// Verify Resource is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Resource>();
    assert_send_sync::<SingletonResource>();
};

impl Resource {
    /// Binds the logical `name` to the `collection` path on `client`.
    #[must_use]
    pub fn new(client: Arc<HttpClient>, name: &str, collection: &str) -> Self {
        Self {
            endpoint: Endpoint::new(client, name, ResourcePath::from_collection(collection)),
        }
    }

    /// Returns the logical name of this resource.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.endpoint.name
    }

    /// Returns the collection path, relative to the API root.
    #[must_use]
    pub const fn collection(&self) -> &ResourcePath {
        &self.endpoint.collection
    }

    /// Creates a new item and returns its server-assigned identifier.
    ///
    /// # Errors
    ///
    /// Fails unless the server answers 201 with a usable `Location` header.
    pub async fn create<R: Serialize + ?Sized>(
        &self,
        representation: &R,
        query: Option<&QueryArguments>,
    ) -> Outcome<String> {
        let body = to_body(representation)?;
        let response = self
            .endpoint
            .dispatch(Operation::Create, None, Some(body), query)
            .await?;
        interpret_create(&response)
    }

    /// Retrieves the representation of item `id`.
    ///
    /// # Errors
    ///
    /// Fails unless the server answers 200 with a JSON body.
    pub async fn retrieve(&self, id: &str, query: Option<&QueryArguments>) -> Outcome<Value> {
        self.endpoint.retrieve(Some(id), query).await
    }

    /// Retrieves item `id` and decodes it into `T`.
    ///
    /// # Errors
    ///
    /// Fails like [`Resource::retrieve`], and with status 200 when the
    /// representation does not decode into `T`.
    pub async fn retrieve_as<T: DeserializeOwned>(
        &self,
        id: &str,
        query: Option<&QueryArguments>,
    ) -> Outcome<T> {
        decode(self.retrieve(id, query).await?)
    }

    /// Replaces item `id` with `representation`.
    ///
    /// # Errors
    ///
    /// Fails unless the server answers 204.
    pub async fn update<R: Serialize + ?Sized>(
        &self,
        id: &str,
        representation: &R,
        query: Option<&QueryArguments>,
    ) -> Outcome<()> {
        let body = to_body(representation)?;
        self.endpoint.update(Some(id), body, query).await
    }

    /// Deletes item `id`.
    ///
    /// # Errors
    ///
    /// Fails unless the server answers 204.
    pub async fn delete(&self, id: &str, query: Option<&QueryArguments>) -> Outcome<()> {
        self.endpoint.delete(Some(id), query).await
    }

    /// Lists the collection.
    ///
    /// `limit`, `offset` and `filter` are passed through to the server
    /// untouched; slicing is entirely server-side.
    ///
    /// # Errors
    ///
    /// Fails unless the server answers 200 with an items envelope.
    pub async fn items(&self, query: Option<&QueryArguments>) -> Outcome<ItemsCollection> {
        let response = self
            .endpoint
            .dispatch(Operation::List, None, None, query)
            .await?;
        interpret_list(&response)
    }

    /// Returns whether item `id` exists.
    ///
    /// # Errors
    ///
    /// Passes through every retrieve failure other than 404.
    pub async fn exists(&self, id: &str) -> Outcome<bool> {
        match self.retrieve(id, None).await {
            Ok(_) => Ok(true),
            Err(error) if error.is_not_found() => Ok(false),
            Err(error) => Err(error),
        }
    }
}

/// A façade over a collection holding at most one instance.
///
/// Every operation targets the collection path itself.
#[derive(Clone, Debug)]
pub struct SingletonResource {
    endpoint: Endpoint,
}

impl SingletonResource {
    /// Binds the logical `name` to the `collection` path on `client`.
    #[must_use]
    pub fn new(client: Arc<HttpClient>, name: &str, collection: &str) -> Self {
        Self {
            endpoint: Endpoint::new(client, name, ResourcePath::from_collection(collection)),
        }
    }

    /// Returns the logical name of this resource.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.endpoint.name
    }

    /// Returns the collection path, relative to the API root.
    #[must_use]
    pub const fn collection(&self) -> &ResourcePath {
        &self.endpoint.collection
    }

    /// Creates the instance.
    ///
    /// The returned value is the last segment of `Location`, which for a
    /// singleton is the collection name.
    ///
    /// # Errors
    ///
    /// Fails unless the server answers 201 with a usable `Location` header.
    pub async fn create<R: Serialize + ?Sized>(
        &self,
        representation: &R,
        query: Option<&QueryArguments>,
    ) -> Outcome<String> {
        let body = to_body(representation)?;
        let response = self
            .endpoint
            .dispatch(Operation::Create, None, Some(body), query)
            .await?;
        interpret_singleton_create(&response)
    }

    /// Retrieves the instance.
    ///
    /// # Errors
    ///
    /// Fails unless the server answers 200 with a JSON body.
    pub async fn retrieve(&self, query: Option<&QueryArguments>) -> Outcome<Value> {
        self.endpoint.retrieve(None, query).await
    }

    /// Retrieves the instance and decodes it into `T`.
    ///
    /// # Errors
    ///
    /// Fails like [`SingletonResource::retrieve`], and with status 200 when
    /// the representation does not decode into `T`.
    pub async fn retrieve_as<T: DeserializeOwned>(
        &self,
        query: Option<&QueryArguments>,
    ) -> Outcome<T> {
        decode(self.retrieve(query).await?)
    }

    /// Replaces the instance.
    ///
    /// # Errors
    ///
    /// Fails unless the server answers 204.
    pub async fn update<R: Serialize + ?Sized>(
        &self,
        representation: &R,
        query: Option<&QueryArguments>,
    ) -> Outcome<()> {
        let body = to_body(representation)?;
        self.endpoint.update(None, body, query).await
    }

    /// Deletes the instance.
    ///
    /// # Errors
    ///
    /// Fails unless the server answers 204.
    pub async fn delete(&self, query: Option<&QueryArguments>) -> Outcome<()> {
        self.endpoint.delete(None, query).await
    }
}
