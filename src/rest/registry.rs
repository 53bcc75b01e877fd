//! The table of resources exposed by one API root.

use std::collections::HashMap;
use std::sync::Arc;

use crate::clients::HttpClient;
use crate::config::ApiConfig;
use crate::error::ConfigError;
use crate::rest::resource::{Resource, SingletonResource};

/// Whether an entry addresses a collection or a single instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// A collection of items addressed by identifier.
    Collection,
    /// A collection with at most one instance, addressed without identifier.
    Singleton,
}

/// One row of the name to collection-path table.
///
/// # Example
///
/// ```rust
/// use webapi_client::rest::{ResourceEntry, ResourceKind};
///
/// let student = ResourceEntry::new("Student");
/// assert_eq!(student.collection(), "students");
///
/// let grade = ResourceEntry::new("Grade").with_collection("school/grades");
/// assert_eq!(grade.collection(), "school/grades");
///
/// let info = ResourceEntry::singleton("ServerInfo");
/// assert_eq!(info.collection(), "serverinfo");
/// assert_eq!(info.kind(), ResourceKind::Singleton);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceEntry {
    name: String,
    collection: String,
    kind: ResourceKind,
}

impl ResourceEntry {
    /// Creates a collection entry whose path is the lower-cased name plus `s`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let collection = format!("{}s", name.to_lowercase());
        Self {
            name,
            collection,
            kind: ResourceKind::Collection,
        }
    }

    /// Creates a singleton entry whose path is the lower-cased name.
    #[must_use]
    pub fn singleton(name: impl Into<String>) -> Self {
        let name = name.into();
        let collection = name.to_lowercase();
        Self {
            name,
            collection,
            kind: ResourceKind::Singleton,
        }
    }

    /// Overrides the collection path.
    #[must_use]
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Returns the logical name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the collection path.
    #[must_use]
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Returns the entry kind.
    #[must_use]
    pub const fn kind(&self) -> ResourceKind {
        self.kind
    }
}

impl From<(&str, &str)> for ResourceEntry {
    fn from((name, collection): (&str, &str)) -> Self {
        Self::new(name).with_collection(collection)
    }
}

/// Read-only lookup of resource façades by logical name.
///
/// Built once from the resource table; all façades share one
/// [`HttpClient`]. The registry is `Send + Sync` and never changes after
/// construction.
///
/// # Example
///
/// ```rust
/// use webapi_client::{ApiConfig, HostUrl};
/// use webapi_client::rest::{ResourceEntry, ResourceRegistry};
///
/// let config = ApiConfig::builder()
///     .host(HostUrl::new("http://localhost:8888").unwrap())
///     .build()
///     .unwrap();
///
/// let registry = ResourceRegistry::new(
///     &config,
///     [ResourceEntry::new("Student"), ResourceEntry::singleton("ServerInfo")],
/// )
/// .unwrap();
///
/// assert!(registry.get("Student").is_some());
/// assert!(registry.singleton("ServerInfo").is_some());
/// assert!(registry.get("ServerInfo").is_none());
/// ```
#[derive(Clone, Debug)]
pub struct ResourceRegistry {
    client: Arc<HttpClient>,
    collections: HashMap<String, Resource>,
    singletons: HashMap<String, SingletonResource>,
    names: Vec<String>,
}

// Verify ResourceRegistry is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceRegistry>();
};

impl ResourceRegistry {
    /// Builds the registry, creating a new [`HttpClient`] from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyCollectionName`] if an entry has an empty
    /// collection path, or [`ConfigError::DuplicateResource`] if a logical
    /// name appears twice.
    pub fn new<I, E>(config: &ApiConfig, entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = E>,
        E: Into<ResourceEntry>,
    {
        Self::with_client(HttpClient::new(config), entries)
    }

    /// Builds the registry on an existing client.
    ///
    /// # Errors
    ///
    /// Same as [`ResourceRegistry::new`].
    pub fn with_client<I, E>(client: HttpClient, entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = E>,
        E: Into<ResourceEntry>,
    {
        let client = Arc::new(client);
        let mut collections = HashMap::new();
        let mut singletons = HashMap::new();
        let mut names = Vec::new();

        for entry in entries {
            let entry: ResourceEntry = entry.into();

            if entry.collection.trim_matches('/').is_empty() {
                return Err(ConfigError::EmptyCollectionName { name: entry.name });
            }
            if names.contains(&entry.name) {
                return Err(ConfigError::DuplicateResource { name: entry.name });
            }

            match entry.kind {
                ResourceKind::Collection => {
                    let resource =
                        Resource::new(Arc::clone(&client), &entry.name, &entry.collection);
                    collections.insert(entry.name.clone(), resource);
                }
                ResourceKind::Singleton => {
                    let resource =
                        SingletonResource::new(Arc::clone(&client), &entry.name, &entry.collection);
                    singletons.insert(entry.name.clone(), resource);
                }
            }
            names.push(entry.name);
        }

        tracing::debug!(
            "Registered {} resources under {}",
            names.len(),
            client.base_path()
        );

        Ok(Self {
            client,
            collections,
            singletons,
            names,
        })
    }

    /// Returns the collection resource registered as `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Resource> {
        self.collections.get(name)
    }

    /// Returns the singleton resource registered as `name`.
    #[must_use]
    pub fn singleton(&self, name: &str) -> Option<&SingletonResource> {
        self.singletons.get(name)
    }

    /// Returns `true` if any resource is registered as `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.collections.contains_key(name) || self.singletons.contains_key(name)
    }

    /// Returns the registered names in table order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Returns the shared HTTP client.
    #[must_use]
    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    /// Returns the number of registered resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if no resource is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
