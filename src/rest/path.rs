//! URL path and query string construction.
//!
//! Every request targets `{base_urlpath}/api/{version}/{collection}/{id?}/`.
//! This module keeps path separators apart from segment content: a
//! [`ResourcePath`] holds raw segments and only percent-encodes them when it
//! is rendered, so a `/` inside an identifier can never be mistaken for a
//! separator.
//!
//! # Example
//!
//! ```rust
//! use webapi_client::rest::{url_path_join, with_end_slash, QueryArguments, ResourcePath};
//!
//! let path = ResourcePath::from_collection("students").child("a b");
//! let encoded = path.encoded();
//! let url = with_end_slash(&url_path_join(&["/", "api", "v1", encoded.as_str()]));
//! assert_eq!(url, "/api/v1/students/a%20b/");
//!
//! let query = QueryArguments::new().offset(4).limit(4);
//! assert_eq!(query.to_query_string(), "offset=4&limit=4");
//! ```

use std::fmt;

/// Joins URL components with `/`.
///
/// Empty components are skipped. A `/` is inserted between two components
/// only when the accumulated URL does not already end with one, and any run
/// of consecutive slashes in the result is collapsed into a single `/`.
///
/// ```rust
/// use webapi_client::rest::url_path_join;
///
/// assert_eq!(url_path_join(&["/user/john/", "api", "v1"]), "/user/john/api/v1");
/// assert_eq!(url_path_join(&["students", "", "0"]), "students/0");
/// assert_eq!(url_path_join(&["a//", "/b"]), "a/b");
/// ```
#[must_use]
pub fn url_path_join(components: &[&str]) -> String {
    let mut url = String::new();

    for component in components.iter().filter(|c| !c.is_empty()) {
        if !url.is_empty() && !url.ends_with('/') {
            url.push('/');
        }
        url.push_str(component);
    }

    collapse_slashes(&url)
}

/// Percent-encodes each `/`-separated segment of `path`, leaving the
/// separators untouched.
///
/// ```rust
/// use webapi_client::rest::encode_uri_components;
///
/// assert_eq!(encode_uri_components("students/john wick"), "students/john%20wick");
/// assert_eq!(encode_uri_components("a&b/c?d"), "a%26b/c%3Fd");
/// ```
#[must_use]
pub fn encode_uri_components(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Returns `path` with exactly one trailing `/`.
#[must_use]
pub fn with_end_slash(path: &str) -> String {
    format!("{}/", path.trim_end_matches('/'))
}

fn collapse_slashes(url: &str) -> String {
    let mut result = String::with_capacity(url.len());
    for c in url.chars() {
        if c == '/' && result.ends_with('/') {
            continue;
        }
        result.push(c);
    }
    result
}

/// The location of a resource relative to the API root, as raw segments.
///
/// Segments are never empty and hold unencoded content; encoding happens in
/// [`ResourcePath::encoded`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ResourcePath {
    segments: Vec<String>,
}

impl ResourcePath {
    /// Builds the path of a collection from its `/`-separated name.
    ///
    /// Empty segments (leading, trailing or doubled slashes) are dropped.
    #[must_use]
    pub fn from_collection(collection: &str) -> Self {
        Self {
            segments: collection
                .split('/')
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
        }
    }

    /// Returns a new path with `segment` appended as a single segment.
    ///
    /// Any `/` inside `segment` is content and will be percent-encoded.
    /// An empty segment is ignored.
    #[must_use]
    pub fn child(&self, segment: &str) -> Self {
        let mut segments = self.segments.clone();
        if !segment.is_empty() {
            segments.push(segment.to_string());
        }
        Self { segments }
    }

    /// Returns the raw segments.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns `true` if the path has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Renders the path with every segment percent-encoded.
    #[must_use]
    pub fn encoded(&self) -> String {
        self.segments
            .iter()
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

/// A query argument value: a scalar or an ordered sequence of scalars.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryValue {
    /// A single value, rendered as one `key=value` pair.
    Scalar(String),
    /// Several values, rendered as one `key=value` pair per element.
    Sequence(Vec<String>),
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Scalar(value)
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_string())
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        Self::Scalar(value.to_string())
    }
}

macro_rules! scalar_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for QueryValue {
                fn from(value: $ty) -> Self {
                    Self::Scalar(value.to_string())
                }
            }
        )*
    };
}

scalar_from_integer!(u32, u64, usize, i32, i64);

impl<T: ToString> From<Vec<T>> for QueryValue {
    fn from(values: Vec<T>) -> Self {
        Self::Sequence(values.iter().map(ToString::to_string).collect())
    }
}

impl<T: ToString> From<&[T]> for QueryValue {
    fn from(values: &[T]) -> Self {
        Self::Sequence(values.iter().map(ToString::to_string).collect())
    }
}

/// Query arguments attached to a request.
///
/// Keys keep their insertion order; inserting an existing key replaces its
/// value in place. The LIST operation recognizes `limit`, `offset` and
/// `filter`, which have dedicated setters. The server owns their semantics;
/// they are passed through unmodified.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use webapi_client::rest::QueryArguments;
///
/// let query = QueryArguments::new()
///     .filter(&json!({"name": "john wick"}))
///     .insert("tag", vec!["a", "b"]);
///
/// assert_eq!(
///     query.to_query_string(),
///     "filter=%7B%22name%22%3A%22john%20wick%22%7D&tag=a&tag=b"
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryArguments {
    entries: Vec<(String, QueryValue)>,
}

impl QueryArguments {
    /// Creates an empty set of query arguments.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, replacing any previous value for `key`.
    #[must_use]
    pub fn insert(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    /// Sets the maximum number of items returned by a listing.
    #[must_use]
    pub fn limit(self, limit: u64) -> Self {
        self.insert("limit", limit)
    }

    /// Sets the number of items skipped by a listing.
    #[must_use]
    pub fn offset(self, offset: u64) -> Self {
        self.insert("offset", offset)
    }

    /// Sets the listing filter, JSON-encoding the predicate.
    ///
    /// The predicate is opaque to the client; the server decides how it
    /// matches items (e.g. `{"name": "john wick"}` selects items whose
    /// `name` equals that string).
    #[must_use]
    pub fn filter(self, predicate: &serde_json::Value) -> Self {
        self.insert("filter", predicate.to_string())
    }

    /// Returns the value for `key`, if set.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns `true` if no argument is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the arguments in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Renders the arguments as a query string, without the leading `?`.
    ///
    /// Keys and values are percent-encoded independently. A sequence value
    /// yields one pair per element. No arguments yield an empty string.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut pairs = Vec::new();

        for (key, value) in &self.entries {
            let key = urlencoding::encode(key);
            match value {
                QueryValue::Scalar(v) => {
                    pairs.push(format!("{key}={}", urlencoding::encode(v)));
                }
                QueryValue::Sequence(values) => {
                    for v in values {
                        pairs.push(format!("{key}={}", urlencoding::encode(v)));
                    }
                }
            }
        }

        pairs.join("&")
    }
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourcePath>();
    assert_send_sync::<QueryArguments>();
};
