//! Interpretation of raw responses into typed outcomes.
//!
//! Each operation expects exactly one status code:
//!
//! | Operation  | Method | Expected status | Value                          |
//! |------------|--------|-----------------|--------------------------------|
//! | `Create`   | POST   | 201             | identifier from `Location`     |
//! | `Retrieve` | GET    | 200             | JSON body                      |
//! | `Update`   | PUT    | 204             | none                           |
//! | `Delete`   | DELETE | 204             | none                           |
//! | `List`     | GET    | 200             | [`ItemsCollection`] from body  |
//!
//! Any other status, 2xx included, is a failure. A body that is not valid
//! JSON is never an error by itself: it is treated as "no payload", and only
//! an operation that needs a payload turns that into a failure.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::clients::{HttpMethod, HttpResponse, TransportError};
use crate::rest::errors::ApiError;

/// The terminal result of one resource operation.
pub type Outcome<T> = Result<T, ApiError>;

/// The operations a resource supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Create a resource (POST on the collection).
    Create,
    /// Retrieve one resource (GET on the resource).
    Retrieve,
    /// Replace one resource (PUT on the resource).
    Update,
    /// Delete one resource (DELETE on the resource).
    Delete,
    /// List the collection (GET on the collection).
    List,
}

impl Operation {
    /// Returns the HTTP method for this operation.
    #[must_use]
    pub const fn http_method(&self) -> HttpMethod {
        match self {
            Self::Retrieve | Self::List => HttpMethod::Get,
            Self::Create => HttpMethod::Post,
            Self::Update => HttpMethod::Put,
            Self::Delete => HttpMethod::Delete,
        }
    }

    /// Returns the only status code accepted as success.
    #[must_use]
    pub const fn expected_status(&self) -> u16 {
        match self {
            Self::Create => 201,
            Self::Retrieve | Self::List => 200,
            Self::Update | Self::Delete => 204,
        }
    }

    /// Returns the operation name as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Retrieve => "retrieve",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::List => "list",
        }
    }
}

/// The decoded body of a successful listing.
///
/// The server answers a listing with
/// `{"items": {id: representation, ...}, "identifiers": [...], "offset": N, "total": M}`.
/// `identifiers` gives the order of the returned slice; when the server
/// omits it, the key order of `items` is used.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use webapi_client::rest::ItemsCollection;
///
/// let items = ItemsCollection::from_payload(&json!({
///     "items": {"0": {"name": "john wick"}},
///     "identifiers": ["0"],
///     "offset": 0,
///     "total": 1,
/// }))
/// .unwrap();
///
/// assert_eq!(items.identifiers, vec!["0"]);
/// assert_eq!(items.get("0").unwrap()["name"], "john wick");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemsCollection {
    /// Representations keyed by identifier.
    pub items: Map<String, Value>,
    /// Identifiers of the returned items, in server order.
    pub identifiers: Vec<String>,
    /// Index of the first returned item in the full collection, if reported.
    pub offset: Option<u64>,
    /// Total number of items in the collection, if reported.
    pub total: Option<u64>,
}

impl ItemsCollection {
    /// Decodes a listing payload.
    ///
    /// Returns `None` if the payload has no `items` object.
    #[must_use]
    pub fn from_payload(payload: &Value) -> Option<Self> {
        let items = payload.get("items")?.as_object()?.clone();

        let identifiers = match payload.get("identifiers").and_then(Value::as_array) {
            Some(ids) => ids
                .iter()
                .map(|id| match id {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect(),
            None => items.keys().cloned().collect(),
        };

        Some(Self {
            items,
            identifiers,
            offset: payload.get("offset").and_then(Value::as_u64),
            total: payload.get("total").and_then(Value::as_u64),
        })
    }

    /// Returns the number of returned identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    /// Returns `true` if no item was returned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }

    /// Returns the representation of the item `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Value> {
        self.items.get(id)
    }

    /// Iterates over `(identifier, representation)` pairs in server order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.identifiers
            .iter()
            .filter_map(|id| self.items.get(id).map(|item| (id.as_str(), item)))
    }
}

/// Decodes a response body as JSON.
///
/// A missing or malformed body yields `None`; it is never an error here.
#[must_use]
pub fn parse_payload(body_text: Option<&str>) -> Option<Value> {
    let text = body_text?;
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Null) => None,
        Ok(value) => Some(value),
        Err(error) => {
            tracing::debug!("Ignoring non-JSON response body: {}", error);
            None
        }
    }
}

/// Converts a transport result into a response or a transport failure.
///
/// # Errors
///
/// Returns an [`ApiError`] with the transport sentinel code if no response
/// was received.
pub fn from_transport(result: Result<HttpResponse, TransportError>) -> Outcome<HttpResponse> {
    result.map_err(|error| {
        tracing::warn!("No response received: {}", error);
        ApiError::transport(&error)
    })
}

/// Checks the status code against `operation` and decodes the payload.
///
/// # Errors
///
/// Returns an [`ApiError`] built from the status and payload when the
/// status differs from [`Operation::expected_status`].
pub fn check_status(operation: Operation, response: &HttpResponse) -> Outcome<Option<Value>> {
    let payload = parse_payload(response.body_text.as_deref());

    if response.code == operation.expected_status() {
        return Ok(payload);
    }

    if response.is_ok() {
        tracing::warn!(
            "Unexpected status {} for {} (expected {}) from {}",
            response.code,
            operation.as_str(),
            operation.expected_status(),
            response.url
        );
    }

    Err(ApiError::unexpected_response(response.code, payload.as_ref()))
}

/// Interprets the response to a CREATE request on a collection.
///
/// The new identifier is the last path segment of the `Location` header,
/// after dropping one trailing `/`. Relative locations resolve against the
/// request URL.
///
/// # Errors
///
/// Fails on any status but 201, and with the received status when
/// `Location` is missing, blank, unparsable, has no final segment, or
/// points back at the collection itself.
pub fn interpret_create(response: &HttpResponse) -> Outcome<String> {
    created_identifier(response, false)
}

/// Interprets the response to a CREATE request on a singleton.
///
/// Same as [`interpret_create`], except that `Location` is expected to point
/// at the request URL, so the returned value is the singleton's name.
///
/// # Errors
///
/// Fails on any status but 201, and with the received status when
/// `Location` is missing, blank, unparsable, or has no final segment.
pub fn interpret_singleton_create(response: &HttpResponse) -> Outcome<String> {
    created_identifier(response, true)
}

/// Interprets the response to a RETRIEVE request.
///
/// # Errors
///
/// Fails on any status but 200, and with status 200 when the body is
/// missing or not JSON.
pub fn interpret_retrieve(response: &HttpResponse) -> Outcome<Value> {
    check_status(Operation::Retrieve, response)?
        .ok_or_else(|| malformed(response, "Missing representation in response"))
}

/// Interprets the response to an UPDATE request.
///
/// # Errors
///
/// Fails on any status but 204.
pub fn interpret_update(response: &HttpResponse) -> Outcome<()> {
    check_status(Operation::Update, response).map(|_| ())
}

/// Interprets the response to a DELETE request.
///
/// # Errors
///
/// Fails on any status but 204.
pub fn interpret_delete(response: &HttpResponse) -> Outcome<()> {
    check_status(Operation::Delete, response).map(|_| ())
}

/// Interprets the response to a LIST request.
///
/// # Errors
///
/// Fails on any status but 200, and with status 200 when the body is
/// missing, not JSON, or lacks an `items` object.
pub fn interpret_list(response: &HttpResponse) -> Outcome<ItemsCollection> {
    let payload = check_status(Operation::List, response)?
        .ok_or_else(|| malformed(response, "Missing items in response"))?;

    ItemsCollection::from_payload(&payload)
        .ok_or_else(|| malformed(response, "Response has no items collection"))
}

fn created_identifier(response: &HttpResponse, targets_self: bool) -> Outcome<String> {
    check_status(Operation::Create, response)?;

    let location = match response.location().map(str::trim) {
        None | Some("") => return Err(malformed(response, "Missing Location header")),
        Some(location) if location.starts_with(|c: char| c == '?' || c == '#') => {
            return Err(malformed(
                response,
                format!("Location header '{location}' has no path"),
            ));
        }
        Some(location) => location,
    };

    let url = resolve_location(&response.url, location).ok_or_else(|| {
        malformed(response, format!("Unparsable Location header '{location}'"))
    })?;

    if !targets_self && is_same_path(&url, &response.url) {
        return Err(malformed(
            response,
            format!("Location header '{location}' points at the collection"),
        ));
    }

    last_segment(&url).ok_or_else(|| {
        malformed(
            response,
            format!("Location header '{location}' has no identifier"),
        )
    })
}

fn resolve_location(request_url: &str, location: &str) -> Option<reqwest::Url> {
    reqwest::Url::parse(request_url)
        .and_then(|base| base.join(location))
        .or_else(|_| reqwest::Url::parse(location))
        .ok()
}

fn is_same_path(url: &reqwest::Url, request_url: &str) -> bool {
    reqwest::Url::parse(request_url).map_or(false, |request| {
        url.path().trim_end_matches('/') == request.path().trim_end_matches('/')
    })
}

fn last_segment(url: &reqwest::Url) -> Option<String> {
    let path = url.path();
    let path = path.strip_suffix('/').unwrap_or(path);
    let segment = path.rsplit('/').next().filter(|s| !s.is_empty())?;

    Some(
        urlencoding::decode(segment)
            .map_or_else(|_| segment.to_string(), std::borrow::Cow::into_owned),
    )
}

fn malformed(response: &HttpResponse, message: impl Into<String>) -> ApiError {
    let error = ApiError::interpretation(response.code, message);
    tracing::warn!(
        "Malformed successful response from {}: {}",
        response.url,
        error.message
    );
    error
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::InvalidHttpRequestError;
    use crate::rest::errors::TRANSPORT_FAILURE_CODE;
    use serde_json::json;
    use std::collections::HashMap;

    const REQUEST_URL: &str = "http://localhost:8888/api/v1/students/";

    fn response(code: u16, body: Option<&str>) -> HttpResponse {
        HttpResponse::new(code, HashMap::new(), body.map(String::from), REQUEST_URL)
    }

    fn created(location: &str) -> HttpResponse {
        let mut headers = HashMap::new();
        headers.insert("Location".to_string(), vec![location.to_string()]);
        HttpResponse::new(201, headers, None, REQUEST_URL)
    }

    #[test]
    fn test_operation_expected_status_table() {
        assert_eq!(Operation::Create.expected_status(), 201);
        assert_eq!(Operation::Retrieve.expected_status(), 200);
        assert_eq!(Operation::Update.expected_status(), 204);
        assert_eq!(Operation::Delete.expected_status(), 204);
        assert_eq!(Operation::List.expected_status(), 200);
    }

    #[test]
    fn test_operation_http_method() {
        assert_eq!(Operation::Create.http_method(), HttpMethod::Post);
        assert_eq!(Operation::Retrieve.http_method(), HttpMethod::Get);
        assert_eq!(Operation::Update.http_method(), HttpMethod::Put);
        assert_eq!(Operation::Delete.http_method(), HttpMethod::Delete);
        assert_eq!(Operation::List.http_method(), HttpMethod::Get);
    }

    #[test]
    fn test_parse_payload_swallows_malformed_json() {
        assert_eq!(parse_payload(Some("{not json")), None);
        assert_eq!(parse_payload(Some("null")), None);
        assert_eq!(parse_payload(None), None);
        assert_eq!(parse_payload(Some(r#"{"a":1}"#)), Some(json!({"a": 1})));
    }

    #[test]
    fn test_create_extracts_identifier_from_absolute_location() {
        let id = interpret_create(&created("http://localhost:8888/api/v1/students/12/")).unwrap();
        assert_eq!(id, "12");
    }

    #[test]
    fn test_create_extracts_identifier_from_path_location() {
        assert_eq!(interpret_create(&created("/api/v1/students/0/")).unwrap(), "0");
        assert_eq!(interpret_create(&created("/api/v1/students/7")).unwrap(), "7");
    }

    #[test]
    fn test_create_decodes_percent_encoded_identifier() {
        let id = interpret_create(&created("/api/v1/students/john%20wick/")).unwrap();
        assert_eq!(id, "john wick");
    }

    #[test]
    fn test_create_singleton_location_yields_collection_name() {
        let mut headers = HashMap::new();
        headers.insert(
            "Location".to_string(),
            vec!["http://localhost:8888/api/v1/serverinfo/".to_string()],
        );
        let singleton = HttpResponse::new(
            201,
            headers,
            None,
            "http://localhost:8888/api/v1/serverinfo/",
        );

        assert_eq!(interpret_singleton_create(&singleton).unwrap(), "serverinfo");
        assert_eq!(interpret_create(&singleton).unwrap_err().code, 201);
    }

    #[test]
    fn test_create_with_blank_location_fails() {
        for location in ["", "   "] {
            let error = interpret_create(&created(location)).unwrap_err();
            assert_eq!(error.code, 201, "location {location:?}");
        }
    }

    #[test]
    fn test_create_with_query_or_fragment_location_fails() {
        for location in ["?x=1", "#a"] {
            let error = interpret_create(&created(location)).unwrap_err();
            assert_eq!(error.code, 201, "location {location:?}");
            assert!(error.message.contains("no path"));
        }
    }

    #[test]
    fn test_create_location_pointing_at_collection_fails() {
        for location in ["/api/v1/students/", "http://localhost:8888/api/v1/students", "."] {
            let error = interpret_create(&created(location)).unwrap_err();
            assert_eq!(error.code, 201, "location {location:?}");
        }
    }

    #[test]
    fn test_create_without_location_fails_with_received_status() {
        let error = interpret_create(&response(201, None)).unwrap_err();
        assert_eq!(error.code, 201);
        assert!(error.message.contains("Location"));
    }

    #[test]
    fn test_create_with_unparsable_location_fails() {
        let mut headers = HashMap::new();
        headers.insert("location".to_string(), vec!["http://[broken/1/".to_string()]);
        let bad = HttpResponse::new(201, headers, None, "");
        let error = interpret_create(&bad).unwrap_err();
        assert_eq!(error.code, 201);
    }

    #[test]
    fn test_create_with_rootless_location_fails() {
        let error = interpret_create(&created("http://localhost:8888/")).unwrap_err();
        assert_eq!(error.code, 201);
    }

    #[test]
    fn test_create_rejects_other_success_statuses() {
        let mut headers = HashMap::new();
        headers.insert("location".to_string(), vec!["/api/v1/students/1/".to_string()]);
        let ok = HttpResponse::new(200, headers, None, REQUEST_URL);

        let error = interpret_create(&ok).unwrap_err();
        assert_eq!(error.code, 200);
    }

    #[test]
    fn test_retrieve_returns_payload() {
        let value = interpret_retrieve(&response(200, Some(r#"{"name":"john wick","age":19}"#)))
            .unwrap();
        assert_eq!(value, json!({"name": "john wick", "age": 19}));
    }

    #[test]
    fn test_retrieve_with_null_payload_fails() {
        let error = interpret_retrieve(&response(200, None)).unwrap_err();
        assert_eq!(error.code, 200);

        let error = interpret_retrieve(&response(200, Some("<html>"))).unwrap_err();
        assert_eq!(error.code, 200);
    }

    #[test]
    fn test_retrieve_not_found_merges_server_fields() {
        let error = interpret_retrieve(&response(
            404,
            Some(r#"{"type":"NotFound","message":"missing"}"#),
        ))
        .unwrap_err();

        assert_eq!(error.code, 404);
        assert_eq!(error.message, "missing");
        assert_eq!(error.error_type(), Some("NotFound"));
    }

    #[test]
    fn test_error_status_with_malformed_body_still_reports_status() {
        let error = interpret_retrieve(&response(500, Some("Internal Server Error")))
            .unwrap_err();
        assert_eq!(error.code, 500);
        assert_eq!(error.message, "Internal Server Error");
        assert!(error.extra.is_empty());
    }

    #[test]
    fn test_update_and_delete_require_204() {
        assert!(interpret_update(&response(204, None)).is_ok());
        assert!(interpret_delete(&response(204, None)).is_ok());

        assert_eq!(interpret_update(&response(200, None)).unwrap_err().code, 200);
        assert_eq!(interpret_delete(&response(404, None)).unwrap_err().code, 404);
    }

    #[test]
    fn test_list_decodes_items_envelope() {
        let body = json!({
            "total": 3,
            "offset": 1,
            "items": {"2": {"name": "b"}, "3": {"name": "c"}},
            "identifiers": ["2", "3"],
        })
        .to_string();

        let items = interpret_list(&response(200, Some(&body))).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items.identifiers, vec!["2", "3"]);
        assert_eq!(items.offset, Some(1));
        assert_eq!(items.total, Some(3));

        let names: Vec<_> = items.iter().map(|(_, v)| v["name"].clone()).collect();
        assert_eq!(names, vec![json!("b"), json!("c")]);
    }

    #[test]
    fn test_list_falls_back_to_item_keys_in_document_order() {
        let body = r#"{"items": {"b": {}, "a": {}, "c": {}}}"#;
        let items = interpret_list(&response(200, Some(body))).unwrap();
        assert_eq!(items.identifiers, vec!["b", "a", "c"]);
        assert!(items.offset.is_none());
    }

    #[test]
    fn test_list_without_items_fails() {
        assert_eq!(interpret_list(&response(200, None)).unwrap_err().code, 200);

        let bare_list = r#"{"items": ["1", "2"]}"#;
        assert_eq!(
            interpret_list(&response(200, Some(bare_list)))
                .unwrap_err()
                .code,
            200
        );
    }

    #[test]
    fn test_empty_items_collection() {
        let body = r#"{"items": {}, "identifiers": [], "offset": 0, "total": 0}"#;
        let items = interpret_list(&response(200, Some(body))).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_from_transport_uses_sentinel() {
        let result = Err(TransportError::from(InvalidHttpRequestError::MissingBody {
            method: "post".to_string(),
        }));
        let error = from_transport(result).unwrap_err();
        assert_eq!(error.code, TRANSPORT_FAILURE_CODE);
    }
}
