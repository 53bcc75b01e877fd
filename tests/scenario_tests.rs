//! End-to-end scenarios against an in-memory server.
//!
//! The server below implements the wire contract the façades rely on
//! (201 + `Location` on create, 204 on update and delete, an items envelope
//! on list, `{"type": "NotFound"}` payloads on 404) so that multi-step
//! behavior can be exercised without a real backend.

use std::sync::Mutex;

use serde_json::{json, Map, Value};
use tokio_test::assert_ok;
use webapi_client::rest::{QueryArguments, ResourceEntry, ResourceRegistry};
use webapi_client::{ApiConfig, HostUrl, Resource};
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

const API_ROOT: &str = "/api/v1/";

#[derive(Default)]
struct Store {
    next_id: u64,
    students: Vec<(String, Value)>,
    server_info: Option<Value>,
}

/// A stateful responder backing a `students` collection and a `serverinfo`
/// singleton.
#[derive(Default)]
struct InMemoryServer {
    store: Mutex<Store>,
}

fn not_found() -> ResponseTemplate {
    ResponseTemplate::new(404).set_body_json(json!({"type": "NotFound", "message": "Not Found"}))
}

fn bad_representation() -> ResponseTemplate {
    ResponseTemplate::new(400)
        .set_body_json(json!({"type": "BadRepresentation", "message": "Invalid JSON body"}))
}

fn matches(item: &Value, filter: &Map<String, Value>) -> bool {
    filter.iter().all(|(key, expected)| item.get(key) == Some(expected))
}

impl InMemoryServer {
    fn list(store: &Store, request: &Request) -> ResponseTemplate {
        let mut offset = 0usize;
        let mut limit = usize::MAX;
        let mut filter = Map::new();

        for (key, value) in request.url.query_pairs() {
            match key.as_ref() {
                "offset" => offset = value.parse().unwrap_or(0),
                "limit" => limit = value.parse().unwrap_or(usize::MAX),
                "filter" => {
                    if let Ok(Value::Object(fields)) = serde_json::from_str(&value) {
                        filter = fields;
                    }
                }
                _ => {}
            }
        }

        let matching: Vec<_> = store
            .students
            .iter()
            .filter(|(_, item)| matches(item, &filter))
            .collect();
        let page: Vec<_> = matching.iter().skip(offset).take(limit).collect();

        let mut items = Map::new();
        for (id, item) in &page {
            items.insert(id.clone(), item.clone());
        }
        let identifiers: Vec<_> = page.iter().map(|(id, _)| id.clone()).collect();

        ResponseTemplate::new(200).set_body_json(json!({
            "total": matching.len(),
            "offset": offset,
            "items": items,
            "identifiers": identifiers,
        }))
    }

    fn students(store: &mut Store, request: &Request, id: Option<&str>) -> ResponseTemplate {
        let method = request.method.to_string();
        let position = id.and_then(|id| store.students.iter().position(|(key, _)| key == id));

        match (method.as_str(), id, position) {
            ("POST", None, _) => {
                let Ok(body) = serde_json::from_slice::<Value>(&request.body) else {
                    return bad_representation();
                };
                let id = store.next_id.to_string();
                store.next_id += 1;
                store.students.push((id.clone(), body));
                let origin = request.url.origin().ascii_serialization();
                let location = format!("{origin}{API_ROOT}students/{id}/");
                ResponseTemplate::new(201).insert_header("Location", location.as_str())
            }
            ("GET", None, _) => Self::list(store, request),
            ("GET", Some(_), Some(index)) => {
                ResponseTemplate::new(200).set_body_json(store.students[index].1.clone())
            }
            ("PUT", Some(_), Some(index)) => match serde_json::from_slice::<Value>(&request.body) {
                Ok(body) => {
                    store.students[index].1 = body;
                    ResponseTemplate::new(204)
                }
                Err(_) => bad_representation(),
            },
            ("DELETE", Some(_), Some(index)) => {
                store.students.remove(index);
                ResponseTemplate::new(204)
            }
            (_, Some(_), None) => not_found(),
            _ => ResponseTemplate::new(405),
        }
    }

    fn server_info(store: &mut Store, request: &Request) -> ResponseTemplate {
        let method = request.method.to_string();
        match method.as_str() {
            "POST" | "PUT" => {
                let Ok(body) = serde_json::from_slice::<Value>(&request.body) else {
                    return bad_representation();
                };
                match (method.as_str(), store.server_info.is_some()) {
                    ("POST", false) => {
                        store.server_info = Some(body);
                        ResponseTemplate::new(201)
                            .insert_header("Location", format!("{API_ROOT}serverinfo/").as_str())
                    }
                    ("PUT", true) => {
                        store.server_info = Some(body);
                        ResponseTemplate::new(204)
                    }
                    ("POST", true) => ResponseTemplate::new(409)
                        .set_body_json(json!({"type": "Exists", "message": "Already created"})),
                    _ => not_found(),
                }
            }
            "GET" => store.server_info.as_ref().map_or_else(not_found, |info| {
                ResponseTemplate::new(200).set_body_json(info.clone())
            }),
            "DELETE" => {
                if store.server_info.take().is_some() {
                    ResponseTemplate::new(204)
                } else {
                    not_found()
                }
            }
            _ => ResponseTemplate::new(405),
        }
    }
}

impl Respond for InMemoryServer {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let Some(rest) = request.url.path().strip_prefix(API_ROOT) else {
            return not_found();
        };
        let segments: Vec<&str> = rest.split('/').filter(|s| !s.is_empty()).collect();
        let mut store = self.store.lock().unwrap();

        match segments.as_slice() {
            ["students"] => Self::students(&mut store, request, None),
            ["students", id] => Self::students(&mut store, request, Some(id)),
            ["serverinfo"] => Self::server_info(&mut store, request),
            _ => not_found(),
        }
    }
}

async fn start_server() -> (MockServer, ResourceRegistry) {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(InMemoryServer::default())
        .mount(&server)
        .await;

    let config = ApiConfig::builder()
        .host(HostUrl::new(&server.uri()).unwrap())
        .build()
        .unwrap();
    let registry = ResourceRegistry::new(
        &config,
        [ResourceEntry::new("Student"), ResourceEntry::singleton("ServerInfo")],
    )
    .unwrap();

    (server, registry)
}

fn students(registry: &ResourceRegistry) -> Resource {
    registry.get("Student").unwrap().clone()
}

fn student(name: &str, age: u32) -> Value {
    json!({"name": name, "age": age})
}

async fn create_six(students: &Resource) -> Vec<String> {
    let mut ids = Vec::new();
    for (name, age) in [
        ("john wick", 19),
        ("jane doe", 20),
        ("bob", 21),
        ("alice", 19),
        ("carol", 22),
        ("dave", 23),
    ] {
        ids.push(students.create(&student(name, age), None).await.unwrap());
    }
    ids
}

#[tokio::test]
async fn test_create_then_retrieve_round_trip() {
    let (_server, registry) = start_server().await;
    let students = students(&registry);

    let representation = student("john wick", 19);
    let id = students.create(&representation, None).await.unwrap();
    let retrieved = students.retrieve(&id, None).await.unwrap();

    assert_eq!(retrieved, representation);
}

#[tokio::test]
async fn test_single_create_is_listed() {
    let (_server, registry) = start_server().await;
    let students = students(&registry);

    let id = students.create(&student("john wick", 19), None).await.unwrap();
    let items = students.items(None).await.unwrap();

    assert_eq!(items.identifiers, vec![id]);
}

#[tokio::test]
async fn test_six_creates_are_distinct_and_retrievable() {
    let (_server, registry) = start_server().await;
    let students = students(&registry);

    let ids = create_six(&students).await;
    let items = students.items(None).await.unwrap();

    assert_eq!(items.len(), 6);
    let mut listed = items.identifiers.clone();
    listed.sort();
    listed.dedup();
    assert_eq!(listed.len(), 6);

    for id in &ids {
        assert_ok!(students.retrieve(id, None).await);
    }
}

#[tokio::test]
async fn test_missing_ids_report_not_found() {
    let (_server, registry) = start_server().await;
    let students = students(&registry);

    assert_eq!(students.retrieve("404", None).await.unwrap_err().code, 404);
    assert_eq!(
        students
            .update("404", &student("x", 1), None)
            .await
            .unwrap_err()
            .code,
        404
    );
    assert_eq!(students.delete("404", None).await.unwrap_err().code, 404);
}

#[tokio::test]
async fn test_delete_is_final() {
    let (_server, registry) = start_server().await;
    let students = students(&registry);

    let id = students.create(&student("john wick", 19), None).await.unwrap();
    assert_ok!(students.delete(&id, None).await);

    let error = students.retrieve(&id, None).await.unwrap_err();
    assert_eq!(error.code, 404);
    assert_eq!(error.error_type(), Some("NotFound"));

    assert_eq!(students.delete(&id, None).await.unwrap_err().code, 404);
    assert!(!students.exists(&id).await.unwrap());
}

#[tokio::test]
async fn test_limit_and_offset_slice_server_side() {
    let (_server, registry) = start_server().await;
    let students = students(&registry);
    let ids = create_six(&students).await;

    let limited = students
        .items(Some(&QueryArguments::new().limit(4)))
        .await
        .unwrap();
    assert!(limited.len() <= 4);

    let page = students
        .items(Some(&QueryArguments::new().offset(2).limit(3)))
        .await
        .unwrap();
    assert_eq!(page.identifiers, ids[2..5].to_vec());
    assert_eq!(page.offset, Some(2));
    assert_eq!(page.total, Some(6));
}

#[tokio::test]
async fn test_filter_returns_matching_subset() {
    let (_server, registry) = start_server().await;
    let students = students(&registry);
    create_six(&students).await;

    let query = QueryArguments::new().filter(&json!({"name": "john wick"}));
    let found = students.items(Some(&query)).await.unwrap();

    assert_eq!(found.len(), 1);
    let (_, representation) = found.iter().next().unwrap();
    assert_eq!(representation["name"], "john wick");

    let query = QueryArguments::new().filter(&json!({"age": 19}));
    assert_eq!(students.items(Some(&query)).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_update_replaces_representation() {
    let (_server, registry) = start_server().await;
    let students = students(&registry);

    let id = students
        .create(&json!({"name": "john wick", "age": 19, "nickname": "baba yaga"}), None)
        .await
        .unwrap();

    let replacement = json!({"name": "john wick", "age": 20});
    assert_ok!(students.update(&id, &replacement, None).await);

    assert_eq!(students.retrieve(&id, None).await.unwrap(), replacement);
}

#[tokio::test]
async fn test_retrieve_is_idempotent() {
    let (_server, registry) = start_server().await;
    let students = students(&registry);

    let id = students.create(&student("john wick", 19), None).await.unwrap();
    let first = students.retrieve(&id, None).await.unwrap();
    let second = students.retrieve(&id, None).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_singleton_lifecycle() {
    let (_server, registry) = start_server().await;
    let info = registry.singleton("ServerInfo").unwrap();

    let representation = json!({"version": "1.0", "maintenance": false});
    let id = info.create(&representation, None).await.unwrap();
    assert_eq!(id, "serverinfo");

    assert_eq!(info.retrieve(None).await.unwrap(), representation);

    let replacement = json!({"version": "1.1"});
    assert_ok!(info.update(&replacement, None).await);
    assert_eq!(info.retrieve(None).await.unwrap(), replacement);

    assert_ok!(info.delete(None).await);
    assert_eq!(info.retrieve(None).await.unwrap_err().code, 404);
}

#[tokio::test]
async fn test_concurrent_creates_get_distinct_ids() {
    let (_server, registry) = start_server().await;

    let handles: Vec<_> = (0..8)
        .map(|n| {
            let students = students(&registry);
            tokio::spawn(async move { students.create(&student("concurrent", n), None).await })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap().unwrap());
    }
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 8);

    let items = students(&registry).items(None).await.unwrap();
    assert_eq!(items.len(), 8);
}
