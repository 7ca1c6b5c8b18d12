#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use ideaboard::config::ServerConfig;
use ideaboard::db::{self, Store};
use rusqlite::Connection;
use serde_json::Value;
use tower::ServiceExt;

/// Open a fresh in-memory database with the schema applied.
pub fn test_db() -> Connection {
    db::open_memory_database().unwrap()
}

/// Router over a fresh in-memory store, with the default allowed origin.
pub fn test_router() -> Router {
    ideaboard::server::router(Store::new(test_db()), &ServerConfig::default()).unwrap()
}

/// Send a request with an optional JSON body; returns status and parsed JSON body
/// (`Value::Null` when the body is empty or not JSON).
pub async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let resp = router.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

/// Create an idea through the API and return its id.
pub async fn create_idea(router: &Router, title: &str) -> i64 {
    let (status, body) = send(
        router,
        "POST",
        "/ideas",
        Some(serde_json::json!({"title": title, "description": "D", "category": "C"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["id"].as_i64().unwrap()
}

/// Find an idea in `GET /ideas` by id.
pub async fn listed_idea(router: &Router, id: i64) -> Option<Value> {
    let (_, body) = send(router, "GET", "/ideas", None).await;
    body.as_array()
        .unwrap()
        .iter()
        .find(|i| i["id"].as_i64() == Some(id))
        .cloned()
}
