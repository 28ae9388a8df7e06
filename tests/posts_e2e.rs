//! End-to-end tests: drive the full router over the in-memory store.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use posts_api::{build_router, AppState, LogLevel, MemoryLogger, MemoryPostStore};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const BODY_LIMIT: usize = 16 * 1024;

fn app() -> (Router, Arc<MemoryLogger>) {
    let logger = Arc::new(MemoryLogger::new());
    let state = AppState::new(Arc::new(MemoryPostStore::new()), logger.clone());
    (build_router(state, BODY_LIMIT), logger)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    send_request(app, builder.body(body).unwrap()).await
}

async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn create_post(app: &Router, title: &str, content: &str) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/posts",
        Some(json!({ "title": title, "content": content })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

#[tokio::test]
async fn post_lifecycle_create_read_update_delete() {
    let (app, logger) = app();

    // POST /posts
    let created = create_post(&app, "E2E Test Title", "E2E Test Content").await;
    assert!(created.get("id").is_some());
    assert_eq!(created["title"], "E2E Test Title");
    assert_eq!(created["content"], "E2E Test Content");
    assert!(created["createdAt"].is_string());
    let id = created["id"].as_i64().unwrap();

    // GET /posts
    let (status, list) = send(&app, Method::GET, "/posts", None).await;
    assert_eq!(status, StatusCode::OK);
    let list = list.as_array().unwrap();
    assert!(!list.is_empty());
    assert!(list.iter().any(|p| p["id"] == id));

    // GET /posts/:id
    let (status, post) = send(&app, Method::GET, &format!("/posts/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(post["id"], id);
    assert_eq!(post["title"], "E2E Test Title");

    // PATCH /posts/:id
    let (status, updated) = send(
        &app,
        Method::PATCH,
        &format!("/posts/{}", id),
        Some(json!({ "title": "Updated Title", "content": "Updated Content" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Updated Title");
    assert_eq!(updated["content"], "Updated Content");

    let (_, reread) = send(&app, Method::GET, &format!("/posts/{}", id), None).await;
    assert_eq!(reread["title"], "Updated Title");
    assert_eq!(reread["content"], "Updated Content");

    // DELETE /posts/:id, then GET is 404
    let (status, deleted) = send(&app, Method::DELETE, &format!("/posts/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["id"], id);

    let (status, body) = send(&app, Method::GET, &format!("/posts/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");

    let (_, list) = send(&app, Method::GET, "/posts", None).await;
    assert!(list.as_array().unwrap().iter().all(|p| p["id"] != id));

    assert_eq!(logger.lines_at(LogLevel::Log).len(), 3);
}

#[tokio::test]
async fn deleted_post_cannot_be_updated_or_deleted_again() {
    let (app, _) = app();
    let id = create_post(&app, "t", "c").await["id"].as_i64().unwrap();
    let uri = format!("/posts/{}", id);

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::PATCH, &uri, Some(json!({ "title": "back" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let next = create_post(&app, "t2", "c2").await;
    assert_ne!(next["id"].as_i64().unwrap(), id);
}

#[tokio::test]
async fn read_of_never_created_id_is_not_found() {
    let (app, logger) = app();
    let (status, body) = send(&app, Method::GET, "/posts/12345", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");
    assert_eq!(logger.lines_at(LogLevel::Warn).len(), 1);
}

#[tokio::test]
async fn list_is_in_creation_order() {
    let (app, _) = app();
    for title in ["first", "second", "third"] {
        create_post(&app, title, "body").await;
    }
    let (_, list) = send(&app, Method::GET, "/posts", None).await;
    let titles: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["first", "second", "third"]);
}

#[tokio::test]
async fn partial_patch_keeps_untouched_fields() {
    let (app, _) = app();
    let id = create_post(&app, "title", "content").await["id"].as_i64().unwrap();
    let (status, updated) = send(
        &app,
        Method::PATCH,
        &format!("/posts/{}", id),
        Some(json!({ "content": "new content" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "title");
    assert_eq!(updated["content"], "new content");
}

#[tokio::test]
async fn invalid_create_bodies_are_rejected_before_storage() {
    let (app, _) = app();

    let (status, body) = send(&app, Method::POST, "/posts", Some(json!({ "title": "no content" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "validation_error");

    let (status, _) = send(&app, Method::POST, "/posts", Some(json!({ "title": "", "content": "c" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, Method::POST, "/posts", Some(json!("just a string"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "bad_request");

    let (_, list) = send(&app, Method::GET, "/posts", None).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn malformed_json_and_missing_content_type() {
    let (app, _) = app();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/posts")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"title\": "))
        .unwrap();
    let (status, body) = send_request(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "bad_request");

    let request = Request::builder()
        .method(Method::POST)
        .uri("/posts")
        .body(Body::from(json!({ "title": "t", "content": "c" }).to_string()))
        .unwrap();
    let (status, body) = send_request(&app, request).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body["error"]["code"], "unsupported_media_type");
}

#[tokio::test]
async fn oversized_body_gets_json_error() {
    let (app, _) = app();
    let payload = json!({ "title": "big", "content": "x".repeat(BODY_LIMIT * 2) }).to_string();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/posts")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CONTENT_LENGTH, payload.len())
        .body(Body::from(payload))
        .unwrap();
    let (status, body) = send_request(&app, request).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"]["code"], "payload_too_large");

    let (_, list) = send(&app, Method::GET, "/posts", None).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn long_title_is_created() {
    let (app, _) = app();
    let title = "a".repeat(300);
    let created = create_post(&app, &title, "c").await;
    assert_eq!(created["title"], title.as_str());
}

#[tokio::test]
async fn non_numeric_id_is_bad_request() {
    let (app, _) = app();
    let (status, body) = send(&app, Method::GET, "/posts/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "bad_request");
}

#[tokio::test]
async fn health_ready_and_version() {
    let (app, _) = app();

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["storage"], "ok");

    let (status, body) = send(&app, Method::GET, "/version", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "posts-api");
}
