//! Folder endpoint tests over the in-memory store.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use notekeep_api::{app, AppState};

fn test_app() -> Router {
    app(AppState::in_memory())
}

async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(v) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&v).unwrap()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn list_folders_starts_empty() {
    let router = test_app();
    let (status, body) = send(&router, "GET", "/api/folders", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn create_folder_returns_201_with_zero_note_count() {
    let router = test_app();
    let (status, body) = send(
        &router,
        "POST",
        "/api/folders",
        Some(json!({"name": "Work"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Work");
    assert_eq!(body["noteCount"], 0);
    assert!(body["id"].is_string());
    assert!(body["createdAt"].is_string());
}

#[tokio::test]
async fn create_folder_accepts_absent_and_empty_name() {
    let router = test_app();

    let (status, body) = send(&router, "POST", "/api/folders", Some(json!({}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "");

    let (status, body) = send(&router, "POST", "/api/folders", Some(json!({"name": ""}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "");
}

#[tokio::test]
async fn folders_list_newest_first() {
    let router = test_app();
    send(&router, "POST", "/api/folders", Some(json!({"name": "old"}))).await;
    tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    send(&router, "POST", "/api/folders", Some(json!({"name": "new"}))).await;

    let (status, body) = send(&router, "GET", "/api/folders", None).await;
    assert_eq!(status, StatusCode::OK);
    let folders = body.as_array().unwrap();
    assert_eq!(folders.len(), 2);
    assert_eq!(folders[0]["name"], "new");
    assert_eq!(folders[1]["name"], "old");
}

#[tokio::test]
async fn folder_note_count_tracks_notes() {
    let router = test_app();
    let (_, folder) = send(
        &router,
        "POST",
        "/api/folders",
        Some(json!({"name": "Work"})),
    )
    .await;
    let folder_id = folder["id"].as_str().unwrap().to_string();

    send(
        &router,
        "POST",
        "/api/notes",
        Some(json!({"title": "a", "folderId": folder_id})),
    )
    .await;
    send(
        &router,
        "POST",
        "/api/notes",
        Some(json!({"title": "b", "folderId": folder_id})),
    )
    .await;

    let (_, body) = send(&router, "GET", "/api/folders", None).await;
    assert_eq!(body[0]["noteCount"], 2);
}
