//! End-to-end CRUD scenario: folder → note → count → update → delete.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{DateTime, FixedOffset};
use serde_json::{json, Value};
use tower::ServiceExt;

use notekeep_api::{app, AppState};

fn ts(v: &Value) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(v.as_str().unwrap()).unwrap()
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
async fn full_folder_note_lifecycle() {
    let router = app(AppState::in_memory());

    // Create folder "Work"
    let (status, folder) = send(
        &router,
        "POST",
        "/api/folders",
        Some(json!({"name": "Work"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(folder["name"], "Work");
    assert_eq!(folder["noteCount"], 0);
    let folder_id = folder["id"].as_str().unwrap().to_string();

    // Create note "Plan" in it
    let (status, note) = send(
        &router,
        "POST",
        "/api/notes",
        Some(json!({"title": "Plan", "content": "x", "folderId": folder_id})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(note["id"].is_string());
    assert_eq!(note["createdAt"], note["updatedAt"]);
    let note_id = note["id"].as_str().unwrap().to_string();

    // Folder listing now reports one note
    let (_, folders) = send(&router, "GET", "/api/folders", None).await;
    assert_eq!(folders[0]["noteCount"], 1);

    // Update the note
    tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    let (status, updated) = send(
        &router,
        "PUT",
        &format!("/api/notes/{}", note_id),
        Some(json!({"title": "Plan v2", "content": "y"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Plan v2");
    assert!(ts(&updated["updatedAt"]) > ts(&note["updatedAt"]));

    // Delete it
    let (status, body) = send(&router, "DELETE", &format!("/api/notes/{}", note_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "deleted");

    // Folder's note list is empty again, count back to zero
    let (_, notes) = send(
        &router,
        "GET",
        &format!("/api/folders/{}/notes", folder_id),
        None,
    )
    .await;
    assert_eq!(notes, json!([]));

    let (_, folders) = send(&router, "GET", "/api/folders", None).await;
    assert_eq!(folders[0]["noteCount"], 0);
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let router = app(AppState::in_memory());
    let (status, body) = send(&router, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
