//! HTTP API for notekeep.
//!
//! The router and handlers live in this library crate so integration
//! tests can drive them in-process against any store implementing the
//! repository traits; `main.rs` wires the PostgreSQL store underneath.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use uuid::Uuid;

use notekeep_core::{
    defaults::BODY_LIMIT_BYTES, CreateFolderRequest, CreateNoteRequest, FolderRepository,
    NoteRepository, UpdateNoteRequest,
};
use notekeep_db::{Database, MemoryStore};

// =============================================================================
// REQUEST ID (UUIDv7)
// =============================================================================

/// Generates time-ordered UUIDv7 request correlation IDs.
///
/// UUIDv7 embeds a Unix timestamp, so IDs sort chronologically, which
/// keeps correlated log lines easy to order.
#[derive(Clone, Default)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

// =============================================================================
// APPLICATION STATE
// =============================================================================

/// Application state shared across handlers.
///
/// The stores are injected as trait objects, so the same handlers run
/// against PostgreSQL in production and the in-memory store in tests.
#[derive(Clone)]
pub struct AppState {
    pub folders: Arc<dyn FolderRepository>,
    pub notes: Arc<dyn NoteRepository>,
}

impl AppState {
    /// Build state from explicit repository handles.
    pub fn new(folders: Arc<dyn FolderRepository>, notes: Arc<dyn NoteRepository>) -> Self {
        Self { folders, notes }
    }

    /// Build state over the PostgreSQL store.
    pub fn from_database(db: &Database) -> Self {
        Self {
            folders: Arc::new(db.folders.clone()),
            notes: Arc::new(db.notes.clone()),
        }
    }

    /// Build state over a fresh in-memory store.
    pub fn in_memory() -> Self {
        let store = MemoryStore::new();
        Self {
            folders: Arc::new(store.folders()),
            notes: Arc::new(store.notes()),
        }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Parse allowed origins from the comma-separated `ALLOWED_ORIGINS`
/// environment variable. Unset or empty falls back to local frontend
/// dev servers.
pub fn parse_allowed_origins() -> Vec<HeaderValue> {
    let origins_str = std::env::var("ALLOWED_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://localhost:5173".to_string());

    let origins: Vec<HeaderValue> = origins_str
        .split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::warn!("Invalid CORS origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect();

    if origins.is_empty() {
        vec![
            HeaderValue::from_static("http://localhost:3000"),
            HeaderValue::from_static("http://localhost:5173"),
        ]
    } else {
        origins
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[derive(Debug, Deserialize)]
struct CreateFolderBody {
    name: Option<String>,
}

/// GET /api/folders — all folders, newest first, each with its note
/// count. The counts are independent reads, not one snapshot.
async fn list_folders(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let folders = state.folders.list_with_counts().await?;
    Ok(Json(folders))
}

/// POST /api/folders — create a folder. Any name is accepted, absent
/// included.
async fn create_folder(
    State(state): State<AppState>,
    Json(body): Json<CreateFolderBody>,
) -> Result<impl IntoResponse, ApiError> {
    let folder = state
        .folders
        .insert(CreateFolderRequest { name: body.name })
        .await?;
    Ok((StatusCode::CREATED, Json(folder)))
}

/// GET /api/folders/:folder_id/notes — notes in a folder, most
/// recently updated first. An unknown folder yields an empty array.
async fn list_folder_notes(
    State(state): State<AppState>,
    Path(folder_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let notes = state.notes.list_by_folder(folder_id).await?;
    Ok(Json(notes))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateNoteBody {
    title: Option<String>,
    content: Option<String>,
    folder_id: Uuid,
}

/// POST /api/notes — create a note. Title and content default when
/// omitted; the folder reference is stored unchecked.
async fn create_note(
    State(state): State<AppState>,
    Json(body): Json<CreateNoteBody>,
) -> Result<impl IntoResponse, ApiError> {
    let note = state
        .notes
        .insert(CreateNoteRequest {
            title: body.title,
            content: body.content,
            folder_id: body.folder_id,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(note)))
}

#[derive(Debug, Deserialize)]
struct UpdateNoteBody {
    title: Option<String>,
    content: Option<String>,
}

/// PUT /api/notes/:id — update title/content and refresh `updatedAt`.
/// `folderId` and `createdAt` are never part of the update surface.
async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateNoteBody>,
) -> Result<impl IntoResponse, ApiError> {
    let note = state
        .notes
        .update(
            id,
            UpdateNoteRequest {
                title: body.title,
                content: body.content,
            },
        )
        .await?;
    Ok(Json(note))
}

/// DELETE /api/notes/:id — remove a note if present. Always answers
/// with the fixed confirmation body.
async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.notes.delete(id).await?;
    Ok(Json(serde_json::json!({ "message": "deleted" })))
}

// =============================================================================
// ROUTER
// =============================================================================

/// Build the application router over the given state.
pub fn app(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Folders
        .route("/api/folders", get(list_folders).post(create_folder))
        .route("/api/folders/:folder_id/notes", get(list_folder_notes))
        // Notes
        .route("/api/notes", post(create_note))
        .route("/api/notes/:id", put(update_note).delete(delete_note))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer({
            let allowed_origins = parse_allowed_origins();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(allowed_origins))
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        })
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .with_state(state)
}

// =============================================================================
// ERROR HANDLING
// =============================================================================

/// API-facing error, mapped onto status codes.
///
/// Every store failure surfaces as 500 with `{"error": message}`;
/// unknown-note updates surface as 404 rather than the silent success
/// the original clients saw.
#[derive(Debug)]
pub enum ApiError {
    Database(notekeep_core::Error),
    NotFound(String),
    BadRequest(String),
}

impl From<notekeep_core::Error> for ApiError {
    fn from(err: notekeep_core::Error) -> Self {
        match err {
            notekeep_core::Error::NotFound(msg) => ApiError::NotFound(msg),
            notekeep_core::Error::NoteNotFound(id) => {
                ApiError::NotFound(format!("Note {} not found", id))
            }
            notekeep_core::Error::InvalidInput(msg) => ApiError::BadRequest(msg),
            _ => ApiError::Database(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::Database(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_from_note_not_found() {
        let id = Uuid::nil();
        let err: ApiError = notekeep_core::Error::NoteNotFound(id).into();
        match err {
            ApiError::NotFound(msg) => assert!(msg.contains(&id.to_string())),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_api_error_from_invalid_input() {
        let err: ApiError = notekeep_core::Error::InvalidInput("bad".to_string()).into();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[test]
    fn test_parse_allowed_origins_falls_back_to_defaults() {
        // Not set in the test environment; expect local dev origins.
        if std::env::var("ALLOWED_ORIGINS").is_err() {
            let origins = parse_allowed_origins();
            assert!(!origins.is_empty());
        }
    }
}
