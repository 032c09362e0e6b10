//! Repository traits for notekeep stores.
//!
//! These traits define the store interfaces the HTTP layer is built
//! against. Handlers receive them as injected dependencies, so the
//! PostgreSQL implementations and the in-memory test store are
//! interchangeable.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Folder, Note};

/// Request for creating a folder.
///
/// `name` is accepted as-is: absent becomes the empty string, and no
/// validation is applied.
#[derive(Debug, Clone, Default)]
pub struct CreateFolderRequest {
    pub name: Option<String>,
}

/// Request for creating a note.
#[derive(Debug, Clone)]
pub struct CreateNoteRequest {
    /// Absent title becomes the placeholder title.
    pub title: Option<String>,
    /// Absent content becomes the empty string.
    pub content: Option<String>,
    /// Required. Never checked against the folder store.
    pub folder_id: Uuid,
}

/// Request for updating a note.
///
/// Fields left as `None` keep their stored value; `updated_at` is
/// refreshed unconditionally. `folder_id` and `created_at` are not part
/// of the update surface.
#[derive(Debug, Clone, Default)]
pub struct UpdateNoteRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Repository for folder operations.
#[async_trait]
pub trait FolderRepository: Send + Sync {
    /// Insert a new folder and return it with `note_count` 0.
    async fn insert(&self, req: CreateFolderRequest) -> Result<Folder>;

    /// List all folders ordered by creation time descending, each with
    /// its current note count.
    ///
    /// Counts are independent point-in-time reads with no snapshot
    /// guarantee across folders.
    async fn list_with_counts(&self) -> Result<Vec<Folder>>;
}

/// Repository for note CRUD operations.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Insert a new note with defaults applied and return it.
    async fn insert(&self, req: CreateNoteRequest) -> Result<Note>;

    /// List notes in a folder ordered by `updated_at` descending.
    ///
    /// An unknown folder id yields an empty list, not an error.
    async fn list_by_folder(&self, folder_id: Uuid) -> Result<Vec<Note>>;

    /// Update a note's title and/or content, refreshing `updated_at`.
    ///
    /// Returns `Error::NoteNotFound` if no note has this id.
    async fn update(&self, id: Uuid, req: UpdateNoteRequest) -> Result<Note>;

    /// Delete a note if it exists. Deleting an unknown id is not an
    /// error.
    async fn delete(&self, id: Uuid) -> Result<()>;
}
