//! In-memory store implementation.
//!
//! Implements the same repository traits as the PostgreSQL layer over
//! plain hash maps, so handlers can be exercised in isolation without a
//! running database. Both repository handles share one state so folder
//! note counts see the note map.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use notekeep_core::{
    defaults::NOTE_TITLE_PLACEHOLDER, new_v7, CreateFolderRequest, CreateNoteRequest, Error,
    Folder, FolderRepository, Note, NoteRepository, Result, UpdateNoteRequest,
};

#[derive(Default)]
struct Inner {
    folders: HashMap<Uuid, Folder>,
    notes: HashMap<Uuid, Note>,
}

/// Shared in-memory store; hand out repository handles via
/// [`MemoryStore::folders`] and [`MemoryStore::notes`].
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folder repository handle backed by this store.
    pub fn folders(&self) -> MemoryFolderRepository {
        MemoryFolderRepository {
            inner: self.inner.clone(),
        }
    }

    /// Note repository handle backed by this store.
    pub fn notes(&self) -> MemoryNoteRepository {
        MemoryNoteRepository {
            inner: self.inner.clone(),
        }
    }
}

/// In-memory implementation of FolderRepository.
#[derive(Clone)]
pub struct MemoryFolderRepository {
    inner: Arc<RwLock<Inner>>,
}

#[async_trait]
impl FolderRepository for MemoryFolderRepository {
    async fn insert(&self, req: CreateFolderRequest) -> Result<Folder> {
        let folder = Folder {
            id: new_v7(),
            name: req.name.unwrap_or_default(),
            created_at: Utc::now(),
            note_count: 0,
        };
        let mut inner = self.inner.write().await;
        inner.folders.insert(folder.id, folder.clone());
        Ok(folder)
    }

    async fn list_with_counts(&self) -> Result<Vec<Folder>> {
        let inner = self.inner.read().await;
        let mut folders: Vec<Folder> = inner
            .folders
            .values()
            .map(|f| {
                let note_count = inner
                    .notes
                    .values()
                    .filter(|n| n.folder_id == f.id)
                    .count() as i64;
                Folder {
                    note_count,
                    ..f.clone()
                }
            })
            .collect();
        // Newest first; v7 ids break same-instant ties.
        folders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(folders)
    }
}

/// In-memory implementation of NoteRepository.
#[derive(Clone)]
pub struct MemoryNoteRepository {
    inner: Arc<RwLock<Inner>>,
}

#[async_trait]
impl NoteRepository for MemoryNoteRepository {
    async fn insert(&self, req: CreateNoteRequest) -> Result<Note> {
        let now = Utc::now();
        let note = Note {
            id: new_v7(),
            title: req
                .title
                .unwrap_or_else(|| NOTE_TITLE_PLACEHOLDER.to_string()),
            content: req.content.unwrap_or_default(),
            folder_id: req.folder_id,
            created_at: now,
            updated_at: now,
        };
        let mut inner = self.inner.write().await;
        inner.notes.insert(note.id, note.clone());
        Ok(note)
    }

    async fn list_by_folder(&self, folder_id: Uuid) -> Result<Vec<Note>> {
        let inner = self.inner.read().await;
        let mut notes: Vec<Note> = inner
            .notes
            .values()
            .filter(|n| n.folder_id == folder_id)
            .cloned()
            .collect();
        notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id)));
        Ok(notes)
    }

    async fn update(&self, id: Uuid, req: UpdateNoteRequest) -> Result<Note> {
        let mut inner = self.inner.write().await;
        let note = inner.notes.get_mut(&id).ok_or(Error::NoteNotFound(id))?;
        if let Some(title) = req.title {
            note.title = title;
        }
        if let Some(content) = req.content {
            note.content = content;
        }
        note.updated_at = Utc::now();
        Ok(note.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner.notes.remove(&id);
        Ok(())
    }
}
