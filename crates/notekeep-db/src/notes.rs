//! Note repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{postgres::PgRow, Pool, Postgres, Row};
use uuid::Uuid;

use notekeep_core::{
    defaults::NOTE_TITLE_PLACEHOLDER, new_v7, CreateNoteRequest, Error, Note, NoteRepository,
    Result, UpdateNoteRequest,
};

/// PostgreSQL implementation of NoteRepository.
#[derive(Clone)]
pub struct PgNoteRepository {
    pool: Pool<Postgres>,
}

impl PgNoteRepository {
    /// Create a new PgNoteRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn map_row_to_note(row: PgRow) -> Note {
    Note {
        id: row.get("id"),
        title: row.get("title"),
        content: row.get("content"),
        folder_id: row.get("folder_id"),
        created_at: row.get("created_at_utc"),
        updated_at: row.get("updated_at_utc"),
    }
}

#[async_trait]
impl NoteRepository for PgNoteRepository {
    async fn insert(&self, req: CreateNoteRequest) -> Result<Note> {
        let id = new_v7();
        let now = Utc::now();
        let title = req
            .title
            .unwrap_or_else(|| NOTE_TITLE_PLACEHOLDER.to_string());
        let content = req.content.unwrap_or_default();

        sqlx::query(
            "INSERT INTO note (id, title, content, folder_id, created_at_utc, updated_at_utc)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(id)
        .bind(&title)
        .bind(&content)
        .bind(req.folder_id)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(Note {
            id,
            title,
            content,
            folder_id: req.folder_id,
            created_at: now,
            updated_at: now,
        })
    }

    async fn list_by_folder(&self, folder_id: Uuid) -> Result<Vec<Note>> {
        // No check that the folder exists: an unknown id yields an
        // empty list.
        let rows = sqlx::query(
            "SELECT id, title, content, folder_id, created_at_utc, updated_at_utc
             FROM note
             WHERE folder_id = $1
             ORDER BY updated_at_utc DESC, id DESC",
        )
        .bind(folder_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows.into_iter().map(map_row_to_note).collect())
    }

    async fn update(&self, id: Uuid, req: UpdateNoteRequest) -> Result<Note> {
        let row = sqlx::query(
            "SELECT id, title, content, folder_id, created_at_utc, updated_at_utc
             FROM note WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        let existing = row.map(map_row_to_note).ok_or(Error::NoteNotFound(id))?;

        let now = Utc::now();
        let title = req.title.unwrap_or(existing.title);
        let content = req.content.unwrap_or(existing.content);

        sqlx::query("UPDATE note SET title = $1, content = $2, updated_at_utc = $3 WHERE id = $4")
            .bind(&title)
            .bind(&content)
            .bind(now)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        // folder_id and created_at are never touched by an update.
        Ok(Note {
            id,
            title,
            content,
            folder_id: existing.folder_id,
            created_at: existing.created_at,
            updated_at: now,
        })
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        // Deleting an unknown id is a no-op, not an error.
        sqlx::query("DELETE FROM note WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(())
    }
}
