//! Folder repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use futures::future::try_join_all;
use sqlx::{Pool, Postgres, Row};
use tracing::debug;
use uuid::Uuid;

use notekeep_core::{new_v7, CreateFolderRequest, Error, Folder, FolderRepository, Result};

/// PostgreSQL implementation of FolderRepository.
#[derive(Clone)]
pub struct PgFolderRepository {
    pool: Pool<Postgres>,
}

impl PgFolderRepository {
    /// Create a new PgFolderRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    async fn count_notes(pool: Pool<Postgres>, folder_id: Uuid) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS note_count FROM note WHERE folder_id = $1")
            .bind(folder_id)
            .fetch_one(&pool)
            .await
            .map_err(Error::Database)?;
        Ok(row.get("note_count"))
    }
}

#[async_trait]
impl FolderRepository for PgFolderRepository {
    async fn insert(&self, req: CreateFolderRequest) -> Result<Folder> {
        let id = new_v7();
        let now = Utc::now();
        let name = req.name.unwrap_or_default();

        sqlx::query("INSERT INTO folder (id, name, created_at_utc) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(&name)
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        // A freshly created folder has no notes yet.
        Ok(Folder {
            id,
            name,
            created_at: now,
            note_count: 0,
        })
    }

    async fn list_with_counts(&self) -> Result<Vec<Folder>> {
        let rows = sqlx::query(
            "SELECT id, name, created_at_utc FROM folder
             ORDER BY created_at_utc DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        // One independent count query per folder, run concurrently.
        // Each count reflects the note table at the instant its query
        // runs; there is no snapshot shared across folders.
        let ids: Vec<Uuid> = rows.iter().map(|r| r.get("id")).collect();
        let counts = try_join_all(
            ids.iter()
                .map(|&id| Self::count_notes(self.pool.clone(), id)),
        )
        .await?;

        debug!(
            subsystem = "db",
            component = "folders",
            op = "list_with_counts",
            result_count = rows.len(),
            "Listed folders with note counts"
        );

        Ok(rows
            .into_iter()
            .zip(counts)
            .map(|(r, note_count)| Folder {
                id: r.get("id"),
                name: r.get("name"),
                created_at: r.get("created_at_utc"),
                note_count,
            })
            .collect())
    }
}
