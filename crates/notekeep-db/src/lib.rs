//! # notekeep-db
//!
//! PostgreSQL store layer for notekeep.
//!
//! This crate provides:
//! - Connection pool management
//! - Repository implementations for folders and notes
//! - Startup schema bootstrap (`CREATE TABLE IF NOT EXISTS`)
//! - An in-memory store implementing the same traits, for isolated tests
//!
//! ## Example
//!
//! ```rust,ignore
//! use notekeep_db::Database;
//! use notekeep_core::{CreateFolderRequest, FolderRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/notekeep").await?;
//!     db.ensure_schema().await?;
//!
//!     let folder = db.folders.insert(CreateFolderRequest {
//!         name: Some("Work".to_string()),
//!     }).await?;
//!
//!     println!("Created folder: {}", folder.id);
//!     Ok(())
//! }
//! ```

pub mod folders;
pub mod memory;
pub mod notes;
pub mod pool;

// Re-export core types
pub use notekeep_core::*;

// Re-export repository implementations
pub use folders::PgFolderRepository;
pub use memory::{MemoryFolderRepository, MemoryNoteRepository, MemoryStore};
pub use notes::PgNoteRepository;
pub use pool::{create_pool, create_pool_with_config, log_pool_metrics, PoolConfig};

/// Schema bootstrap statements, applied idempotently at startup.
///
/// `note.folder_id` deliberately carries no foreign key: a note may
/// reference a folder that was never created.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS folder (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        created_at_utc TIMESTAMPTZ NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS note (
        id UUID PRIMARY KEY,
        title TEXT NOT NULL,
        content TEXT NOT NULL,
        folder_id UUID NOT NULL,
        created_at_utc TIMESTAMPTZ NOT NULL,
        updated_at_utc TIMESTAMPTZ NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_note_folder_updated
        ON note (folder_id, updated_at_utc DESC)",
];

/// Combined database context with all repositories.
#[derive(Clone)]
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Postgres>,
    /// Folder repository.
    pub folders: PgFolderRepository,
    /// Note repository.
    pub notes: PgNoteRepository,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self {
            folders: PgFolderRepository::new(pool.clone()),
            notes: PgNoteRepository::new(pool.clone()),
            pool,
        }
    }

    /// Create a new Database instance by connecting to the given URL.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = create_pool(url).await?;
        Ok(Self::new(pool))
    }

    /// Create with custom pool configuration.
    pub async fn connect_with_config(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool_with_config(url, config).await?;
        Ok(Self::new(pool))
    }

    /// Apply the table and index definitions if they do not exist yet.
    pub async fn ensure_schema(&self) -> Result<()> {
        for stmt in SCHEMA {
            sqlx::query(stmt)
                .execute(&self.pool)
                .await
                .map_err(Error::Database)?;
        }
        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &sqlx::Pool<sqlx::Postgres> {
        &self.pool
    }
}
