//! File metadata repository: insert-only access to the files table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pydrop_core::models::{NewFileRecord, StoredFile};
use pydrop_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use super::FileRepository;

/// Row type for the files table (for FromRow).
#[derive(Debug, sqlx::FromRow)]
pub struct FileRow {
    pub id: Uuid,
    pub owner_id: String,
    pub file_name: String,
    pub storage_key: String,
    pub size_bytes: i64,
    pub uploaded_at: DateTime<Utc>,
}

impl FileRow {
    pub fn to_stored_file(self) -> StoredFile {
        StoredFile {
            id: self.id,
            owner_id: self.owner_id,
            file_name: self.file_name,
            storage_key: self.storage_key,
            size_bytes: self.size_bytes,
            uploaded_at: self.uploaded_at,
        }
    }
}

/// Postgres repository for the files table.
#[derive(Clone)]
pub struct PgFileRepository {
    pool: PgPool,
}

impl PgFileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileRepository for PgFileRepository {
    /// Insert a new file record. `uploaded_at` comes from the database
    /// default, never the caller.
    #[tracing::instrument(skip(self), fields(db.table = "files", db.record_id = %record.id))]
    async fn create(&self, record: NewFileRecord) -> Result<StoredFile, AppError> {
        let row: FileRow = sqlx::query_as::<Postgres, FileRow>(
            r#"
            INSERT INTO files (id, owner_id, file_name, storage_key, size_bytes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, owner_id, file_name, storage_key, size_bytes, uploaded_at
            "#,
        )
        .bind(record.id)
        .bind(&record.owner_id)
        .bind(&record.file_name)
        .bind(&record.storage_key)
        .bind(record.size_bytes)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.to_stored_file())
    }

    #[tracing::instrument(skip(self), fields(db.table = "files", db.record_id = %id))]
    async fn get(&self, owner_id: &str, id: Uuid) -> Result<Option<StoredFile>, AppError> {
        let row: Option<FileRow> = sqlx::query_as::<Postgres, FileRow>(
            r#"
            SELECT id, owner_id, file_name, storage_key, size_bytes, uploaded_at
            FROM files
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| r.to_stored_file()))
    }

    #[tracing::instrument(skip(self), fields(db.table = "files"))]
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<StoredFile>, AppError> {
        let rows: Vec<FileRow> = sqlx::query_as::<Postgres, FileRow>(
            r#"
            SELECT id, owner_id, file_name, storage_key, size_bytes, uploaded_at
            FROM files
            WHERE owner_id = $1
            ORDER BY uploaded_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(|r| r.to_stored_file()).collect())
    }
}
