//! Metadata store port and implementations.

pub mod files;
pub mod memory;

use async_trait::async_trait;
use pydrop_core::models::{NewFileRecord, StoredFile};
use pydrop_core::AppError;
use uuid::Uuid;

/// Repository port for file metadata records.
///
/// Records are insert-only: created immediately after a successful blob
/// write, never updated in place. The creation timestamp is assigned by the
/// store, not the caller.
#[async_trait]
pub trait FileRepository: Send + Sync {
    /// Insert a new file record and return it with the store-assigned
    /// `uploaded_at`.
    async fn create(&self, record: NewFileRecord) -> Result<StoredFile, AppError>;

    /// Fetch a record by id, scoped to its owner.
    async fn get(&self, owner_id: &str, id: Uuid) -> Result<Option<StoredFile>, AppError>;

    /// List an owner's records, newest first.
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<StoredFile>, AppError>;
}
