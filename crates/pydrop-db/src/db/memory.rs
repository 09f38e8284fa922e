//! In-memory file repository for tests and local development.

use async_trait::async_trait;
use chrono::Utc;
use pydrop_core::models::{NewFileRecord, StoredFile};
use pydrop_core::AppError;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::FileRepository;

/// HashMap-backed repository with the same insert-only semantics as the
/// Postgres implementation; `uploaded_at` is assigned on insert.
#[derive(Clone, Default)]
pub struct InMemoryFileRepository {
    records: Arc<RwLock<HashMap<Uuid, StoredFile>>>,
}

impl InMemoryFileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records (test helper).
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl FileRepository for InMemoryFileRepository {
    async fn create(&self, record: NewFileRecord) -> Result<StoredFile, AppError> {
        let mut records = self.records.write().await;
        if records.contains_key(&record.id) {
            return Err(AppError::Internal(format!(
                "Duplicate file record id: {}",
                record.id
            )));
        }
        let stored = StoredFile {
            id: record.id,
            owner_id: record.owner_id,
            file_name: record.file_name,
            storage_key: record.storage_key,
            size_bytes: record.size_bytes,
            uploaded_at: Utc::now(),
        };
        records.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn get(&self, owner_id: &str, id: Uuid) -> Result<Option<StoredFile>, AppError> {
        Ok(self
            .records
            .read()
            .await
            .get(&id)
            .filter(|f| f.owner_id == owner_id)
            .cloned())
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<StoredFile>, AppError> {
        let mut files: Vec<StoredFile> = self
            .records
            .read()
            .await
            .values()
            .filter(|f| f.owner_id == owner_id)
            .cloned()
            .collect();
        files.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_record(owner: &str, name: &str) -> NewFileRecord {
        let id = Uuid::new_v4();
        NewFileRecord {
            id,
            owner_id: owner.to_string(),
            file_name: name.to_string(),
            storage_key: format!("{}/{}_{}", owner, id, name),
            size_bytes: 42,
        }
    }

    #[tokio::test]
    async fn create_assigns_timestamp_and_round_trips() {
        let repo = InMemoryFileRepository::new();

        let stored = repo.create(new_record("user-1", "main.py")).await.unwrap();
        let fetched = repo.get("user-1", stored.id).await.unwrap();
        assert_eq!(fetched.map(|f| f.file_name), Some("main.py".to_string()));
    }

    #[tokio::test]
    async fn get_is_owner_scoped() {
        let repo = InMemoryFileRepository::new();

        let stored = repo.create(new_record("user-1", "main.py")).await.unwrap();
        assert!(repo.get("user-2", stored.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_is_scoped_to_owner() {
        let repo = InMemoryFileRepository::new();

        repo.create(new_record("user-1", "a.py")).await.unwrap();
        repo.create(new_record("user-1", "b.py")).await.unwrap();
        repo.create(new_record("user-2", "c.py")).await.unwrap();

        let files = repo.list_by_owner("user-1").await.unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.owner_id == "user-1"));
    }
}
