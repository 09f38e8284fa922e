//! In-memory storage backend.
//!
//! Used by tests and local development so the orchestrator and handlers can
//! run without touching the filesystem. Semantics match the other backends:
//! keys are write-once and deletes on absent keys report `NotFound`.

use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct StoredBlob {
    content_type: String,
    data: Vec<u8>,
}

/// In-memory storage implementation backed by a HashMap.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    objects: Arc<RwLock<HashMap<String, StoredBlob>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored blobs (test helper).
    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }

    /// Content type recorded for a key, if present (test helper).
    pub async fn content_type_of(&self, storage_key: &str) -> Option<String> {
        self.objects
            .read()
            .await
            .get(storage_key)
            .map(|blob| blob.content_type.clone())
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn put(
        &self,
        storage_key: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<()> {
        let mut objects = self.objects.write().await;
        if objects.contains_key(storage_key) {
            return Err(StorageError::AlreadyExists(storage_key.to_string()));
        }
        objects.insert(
            storage_key.to_string(),
            StoredBlob {
                content_type: content_type.to_string(),
                data,
            },
        );
        Ok(())
    }

    async fn download(&self, storage_key: &str) -> StorageResult<Vec<u8>> {
        self.objects
            .read()
            .await
            .get(storage_key)
            .map(|blob| blob.data.clone())
            .ok_or_else(|| StorageError::NotFound(storage_key.to_string()))
    }

    async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        self.objects
            .write()
            .await
            .remove(storage_key)
            .map(|_| ())
            .ok_or_else(|| StorageError::NotFound(storage_key.to_string()))
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        Ok(self.objects.read().await.contains_key(storage_key))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_then_download_round_trips() {
        let storage = MemoryStorage::new();

        storage
            .put("user-1/abc_main.py", "text/x-python", b"print('hi')".to_vec())
            .await
            .expect("put");

        assert_eq!(
            storage.download("user-1/abc_main.py").await.unwrap(),
            b"print('hi')"
        );
        assert_eq!(
            storage.content_type_of("user-1/abc_main.py").await.as_deref(),
            Some("text/x-python")
        );
    }

    #[tokio::test]
    async fn put_refuses_to_overwrite() {
        let storage = MemoryStorage::new();

        storage
            .put("k", "text/x-python", b"first".to_vec())
            .await
            .expect("put");
        let err = storage
            .put("k", "text/x-python", b"second".to_vec())
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::AlreadyExists(_)));
        assert_eq!(storage.download("k").await.unwrap(), b"first");
    }

    #[tokio::test]
    async fn delete_on_missing_key_is_not_found() {
        let storage = MemoryStorage::new();
        assert!(matches!(
            storage.delete("missing").await.unwrap_err(),
            StorageError::NotFound(_)
        ));
    }
}
