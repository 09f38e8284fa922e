//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must
//! implement.

use crate::StorageBackend;
use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Storage key already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// All storage backends (local filesystem, in-memory) must implement this
/// trait. This allows the upload orchestrator to work with any backend
/// without coupling to implementation details.
///
/// **Key format:** Keys are owner-scoped: `{owner_id}/{file_id}_{file_name}`.
/// See the crate root documentation.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Write a blob under the given key.
    ///
    /// Keys are never reused: writing to an existing key must fail with
    /// `StorageError::AlreadyExists` rather than silently replace the blob.
    async fn put(&self, storage_key: &str, content_type: &str, data: Vec<u8>)
        -> StorageResult<()>;

    /// Read a blob by its storage key
    async fn download(&self, storage_key: &str) -> StorageResult<Vec<u8>>;

    /// Delete a blob by its storage key.
    ///
    /// Used as the compensating action when a metadata write fails after a
    /// successful blob write.
    async fn delete(&self, storage_key: &str) -> StorageResult<()>;

    /// Check if a blob exists
    async fn exists(&self, storage_key: &str) -> StorageResult<bool>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
