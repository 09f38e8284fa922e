//! Storage backend factory.

use crate::local::LocalStorage;
use crate::memory::MemoryStorage;
use crate::traits::{Storage, StorageError, StorageResult};
use pydrop_core::{Config, StorageBackend};
use std::sync::Arc;

/// Create the storage backend selected by configuration.
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    match config.storage_backend {
        StorageBackend::Local => {
            let base_path = config.local_storage_path.as_deref().ok_or_else(|| {
                StorageError::ConfigError(
                    "LOCAL_STORAGE_PATH must be set when using the local storage backend"
                        .to_string(),
                )
            })?;
            let storage = LocalStorage::new(base_path).await?;
            Ok(Arc::new(storage))
        }
        StorageBackend::Memory => Ok(Arc::new(MemoryStorage::new())),
    }
}
