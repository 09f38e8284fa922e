//! Upload orchestration.
//!
//! Ordering contract: the blob write strictly precedes the metadata write,
//! so a metadata row never references a key that does not exist in storage.
//! If the metadata write fails, the just-written blob is deleted as a
//! compensating action before the error is surfaced.

use crate::error::storage_error_to_app;
use crate::utils::upload::sanitize_filename;
use pydrop_core::constants::PYTHON_CONTENT_TYPE;
use pydrop_core::models::{NewFileRecord, StoredFile};
use pydrop_core::validation::validate_source_file;
use pydrop_core::AppError;
use pydrop_db::FileRepository;
use pydrop_storage::{generate_storage_key, Storage};
use std::sync::Arc;
use uuid::Uuid;

pub struct UploadService {
    storage: Arc<dyn Storage>,
    files: Arc<dyn FileRepository>,
}

impl UploadService {
    pub fn new(storage: Arc<dyn Storage>, files: Arc<dyn FileRepository>) -> Self {
        Self { storage, files }
    }

    /// Validate and persist one uploaded file for the given owner.
    ///
    /// Validation runs against the client-supplied name and size before any
    /// backend work. The storage key embeds a fresh UUID, so repeated
    /// uploads of the same file never collide.
    #[tracing::instrument(skip(self, data), fields(owner_id = %owner_id, file_name = %file_name, size_bytes = data.len()))]
    pub async fn ingest(
        &self,
        owner_id: &str,
        file_name: &str,
        data: Vec<u8>,
    ) -> Result<StoredFile, AppError> {
        validate_source_file(file_name, data.len() as u64)?;
        let safe_name = sanitize_filename(file_name)?;

        let file_id = Uuid::new_v4();
        let storage_key = generate_storage_key(owner_id, file_id, &safe_name);
        let size_bytes = data.len() as i64;

        self.storage
            .put(&storage_key, PYTHON_CONTENT_TYPE, data)
            .await
            .map_err(storage_error_to_app)?;

        let record = NewFileRecord {
            id: file_id,
            owner_id: owner_id.to_string(),
            file_name: safe_name,
            storage_key: storage_key.clone(),
            size_bytes,
        };

        match self.files.create(record).await {
            Ok(stored) => {
                tracing::info!(
                    file_id = %stored.id,
                    storage_key = %stored.storage_key,
                    size_bytes = stored.size_bytes,
                    "File uploaded"
                );
                Ok(stored)
            }
            Err(e) => {
                // Compensating delete: the blob must not outlive a failed
                // metadata write. Best effort; the original error wins.
                if let Err(cleanup_err) = self.storage.delete(&storage_key).await {
                    tracing::warn!(
                        error = %cleanup_err,
                        storage_key = %storage_key,
                        "Failed to clean up blob after metadata write failure"
                    );
                }
                Err(e)
            }
        }
    }
}
