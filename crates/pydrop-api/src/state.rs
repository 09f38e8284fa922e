//! Shared application state.

use pydrop_core::Config;
use pydrop_db::FileRepository;
use pydrop_storage::Storage;
use std::sync::Arc;

/// State shared across all handlers. Storage and repository are held behind
/// trait objects so tests can substitute in-memory implementations.
pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn Storage>,
    pub files: Arc<dyn FileRepository>,
}

impl AppState {
    pub fn new(config: Config, storage: Arc<dyn Storage>, files: Arc<dyn FileRepository>) -> Self {
        Self {
            config,
            storage,
            files,
        }
    }
}
