//! Test helpers: build the router against in-memory backends.
//!
//! Run from workspace root: `cargo test -p pydrop-api --test files_test` or
//! `cargo test -p pydrop-api`. No external services are required; storage
//! and the file repository are injected in-memory implementations.

use async_trait::async_trait;
use axum_test::TestServer;
use pydrop_api::auth::jwt::encode_token;
use pydrop_api::constants::API_PREFIX;
use pydrop_api::setup::routes::setup_routes;
use pydrop_api::state::AppState;
use pydrop_core::constants::MAX_FILE_SIZE_BYTES;
use pydrop_core::models::{NewFileRecord, StoredFile};
use pydrop_core::{AppError, Config, StorageBackend};
use pydrop_db::{FileRepository, InMemoryFileRepository};
use pydrop_storage::{MemoryStorage, Storage, StorageError, StorageResult};
use std::sync::Arc;
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "test-secret-test-secret-test-secret!";

/// API path prefix for tests (e.g. `/api`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", API_PREFIX, path)
}

pub fn test_config() -> Config {
    Config {
        server_port: 3000,
        environment: "test".to_string(),
        cors_origins: vec!["*".to_string()],
        database_url: "postgres://localhost/pydrop-test".to_string(),
        db_max_connections: 5,
        db_timeout_seconds: 30,
        jwt_secret: TEST_JWT_SECRET.to_string(),
        jwt_expiry_hours: 24,
        storage_backend: StorageBackend::Memory,
        local_storage_path: None,
        max_file_size_bytes: MAX_FILE_SIZE_BYTES,
    }
}

/// Test application with handles to the injected backends so tests can
/// inspect blobs and records directly.
pub struct TestApp {
    pub server: TestServer,
    pub storage: Arc<MemoryStorage>,
    pub repo: Arc<InMemoryFileRepository>,
}

impl TestApp {
    pub fn token_for(&self, user_id: &str) -> String {
        make_token(user_id)
    }
}

pub fn make_token(user_id: &str) -> String {
    encode_token(user_id, "dev@example.com", TEST_JWT_SECRET, 24).expect("encode token")
}

pub fn make_expired_token(user_id: &str) -> String {
    encode_token(user_id, "dev@example.com", TEST_JWT_SECRET, -1).expect("encode token")
}

/// Setup test app backed by in-memory storage and repository.
pub fn setup_test_app() -> TestApp {
    let storage = Arc::new(MemoryStorage::new());
    let repo = Arc::new(InMemoryFileRepository::new());
    let server = build_server(storage.clone(), repo.clone());
    TestApp {
        server,
        storage,
        repo,
    }
}

pub fn build_server(storage: Arc<dyn Storage>, repo: Arc<dyn FileRepository>) -> TestServer {
    let config = test_config();
    let state = Arc::new(AppState::new(config.clone(), storage, repo));
    let router = setup_routes(&config, state).expect("setup routes");
    TestServer::new(router).expect("test server")
}

/// Repository whose inserts always fail, for rollback tests.
pub struct FailingRepository;

#[async_trait]
impl FileRepository for FailingRepository {
    async fn create(&self, _record: NewFileRecord) -> Result<StoredFile, AppError> {
        Err(AppError::Internal("insert failed".to_string()))
    }

    async fn get(&self, _owner_id: &str, _id: Uuid) -> Result<Option<StoredFile>, AppError> {
        Ok(None)
    }

    async fn list_by_owner(&self, _owner_id: &str) -> Result<Vec<StoredFile>, AppError> {
        Ok(vec![])
    }
}

/// Storage whose writes always fail.
pub struct FailingStorage;

#[async_trait]
impl Storage for FailingStorage {
    async fn put(
        &self,
        _storage_key: &str,
        _content_type: &str,
        _data: Vec<u8>,
    ) -> StorageResult<()> {
        Err(StorageError::UploadFailed("backend down".to_string()))
    }

    async fn download(&self, storage_key: &str) -> StorageResult<Vec<u8>> {
        Err(StorageError::NotFound(storage_key.to_string()))
    }

    async fn delete(&self, _storage_key: &str) -> StorageResult<()> {
        Ok(())
    }

    async fn exists(&self, _storage_key: &str) -> StorageResult<bool> {
        Ok(false)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}
