//! Application setup and initialization
//!
//! All initialization logic lives here instead of main.rs so the router can
//! also be assembled by tests against substitute backends.

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;
pub mod telemetry;

use crate::state::AppState;
use anyhow::{Context, Result};
use pydrop_core::Config;
use pydrop_db::{FileRepository, PgFileRepository};
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    telemetry::init_telemetry();
    tracing::info!("Configuration loaded and validated successfully");

    let pool = database::setup_database(&config).await?;

    let storage = storage::setup_storage(&config).await?;

    let files: Arc<dyn FileRepository> = Arc::new(PgFileRepository::new(pool));

    let state = Arc::new(AppState::new(config.clone(), storage, files));

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
