//! Pydrop Core Library
//!
//! This crate provides the domain models, error types, configuration, and the
//! source-file validation rules shared by the server and the client crates.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod storage_types;
pub mod validation;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use storage_types::StorageBackend;
pub use validation::{validate_source_file, ValidationError};
