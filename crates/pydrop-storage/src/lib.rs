//! Pydrop Storage Library
//!
//! This crate provides the blob-storage abstraction and its backends. The
//! orchestrator only sees the `Storage` trait, so tests can substitute the
//! in-memory backend for the filesystem one.
//!
//! # Storage key format
//!
//! Keys are owner-scoped: `{owner_id}/{file_id}_{file_name}`. Keys must not
//! contain `..` or a leading `/`. Key generation is centralized in the `keys`
//! module so all backends stay consistent.

pub mod factory;
pub mod keys;
pub mod local;
pub mod memory;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use keys::generate_storage_key;
pub use local::LocalStorage;
pub use memory::MemoryStorage;
pub use pydrop_core::StorageBackend;
pub use traits::{Storage, StorageError, StorageResult};
