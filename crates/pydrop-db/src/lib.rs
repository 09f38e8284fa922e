//! Pydrop Database Library
//!
//! This crate provides the metadata-store port (`FileRepository`) and its
//! Postgres implementation. The in-memory implementation exists so the API
//! and its tests can run without a database.

pub mod db;

pub use db::files::{FileRow, PgFileRepository};
pub use db::memory::InMemoryFileRepository;
pub use db::FileRepository;
