//! Domain models

pub mod file;

pub use file::{FileResponse, NewFileRecord, StoredFile};
