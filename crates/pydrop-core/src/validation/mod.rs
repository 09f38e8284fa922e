//! Validation modules

pub mod source_file;

pub use source_file::{validate_source_file, ValidationError};
