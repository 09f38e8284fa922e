//! Acceptance rules for uploaded source files.
//!
//! The same rules run on the client (fast local rejection, untrusted) and on
//! the server (authoritative). Rules are checked in order and the first
//! failing rule wins, so error messages are deterministic: extension, then
//! size ceiling, then emptiness.

use crate::constants::{ALLOWED_EXTENSION, MAX_FILE_SIZE_BYTES};

/// Why a candidate file was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Extension is not `.py` (or the name has no extension at all).
    #[error("Only .py files are allowed ({})", extension_label(.extension))]
    InvalidExtension { extension: Option<String> },

    /// Size exceeds the 5 MiB ceiling (the bound itself is accepted).
    #[error("File size {:.2} MB exceeds the 5 MB limit", *.size_bytes as f64 / (1024.0 * 1024.0))]
    FileTooLarge { size_bytes: u64 },

    #[error("File is empty")]
    EmptyFile,
}

fn extension_label(extension: &Option<String>) -> String {
    match extension {
        Some(ext) => format!("got .{}", ext),
        None => "file has no extension".to_string(),
    }
}

/// Extension of `name`, lowercased. `None` when there is no dot or the part
/// after the last dot is empty.
fn extension_of(name: &str) -> Option<String> {
    match name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => Some(ext.to_lowercase()),
        _ => None,
    }
}

/// Decide whether a candidate file (name + byte length) is acceptable.
///
/// Rules, in order:
/// 1. extension must be `.py`, compared case-insensitively
/// 2. `size_bytes` must not exceed 5 MiB (inclusive bound)
/// 3. `size_bytes` must not be zero
pub fn validate_source_file(name: &str, size_bytes: u64) -> Result<(), ValidationError> {
    match extension_of(name) {
        Some(ext) if ext == ALLOWED_EXTENSION => {}
        other => return Err(ValidationError::InvalidExtension { extension: other }),
    }

    if size_bytes > MAX_FILE_SIZE_BYTES {
        return Err(ValidationError::FileTooLarge { size_bytes });
    }

    if size_bytes == 0 {
        return Err(ValidationError::EmptyFile);
    }

    Ok(())
}
