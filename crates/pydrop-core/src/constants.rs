//! Shared constants.

/// Upper bound for an uploaded source file, inclusive: 5 MiB.
pub const MAX_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;

/// The only accepted file extension (compared case-insensitively).
pub const ALLOWED_EXTENSION: &str = "py";

/// Content type stored alongside uploaded blobs.
pub const PYTHON_CONTENT_TYPE: &str = "text/x-python";
