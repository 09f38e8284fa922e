//! API-level constants.

/// Route prefix for all authenticated endpoints.
pub const API_PREFIX: &str = "/api";

/// Extra request body headroom on top of the file size limit, covering
/// multipart boundaries and headers.
pub const MULTIPART_OVERHEAD_BYTES: u64 = 64 * 1024;
