//! Application constants for the engine fetcher
//!
//! Centralizes the constants used throughout the crate, organized by
//! functional domain.

use std::time::Duration;

/// HTTP client configuration constants
pub mod http {
    use super::Duration;

    /// Default user agent for all HTTP requests
    pub const USER_AGENT: &str = concat!("engine-fetcher/", env!("CARGO_PKG_VERSION"));

    /// Default HTTP request timeout
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

    /// Connection establishment timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Accept header sent on artifact downloads
    pub const ACCEPT_OCTET_STREAM: &str = "application/octet-stream";
}

/// File system layout constants
pub mod files {
    /// Name of the in-flight download directory inside the cache root
    pub const TEMP_DIR_NAME: &str = "temp";

    /// Prefix for randomized temp file names
    pub const TEMP_FILE_PREFIX: &str = "fetch-";

    /// Directory name under the OS cache dir when no root is configured
    pub const DEFAULT_CACHE_DIR_NAME: &str = "engine-fetcher";
}

/// Hashing constants
pub mod hash {
    /// Read buffer size for streaming file digests
    pub const DIGEST_BUFFER_SIZE: usize = 64 * 1024;
}

/// Archive extraction constants
pub mod archive {
    /// Highest file mode an archive entry may carry (9 permission bits)
    pub const MAX_FILE_MODE: u32 = 0o777;
}
