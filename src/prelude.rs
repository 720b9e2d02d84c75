//! Prelude module for the engine fetcher
//!
//! Re-exports the items needed for typical usage with a single
//! `use engine_fetcher::prelude::*;` statement.
//!
//! # Usage
//!
//! ```rust,no_run
//! use engine_fetcher::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let cache = CacheManager::new(CacheConfig::default())?;
//!     let resolver = ArtifactResolver::new(&cache);
//!     // Continue with resolution...
//!     Ok(())
//! }
//! ```

// Core result types
pub use crate::errors::{AppError, Result};

// Essential components
pub use crate::app::{
    ArchiveFormat, ArtifactResolver, CacheConfig, CacheManager, CachedArtifact, ClientConfig,
    Downloader, HashAlgorithm, HttpDownloader,
};

// Standard library re-exports that are commonly needed
pub use std::path::{Path, PathBuf};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prelude_imports() {
        let _config = CacheConfig::default();
        let _client_config = ClientConfig::default();
        let _format = ArchiveFormat::Zip;
        let _algorithm = HashAlgorithm::Sha256;
        let _path = PathBuf::from("/tmp/cache");
    }
}
