//! Content-addressed cache shared across process invocations
//!
//! Files are stored under a directory named after their content hash, so two
//! artifacts with the same digest are the same entry regardless of filename
//! or origin server. All cross-process safety comes from filesystem-atomic
//! operations; no locks, no coordination service.
//!
//! # Module Organization
//!
//! - [`config`] - Configuration types
//! - [`manager`] - Cache manager with the atomic download-verify-publish path
//!
//! # Examples
//!
//! ```rust,no_run
//! use engine_fetcher::app::cache::{CacheConfig, CacheManager};
//! use engine_fetcher::app::hash::HashAlgorithm;
//! use engine_fetcher::errors::DownloadResult;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), engine_fetcher::AppError> {
//! let cache = CacheManager::new(CacheConfig::default())?;
//!
//! // Delegate to your transport of choice
//! fn fetch(filename: &str, destination: &Path) -> DownloadResult<()> {
//!     std::fs::write(destination, b"hello")?;
//!     Ok(())
//! }
//!
//! let artifact = cache.get_or_fetch(
//!     "engine.jar",
//!     "5d41402abc4b2a76b9719d911017c592",
//!     HashAlgorithm::Md5,
//!     &fetch,
//! )?;
//!
//! if artifact.already_present {
//!     println!("served from cache: {}", artifact.path.display());
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod manager;

// Re-export main public API
pub use config::CacheConfig;
pub use manager::{CacheManager, CachedArtifact, Downloader, PublishOutcome};
