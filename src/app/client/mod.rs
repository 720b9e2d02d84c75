//! HTTP transport collaborator
//!
//! The cache core treats its transport as an injected [`Downloader`]
//! callback; this module provides the concrete implementation used when the
//! artifact lives on an HTTP server. Wrap the method that matches the
//! artifact's location in a closure to plug it into the cache:
//!
//! ```rust,no_run
//! use engine_fetcher::app::cache::{CacheConfig, CacheManager};
//! use engine_fetcher::app::client::{ClientConfig, HttpDownloader};
//! use engine_fetcher::app::hash::HashAlgorithm;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), engine_fetcher::AppError> {
//! let client = HttpDownloader::new(
//!     ClientConfig::new("https://server/api/v2", "https://server/api").with_token("squ_..."),
//! )?;
//! let cache = CacheManager::new(CacheConfig::default())?;
//!
//! let artifact = cache.get_or_fetch(
//!     "engine.jar",
//!     "5d41402abc4b2a76b9719d911017c592",
//!     HashAlgorithm::Md5,
//!     &|filename: &str, destination: &Path| {
//!         client.download_from_rest_api(&format!("/analysis/engine/{filename}"), destination)
//!     },
//! )?;
//! # Ok(())
//! # }
//! ```
//!
//! [`Downloader`]: crate::app::cache::Downloader

pub mod config;
pub mod download;

// Re-export main public API
pub use config::ClientConfig;
pub use download::HttpDownloader;
