//! Core components of the engine fetcher
//!
//! The pipeline is download → verify → publish → extract. [`cache`] owns the
//! content-addressed store and the atomic publish step, [`hash`] the digest
//! gate, [`extract`] the hardened archive extractor, and [`resolver`] the
//! orchestration over all three. [`client`] is the HTTP collaborator plugged
//! in behind the cache's downloader seam.

pub mod cache;
pub mod client;
pub mod extract;
pub mod hash;
pub mod resolver;

// Re-export main public API
pub use cache::{CacheConfig, CacheManager, CachedArtifact, Downloader, PublishOutcome};
pub use client::{ClientConfig, HttpDownloader};
pub use extract::{extract_tar_gz, unzip, unzip_filtered, ArchiveFormat};
pub use hash::HashAlgorithm;
pub use resolver::ArtifactResolver;
