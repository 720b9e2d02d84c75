//! Content-addressed cache manager with atomic publishes
//!
//! The cache is shared between unrelated processes with no coordination
//! service, so every cross-process guarantee here rests on two filesystem
//! primitives: idempotent directory creation and no-clobber atomic rename.
//! A reader either sees nothing at a final path or a complete, hash-verified
//! file; it never sees a partial write.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempPath;
use tracing::{debug, error, info, warn};

use crate::app::hash::HashAlgorithm;
use crate::constants::files;
use crate::errors::{CacheError, CacheResult, DownloadResult};

use super::config::CacheConfig;

/// Transport callback injected into [`CacheManager::get_or_fetch`]
///
/// Implementations resolve `filename` against their own transport base and
/// must write the complete byte stream to `destination`, or fail without
/// leaving a partial file claimed as complete. The cache never retries a
/// failed download; retry policy belongs to the caller.
pub trait Downloader {
    /// Download `filename` to `destination`
    fn download(&self, filename: &str, destination: &Path) -> DownloadResult<()>;
}

impl<F> Downloader for F
where
    F: Fn(&str, &Path) -> DownloadResult<()>,
{
    fn download(&self, filename: &str, destination: &Path) -> DownloadResult<()> {
        self(filename, destination)
    }
}

/// A cache entry handed back to the caller
///
/// `already_present` records whether the artifact was served from disk
/// (no network round-trip). It exists for observability; callers must not
/// branch on it for correctness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedArtifact {
    /// Final path of the artifact inside the cache
    pub path: PathBuf,
    /// True when the artifact was already cached before this call
    pub already_present: bool,
}

/// Outcome of the atomic publish step
///
/// Losing the rename race to another process is an expected event, not a
/// defect: the cache is keyed by hash, so whatever file won the race holds
/// equivalent content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    /// Our temp file became the cache entry
    Published,
    /// Another process published the same hash first; our copy was discarded
    AlreadyPresentFromRace,
}

/// Content-addressed file cache shared across process invocations
///
/// Layout: `<root>/temp/` holds in-flight downloads; `<root>/<hash>/<filename>`
/// holds published artifacts, where `hash` is the lowercase hex digest used
/// verbatim as a directory name. A hash directory, once it contains a file,
/// is never mutated.
#[derive(Debug)]
pub struct CacheManager {
    /// Cache root directory
    cache_root: PathBuf,
    /// Directory for in-flight downloads, inside the cache root
    temp_dir: PathBuf,
}

impl CacheManager {
    /// Create a cache manager, creating the root and temp directories if
    /// they do not exist (idempotent, safe under concurrent creation)
    ///
    /// # Errors
    ///
    /// Returns `CacheError::DirectoryNotAccessible` if either directory
    /// cannot be created.
    pub fn new(config: CacheConfig) -> CacheResult<Self> {
        let cache_root = match config.cache_root {
            Some(path) => path,
            None => Self::default_cache_dir()?,
        };
        let temp_dir = cache_root.join(files::TEMP_DIR_NAME);

        Self::ensure_directory_exists(&cache_root)?;
        Self::ensure_directory_exists(&temp_dir)?;

        info!("Initialized artifact cache at {}", cache_root.display());

        Ok(Self {
            cache_root,
            temp_dir,
        })
    }

    /// Get the cache root directory
    pub fn cache_root(&self) -> &Path {
        &self.cache_root
    }

    /// Default cache directory under the OS cache location
    fn default_cache_dir() -> CacheResult<PathBuf> {
        let dir = dirs::cache_dir()
            .ok_or_else(|| CacheError::DirectoryNotAccessible {
                path: PathBuf::from("system cache directory"),
            })?
            .join(files::DEFAULT_CACHE_DIR_NAME);
        Ok(dir)
    }

    fn ensure_directory_exists(path: &Path) -> CacheResult<()> {
        fs::create_dir_all(path).map_err(|e| {
            error!("Failed to create cache directory {}: {}", path.display(), e);
            CacheError::DirectoryNotAccessible {
                path: path.to_path_buf(),
            }
        })
    }

    /// Look for a cached artifact by filename and content hash
    ///
    /// Returns the final path if a file exists there, without verifying its
    /// content: trust is established once, at publish time. No side effects.
    pub fn lookup(&self, filename: &str, hash: &str) -> Option<PathBuf> {
        let cached = self.cache_root.join(hash).join(filename);
        if cached.exists() {
            return Some(cached);
        }
        debug!("No cached file with name {} and hash {}", filename, hash);
        None
    }

    /// Resolve an artifact through the cache, downloading on a miss
    ///
    /// On a miss the downloader writes into a fresh temp file, the bytes are
    /// digest-checked against `hash`, and only then is the file atomically
    /// renamed into `<root>/<hash>/<filename>`. Racing processes converge on
    /// a single published copy; losers are discarded silently.
    ///
    /// # Errors
    ///
    /// - `CacheError::TransferFailed` if the downloader fails (not retried)
    /// - `CacheError::HashMismatch` if the downloaded bytes do not match
    ///   `hash`; the mismatched temp file is kept on disk for inspection and
    ///   is never visible under the final name
    /// - `CacheError::DirectoryNotAccessible` / `CacheError::PublishFailed`
    ///   for filesystem failures
    pub fn get_or_fetch<D: Downloader>(
        &self,
        filename: &str,
        hash: &str,
        algorithm: HashAlgorithm,
        downloader: &D,
    ) -> CacheResult<CachedArtifact> {
        if let Some(path) = self.lookup(filename, hash) {
            return Ok(CachedArtifact {
                path,
                already_present: true,
            });
        }

        let temp_path = self.new_temp_file()?;

        downloader
            .download(filename, &temp_path)
            .map_err(|source| CacheError::TransferFailed {
                filename: filename.to_string(),
                source,
            })?;

        let actual = algorithm.digest_file(&temp_path)?;
        if actual != hash {
            // The mismatched bytes stay in the temp directory for
            // inspection; they are never visible at a final path.
            let kept = temp_path.keep().map_err(|e| CacheError::Io(e.error))?;
            return Err(CacheError::HashMismatch {
                expected: hash.to_string(),
                actual,
                path: kept,
            });
        }

        let hash_dir = self.cache_root.join(hash);
        Self::ensure_directory_exists(&hash_dir)?;

        let target = hash_dir.join(filename);
        match self.publish(temp_path, &target)? {
            PublishOutcome::Published => {
                info!("Published {} to cache", target.display());
            }
            PublishOutcome::AlreadyPresentFromRace => {
                debug!(
                    "Lost publish race for {}; another process cached it first",
                    target.display()
                );
            }
        }

        Ok(CachedArtifact {
            path: target,
            already_present: false,
        })
    }

    /// Create a fresh randomized temp file inside the cache temp directory
    ///
    /// The temp directory lives under the cache root so the final rename
    /// stays on one filesystem. The file is process-private until published.
    fn new_temp_file(&self) -> CacheResult<TempPath> {
        let file = tempfile::Builder::new()
            .prefix(files::TEMP_FILE_PREFIX)
            .tempfile_in(&self.temp_dir)
            .map_err(|source| CacheError::TempFile {
                path: self.temp_dir.clone(),
                source,
            })?;
        Ok(file.into_temp_path())
    }

    /// Atomically move a verified temp file to its final cache location
    ///
    /// The no-clobber rename is the sole mutation other processes can
    /// observe. A target that already exists means another process won the
    /// race with equivalent content, which is success. If the filesystem
    /// cannot rename atomically, fall back to a copy with a warning; that
    /// path trades crash-atomicity for portability.
    fn publish(&self, temp_path: TempPath, target: &Path) -> CacheResult<PublishOutcome> {
        match temp_path.persist_noclobber(target) {
            Ok(()) => Ok(PublishOutcome::Published),
            Err(persist_err) if persist_err.error.kind() == std::io::ErrorKind::AlreadyExists => {
                // persist_err.path drops here, deleting our losing copy
                Ok(PublishOutcome::AlreadyPresentFromRace)
            }
            Err(persist_err) => {
                let temp_path = persist_err.path;
                warn!(
                    "Unable to atomically rename {} to {}: {}",
                    temp_path.display(),
                    target.display(),
                    persist_err.error
                );
                warn!("Falling back to a copy with no atomicity guarantee");
                fs::copy(&temp_path, target).map_err(|source| CacheError::PublishFailed {
                    temp_path: temp_path.to_path_buf(),
                    final_path: target.to_path_buf(),
                    source,
                })?;
                Ok(PublishOutcome::Published)
            }
        }
    }
}
