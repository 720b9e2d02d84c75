//! Artifact resolution orchestration
//!
//! Ties the cache and the extractor together: resolve an engine bundle
//! through the content-addressed cache, and when the caller declares it as
//! archival content, extract it into a target directory in the same call.
//! The resolver owns no state of its own.

use std::path::{Path, PathBuf};

use crate::app::cache::{CacheManager, Downloader};
use crate::app::extract::{self, ArchiveFormat};
use crate::app::hash::HashAlgorithm;
use crate::errors::Result;

/// Stateless orchestrator over a borrowed cache
#[derive(Debug)]
pub struct ArtifactResolver<'a> {
    cache: &'a CacheManager,
}

impl<'a> ArtifactResolver<'a> {
    /// Create a resolver over an existing cache
    pub fn new(cache: &'a CacheManager) -> Self {
        Self { cache }
    }

    /// Resolve an artifact through the cache, downloading on a miss
    ///
    /// Returns the path of the cached, hash-verified file.
    pub fn resolve<D: Downloader>(
        &self,
        filename: &str,
        hash: &str,
        algorithm: HashAlgorithm,
        downloader: &D,
    ) -> Result<PathBuf> {
        let artifact = self
            .cache
            .get_or_fetch(filename, hash, algorithm, downloader)?;
        Ok(artifact.path)
    }

    /// Resolve an archival artifact and extract it into `extract_dir`
    ///
    /// The archive itself stays in the cache; only the extraction is repeated
    /// per call. Returns `extract_dir`. A failed extraction leaves the
    /// directory contaminated; callers must clean it before reuse.
    pub fn resolve_and_extract<D: Downloader>(
        &self,
        filename: &str,
        hash: &str,
        algorithm: HashAlgorithm,
        downloader: &D,
        format: ArchiveFormat,
        extract_dir: &Path,
    ) -> Result<PathBuf> {
        let archive = self.resolve(filename, hash, algorithm, downloader)?;
        let target = extract::extract(&archive, format, extract_dir)?;
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    use crate::app::cache::CacheConfig;
    use crate::errors::{AppError, CacheError, DownloadResult};

    fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
        let options = zip::write::FileOptions::default();
        for (name, payload) in entries {
            writer.start_file(*name, options).unwrap();
            writer.write_all(payload).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_resolve_returns_cached_path() {
        let temp_dir = TempDir::new().unwrap();
        let cache =
            CacheManager::new(CacheConfig::with_cache_root(temp_dir.path().to_path_buf())).unwrap();
        let resolver = ArtifactResolver::new(&cache);

        let downloader = |_: &str, destination: &Path| -> DownloadResult<()> {
            std::fs::write(destination, b"hello")?;
            Ok(())
        };

        let path = resolver
            .resolve(
                "engine.jar",
                "5d41402abc4b2a76b9719d911017c592",
                HashAlgorithm::Md5,
                &downloader,
            )
            .unwrap();
        assert!(path.exists());
        assert!(path.starts_with(temp_dir.path()));
    }

    #[test]
    fn test_resolve_and_extract_zip_bundle() {
        let temp_dir = TempDir::new().unwrap();
        let cache =
            CacheManager::new(CacheConfig::with_cache_root(temp_dir.path().to_path_buf())).unwrap();
        let resolver = ArtifactResolver::new(&cache);

        let bundle = zip_bytes(&[("lib/engine.jar", b"jar bytes")]);
        let hash = HashAlgorithm::Sha256.digest_bytes(&bundle);

        let downloader = move |_: &str, destination: &Path| -> DownloadResult<()> {
            std::fs::write(destination, &bundle)?;
            Ok(())
        };

        let extract_dir = temp_dir.path().join("unpacked");
        let returned = resolver
            .resolve_and_extract(
                "engine.zip",
                &hash,
                HashAlgorithm::Sha256,
                &downloader,
                ArchiveFormat::Zip,
                &extract_dir,
            )
            .unwrap();

        assert_eq!(returned, extract_dir);
        assert_eq!(
            std::fs::read(extract_dir.join("lib/engine.jar")).unwrap(),
            b"jar bytes"
        );
        // The archive itself stays cached
        assert!(cache.lookup("engine.zip", &hash).is_some());
    }

    #[test]
    fn test_resolve_surfaces_hash_mismatch() {
        let temp_dir = TempDir::new().unwrap();
        let cache =
            CacheManager::new(CacheConfig::with_cache_root(temp_dir.path().to_path_buf())).unwrap();
        let resolver = ArtifactResolver::new(&cache);

        let downloader = |_: &str, destination: &Path| -> DownloadResult<()> {
            std::fs::write(destination, b"tampered")?;
            Ok(())
        };

        let err = resolver
            .resolve(
                "engine.jar",
                "5d41402abc4b2a76b9719d911017c592",
                HashAlgorithm::Md5,
                &downloader,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Cache(CacheError::HashMismatch { .. })
        ));
        assert!(err.is_integrity_violation());
    }
}
