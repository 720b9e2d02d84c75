//! ZIP archive extraction
//!
//! ZIP entries are read as plain name + payload; no POSIX permissions are
//! restored for this format.
//! A filter predicate allows extracting only a subset of entries. Skipped
//! entries bypass the traversal check since nothing is written for them.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;
use zip::ZipArchive;

use crate::errors::ExtractResult;

use super::{checked_entry_path, ensure_dir};

/// Unzip an archive into a directory, creating the directory if needed
///
/// Returns the target directory on success.
pub fn unzip(archive: &Path, target_dir: &Path) -> ExtractResult<PathBuf> {
    unzip_filtered(archive, target_dir, |_| true)
}

/// Unzip a subset of an archive into a directory
///
/// `filter` receives each entry name in archive order; entries it rejects
/// are skipped entirely. Existing files at target paths are overwritten.
///
/// # Errors
///
/// Fails with `ExtractError::PathTraversal` if a selected entry would
/// resolve outside `target_dir`, before anything is written for that entry.
/// Any I/O or directory-creation failure aborts the extraction with no
/// rollback of entries already written.
pub fn unzip_filtered(
    archive: &Path,
    target_dir: &Path,
    mut filter: impl FnMut(&str) -> bool,
) -> ExtractResult<PathBuf> {
    ensure_dir(target_dir)?;

    let mut zip = ZipArchive::new(File::open(archive)?)?;
    debug!(
        "Extracting {} entries from {} to {}",
        zip.len(),
        archive.display(),
        target_dir.display()
    );

    for index in 0..zip.len() {
        let mut entry = zip.by_index(index)?;
        let name = entry.name().to_owned();
        if !filter(&name) {
            continue;
        }

        let target = checked_entry_path(target_dir, Path::new(&name))?;

        if entry.is_dir() {
            ensure_dir(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                ensure_dir(parent)?;
            }
            let mut out = File::create(&target)?;
            io::copy(&mut entry, &mut out)?;
        }
    }

    Ok(target_dir.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    use crate::errors::ExtractError;

    /// Build a zip on disk from (name, payload) pairs; a trailing slash in
    /// the name marks a directory entry.
    fn build_zip(dir: &TempDir, entries: &[(&str, &[u8])]) -> PathBuf {
        let path = dir.path().join("bundle.zip");
        let mut writer = zip::ZipWriter::new(File::create(&path).unwrap());
        let options = zip::write::FileOptions::default();
        for (name, payload) in entries {
            if name.ends_with('/') {
                writer.add_directory(name.trim_end_matches('/'), options).unwrap();
            } else {
                writer.start_file(*name, options).unwrap();
                writer.write_all(payload).unwrap();
            }
        }
        writer.finish().unwrap();
        path
    }

    #[test]
    fn test_unzip_nested_entries() {
        let dir = TempDir::new().unwrap();
        let archive = build_zip(
            &dir,
            &[
                ("lib/", b""),
                ("lib/engine.jar", b"jar bytes"),
                ("conf/engine.properties", b"threads=4"),
            ],
        );

        let target = dir.path().join("out");
        let returned = unzip(&archive, &target).unwrap();
        assert_eq!(returned, target);

        assert_eq!(
            std::fs::read(target.join("lib/engine.jar")).unwrap(),
            b"jar bytes"
        );
        assert_eq!(
            std::fs::read_to_string(target.join("conf/engine.properties")).unwrap(),
            "threads=4"
        );
    }

    #[test]
    fn test_unzip_overwrites_existing_files() {
        let dir = TempDir::new().unwrap();
        let archive = build_zip(&dir, &[("engine.txt", b"fresh")]);

        let target = dir.path().join("out");
        std::fs::create_dir_all(&target).unwrap();
        std::fs::write(target.join("engine.txt"), b"stale").unwrap();

        unzip(&archive, &target).unwrap();
        assert_eq!(
            std::fs::read_to_string(target.join("engine.txt")).unwrap(),
            "fresh"
        );
    }

    #[test]
    fn test_unzip_rejects_traversal_entry() {
        let dir = TempDir::new().unwrap();
        let archive = build_zip(&dir, &[("../evil.txt", b"escape")]);

        let target = dir.path().join("out");
        let err = unzip(&archive, &target).unwrap_err();
        assert!(matches!(err, ExtractError::PathTraversal { ref entry } if entry == "../evil.txt"));

        // Nothing escaped next to the target directory
        assert!(!dir.path().join("evil.txt").exists());
        let written: Vec<_> = std::fs::read_dir(&target).unwrap().collect();
        assert!(written.is_empty());
    }

    #[test]
    fn test_unzip_filtered_extracts_subset() {
        let dir = TempDir::new().unwrap();
        let archive = build_zip(
            &dir,
            &[
                ("keep/a.txt", b"a"),
                ("skip/b.txt", b"b"),
                ("keep/c.txt", b"c"),
            ],
        );

        let target = dir.path().join("out");
        unzip_filtered(&archive, &target, |name| name.starts_with("keep/")).unwrap();

        assert!(target.join("keep/a.txt").exists());
        assert!(target.join("keep/c.txt").exists());
        assert!(!target.join("skip").exists());
    }

    #[test]
    fn test_unzip_filter_skips_traversal_check_for_rejected_entries() {
        let dir = TempDir::new().unwrap();
        // A hostile entry that the filter drops must not abort extraction
        let archive = build_zip(&dir, &[("../evil.txt", b"escape"), ("ok.txt", b"ok")]);

        let target = dir.path().join("out");
        unzip_filtered(&archive, &target, |name| !name.contains("..")).unwrap();

        assert_eq!(std::fs::read_to_string(target.join("ok.txt")).unwrap(), "ok");
        assert!(!dir.path().join("evil.txt").exists());
    }
}
