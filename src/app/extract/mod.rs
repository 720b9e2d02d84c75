//! Security-hardened archive extraction
//!
//! Supports the two formats engine bundles ship in: ZIP (random-access,
//! central-directory based) and gzip-compressed TAR (streaming). Every entry
//! path is validated against the extraction root *before* any filesystem
//! mutation, which blocks zip-slip style attacks where an entry name smuggles
//! `../` segments or an absolute anchor.
//!
//! Extraction is stateless: all context (archive path, target directory,
//! optional filter) travels as explicit parameters. A failed extraction does
//! not roll back already-written entries; callers must treat the target
//! directory as contaminated.
//!
//! # Module Organization
//!
//! - [`zip`] - ZIP extraction with optional entry filtering
//! - [`tar_gz`] - gzip TAR extraction with POSIX permission restore
//! - [`permissions`] - file mode validation and mapping

use std::fmt;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{ExtractError, ExtractResult};

pub mod permissions;
pub mod tar_gz;
pub mod zip;

pub use tar_gz::extract_tar_gz;
pub use zip::{unzip, unzip_filtered};

/// Archive container formats understood by the extractor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchiveFormat {
    /// ZIP archive
    Zip,
    /// gzip-compressed TAR archive
    #[serde(rename = "tar.gz")]
    TarGz,
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchiveFormat::Zip => f.write_str("zip"),
            ArchiveFormat::TarGz => f.write_str("tar.gz"),
        }
    }
}

impl FromStr for ArchiveFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "zip" => Ok(ArchiveFormat::Zip),
            "tar.gz" | "tgz" => Ok(ArchiveFormat::TarGz),
            other => Err(format!("unknown archive format: {other}")),
        }
    }
}

/// Extract an archive of the given format into `target_dir`
///
/// Creates `target_dir` if absent and returns it on success.
pub fn extract(archive: &Path, format: ArchiveFormat, target_dir: &Path) -> ExtractResult<PathBuf> {
    match format {
        ArchiveFormat::Zip => unzip(archive, target_dir),
        ArchiveFormat::TarGz => extract_tar_gz(archive, target_dir),
    }
}

/// Resolve an entry name against the target directory, rejecting escapes
///
/// The walk is purely lexical: absolute anchors are refused outright and
/// `..` may never climb above the target directory. Returns the absolute
/// destination path for the entry.
pub(crate) fn checked_entry_path(target_dir: &Path, entry_name: &Path) -> ExtractResult<PathBuf> {
    let mut relative = PathBuf::new();
    for component in entry_name.components() {
        match component {
            Component::Prefix(..) | Component::RootDir => {
                return Err(path_traversal(entry_name));
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if !relative.pop() {
                    return Err(path_traversal(entry_name));
                }
            }
            Component::Normal(part) => relative.push(part),
        }
    }
    Ok(target_dir.join(relative))
}

fn path_traversal(entry_name: &Path) -> ExtractError {
    ExtractError::PathTraversal {
        entry: entry_name.display().to_string(),
    }
}

/// Create a directory and its parents, wrapping failures with the path
pub(crate) fn ensure_dir(path: &Path) -> ExtractResult<()> {
    fs::create_dir_all(path).map_err(|source| ExtractError::DirectoryCreation {
        path: path.to_path_buf(),
        source,
    })
}
