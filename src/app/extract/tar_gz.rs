//! gzip-compressed TAR extraction
//!
//! TAR is the one format that carries POSIX modes, so file entries restore
//! their permission bits on Unix hosts. Entry types other than files and
//! directories (symlinks, devices) are skipped; engine bundles do not
//! contain them.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use tracing::debug;

use crate::errors::ExtractResult;

use super::{checked_entry_path, ensure_dir};

/// Extract a `.tar.gz` archive into a directory, creating it if needed
///
/// Returns the target directory on success.
///
/// # Errors
///
/// Fails with `ExtractError::PathTraversal` if an entry would resolve
/// outside `target_dir` (checked before any write for that entry), with
/// `ExtractError::InvalidFileMode` if an entry mode uses more than the nine
/// permission bits, and with wrapped I/O errors otherwise. A failure aborts
/// the extraction; already-written entries are not rolled back.
pub fn extract_tar_gz(archive: &Path, target_dir: &Path) -> ExtractResult<PathBuf> {
    ensure_dir(target_dir)?;
    debug!(
        "Extracting {} to {}",
        archive.display(),
        target_dir.display()
    );

    let decoder = GzDecoder::new(BufReader::new(File::open(archive)?));
    let mut tar = tar::Archive::new(decoder);

    for entry in tar.entries()? {
        let mut entry = entry?;
        let entry_path = entry.path()?.into_owned();
        let target = checked_entry_path(target_dir, &entry_path)?;

        let entry_type = entry.header().entry_type();
        if entry_type.is_dir() {
            ensure_dir(&target)?;
        } else if entry_type.is_file() {
            if let Some(parent) = target.parent() {
                ensure_dir(parent)?;
            }
            let mut out = File::create(&target)?;
            io::copy(&mut entry, &mut out)?;

            #[cfg(unix)]
            {
                let mode = entry.header().mode()?;
                if mode != 0 {
                    let permissions = super::permissions::permissions_from_mode(mode)?;
                    std::fs::set_permissions(&target, permissions)?;
                }
            }
        }
        // Symlinks, hardlinks and special files are skipped
    }

    Ok(target_dir.to_path_buf())
}
