//! File mode validation and POSIX permission mapping for TAR entries
//!
//! TAR headers carry the nine permission bits in the standard octal layout,
//! little-endian by bit position: bit 0 is others-execute, bit 1 others-write,
//! bit 2 others-read, bits 3-5 the same for group, bits 6-8 for the owner.
//! That layout is exactly what `Permissions::from_mode` expects, so mapping
//! is validation plus a passthrough of the low nine bits.

use crate::constants::archive::MAX_FILE_MODE;
use crate::errors::{ExtractError, ExtractResult};

/// Validate that a mode uses only the nine permission bits
///
/// Modes carrying type or setuid/setgid/sticky bits are rejected rather than
/// silently masked.
pub fn validated_mode(mode: u32) -> ExtractResult<u32> {
    if mode & MAX_FILE_MODE != mode {
        return Err(ExtractError::InvalidFileMode { mode });
    }
    Ok(mode)
}

/// Map a validated TAR mode to filesystem permissions
#[cfg(unix)]
pub fn permissions_from_mode(mode: u32) -> ExtractResult<std::fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;

    let mode = validated_mode(mode)?;
    Ok(std::fs::Permissions::from_mode(mode))
}
