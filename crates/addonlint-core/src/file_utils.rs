//! Hardened file reading
//!
//! Changed-file lists come from CI and name paths inside a checked-out pull
//! request, so reads refuse symlinks, anything that is not a regular file,
//! and files above a size limit.

use crate::diagnostics::{ValidationError, ValidationResult};
use std::fs;
use std::path::Path;

/// Default maximum file size (1 MiB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1_048_576;

/// Read a file with the default size limit.
///
/// See [`safe_read_file_with_limit`].
pub fn safe_read_file(path: &Path) -> ValidationResult<String> {
    safe_read_file_with_limit(path, DEFAULT_MAX_FILE_SIZE)
}

/// Read a file as UTF-8 text after checking it is a regular, non-symlink
/// file no larger than `max_size` bytes (files at exactly the limit are
/// accepted).
///
/// # Errors
///
/// - `ValidationError::FileSymlink` if the path is a symlink
/// - `ValidationError::FileNotRegular` for directories, FIFOs, devices
/// - `ValidationError::FileTooBig` above the limit
/// - `ValidationError::FileRead` for any other I/O failure
pub fn safe_read_file_with_limit(path: &Path, max_size: u64) -> ValidationResult<String> {
    // symlink_metadata does not follow the link
    let metadata = fs::symlink_metadata(path).map_err(|e| ValidationError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if metadata.file_type().is_symlink() {
        return Err(ValidationError::FileSymlink {
            path: path.to_path_buf(),
        });
    }

    if !metadata.is_file() {
        return Err(ValidationError::FileNotRegular {
            path: path.to_path_buf(),
        });
    }

    let size = metadata.len();
    if size > max_size {
        return Err(ValidationError::FileTooBig {
            path: path.to_path_buf(),
            size,
            limit: max_size,
        });
    }

    fs::read_to_string(path).map_err(|e| ValidationError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })
}
