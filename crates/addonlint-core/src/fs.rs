//! FileSystem abstraction for testability
//!
//! Validators never touch `std::fs` directly. They receive a `&dyn FileSystem`
//! and read changed files through it, so the whole pipeline can run against
//! `MockFileSystem` in unit tests.
//!
//! ## Example
//!
//! ```rust,ignore
//! use addonlint_core::fs::{FileSystem, MockFileSystem, RealFileSystem};
//! use std::path::Path;
//!
//! // In production code, paths resolve against the repository checkout
//! let fs = RealFileSystem::new(".");
//! let readme = fs.read_to_string(Path::new("templates/acme/README.md"))?;
//!
//! // In tests
//! let mock_fs = MockFileSystem::new();
//! mock_fs.add_file("templates/acme/README.md", "# Acme");
//! ```

use crate::diagnostics::{ValidationError, ValidationResult};
use crate::file_utils::{self, DEFAULT_MAX_FILE_SIZE};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Read-only access to repository files.
///
/// Paths passed in are repository-relative, exactly as they appear in the
/// changed-file list.
pub trait FileSystem: std::fmt::Debug {
    /// Read file contents to string
    fn read_to_string(&self, path: &Path) -> ValidationResult<String>;
}

/// File system backed by a checkout on disk.
#[derive(Debug, Clone)]
pub struct RealFileSystem {
    root: PathBuf,
    max_file_size: u64,
}

impl RealFileSystem {
    /// Resolve every path against `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }

    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }
}

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> ValidationResult<String> {
        file_utils::safe_read_file_with_limit(&self.root.join(path), self.max_file_size)
    }
}

/// In-memory file system for tests.
#[derive(Debug, Default)]
pub struct MockFileSystem {
    files: RwLock<HashMap<PathBuf, String>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with the given content, replacing any previous content
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<String>) {
        let path = normalize_mock_path(path.as_ref());
        let mut files = self.files.write().expect("MockFileSystem lock poisoned");
        files.insert(path, content.into());
    }
}

/// Backslashes become forward slashes so Windows-style test paths resolve.
fn normalize_mock_path(path: &Path) -> PathBuf {
    PathBuf::from(path.to_string_lossy().replace('\\', "/"))
}

impl FileSystem for MockFileSystem {
    fn read_to_string(&self, path: &Path) -> ValidationResult<String> {
        let normalized = normalize_mock_path(path);
        let files = self.files.read().expect("MockFileSystem lock poisoned");
        files
            .get(&normalized)
            .cloned()
            .ok_or_else(|| ValidationError::FileRead {
                path: path.to_path_buf(),
                source: io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("file not found: {}", path.display()),
                ),
            })
    }
}
