//! Filesystem abstraction used by import resolution and document compilation.
//!
//! All file access in the library goes through the [`FileSystem`] trait so
//! that the import resolver and the document compiler can be exercised
//! against an in-memory filesystem in tests. Two implementations are
//! provided:
//!
//! - **`OsFileSystem`**: the real filesystem, with directory enumeration
//!   backed by `walkdir` (following symlinks).
//! - **`MemoryFS`**: an in-memory filesystem for tests and dry runs.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Capabilities required from a filesystem by the library core.
pub trait FileSystem {
    /// Check whether a file or directory exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Check whether `path` is an existing directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Read the full content of the file at `path` as UTF-8 text.
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Write `content` to the file at `path`, replacing any existing file.
    fn write(&mut self, path: &Path, content: &str) -> Result<()>;

    /// Create the directory at `path` (and all missing parents).
    fn ensure_directory(&mut self, path: &Path) -> Result<()>;

    /// Delete the file at `path`.
    fn delete(&mut self, path: &Path) -> Result<()>;

    /// Recursively enumerate all files under the directory at `path`.
    ///
    /// Returns absolute paths in enumeration order. The order is not
    /// guaranteed to be sorted; callers must not depend on it for
    /// correctness.
    fn walk(&self, path: &Path) -> Result<Vec<PathBuf>>;
}

/// The real filesystem.
#[derive(Debug, Clone, Default)]
pub struct OsFileSystem;

impl OsFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for OsFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).map_err(Error::Io)
    }

    fn write(&mut self, path: &Path, content: &str) -> Result<()> {
        std::fs::write(path, content).map_err(Error::Io)
    }

    fn ensure_directory(&mut self, path: &Path) -> Result<()> {
        std::fs::create_dir_all(path).map_err(Error::Io)
    }

    fn delete(&mut self, path: &Path) -> Result<()> {
        std::fs::remove_file(path).map_err(Error::Io)
    }

    fn walk(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(path).follow_links(true) {
            let entry = entry.map_err(|e| Error::Filesystem {
                message: format!("Directory enumeration failed under {}: {}", path.display(), e),
            })?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }
}

/// In-memory filesystem for fast, hermetic tests.
///
/// Files are stored as a path to content mapping; directories exist either
/// explicitly (via `ensure_directory`) or implicitly as a prefix of a stored
/// file path. A `BTreeMap` keeps enumeration deterministic.
#[derive(Debug, Clone, Default)]
pub struct MemoryFS {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
}

impl MemoryFS {
    /// Create a new empty filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with string content, creating implicit parent directories.
    pub fn add_file<P: AsRef<Path>>(&mut self, path: P, content: &str) {
        let path = path.as_ref().to_path_buf();
        let mut parent = path.parent();
        while let Some(dir) = parent {
            if !dir.as_os_str().is_empty() {
                self.directories.insert(dir.to_path_buf());
            }
            parent = dir.parent();
        }
        self.files.insert(path, content.to_string());
    }

    /// Get a file's content by path.
    pub fn get_file<P: AsRef<Path>>(&self, path: P) -> Option<&String> {
        self.files.get(path.as_ref())
    }

    /// List all file paths.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.files.keys().cloned().collect()
    }

    /// List files matching a glob pattern.
    pub fn list_files_glob(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let pattern = Pattern::new(pattern).map_err(Error::Glob)?;
        Ok(self
            .files
            .keys()
            .filter(|path| path.to_str().is_some_and(|s| pattern.matches(s)))
            .cloned()
            .collect())
    }

    /// Get the number of files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if the filesystem holds no files.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FileSystem for MemoryFS {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path) || self.is_dir(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.directories.contains(path) || self.files.keys().any(|f| f.starts_with(path) && f != path)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.files.get(path).cloned().ok_or_else(|| Error::Filesystem {
            message: format!("File not found: {}", path.display()),
        })
    }

    fn write(&mut self, path: &Path, content: &str) -> Result<()> {
        self.add_file(path, content);
        Ok(())
    }

    fn ensure_directory(&mut self, path: &Path) -> Result<()> {
        self.directories.insert(path.to_path_buf());
        Ok(())
    }

    fn delete(&mut self, path: &Path) -> Result<()> {
        self.files.remove(path).ok_or_else(|| Error::Filesystem {
            message: format!("File not found: {}", path.display()),
        })?;
        Ok(())
    }

    fn walk(&self, path: &Path) -> Result<Vec<PathBuf>> {
        Ok(self
            .files
            .keys()
            .filter(|f| f.starts_with(path) && *f != path)
            .cloned()
            .collect())
    }
}
