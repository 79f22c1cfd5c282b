use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ArchiveError, Result};

/// Where archived documents end up.
///
/// Both operations must be idempotent: creating an existing directory is not
/// an error, and writing an existing file replaces it.
pub trait ArchiveStore {
    fn create_dir_all(&self, dir: &Path) -> Result<()>;
    fn write(&self, path: &Path, contents: &str) -> Result<()>;
}

/// Writes straight to the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskStore;

impl ArchiveStore for DiskStore {
    fn create_dir_all(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir).map_err(|source| ArchiveError::Io {
            path: dir.to_path_buf(),
            source,
        })
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        // Rust strings are UTF-8, so every document round-trips unchanged
        fs::write(path, contents).map_err(|source| ArchiveError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// In-memory store, handy for dry runs and tests.
///
/// Writing into a directory that was never created fails with `NotFound`,
/// the same way the disk would.
#[derive(Debug, Default)]
pub struct MemoryStore {
    dirs: RefCell<BTreeSet<PathBuf>>,
    files: RefCell<BTreeMap<PathBuf, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dirs(&self) -> Vec<PathBuf> {
        self.dirs.borrow().iter().cloned().collect()
    }

    pub fn files(&self) -> Vec<PathBuf> {
        self.files.borrow().keys().cloned().collect()
    }

    pub fn read(&self, path: &Path) -> Option<String> {
        self.files.borrow().get(path).cloned()
    }
}

impl ArchiveStore for MemoryStore {
    fn create_dir_all(&self, dir: &Path) -> Result<()> {
        let mut dirs = self.dirs.borrow_mut();
        for ancestor in dir.ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            dirs.insert(ancestor.to_path_buf());
        }
        Ok(())
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        let parent_exists = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => self.dirs.borrow().contains(parent),
            _ => true,
        };
        if !parent_exists {
            return Err(ArchiveError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "parent directory does not exist",
                ),
            });
        }

        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }
}
