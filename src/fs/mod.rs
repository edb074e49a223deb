//! File-system capability used by the overlay engine and post-processing
//!
//! Abstracts the project directory for testability. Provides:
//! - FileSystem trait: the read/write/list/delete capability set
//! - DiskFs: real disk adapter for production
//! - MemoryFs: in-memory double for unit tests

mod disk;
mod memory;

pub use disk::DiskFs;
pub use memory::MemoryFs;

use std::io;
use std::path::{Path, PathBuf};

/// File-system operations needed to compose a project tree
pub trait FileSystem {
    /// Whether anything exists at `path`
    fn exists(&self, path: &Path) -> bool;

    /// Whether `path` is an existing directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Read the full contents of a file
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Create or truncate a file. The parent directory must exist.
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    /// Create a directory and all missing ancestors. Idempotent.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// List the direct children of a directory, sorted by file name
    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;

    /// Remove a file
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Remove an empty directory
    fn remove_dir(&self, path: &Path) -> io::Result<()>;

    /// Rename a file or directory
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;
}

impl<T: FileSystem + ?Sized> FileSystem for &T {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        (**self).is_dir(path)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        (**self).read(path)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        (**self).write(path, contents)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        (**self).create_dir_all(path)
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        (**self).read_dir(path)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        (**self).remove_file(path)
    }

    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        (**self).remove_dir(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        (**self).rename(from, to)
    }
}
