//! File system port
//!
//! Abstracts the file operations storage needs: existence and permission
//! checks, whole-file reads, replace-on-write saves and path resolution.
//! The local implementation works on the process file system; tests and
//! embedders can substitute their own.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// File operations consumed by [`crate::storage::YamlStorage`].
pub trait FileSystem {
    /// Whether the path exists at all.
    fn exists(&self, path: &Path) -> bool;

    /// Whether the file can be opened for reading.
    fn is_readable(&self, path: &Path) -> bool;

    /// Whether the file can be opened for writing.
    fn is_writable(&self, path: &Path) -> bool;

    /// Read the whole file as UTF-8 text.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Replace the file contents atomically: readers observe either the old
    /// or the new content, never a partial write.
    fn write_atomic(&self, path: &Path, contents: &str) -> io::Result<()>;

    /// Canonical absolute form of the path, when the target exists.
    fn realpath(&self, path: &Path) -> Option<PathBuf>;

    /// Final component of the path, for messages.
    fn basename(&self, path: &Path) -> String;
}

/// [`FileSystem`] backed by the process file system.
#[derive(Debug, Default)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_readable(&self, path: &Path) -> bool {
        fs::File::open(path).is_ok()
    }

    fn is_writable(&self, path: &Path) -> bool {
        OpenOptions::new().write(true).open(path).is_ok()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write_atomic(&self, path: &Path, contents: &str) -> io::Result<()> {
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(contents.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|err| err.error)?;
        Ok(())
    }

    fn realpath(&self, path: &Path) -> Option<PathBuf> {
        fs::canonicalize(path).ok()
    }

    fn basename(&self, path: &Path) -> String {
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
