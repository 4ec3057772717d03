//! File output.
//!
//! The pipeline never touches the file system directly. Everything goes
//! through a [`FileWriter`], so runs can target disk or memory.

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::Mutex;

/// Destination for generated files.
///
/// Writers perform no transformation of the content.
#[async_trait]
pub trait FileWriter: Send + Sync {
    /// Remove a directory and everything below it. Missing directories are fine.
    async fn clear_dir(&self, path: &Path) -> io::Result<()>;

    /// Create a directory and its parents.
    async fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Write a file, creating parent directories as needed.
    async fn write_file(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Read back a file.
    async fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// Writes to disk via `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsWriter;

#[async_trait]
impl FileWriter for FsWriter {
    async fn clear_dir(&self, path: &Path) -> io::Result<()> {
        match tokio::fs::remove_dir_all(path).await {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }

    async fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        tokio::fs::create_dir_all(path).await
    }

    async fn write_file(&self, path: &Path, content: &str) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, content).await
    }

    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        tokio::fs::read_to_string(path).await
    }
}

/// Keeps everything in memory. Used for dry runs and tests.
#[derive(Debug, Default)]
pub struct MemoryWriter {
    files: Mutex<BTreeMap<PathBuf, String>>,
    dirs: Mutex<BTreeSet<PathBuf>>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content of a written file.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.lock().get(path.as_ref()).cloned()
    }

    /// Snapshot of every written file, sorted by path.
    pub fn files(&self) -> BTreeMap<PathBuf, String> {
        self.files.lock().clone()
    }

    /// Snapshot of every created directory.
    pub fn directories(&self) -> BTreeSet<PathBuf> {
        self.dirs.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.files.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.lock().is_empty()
    }
}

#[async_trait]
impl FileWriter for MemoryWriter {
    async fn clear_dir(&self, path: &Path) -> io::Result<()> {
        self.files.lock().retain(|p, _| !p.starts_with(path));
        self.dirs.lock().retain(|p| !p.starts_with(path));
        Ok(())
    }

    async fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let mut dirs = self.dirs.lock();
        for ancestor in path.ancestors().filter(|p| !p.as_os_str().is_empty()) {
            dirs.insert(ancestor.to_path_buf());
        }
        Ok(())
    }

    async fn write_file(&self, path: &Path, content: &str) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            self.create_dir_all(parent).await?;
        }
        self.files
            .lock()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.get(path).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} was not written", path.display()),
            )
        })
    }
}
