//! Storage backend abstraction.
//!
//! # Testability
//!
//! [`ConfigStore`](super::store::ConfigStore) talks to the disk only through
//! [`DocumentStorage`], so tests can substitute
//! [`MockStorage`](super::mock::MockStorage) to inspect writes or inject I/O
//! failures without touching the real file system.

use std::io;
use std::path::Path;

/// Minimal file-system surface needed to persist configuration documents.
pub trait DocumentStorage {
    /// Returns `true` if a file exists at `path`.
    fn exists(&self, path: &Path) -> bool;
    /// Creates `path` and all missing parent directories.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
    /// Reads the whole file as raw bytes.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
    /// Replaces the file content, creating the file if needed.
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;
    /// Deletes the file.
    fn remove_file(&self, path: &Path) -> io::Result<()>;
}

/// The real file system, via `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStorage;

impl DocumentStorage for FsStorage {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        std::fs::write(path, contents)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(path)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_fs_storage_write_read_remove_cycle() {
        // Arrange
        let dir = std::env::temp_dir().join(format!("liteconf_fs_{}", Uuid::new_v4()));
        let file = dir.join("nested").join("doc.json");
        let storage = FsStorage;

        // Act
        storage.create_dir_all(file.parent().unwrap()).unwrap();
        storage.write(&file, b"{}").unwrap();
        let content = storage.read(&file).unwrap();
        storage.remove_file(&file).unwrap();

        // Assert
        assert_eq!(content, b"{}");
        assert!(!storage.exists(&file));

        // Cleanup
        std::fs::remove_dir_all(&dir).ok();
    }
}
