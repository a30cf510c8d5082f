//! In-memory storage backend for tests.
//!
//! Files live in a shared map, so clones of one [`MockStorage`] observe the
//! same content.  Reads and writes can be made to fail on demand.

use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::backend::DocumentStorage;

#[derive(Debug, Default)]
struct MockState {
    files: HashMap<PathBuf, Vec<u8>>,
    dirs: HashSet<PathBuf>,
    fail_reads: bool,
    fail_writes: bool,
    writes: u32,
}

/// A mock implementation of [`DocumentStorage`] backed by a `HashMap`.
#[derive(Debug, Clone, Default)]
pub struct MockStorage {
    state: Arc<Mutex<MockState>>,
}

impl MockStorage {
    /// Creates an empty mock file system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a file with `contents`.
    pub fn with_file(self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.with_bytes(path, contents.into().into_bytes())
    }

    /// Seeds a file with raw bytes, which need not be valid UTF-8.
    pub fn with_bytes(self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        self.state
            .lock()
            .expect("lock poisoned")
            .files
            .insert(path.into(), contents.into());
        self
    }

    /// Makes every subsequent read fail with `PermissionDenied`.
    pub fn set_fail_reads(&self, fail: bool) {
        self.state.lock().expect("lock poisoned").fail_reads = fail;
    }

    /// Makes every subsequent write fail with `PermissionDenied`.
    pub fn set_fail_writes(&self, fail: bool) {
        self.state.lock().expect("lock poisoned").fail_writes = fail;
    }

    /// Current content of the file at `path`, if any, decoded lossily.
    pub fn file(&self, path: impl AsRef<Path>) -> Option<String> {
        self.state
            .lock()
            .expect("lock poisoned")
            .files
            .get(path.as_ref())
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// Returns `true` if `create_dir_all` was called for `path`.
    pub fn has_dir(&self, path: impl AsRef<Path>) -> bool {
        self.state
            .lock()
            .expect("lock poisoned")
            .dirs
            .contains(path.as_ref())
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> u32 {
        self.state.lock().expect("lock poisoned").writes
    }
}

fn denied() -> io::Error {
    io::Error::new(io::ErrorKind::PermissionDenied, "mock storage failure")
}

impl DocumentStorage for MockStorage {
    fn exists(&self, path: &Path) -> bool {
        self.state
            .lock()
            .expect("lock poisoned")
            .files
            .contains_key(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let mut state = self.state.lock().expect("lock poisoned");
        if state.fail_writes {
            return Err(denied());
        }
        state.dirs.insert(path.to_path_buf());
        Ok(())
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        let state = self.state.lock().expect("lock poisoned");
        if state.fail_reads {
            return Err(denied());
        }
        state
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let mut state = self.state.lock().expect("lock poisoned");
        if state.fail_writes {
            return Err(denied());
        }
        state.files.insert(path.to_path_buf(), contents.to_vec());
        state.writes += 1;
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        self.state
            .lock()
            .expect("lock poisoned")
            .files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }
}
