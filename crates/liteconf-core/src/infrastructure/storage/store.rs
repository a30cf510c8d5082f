//! JSON-file persistence for a single configuration document.
//!
//! A [`ConfigStore`] binds one [`Document`] to one file.  It is created once
//! and goes through a fixed lifecycle when opened:
//!
//! ```text
//! file missing?  ── yes ──▶ create parents + write `{}`   (Created)
//!       │
//!       ▼
//! read + parse   ── ok ───▶ document = file content       (Loaded)
//!       │
//!       └── not a UTF-8 JSON object ──▶ document = {} and save  (Reset, logged)
//! ```
//!
//! After that every mutation rewrites the whole file before returning.
//! There is no buffering, journaling or atomic rename; a crash mid-write
//! leaves a truncated file that the next open will reset.
//!
//! The file is pretty-printed with a 4-space indent:
//!
//! ```json
//! {
//!     "server": {
//!         "port": 8080
//!     }
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::domain::document::Document;
use crate::domain::value::ConfigValue;
use crate::error::{ConfigError, Result};
use crate::infrastructure::storage::backend::{DocumentStorage, FsStorage};

/// Indent used when writing documents.
const INDENT: &[u8] = b"    ";

/// How the in-memory document was obtained when the store was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// The file did not exist and was created with an empty document.
    Created,
    /// The document was parsed from the existing file.
    Loaded,
    /// The file content was not a UTF-8 JSON object; it was replaced with `{}`.
    Reset,
}

/// A configuration document bound to its backing file.
#[derive(Debug)]
pub struct ConfigStore<S: DocumentStorage = FsStorage> {
    path: PathBuf,
    document: Document,
    lifecycle: Lifecycle,
    storage: S,
}

impl ConfigStore<FsStorage> {
    /// Opens the document at `path` on the real file system.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::StorageIo`] if the file cannot be created, read
    /// or (after a reset) rewritten.  Malformed content is not an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Self::open_with(path, FsStorage)
    }
}

impl<S: DocumentStorage> ConfigStore<S> {
    /// Opens the document at `path` through `storage`.
    ///
    /// # Errors
    ///
    /// Same as [`ConfigStore::open`].
    pub fn open_with(path: impl Into<PathBuf>, storage: S) -> Result<Self> {
        let mut store = Self {
            path: path.into(),
            document: Document::new(),
            lifecycle: Lifecycle::Loaded,
            storage,
        };

        if !store.storage.exists(&store.path) {
            store.create()?;
            store.lifecycle = Lifecycle::Created;
        }
        store.load()?;
        Ok(store)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The in-memory document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The root JSON object.
    pub fn root(&self) -> &Map<String, Value> {
        self.document.root()
    }

    /// How the document was obtained when the store was opened.
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    // ── Read side (pure, no I/O) ──────────────────────────────────────────────

    /// See [`Document::get`].
    pub fn get<T: ConfigValue>(&self, path: &str) -> Result<T> {
        self.document.get(path)
    }

    /// See [`Document::get_array`].
    pub fn get_array<T: ConfigValue>(&self, path: &str) -> Result<Vec<T>> {
        self.document.get_array(path)
    }

    /// See [`Document::get_as`].
    pub fn get_as<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.document.get_as(path)
    }

    /// Reads a string field.
    pub fn get_string(&self, path: &str) -> Result<String> {
        self.document.get_string(path)
    }

    /// Reads an integer field; floats and out-of-range numbers are a type mismatch.
    pub fn get_int(&self, path: &str) -> Result<i64> {
        self.document.get_int(path)
    }

    /// Reads a numeric field as `f64`, widening integers.
    pub fn get_float(&self, path: &str) -> Result<f64> {
        self.document.get_float(path)
    }

    /// Reads a boolean field.
    pub fn get_bool(&self, path: &str) -> Result<bool> {
        self.document.get_bool(path)
    }

    /// Reads any field as a raw JSON value, `null` included.
    pub fn get_value(&self, path: &str) -> Result<Value> {
        self.document.get_value(path)
    }

    /// Reads a nested mapping.
    pub fn get_object(&self, path: &str) -> Result<Map<String, Value>> {
        self.document.get_object(path)
    }

    /// Reads an array whose elements are all strings.
    pub fn get_string_array(&self, path: &str) -> Result<Vec<String>> {
        self.document.get_string_array(path)
    }

    /// Reads an array whose elements are all integers.
    pub fn get_int_array(&self, path: &str) -> Result<Vec<i64>> {
        self.document.get_int_array(path)
    }

    /// Reads an array of numbers as `f64`.
    pub fn get_float_array(&self, path: &str) -> Result<Vec<f64>> {
        self.document.get_float_array(path)
    }

    /// Reads an array whose elements are all booleans.
    pub fn get_bool_array(&self, path: &str) -> Result<Vec<bool>> {
        self.document.get_bool_array(path)
    }

    /// Reads an array of raw JSON values.
    pub fn get_value_array(&self, path: &str) -> Result<Vec<Value>> {
        self.document.get_value_array(path)
    }

    /// Reads an array whose elements are all mappings.
    pub fn get_object_array(&self, path: &str) -> Result<Vec<Map<String, Value>>> {
        self.document.get_object_array(path)
    }

    /// See [`Document::contains`].
    pub fn contains(&self, path: &str) -> Result<bool> {
        self.document.contains(path)
    }

    // ── Write side (each call saves) ──────────────────────────────────────────

    /// Sets `value` at `path` (creating intermediates) and saves.
    ///
    /// # Errors
    ///
    /// Path errors from [`Document::set`], or [`ConfigError::StorageIo`] if
    /// the save fails.  In the latter case the in-memory document already
    /// holds the new value.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) -> Result<()> {
        self.document.set(path, value)?;
        self.save()
    }

    /// Serializes `value`, sets it at `path` and saves.
    ///
    /// # Errors
    ///
    /// As [`ConfigStore::set`], plus [`ConfigError::Serialize`].
    pub fn set_serialized<T: Serialize + ?Sized>(&mut self, path: &str, value: &T) -> Result<()> {
        self.document.set_serialized(path, value)?;
        self.save()
    }

    /// Stores an ordered array at `path` (destination must exist) and saves.
    ///
    /// # Errors
    ///
    /// As [`Document::set_array`], or [`ConfigError::StorageIo`].
    pub fn set_array<I, T>(&mut self, path: &str, values: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        self.document.set_array(path, values)?;
        self.save()
    }

    /// Removes the field at `path` if present and saves.
    ///
    /// # Errors
    ///
    /// As [`Document::remove`], or [`ConfigError::StorageIo`].
    pub fn remove(&mut self, path: &str) -> Result<Option<Value>> {
        let removed = self.document.remove(path)?;
        self.save()?;
        Ok(removed)
    }

    /// Empties the document and saves.
    ///
    /// # Errors
    ///
    /// [`ConfigError::StorageIo`] if the save fails.
    pub fn clear(&mut self) -> Result<()> {
        self.document.clear();
        self.save()
    }

    /// Deletes the backing file and consumes the store.
    ///
    /// # Errors
    ///
    /// [`ConfigError::StorageIo`] if the file cannot be removed.
    pub fn delete(self) -> Result<()> {
        self.storage
            .remove_file(&self.path)
            .map_err(|e| ConfigError::io(&self.path, e))?;
        debug!(path = %self.path.display(), "deleted config file");
        Ok(())
    }

    // ── Lifecycle internals ───────────────────────────────────────────────────

    fn create(&self) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            self.storage
                .create_dir_all(dir)
                .map_err(|source| ConfigError::io(dir, source))?;
        }
        self.save()?;
        info!(path = %self.path.display(), "created config file");
        Ok(())
    }

    fn load(&mut self) -> Result<()> {
        let content = self
            .storage
            .read(&self.path)
            .map_err(|e| ConfigError::io(&self.path, e))?;

        match parse_document(&self.path, &content) {
            Ok(document) => {
                self.document = document;
                debug!(path = %self.path.display(), "loaded config file");
            }
            Err(err) => {
                warn!(error = %err, "resetting config to an empty document");
                self.document = Document::new();
                self.lifecycle = Lifecycle::Reset;
                self.save()?;
            }
        }
        Ok(())
    }

    fn save(&self) -> Result<()> {
        let bytes = render(&self.document)?;
        self.storage
            .write(&self.path, &bytes)
            .map_err(|e| ConfigError::io(&self.path, e))?;
        debug!(path = %self.path.display(), bytes = bytes.len(), "saved config file");
        Ok(())
    }
}

/// Parses file content that must be a UTF-8 JSON object.
fn parse_document(path: &Path, content: &[u8]) -> Result<Document> {
    serde_json::from_slice::<Map<String, Value>>(content)
        .map(Document::from_map)
        .map_err(|source| ConfigError::MalformedDocument {
            path: path.to_path_buf(),
            source,
        })
}

/// Serializes a document with the on-disk indent.
fn render(document: &Document) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    document.root().serialize(&mut serializer)?;
    Ok(buf)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
