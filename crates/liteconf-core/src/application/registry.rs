//! Registry of named configuration stores.
//!
//! A [`Registry`] owns one configuration directory and one [`ConfigStore`]
//! per configuration name.  It is an ordinary value: construct it at
//! startup and pass it (or a reference to it) to whatever needs settings.
//!
//! ```rust,no_run
//! use liteconf_core::Registry;
//!
//! let mut registry = Registry::initialize("cfg", ["app", "db"])?;
//! registry.get_mut("app")?.set("server.port", 8080)?;
//! assert_eq!(registry.get("app")?.get_int("server.port")?, 8080);
//! # Ok::<(), liteconf_core::ConfigError>(())
//! ```

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::infrastructure::storage::backend::{DocumentStorage, FsStorage};
use crate::infrastructure::storage::layout::ConfigLayout;
use crate::infrastructure::storage::store::ConfigStore;

/// Name → store map rooted at one configuration directory.
#[derive(Debug)]
pub struct Registry<S: DocumentStorage + Clone = FsStorage> {
    layout: ConfigLayout,
    stores: BTreeMap<String, ConfigStore<S>>,
    storage: S,
}

impl Registry<FsStorage> {
    /// Opens (creating if needed) `<directory>/<name>.json` for every name.
    ///
    /// Each name is registered under the part before its first `.`, so
    /// `"app"` and `"app.json"` both register `"app"`.  A repeated name
    /// replaces the earlier store.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::StorageIo`] if any file cannot be created or
    /// read.  Configurations with unparsable content are reset, not failed.
    pub fn initialize<I, N>(directory: &str, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = N>,
        N: AsRef<str>,
    {
        Self::initialize_with(directory, names, FsStorage)
    }
}

impl<S: DocumentStorage + Clone> Registry<S> {
    /// Same as [`Registry::initialize`], through a custom storage backend.
    ///
    /// # Errors
    ///
    /// Same as [`Registry::initialize`].
    pub fn initialize_with<I, N>(directory: &str, names: I, storage: S) -> Result<Self>
    where
        I: IntoIterator<Item = N>,
        N: AsRef<str>,
    {
        let mut registry = Self {
            layout: ConfigLayout::new(directory),
            stores: BTreeMap::new(),
            storage,
        };
        for name in names {
            registry.register(name.as_ref())?;
        }
        debug!(
            directory = registry.layout.relative_path(),
            count = registry.stores.len(),
            "config registry initialized"
        );
        Ok(registry)
    }

    /// Opens one more configuration, replacing any store with the same key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::StorageIo`] if the file cannot be created or
    /// read.
    pub fn register(&mut self, name: &str) -> Result<&mut ConfigStore<S>> {
        let key = ConfigLayout::config_key(name).to_string();
        let path = self.layout.file_path(&key);
        let store = ConfigStore::open_with(path, self.storage.clone())?;

        match self.stores.entry(key) {
            Entry::Occupied(mut entry) => {
                debug!(name = entry.key().as_str(), "replacing registered config");
                entry.insert(store);
                Ok(entry.into_mut())
            }
            Entry::Vacant(entry) => Ok(entry.insert(store)),
        }
    }

    /// Looks up a registered configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ConfigNotFound`] for an unknown name.
    pub fn get(&self, name: &str) -> Result<&ConfigStore<S>> {
        self.stores.get(name).ok_or_else(|| not_found(name))
    }

    /// Mutable lookup, needed for `set`, `remove` and `clear`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ConfigNotFound`] for an unknown name.
    pub fn get_mut(&mut self, name: &str) -> Result<&mut ConfigStore<S>> {
        self.stores.get_mut(name).ok_or_else(|| not_found(name))
    }

    /// Returns `true` if `name` is registered.
    pub fn contains_config(&self, name: &str) -> bool {
        self.stores.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.stores.keys().map(String::as_str)
    }

    /// Unregisters `name` and deletes its backing file.
    ///
    /// The store is evicted even if deleting the file fails, so no caller can
    /// keep working on a document whose file is gone.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ConfigNotFound`] for an unknown name, or
    /// [`ConfigError::StorageIo`] if the file cannot be removed.
    pub fn delete(&mut self, name: &str) -> Result<()> {
        let store = self.stores.remove(name).ok_or_else(|| not_found(name))?;
        store.delete()
    }

    /// The configuration directory layout.
    pub fn layout(&self) -> &ConfigLayout {
        &self.layout
    }

    /// The configuration directory resolved against the working directory.
    ///
    /// # Errors
    ///
    /// [`ConfigError::StorageIo`] if the working directory is unavailable.
    pub fn absolute_config_path(&self) -> Result<PathBuf> {
        self.layout.absolute_path()
    }

    /// The configuration directory as configured.
    pub fn relative_config_path(&self) -> &str {
        self.layout.relative_path()
    }
}

fn not_found(name: &str) -> ConfigError {
    ConfigError::ConfigNotFound {
        name: name.to_string(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::infrastructure::storage::mock::MockStorage;
    use crate::infrastructure::storage::store::Lifecycle;

    fn registry(names: &[&str]) -> (Registry<MockStorage>, MockStorage) {
        let storage = MockStorage::new();
        let registry = Registry::initialize_with("cfg/", names.iter(), storage.clone()).unwrap();
        (registry, storage)
    }

    #[test]
    fn test_initialize_creates_file_per_name() {
        // Arrange / Act
        let (registry, storage) = registry(&["app", "db"]);

        // Assert
        assert_eq!(registry.names().collect::<Vec<_>>(), ["app", "db"]);
        assert_eq!(storage.file("cfg/app.json").as_deref(), Some("{}"));
        assert_eq!(storage.file("cfg/db.json").as_deref(), Some("{}"));
    }

    #[test]
    fn test_initialize_strips_extension_from_names() {
        let (registry, storage) = registry(&["app.json"]);

        assert!(registry.contains_config("app"));
        assert!(!registry.contains_config("app.json"));
        assert!(storage.file("cfg/app.json").is_some());
    }

    #[test]
    fn test_get_unknown_name_is_config_not_found() {
        let (registry, _) = registry(&["app"]);

        let err = registry.get("other").unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ConfigNotFound);
    }

    #[test]
    fn test_get_mut_writes_through_to_storage() {
        let (mut registry, storage) = registry(&["app"]);

        registry.get_mut("app").unwrap().set("debug", true).unwrap();

        assert!(registry.get("app").unwrap().get_bool("debug").unwrap());
        assert!(storage.file("cfg/app.json").unwrap().contains("\"debug\": true"));
    }

    #[test]
    fn test_register_duplicate_replaces_store() {
        // Arrange
        let (mut registry, storage) = registry(&["app"]);
        registry.get_mut("app").unwrap().set("a", 1).unwrap();

        // Act: the file still holds `a`, so the new store loads it again
        let store = registry.register("app").unwrap();

        // Assert
        assert_eq!(store.lifecycle(), Lifecycle::Loaded);
        assert_eq!(store.get_int("a").unwrap(), 1);
        assert_eq!(registry.names().count(), 1);
        assert!(storage.file("cfg/app.json").is_some());
    }

    #[test]
    fn test_delete_evicts_store_and_file() {
        let (mut registry, storage) = registry(&["app", "db"]);

        registry.delete("app").unwrap();

        assert!(storage.file("cfg/app.json").is_none());
        assert_eq!(
            registry.get("app").unwrap_err().kind(),
            ErrorKind::ConfigNotFound
        );
        assert!(registry.contains_config("db"));
    }

    #[test]
    fn test_delete_unknown_name_is_config_not_found() {
        let (mut registry, _) = registry(&[]);
        assert_eq!(
            registry.delete("app").unwrap_err().kind(),
            ErrorKind::ConfigNotFound
        );
    }

    #[test]
    fn test_relative_config_path_is_normalized_directory() {
        let (registry, _) = registry(&[]);
        assert_eq!(registry.relative_config_path(), "cfg");
        assert!(registry.absolute_config_path().unwrap().ends_with("cfg"));
    }

    #[test]
    fn test_initialize_failure_is_storage_io() {
        let storage = MockStorage::new();
        storage.set_fail_writes(true);

        let err = Registry::initialize_with("cfg", ["app"], storage).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::StorageIo);
    }
}
