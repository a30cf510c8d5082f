//! Directory and file naming for configuration documents.
//!
//! Every configuration lives at `<directory>/<name>.json`:
//!
//! | Configured directory | Name        | File                 |
//! |----------------------|-------------|----------------------|
//! | `""`                 | `app`       | `app.json`           |
//! | `"cfg"`              | `app`       | `cfg/app.json`       |
//! | `"cfg/"`             | `app.json`  | `cfg/app.json`       |
//! | `"/etc/myapp"`       | `db`        | `/etc/myapp/db.json` |
//!
//! An empty directory means the process working directory.  A relative one
//! is resolved against the working directory only when an absolute path is
//! requested; files themselves are addressed as configured.

use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// File extension appended to configuration names.
pub const EXTENSION: &str = ".json";

/// Normalized configuration directory.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigLayout {
    directory: String,
}

impl ConfigLayout {
    /// Creates a layout rooted at `directory`, dropping one trailing `/`.
    ///
    /// The filesystem root `"/"` is kept as is.
    pub fn new(directory: impl Into<String>) -> Self {
        let mut directory = directory.into();
        if directory.len() > 1 && directory.ends_with('/') {
            directory.pop();
        }
        Self { directory }
    }

    /// The directory as configured (after normalization).
    pub fn relative_path(&self) -> &str {
        &self.directory
    }

    /// The directory resolved against the current working directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::StorageIo`] if the working directory cannot be
    /// determined.
    pub fn absolute_path(&self) -> Result<PathBuf> {
        let dir = Path::new(&self.directory);
        if dir.is_absolute() {
            return Ok(dir.to_path_buf());
        }
        let cwd = std::env::current_dir().map_err(|e| ConfigError::io(&self.directory, e))?;
        if self.directory.is_empty() {
            Ok(cwd)
        } else {
            Ok(cwd.join(dir))
        }
    }

    /// Path of the document file for `name`.
    ///
    /// `.json` is appended unless `name` already ends with it.
    pub fn file_path(&self, name: &str) -> PathBuf {
        let file = if name.ends_with(EXTENSION) {
            name.to_string()
        } else {
            format!("{name}{EXTENSION}")
        };

        if self.directory.is_empty() {
            PathBuf::from(file)
        } else if self.directory.ends_with('/') {
            PathBuf::from(format!("{}{file}", self.directory))
        } else {
            PathBuf::from(format!("{}/{file}", self.directory))
        }
    }

    /// Registry key for a configuration name: everything before the first `.`.
    ///
    /// ```rust
    /// use liteconf_core::ConfigLayout;
    ///
    /// assert_eq!(ConfigLayout::config_key("app.json"), "app");
    /// assert_eq!(ConfigLayout::config_key("app"), "app");
    /// ```
    pub fn config_key(name: &str) -> &str {
        name.split('.').next().unwrap_or(name)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_stripped() {
        assert_eq!(ConfigLayout::new("cfg/").relative_path(), "cfg");
        assert_eq!(ConfigLayout::new("cfg").relative_path(), "cfg");
    }

    #[test]
    fn test_root_directory_is_kept() {
        let layout = ConfigLayout::new("/");
        assert_eq!(layout.relative_path(), "/");
        assert_eq!(layout.file_path("app"), PathBuf::from("/app.json"));
    }

    #[test]
    fn test_file_path_joins_with_single_separator() {
        let layout = ConfigLayout::new("cfg/");
        assert_eq!(layout.file_path("app"), PathBuf::from("cfg/app.json"));
    }

    #[test]
    fn test_file_path_in_working_directory_has_no_separator() {
        let layout = ConfigLayout::new("");
        assert_eq!(layout.file_path("app"), PathBuf::from("app.json"));
    }

    #[test]
    fn test_file_path_does_not_double_extension() {
        let layout = ConfigLayout::new("cfg");
        assert_eq!(layout.file_path("app.json"), PathBuf::from("cfg/app.json"));
    }

    #[test]
    fn test_config_key_strips_everything_after_first_dot() {
        assert_eq!(ConfigLayout::config_key("app"), "app");
        assert_eq!(ConfigLayout::config_key("app.json"), "app");
        assert_eq!(ConfigLayout::config_key("app.backup.json"), "app");
    }

    #[test]
    fn test_absolute_path_of_relative_directory_is_under_cwd() {
        // Arrange
        let layout = ConfigLayout::new("cfg");
        let cwd = std::env::current_dir().unwrap();

        // Act
        let abs = layout.absolute_path().unwrap();

        // Assert
        assert!(abs.is_absolute());
        assert_eq!(abs, cwd.join("cfg"));
    }

    #[test]
    fn test_absolute_path_of_empty_directory_is_cwd() {
        let layout = ConfigLayout::new("");
        assert_eq!(
            layout.absolute_path().unwrap(),
            std::env::current_dir().unwrap()
        );
    }

    #[test]
    fn test_absolute_path_of_absolute_directory_is_unchanged() {
        let dir = std::env::temp_dir();
        let layout = ConfigLayout::new(dir.to_string_lossy().into_owned());
        assert_eq!(layout.absolute_path().unwrap(), dir);
    }
}
