//! Command execution against a configuration directory.
//!
//! Each invocation runs one [`Command`] and writes its result to `out`.
//! Commands that read or write the document open exactly one configuration
//! through a fresh [`Registry`]; `where` and `delete` never create a file.

use std::io::Write;

use anyhow::{bail, Context};
use clap::Subcommand;
use liteconf_core::{ConfigError, ConfigLayout, Registry};
use serde_json::Value;
use tracing::debug;

/// Resolved CLI settings, independent of how they were supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Configuration directory passed to [`Registry::initialize`].
    pub directory: String,
    /// Configuration name (with or without `.json`).
    pub name: String,
}

/// One operation on the selected configuration.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print the value at PATH as JSON.
    Get { path: String },
    /// Set PATH to JSON (a value that is not valid JSON is stored as a string).
    Set { path: String, value: String },
    /// Replace the array at PATH with the elements of a JSON array.
    SetArray { path: String, values: String },
    /// Remove the field at PATH (no-op if absent).
    Remove { path: String },
    /// Print `true` if PATH names an existing field.
    Contains { path: String },
    /// Remove every top-level field.
    Clear,
    /// Delete the backing file.
    Delete,
    /// Print the whole document.
    Show,
    /// Print the configured and absolute configuration directory.
    Where,
}

/// Parses a command-line value as JSON, falling back to a plain string.
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Runs `command` on the configuration described by `config`.
///
/// # Errors
///
/// Propagates every library error with the configuration name and path as
/// context, plus a parse error when `set-array` is not given a JSON array.
pub fn run(config: &CliConfig, command: Command, out: &mut impl Write) -> anyhow::Result<()> {
    let layout = ConfigLayout::new(config.directory.as_str());
    let key = ConfigLayout::config_key(&config.name).to_string();
    debug!(name = key.as_str(), ?command, "running command");

    match command {
        Command::Get { path } => {
            let value = open(config)?
                .get(&key)?
                .get_value(&path)
                .with_context(|| format!("failed to read '{path}'"))?;
            writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
        }
        Command::Set { path, value } => {
            open(config)?
                .get_mut(&key)?
                .set(&path, parse_value(&value))
                .with_context(|| format!("failed to set '{path}'"))?;
        }
        Command::SetArray { path, values } => {
            let elements = match serde_json::from_str(&values) {
                Ok(Value::Array(elements)) => elements,
                Ok(other) => bail!("expected a JSON array for '{path}', got {other}"),
                Err(e) => {
                    return Err(e).with_context(|| format!("invalid JSON array for '{path}'"))
                }
            };
            open(config)?
                .get_mut(&key)?
                .set_array(&path, elements)
                .with_context(|| format!("failed to set array '{path}'"))?;
        }
        Command::Remove { path } => {
            open(config)?
                .get_mut(&key)?
                .remove(&path)
                .with_context(|| format!("failed to remove '{path}'"))?;
        }
        Command::Contains { path } => {
            let found = open(config)?
                .get(&key)?
                .contains(&path)
                .with_context(|| format!("failed to look up '{path}'"))?;
            writeln!(out, "{found}")?;
        }
        Command::Clear => {
            open(config)?.get_mut(&key)?.clear()?;
        }
        Command::Delete => {
            // Opening a missing config would create it just to delete it.
            if !layout.file_path(&key).exists() {
                return Err(ConfigError::ConfigNotFound { name: key }.into());
            }
            open(config)?
                .delete(&key)
                .with_context(|| format!("failed to delete config '{key}'"))?;
        }
        Command::Show => {
            let root = Value::Object(open(config)?.get(&key)?.root().clone());
            writeln!(out, "{}", serde_json::to_string_pretty(&root)?)?;
        }
        Command::Where => {
            writeln!(out, "{}", layout.relative_path())?;
            writeln!(out, "{}", layout.absolute_path()?.display())?;
        }
    }
    Ok(())
}

/// Opens (creating if needed) the one configuration named in `config`.
fn open(config: &CliConfig) -> anyhow::Result<Registry> {
    Registry::initialize(&config.directory, [config.name.as_str()]).with_context(|| {
        format!(
            "failed to open config '{}' in '{}'",
            config.name, config.directory
        )
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use liteconf_core::ErrorKind;
    use uuid::Uuid;

    struct TempDir(PathBuf);

    impl TempDir {
        fn new() -> Self {
            Self(std::env::temp_dir().join(format!("liteconf_cli_{}", Uuid::new_v4())))
        }

        fn config(&self, name: &str) -> CliConfig {
            CliConfig {
                directory: self.0.to_str().unwrap().to_string(),
                name: name.to_string(),
            }
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            std::fs::remove_dir_all(&self.0).ok();
        }
    }

    fn exec(config: &CliConfig, command: Command) -> anyhow::Result<String> {
        let mut out = Vec::new();
        run(config, command, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_parse_value_accepts_json() {
        assert_eq!(parse_value("8080"), Value::from(8080));
        assert_eq!(parse_value("true"), Value::Bool(true));
        assert_eq!(parse_value("\"x\""), Value::from("x"));
    }

    #[test]
    fn test_parse_value_falls_back_to_string() {
        assert_eq!(parse_value("dark"), Value::from("dark"));
    }

    #[test]
    fn test_set_then_get_prints_value() {
        // Arrange
        let tmp = TempDir::new();
        let config = tmp.config("app");

        // Act
        exec(
            &config,
            Command::Set {
                path: "server.port".into(),
                value: "8080".into(),
            },
        )
        .unwrap();
        let out = exec(
            &config,
            Command::Get {
                path: "server.port".into(),
            },
        )
        .unwrap();

        // Assert
        assert_eq!(out, "8080\n");
        assert!(tmp.0.join("app.json").exists());
    }

    #[test]
    fn test_set_array_then_show() {
        let tmp = TempDir::new();
        let config = tmp.config("app.json");

        exec(
            &config,
            Command::SetArray {
                path: "list".into(),
                values: "[1, 2, 3]".into(),
            },
        )
        .unwrap();
        let out = exec(&config, Command::Show).unwrap();

        let shown: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(shown, serde_json::json!({ "list": [1, 2, 3] }));
    }

    #[test]
    fn test_set_array_rejects_non_array() {
        let tmp = TempDir::new();

        let result = exec(
            &tmp.config("app"),
            Command::SetArray {
                path: "list".into(),
                values: "{}".into(),
            },
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_contains_and_remove() {
        // Arrange
        let tmp = TempDir::new();
        let config = tmp.config("app");
        exec(
            &config,
            Command::Set {
                path: "theme".into(),
                value: "dark".into(),
            },
        )
        .unwrap();
        let contains = || Command::Contains {
            path: "theme".into(),
        };

        // Act
        let before = exec(&config, contains()).unwrap();
        exec(
            &config,
            Command::Remove {
                path: "theme".into(),
            },
        )
        .unwrap();
        let after = exec(&config, contains()).unwrap();

        // Assert
        assert_eq!(before, "true\n");
        assert_eq!(after, "false\n");
    }

    #[test]
    fn test_get_missing_intermediate_keeps_library_error() {
        let tmp = TempDir::new();

        let err = exec(
            &tmp.config("app"),
            Command::Get {
                path: "missing.key".into(),
            },
        )
        .unwrap_err();

        let source = err.downcast_ref::<ConfigError>().unwrap();
        assert_eq!(source.kind(), ErrorKind::PathTraversal);
    }

    #[test]
    fn test_clear_empties_file() {
        let tmp = TempDir::new();
        let config = tmp.config("app");
        exec(
            &config,
            Command::Set {
                path: "a".into(),
                value: "1".into(),
            },
        )
        .unwrap();

        exec(&config, Command::Clear).unwrap();

        assert_eq!(
            std::fs::read_to_string(tmp.0.join("app.json")).unwrap(),
            "{}"
        );
    }

    #[test]
    fn test_delete_removes_existing_file() {
        let tmp = TempDir::new();
        let config = tmp.config("app");
        exec(&config, Command::Show).unwrap();
        assert!(tmp.0.join("app.json").exists());

        exec(&config, Command::Delete).unwrap();

        assert!(!tmp.0.join("app.json").exists());
    }

    #[test]
    fn test_where_prints_both_paths_without_creating_file() {
        // Arrange
        let tmp = TempDir::new();

        // Act
        let out = exec(&tmp.config("app"), Command::Where).unwrap();

        // Assert
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], tmp.0.to_str().unwrap());
        assert_eq!(lines[1], tmp.0.to_str().unwrap());
        assert!(!tmp.0.exists());
    }

    #[test]
    fn test_delete_unknown_config_is_config_not_found() {
        // Arrange
        let tmp = TempDir::new();

        // Act
        let err = exec(&tmp.config("app"), Command::Delete).unwrap_err();

        // Assert: nothing was created along the way
        let source = err.downcast_ref::<ConfigError>().unwrap();
        assert_eq!(source.kind(), ErrorKind::ConfigNotFound);
        assert!(!tmp.0.join("app.json").exists());
    }
}
