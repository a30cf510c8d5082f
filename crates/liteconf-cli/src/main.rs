//! liteconf: command-line access to JSON configuration directories.
//!
//! Reads and writes one named configuration per invocation through dotted
//! paths, using the same files and rules as the `liteconf-core` library.
//!
//! # Usage
//!
//! ```text
//! liteconf [--dir <DIR>] <NAME> <COMMAND>
//!
//! Commands:
//!   get <PATH>                    Print the value at PATH as JSON
//!   set <PATH> <JSON>             Set PATH (non-JSON input is stored as a string)
//!   set-array <PATH> <JSON-ARRAY> Replace the array at PATH
//!   remove <PATH>                 Remove the field at PATH
//!   contains <PATH>               Print true/false
//!   clear                         Remove every top-level field
//!   delete                        Delete the backing file
//!   show                          Print the whole document
//!   where                         Print the configuration directory
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable       | Default | Description             |
//! |----------------|---------|-------------------------|
//! | `LITECONF_DIR` | `.`     | Configuration directory |
//! | `RUST_LOG`     | `warn`  | Log filter (stderr)     |

mod commands;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use commands::{CliConfig, Command};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Named JSON configuration files addressed by dotted paths.
#[derive(Debug, Parser)]
#[command(
    name = "liteconf",
    about = "Read and write JSON configuration files through dotted paths",
    version
)]
struct Cli {
    /// Directory holding the configuration files.
    #[arg(long, default_value = ".", env = "LITECONF_DIR")]
    dir: String,

    /// Configuration name; `.json` is implied.
    name: String,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    /// Splits the parsed arguments into settings and the command to run.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration name is empty.
    fn into_cli_config(self) -> anyhow::Result<(CliConfig, Command)> {
        if self.name.trim().is_empty() {
            anyhow::bail!("configuration name must not be empty");
        }
        Ok((
            CliConfig {
                directory: self.dir,
                name: self.name,
            },
            self.command,
        ))
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    // Default to `warn` so command output on stdout stays clean.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let (config, command) = Cli::parse().into_cli_config()?;

    let stdout = std::io::stdout();
    commands::run(&config, command, &mut stdout.lock())
        .with_context(|| format!("liteconf {} failed", config.name))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_dir_is_current_directory() {
        // Arrange: only the required arguments
        let cli = Cli::parse_from(["liteconf", "app", "show"]);

        // Assert
        assert_eq!(cli.dir, ".");
        assert_eq!(cli.name, "app");
        assert_eq!(cli.command, Command::Show);
    }

    #[test]
    fn test_cli_dir_override() {
        let cli = Cli::parse_from(["liteconf", "--dir", "cfg", "app", "where"]);
        assert_eq!(cli.dir, "cfg");
    }

    #[test]
    fn test_cli_set_takes_path_and_value() {
        let cli = Cli::parse_from(["liteconf", "app", "set", "server.port", "8080"]);
        assert_eq!(
            cli.command,
            Command::Set {
                path: "server.port".into(),
                value: "8080".into(),
            }
        );
    }

    #[test]
    fn test_cli_set_array_subcommand_is_kebab_case() {
        let cli = Cli::parse_from(["liteconf", "app", "set-array", "list", "[1,2]"]);
        assert_eq!(
            cli.command,
            Command::SetArray {
                path: "list".into(),
                values: "[1,2]".into(),
            }
        );
    }

    #[test]
    fn test_cli_missing_command_is_error() {
        assert!(Cli::try_parse_from(["liteconf", "app"]).is_err());
    }

    #[test]
    fn test_into_cli_config_keeps_dir_and_name() {
        // Arrange
        let cli = Cli::parse_from(["liteconf", "--dir", "cfg/", "app.json", "clear"]);

        // Act
        let (config, command) = cli.into_cli_config().unwrap();

        // Assert
        assert_eq!(config.directory, "cfg/");
        assert_eq!(config.name, "app.json");
        assert_eq!(command, Command::Clear);
    }

    #[test]
    fn test_into_cli_config_empty_name_returns_error() {
        let cli = Cli {
            dir: ".".to_string(),
            name: "  ".to_string(),
            command: Command::Show,
        };

        assert!(cli.into_cli_config().is_err());
    }
}
