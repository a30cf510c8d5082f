//! Error taxonomy shared by every layer of the crate.
//!
//! All fallible operations return [`ConfigError`].  Each variant is a
//! distinct failure kind so callers can branch on it, either by matching the
//! variant directly or through the field-less [`ErrorKind`] returned by
//! [`ConfigError::kind`].

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Why descending through an intermediate path segment failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalFailure {
    /// The segment is not present in its parent mapping.
    Missing,
    /// The segment is present but holds something other than a mapping.
    NotAnObject {
        /// JSON type name of the value that was found.
        actual: &'static str,
    },
}

impl std::fmt::Display for TraversalFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TraversalFailure::Missing => write!(f, "segment does not exist"),
            TraversalFailure::NotAnObject { actual } => {
                write!(f, "segment holds {actual}, not an object")
            }
        }
    }
}

/// Error type for configuration access and persistence.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The dotted path is empty or contains an empty segment.
    #[error("invalid dotted path {path:?}: segments must be non-empty")]
    InvalidPath { path: String },

    /// An intermediate segment of the path is missing or not a mapping.
    #[error("cannot traverse {path:?} at segment {segment:?}: {reason}")]
    PathTraversal {
        path: String,
        segment: String,
        reason: TraversalFailure,
    },

    /// The final field of the path is absent from its destination node.
    #[error("field {path:?} not found")]
    FieldNotFound { path: String },

    /// The stored value does not have the type the caller asked for.
    #[error("type mismatch at {path:?}: expected {expected}, found {actual}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        actual: String,
    },

    /// No configuration with this name has been registered.
    #[error("configuration {name:?} does not exist")]
    ConfigNotFound { name: String },

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    StorageIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A value could not be converted to or from JSON.
    #[error("failed to serialize config value: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The file content is not a JSON object.
    ///
    /// Only produced while loading; [`crate::ConfigStore::open`] recovers from
    /// it by resetting the document, so callers never receive it.
    #[error("malformed config document at {path}: {source}")]
    MalformedDocument {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Field-less discriminant of [`ConfigError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidPath,
    PathTraversal,
    FieldNotFound,
    TypeMismatch,
    ConfigNotFound,
    StorageIo,
    Serialize,
    MalformedDocument,
}

impl ConfigError {
    /// Returns the kind of failure without its payload.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConfigError::InvalidPath { .. } => ErrorKind::InvalidPath,
            ConfigError::PathTraversal { .. } => ErrorKind::PathTraversal,
            ConfigError::FieldNotFound { .. } => ErrorKind::FieldNotFound,
            ConfigError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            ConfigError::ConfigNotFound { .. } => ErrorKind::ConfigNotFound,
            ConfigError::StorageIo { .. } => ErrorKind::StorageIo,
            ConfigError::Serialize(_) => ErrorKind::Serialize,
            ConfigError::MalformedDocument { .. } => ErrorKind::MalformedDocument,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::StorageIo {
            path: path.into(),
            source,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        let err = ConfigError::FieldNotFound {
            path: "a.b".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::FieldNotFound);

        let err = ConfigError::io("cfg/app.json", std::io::ErrorKind::NotFound.into());
        assert_eq!(err.kind(), ErrorKind::StorageIo);
    }

    #[test]
    fn test_path_traversal_message_names_segment_and_reason() {
        // Arrange
        let err = ConfigError::PathTraversal {
            path: "server.port".to_string(),
            segment: "server".to_string(),
            reason: TraversalFailure::NotAnObject { actual: "string" },
        };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains("\"server\""), "got: {msg}");
        assert!(msg.contains("string, not an object"), "got: {msg}");
    }

    #[test]
    fn test_storage_io_exposes_source() {
        use std::error::Error as _;

        let err = ConfigError::io(
            "cfg/app.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.source().is_some());
        assert!(err.to_string().contains("cfg/app.json"));
    }
}
