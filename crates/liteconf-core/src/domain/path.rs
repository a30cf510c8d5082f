//! Dotted-path parsing and destination-node resolution.
//!
//! A dotted path such as `"server.tls.port"` is split into segments.  The last
//! segment is the *field name*; every segment before it names a nested
//! mapping that must be walked to reach the *destination node*, the mapping
//! that directly holds the field.
//!
//! ```text
//! "server.tls.port"
//!   parents: ["server", "tls"]   walked from the document root
//!   field:   "port"              looked up by the caller, never walked
//! ```
//!
//! Resolution never inspects the field itself.  Whether it exists and what
//! type it holds is decided by the accessor that asked for the node.

use serde_json::{Map, Value};

use crate::domain::value::json_type_name;
use crate::error::{ConfigError, Result, TraversalFailure};

/// A parsed, validated dotted path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DottedPath {
    raw: String,
    segments: Vec<String>,
}

impl DottedPath {
    /// Splits `raw` on `.` into segments.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPath`] if `raw` is empty or any segment
    /// is empty (`"a..b"`, `".a"`, `"a."`).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use liteconf_core::DottedPath;
    ///
    /// let path = DottedPath::parse("server.port").unwrap();
    /// assert_eq!(path.parents(), ["server".to_string()]);
    /// assert_eq!(path.field(), "port");
    /// ```
    pub fn parse(raw: &str) -> Result<Self> {
        let segments: Vec<String> = raw.split('.').map(str::to_owned).collect();
        if raw.is_empty() || segments.iter().any(String::is_empty) {
            return Err(ConfigError::InvalidPath {
                path: raw.to_string(),
            });
        }
        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// The path exactly as it was given.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// All segments in order, field name last.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The segments naming the chain of mappings above the field.
    pub fn parents(&self) -> &[String] {
        &self.segments[..self.segments.len() - 1]
    }

    /// The final segment.
    pub fn field(&self) -> &str {
        &self.segments[self.segments.len() - 1]
    }

    /// `true` when the path has no parents and resolves to the root.
    pub fn is_top_level(&self) -> bool {
        self.segments.len() == 1
    }

    fn traversal_error(&self, segment: &str, reason: TraversalFailure) -> ConfigError {
        ConfigError::PathTraversal {
            path: self.raw.clone(),
            segment: segment.to_string(),
            reason,
        }
    }
}

impl std::fmt::Display for DottedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

impl std::str::FromStr for DottedPath {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Returns the mapping that must contain `path.field()`.
///
/// # Errors
///
/// Returns [`ConfigError::PathTraversal`] if an intermediate segment is
/// missing or holds something other than a mapping.
pub fn resolve<'a>(
    root: &'a Map<String, Value>,
    path: &DottedPath,
) -> Result<&'a Map<String, Value>> {
    let mut current = root;
    for segment in path.parents() {
        current = match current.get(segment) {
            Some(Value::Object(map)) => map,
            Some(other) => {
                return Err(path.traversal_error(
                    segment,
                    TraversalFailure::NotAnObject {
                        actual: json_type_name(other),
                    },
                ))
            }
            None => return Err(path.traversal_error(segment, TraversalFailure::Missing)),
        };
    }
    Ok(current)
}

/// Mutable counterpart of [`resolve`]; intermediates must already exist.
///
/// # Errors
///
/// Same as [`resolve`].
pub fn resolve_mut<'a>(
    root: &'a mut Map<String, Value>,
    path: &DottedPath,
) -> Result<&'a mut Map<String, Value>> {
    let mut current = root;
    for segment in path.parents() {
        current = match current.get_mut(segment) {
            Some(Value::Object(map)) => map,
            Some(other) => {
                return Err(path.traversal_error(
                    segment,
                    TraversalFailure::NotAnObject {
                        actual: json_type_name(other),
                    },
                ))
            }
            None => return Err(path.traversal_error(segment, TraversalFailure::Missing)),
        };
    }
    Ok(current)
}

/// Walks `path` like [`resolve_mut`], inserting an empty mapping for every
/// missing intermediate segment.
///
/// # Errors
///
/// Returns [`ConfigError::PathTraversal`] if an existing intermediate holds
/// a non-mapping value.  Such values are never overwritten.
pub fn resolve_or_create<'a>(
    root: &'a mut Map<String, Value>,
    path: &DottedPath,
) -> Result<&'a mut Map<String, Value>> {
    let mut current = root;
    for segment in path.parents() {
        let entry = current
            .entry(segment.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        current = match entry {
            Value::Object(map) => map,
            other => {
                return Err(path.traversal_error(
                    segment,
                    TraversalFailure::NotAnObject {
                        actual: json_type_name(other),
                    },
                ))
            }
        };
    }
    Ok(current)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
