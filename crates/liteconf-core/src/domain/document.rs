//! In-memory configuration document and its dotted-path operations.
//!
//! [`Document`] is pure data: it never touches the file system.  The
//! persistence layer (`ConfigStore`) wraps it and saves after each mutation.
//!
//! # Read side vs. write side
//!
//! | Operation            | Missing intermediate mapping     |
//! |----------------------|----------------------------------|
//! | `get*`, `contains`   | `PathTraversal` error            |
//! | `set_array`, `remove`| `PathTraversal` error            |
//! | `set`                | created as an empty mapping      |

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::path::{self, DottedPath};
use crate::domain::value::{json_type_name, ConfigValue};
use crate::error::{ConfigError, Result};

/// Root JSON object of one configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    root: Map<String, Value>,
}

impl Document {
    /// Creates an empty document (`{}`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing JSON object.
    pub fn from_map(root: Map<String, Value>) -> Self {
        Self { root }
    }

    /// The whole tree, read-only.
    pub fn root(&self) -> &Map<String, Value> {
        &self.root
    }

    /// Consumes the document and returns its root object.
    pub fn into_map(self) -> Map<String, Value> {
        self.root
    }

    /// `true` when the root has no fields.
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    // ── Read side ─────────────────────────────────────────────────────────────

    /// Reads the field at `path` as `T`.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidPath`] for a malformed path.
    /// - [`ConfigError::PathTraversal`] if an intermediate mapping is missing.
    /// - [`ConfigError::FieldNotFound`] if the field is absent.
    /// - [`ConfigError::TypeMismatch`] if the field is not a `T`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use liteconf_core::Document;
    ///
    /// let mut doc = Document::new();
    /// doc.set("server.port", 8080).unwrap();
    /// assert_eq!(doc.get::<i64>("server.port").unwrap(), 8080);
    /// ```
    pub fn get<T: ConfigValue>(&self, path: &str) -> Result<T> {
        let path = DottedPath::parse(path)?;
        let value = self.field(&path)?;
        T::from_value(value).ok_or_else(|| mismatch::<T>(path.as_str(), value))
    }

    /// Reads the array at `path`, checking every element as `T`.
    ///
    /// The first element of the wrong type fails the whole call; nothing is
    /// returned partially.
    ///
    /// # Errors
    ///
    /// As [`Document::get`], plus [`ConfigError::TypeMismatch`] naming the
    /// offending element (`path[index]`).
    pub fn get_array<T: ConfigValue>(&self, path: &str) -> Result<Vec<T>> {
        let path = DottedPath::parse(path)?;
        let value = self.field(&path)?;
        let items = match value {
            Value::Array(items) => items,
            other => {
                return Err(ConfigError::TypeMismatch {
                    path: path.to_string(),
                    expected: "array",
                    actual: json_type_name(other).to_string(),
                })
            }
        };

        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                T::from_value(item)
                    .ok_or_else(|| mismatch::<T>(&format!("{path}[{index}]"), item))
            })
            .collect()
    }

    /// Deserializes the field at `path` into any serde type.
    ///
    /// # Errors
    ///
    /// As [`Document::get`]; a deserialization failure is reported as
    /// [`ConfigError::TypeMismatch`].
    pub fn get_as<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let path = DottedPath::parse(path)?;
        let value = self.field(&path)?;
        serde_json::from_value(value.clone()).map_err(|e| ConfigError::TypeMismatch {
            path: path.to_string(),
            expected: std::any::type_name::<T>(),
            actual: e.to_string(),
        })
    }

    /// Reads a string field.
    pub fn get_string(&self, path: &str) -> Result<String> {
        self.get(path)
    }

    /// Reads an integer field; floats and out-of-range numbers are a type mismatch.
    pub fn get_int(&self, path: &str) -> Result<i64> {
        self.get(path)
    }

    /// Reads a numeric field as `f64`, widening integers.
    pub fn get_float(&self, path: &str) -> Result<f64> {
        self.get(path)
    }

    /// Reads a boolean field.
    pub fn get_bool(&self, path: &str) -> Result<bool> {
        self.get(path)
    }

    /// Reads any field as a raw JSON value, `null` included.
    pub fn get_value(&self, path: &str) -> Result<Value> {
        self.get(path)
    }

    /// Reads a nested mapping.
    pub fn get_object(&self, path: &str) -> Result<Map<String, Value>> {
        self.get(path)
    }

    /// Reads an array whose elements are all strings.
    pub fn get_string_array(&self, path: &str) -> Result<Vec<String>> {
        self.get_array(path)
    }

    /// Reads an array whose elements are all integers.
    pub fn get_int_array(&self, path: &str) -> Result<Vec<i64>> {
        self.get_array(path)
    }

    /// Reads an array of numbers as `f64`.
    pub fn get_float_array(&self, path: &str) -> Result<Vec<f64>> {
        self.get_array(path)
    }

    /// Reads an array whose elements are all booleans.
    pub fn get_bool_array(&self, path: &str) -> Result<Vec<bool>> {
        self.get_array(path)
    }

    /// Reads an array of raw JSON values.
    pub fn get_value_array(&self, path: &str) -> Result<Vec<Value>> {
        self.get_array(path)
    }

    /// Reads an array whose elements are all mappings.
    pub fn get_object_array(&self, path: &str) -> Result<Vec<Map<String, Value>>> {
        self.get_array(path)
    }

    /// Reports whether the field at `path` exists, whatever its type.
    ///
    /// # Errors
    ///
    /// [`ConfigError::PathTraversal`] if an intermediate mapping is missing.
    pub fn contains(&self, path: &str) -> Result<bool> {
        let path = DottedPath::parse(path)?;
        Ok(path::resolve(&self.root, &path)?.contains_key(path.field()))
    }

    // ── Write side ────────────────────────────────────────────────────────────

    /// Stores `value` at `path`, creating missing intermediate mappings.
    ///
    /// Any previous value is replaced, whatever its type.
    ///
    /// # Errors
    ///
    /// [`ConfigError::PathTraversal`] if an existing intermediate is not a
    /// mapping.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) -> Result<()> {
        let path = DottedPath::parse(path)?;
        path::resolve_or_create(&mut self.root, &path)?
            .insert(path.field().to_string(), value.into());
        Ok(())
    }

    /// Serializes `value` with serde and stores it like [`Document::set`].
    ///
    /// # Errors
    ///
    /// [`ConfigError::Serialize`] if `value` cannot be represented as JSON,
    /// otherwise as [`Document::set`].
    pub fn set_serialized<T: Serialize + ?Sized>(&mut self, path: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)?;
        self.set(path, value)
    }

    /// Stores `values` as an ordered array at `path`.
    ///
    /// Unlike [`Document::set`], the destination mapping must already exist.
    ///
    /// # Errors
    ///
    /// [`ConfigError::PathTraversal`] if an intermediate mapping is missing.
    pub fn set_array<I, T>(&mut self, path: &str, values: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        let path = DottedPath::parse(path)?;
        let array = Value::Array(values.into_iter().map(Into::into).collect());
        path::resolve_mut(&mut self.root, &path)?.insert(path.field().to_string(), array);
        Ok(())
    }

    /// Removes the field at `path`, returning its previous value.
    ///
    /// Removing an absent field is a no-op.  Sibling order is preserved.
    ///
    /// # Errors
    ///
    /// [`ConfigError::PathTraversal`] if an intermediate mapping is missing.
    pub fn remove(&mut self, path: &str) -> Result<Option<Value>> {
        let path = DottedPath::parse(path)?;
        Ok(path::resolve_mut(&mut self.root, &path)?.shift_remove(path.field()))
    }

    /// Drops every field.
    pub fn clear(&mut self) {
        self.root = Map::new();
    }

    fn field(&self, path: &DottedPath) -> Result<&Value> {
        path::resolve(&self.root, path)?
            .get(path.field())
            .ok_or_else(|| ConfigError::FieldNotFound {
                path: path.to_string(),
            })
    }
}

impl From<Map<String, Value>> for Document {
    fn from(root: Map<String, Value>) -> Self {
        Self::from_map(root)
    }
}

fn mismatch<T: ConfigValue>(path: &str, found: &Value) -> ConfigError {
    ConfigError::TypeMismatch {
        path: path.to_string(),
        expected: T::TYPE_NAME,
        actual: json_type_name(found).to_string(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
