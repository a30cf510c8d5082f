//! Checked extraction of typed values from JSON.
//!
//! [`ConfigValue`] is implemented for every type the accessors can return.
//! Each implementation performs an explicit match on the JSON variant and
//! returns `None` when the stored value is of another kind; the caller turns
//! that into a [`crate::ConfigError::TypeMismatch`].

use serde_json::{Map, Value};

/// Name of a value's JSON type, used in error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A type that can be read out of a configuration document.
pub trait ConfigValue: Sized {
    /// Human-readable type name reported on mismatch.
    const TYPE_NAME: &'static str;

    /// Returns the typed value, or `None` if `value` has another JSON type.
    fn from_value(value: &Value) -> Option<Self>;
}

impl ConfigValue for String {
    const TYPE_NAME: &'static str = "string";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}

impl ConfigValue for i64 {
    const TYPE_NAME: &'static str = "integer";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_i64()
    }
}

/// Any JSON number widens to `f64`.
impl ConfigValue for f64 {
    const TYPE_NAME: &'static str = "float";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_f64()
    }
}

impl ConfigValue for bool {
    const TYPE_NAME: &'static str = "boolean";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

/// Untyped access; never mismatches.
impl ConfigValue for Value {
    const TYPE_NAME: &'static str = "value";

    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl ConfigValue for Map<String, Value> {
    const TYPE_NAME: &'static str = "object";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_object().cloned()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
