//! Domain layer: the configuration document and dotted-path semantics.
//!
//! Everything here is pure in-memory logic.  No file system access, no
//! logging, no global state.  The infrastructure layer wraps these types to
//! add persistence.

/// Dotted-path parsing and destination-node resolution.
pub mod path;

/// Checked extraction of typed values from JSON.
pub mod value;

/// The in-memory document and its get/set/remove operations.
pub mod document;

pub use document::Document;
pub use path::DottedPath;
pub use value::ConfigValue;
