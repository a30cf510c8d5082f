//! # liteconf-core
//!
//! Named JSON configuration files in one directory, read and written through
//! dotted paths such as `"server.port"` instead of nested accessor calls.
//!
//! # Architecture overview
//!
//! - **`domain`** – The [`Document`] tree, [`DottedPath`] parsing and the
//!   typed accessors.  Pure logic, no I/O.
//!
//! - **`infrastructure`** – [`ConfigStore`]: binds a document to its file,
//!   creates missing files, resets unparsable ones and saves after every
//!   mutation.  File access goes through the [`DocumentStorage`] trait.
//!
//! - **`application`** – [`Registry`]: an explicitly constructed map from
//!   configuration name to store, rooted at one directory.
//!
//! # Example
//!
//! ```rust,no_run
//! use liteconf_core::{ErrorKind, Registry};
//!
//! let mut registry = Registry::initialize("cfg", ["app"])?;
//! let app = registry.get_mut("app")?;
//!
//! app.set("server.port", 8080)?;
//! app.set_array("server.hosts", ["a.example", "b.example"])?;
//!
//! assert_eq!(app.get_int("server.port")?, 8080);
//! match app.get_string("missing.key") {
//!     Err(e) if e.kind() == ErrorKind::PathTraversal => {}
//!     other => panic!("unexpected: {other:?}"),
//! }
//! # Ok::<(), liteconf_core::ConfigError>(())
//! ```
//!
//! The library logs through `tracing` and never installs a subscriber.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-export the most-used types at the crate root so callers can write
// `liteconf_core::ConfigStore` instead of the full module path.
pub use application::registry::Registry;
pub use domain::document::Document;
pub use domain::path::DottedPath;
pub use domain::value::ConfigValue;
pub use error::{ConfigError, ErrorKind, Result, TraversalFailure};
pub use infrastructure::storage::backend::{DocumentStorage, FsStorage};
pub use infrastructure::storage::layout::ConfigLayout;
pub use infrastructure::storage::mock::MockStorage;
pub use infrastructure::storage::store::{ConfigStore, Lifecycle};
