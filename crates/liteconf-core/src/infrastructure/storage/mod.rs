//! Storage infrastructure: configuration file persistence.
//!
//! - `layout` decides where a named configuration lives on disk.
//! - `backend` is the narrow file-system trait the store writes through.
//! - `store` implements the create/load/reset/save lifecycle.
//! - `mock` is an in-memory backend for tests.

pub mod backend;
pub mod layout;
pub mod mock;
pub mod store;

pub use backend::{DocumentStorage, FsStorage};
pub use layout::ConfigLayout;
pub use store::{ConfigStore, Lifecycle};
