//! Infrastructure layer: file-system adapters.
//!
//! **Dependency rule**: this layer may depend on `domain`, but MUST NOT be
//! imported by it.

pub mod storage;
