//! Application layer: wiring named stores into a registry.

pub mod registry;

pub use registry::Registry;
