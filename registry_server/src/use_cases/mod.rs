// Use cases layer: application workflows for the user registry.

pub mod registry;

pub use registry::UserRegistry;
