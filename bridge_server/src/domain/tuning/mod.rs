// Sketch tuning, kept separate from runtime/server configuration.

pub mod bridge;
pub mod particle;
pub mod world;
