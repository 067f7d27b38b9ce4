// Frameworks layer: runtime bootstrap, configuration and the physics engine.

pub mod config;
pub mod physics;
pub mod server;
