pub mod bridge;
pub mod particles;

#[cfg(test)]
pub(crate) mod test_support;

pub use bridge::Bridge;
pub use particles::{Particle, ParticleField};
