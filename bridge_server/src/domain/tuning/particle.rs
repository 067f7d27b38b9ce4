/// Tuning for the falling particles.

#[derive(Debug, Clone, Copy)]
pub struct ParticleTuning {
    /// Chance of spawning one particle per frame.
    pub spawn_probability: f64,

    /// Particles spawn within this many pixels either side of frame center.
    pub spawn_spread: f32,

    pub radius: f32,

    pub restitution: f32,

    /// Collision category bit, distinct from the bridge's default category.
    pub category: u32,
}

impl Default for ParticleTuning {
    fn default() -> Self {
        Self {
            spawn_probability: 0.05,
            spawn_spread: 60.0,
            radius: 8.0,
            restitution: 0.6,
            category: 0x0002,
        }
    }
}
