/// Tuning for the physics world.

#[derive(Debug, Clone, Copy)]
pub struct WorldTuning {
    /// Downward acceleration in pixels per second squared.
    pub gravity: f32,

    /// Velocity damping coefficient, per second. 0.6 loses roughly 1% per
    /// 60 Hz step.
    pub linear_damping: f32,

    /// Contact friction coefficient.
    pub friction: f32,

    /// Mass per square pixel.
    pub density: f32,

    /// Pixels treated as one unit of length by the solver's tolerances.
    pub pixels_per_meter: f32,
}

impl Default for WorldTuning {
    fn default() -> Self {
        Self {
            gravity: 1000.0,
            linear_damping: 0.6,
            friction: 0.1,
            density: 0.001,
            pixels_per_meter: 100.0,
        }
    }
}
