/// 2D vector in frame (pixel) coordinates, +Y pointing down.
pub use glam::Vec2;

/// Visible area the sketch simulates and renders into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub width: f32,
    pub height: f32,
}

impl Frame {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center_x(&self) -> f32 {
        self.width / 2.0
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new(640.0, 480.0)
    }
}
