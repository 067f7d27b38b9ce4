/// Tuning for the hand-held chain of linked circles.

#[derive(Debug, Clone, Copy)]
pub struct BridgeTuning {
    /// Number of links, anchors included. Also the link spacing in pixels.
    pub links: usize,

    /// Horizontal span the links are laid out across at construction.
    pub start_x: f32,
    pub end_x: f32,

    /// Vertical position as a fraction of frame height.
    pub height_fraction: f32,

    pub restitution: f32,

    /// Distance constraint stiffness (1 = rigid).
    pub stiffness: f32,
}

impl BridgeTuning {
    /// Link radius; neighbouring circles just touch at rest.
    pub fn radius(&self) -> f32 {
        self.links as f32 / 2.0
    }

    /// Rest length of every link-to-link constraint.
    pub fn link_length(&self) -> f32 {
        self.links as f32
    }
}

impl Default for BridgeTuning {
    fn default() -> Self {
        Self {
            links: 16,
            start_x: 220.0,
            end_x: 420.0,
            height_fraction: 0.75,
            restitution: 0.7,
            stiffness: 1.0,
        }
    }
}
