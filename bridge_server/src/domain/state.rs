// Render-facing snapshots of the simulation. Reading them never mutates state.

use super::geometry::Vec2;

#[derive(Debug, Clone, PartialEq)]
pub struct LinkSnapshot {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub anchor: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParticleSnapshot {
    pub id: u64,
    pub x: f32,
    pub y: f32,
    pub rot: f32,
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HandSnapshot {
    /// Every keypoint of the tracked hand, in model order.
    pub keypoints: Vec<Vec2>,
    pub thumb_tip: Vec2,
    pub index_tip: Vec2,
}
