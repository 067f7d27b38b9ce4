// Port for the 2D physics simulation the sketch runs inside.

use super::geometry::Vec2;

slotmap::new_key_type! {
    /// Handle to a body owned by a `PhysicsWorld`.
    pub struct BodyHandle;
}

/// Collision category/mask/group triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionFilter {
    pub category: u32,
    pub mask: u32,
    /// Same non-zero group: positive always collides, negative never does.
    pub group: i32,
}

impl CollisionFilter {
    pub const DEFAULT_CATEGORY: u32 = 0x0001;

    pub const fn with_category(category: u32) -> Self {
        Self {
            category,
            mask: u32::MAX,
            group: 0,
        }
    }

    pub fn can_collide(&self, other: &CollisionFilter) -> bool {
        if self.group == other.group && self.group != 0 {
            return self.group > 0;
        }
        (self.mask & other.category) != 0 && (other.mask & self.category) != 0
    }
}

impl Default for CollisionFilter {
    fn default() -> Self {
        Self::with_category(Self::DEFAULT_CATEGORY)
    }
}

/// Options for creating a circular body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyOptions {
    pub restitution: f32,
    /// Static bodies are never integrated; only `set_position` moves them.
    pub is_static: bool,
    pub collision_filter: CollisionFilter,
}

impl Default for BodyOptions {
    fn default() -> Self {
        Self {
            restitution: 0.0,
            is_static: false,
            collision_filter: CollisionFilter::default(),
        }
    }
}

pub trait PhysicsWorld {
    /// Create a circle body and add it to the world.
    fn create_circle(&mut self, position: Vec2, radius: f32, options: BodyOptions) -> BodyHandle;

    /// Link two bodies with a distance constraint.
    fn add_distance_constraint(&mut self, a: BodyHandle, b: BodyHandle, length: f32, stiffness: f32);

    fn set_static(&mut self, body: BodyHandle, is_static: bool);

    /// Teleport a body. Dynamic bodies keep their velocity; static bodies have none.
    fn set_position(&mut self, body: BodyHandle, position: Vec2);

    fn position(&self, body: BodyHandle) -> Option<Vec2>;

    fn angle(&self, body: BodyHandle) -> Option<f32>;

    /// Remove a body and any constraints attached to it.
    fn remove(&mut self, body: BodyHandle) -> bool;

    /// Advance the simulation by `dt` seconds.
    fn step(&mut self, dt: f32);

    fn body_count(&self) -> usize;
}
