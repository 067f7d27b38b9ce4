use slotmap::SlotMap;

use crate::domain::{BodyHandle, BodyOptions, PhysicsWorld, Vec2};

// Body record kept by the fake world.
#[derive(Debug, Clone)]
pub(crate) struct FakeBody {
    pub position: Vec2,
    pub radius: f32,
    pub options: BodyOptions,
}

// Distance constraint as registered by the code under test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct FakeConstraint {
    pub a: BodyHandle,
    pub b: BodyHandle,
    pub length: f32,
    pub stiffness: f32,
}

// Deterministic stand-in for the physics engine. Each step moves dynamic
// bodies down by `fall_per_step` and never touches static bodies.
#[derive(Debug, Default)]
pub(crate) struct RecordingWorld {
    pub bodies: SlotMap<BodyHandle, FakeBody>,
    pub constraints: Vec<FakeConstraint>,
    pub fall_per_step: f32,
    pub steps: usize,
    pub removed: Vec<BodyHandle>,
}

impl RecordingWorld {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_fall(fall_per_step: f32) -> Self {
        Self {
            fall_per_step,
            ..Self::default()
        }
    }

    pub(crate) fn body(&self, handle: BodyHandle) -> &FakeBody {
        &self.bodies[handle]
    }
}

impl PhysicsWorld for RecordingWorld {
    fn create_circle(&mut self, position: Vec2, radius: f32, options: BodyOptions) -> BodyHandle {
        self.bodies.insert(FakeBody {
            position,
            radius,
            options,
        })
    }

    fn add_distance_constraint(&mut self, a: BodyHandle, b: BodyHandle, length: f32, stiffness: f32) {
        self.constraints.push(FakeConstraint {
            a,
            b,
            length,
            stiffness,
        });
    }

    fn set_static(&mut self, body: BodyHandle, is_static: bool) {
        if let Some(b) = self.bodies.get_mut(body) {
            b.options.is_static = is_static;
        }
    }

    fn set_position(&mut self, body: BodyHandle, position: Vec2) {
        if let Some(b) = self.bodies.get_mut(body) {
            b.position = position;
        }
    }

    fn position(&self, body: BodyHandle) -> Option<Vec2> {
        self.bodies.get(body).map(|b| b.position)
    }

    fn angle(&self, body: BodyHandle) -> Option<f32> {
        self.bodies.get(body).map(|_| 0.0)
    }

    fn remove(&mut self, body: BodyHandle) -> bool {
        let removed = self.bodies.remove(body).is_some();
        if removed {
            self.removed.push(body);
            self.constraints.retain(|c| c.a != body && c.b != body);
        }
        removed
    }

    fn step(&mut self, _dt: f32) {
        self.steps += 1;
        let fall = self.fall_per_step;
        for body in self.bodies.values_mut() {
            if !body.options.is_static {
                body.position.y += fall;
            }
        }
    }

    fn body_count(&self) -> usize {
        self.bodies.len()
    }
}
