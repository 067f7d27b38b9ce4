use super::filter::{self, FilterHooks};
use crate::domain::tuning::world::WorldTuning;
use crate::domain::{BodyHandle, BodyOptions, PhysicsWorld, Vec2};
use rapier2d::prelude::*;
use slotmap::SlotMap;

/// Link stiffness at or above this becomes a rope joint; contacts between the
/// touching links keep it from folding, so the chain holds its length.
const RIGID_STIFFNESS: f32 = 1.0;
/// Acceleration-based spring stiffness for a link stiffness of 1.
const SPRING_STIFFNESS_SCALE: f32 = 3600.0;
const SPRING_DAMPING: f32 = 1.0;

/// `PhysicsWorld` backed by rapier2d.
///
/// Frame pixels are world units and +Y points down, so gravity is positive.
/// Static bodies are kinematic position-based: they never integrate, but
/// dynamic bodies still collide with them and feel their joints.
pub struct RapierWorld {
    handles: SlotMap<BodyHandle, RigidBodyHandle>,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    ccd_solver: CCDSolver,
    pipeline: PhysicsPipeline,
    params: IntegrationParameters,
    gravity: Vector<Real>,
    hooks: FilterHooks,
    tuning: WorldTuning,
}

impl RapierWorld {
    pub fn new(tuning: WorldTuning) -> Self {
        let params = IntegrationParameters {
            length_unit: tuning.pixels_per_meter,
            ..IntegrationParameters::default()
        };

        Self {
            handles: SlotMap::with_key(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            ccd_solver: CCDSolver::new(),
            pipeline: PhysicsPipeline::new(),
            params,
            gravity: vector![0.0, tuning.gravity],
            hooks: FilterHooks,
            tuning,
        }
    }

    pub fn joint_count(&self) -> usize {
        self.impulse_joints.len()
    }

    /// Linear velocity in pixels per second.
    pub fn velocity(&self, body: BodyHandle) -> Option<Vec2> {
        self.rigid_body(body).map(|rb| to_vec2(rb.linvel()))
    }

    fn rigid_body(&self, body: BodyHandle) -> Option<&RigidBody> {
        self.bodies.get(*self.handles.get(body)?)
    }

    fn rigid_body_mut(&mut self, body: BodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(*self.handles.get(body)?)
    }
}

impl Default for RapierWorld {
    fn default() -> Self {
        Self::new(WorldTuning::default())
    }
}

fn to_vector(v: Vec2) -> Vector<Real> {
    vector![v.x, v.y]
}

fn to_vec2(v: &Vector<Real>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

impl PhysicsWorld for RapierWorld {
    fn create_circle(&mut self, position: Vec2, radius: f32, options: BodyOptions) -> BodyHandle {
        let builder = if options.is_static {
            RigidBodyBuilder::kinematic_position_based()
        } else {
            RigidBodyBuilder::dynamic()
        };
        let rigid_body = builder
            .translation(to_vector(position))
            .linear_damping(self.tuning.linear_damping)
            .angular_damping(self.tuning.linear_damping)
            .ccd_enabled(true)
            .can_sleep(false)
            .build();
        let handle = self.bodies.insert(rigid_body);

        let filter = options.collision_filter;
        let collider = ColliderBuilder::ball(radius.abs())
            .restitution(options.restitution)
            .restitution_combine_rule(CoefficientCombineRule::Max)
            .friction(self.tuning.friction)
            .density(self.tuning.density)
            .user_data(filter::encode(filter));
        let collider = if filter.group == 0 {
            collider.collision_groups(filter::interaction_groups(filter))
        } else {
            collider.active_hooks(ActiveHooks::FILTER_CONTACT_PAIRS)
        };
        self.colliders
            .insert_with_parent(collider.build(), handle, &mut self.bodies);

        self.handles.insert(handle)
    }

    fn add_distance_constraint(&mut self, a: BodyHandle, b: BodyHandle, length: f32, stiffness: f32) {
        let (Some(&a), Some(&b)) = (self.handles.get(a), self.handles.get(b)) else {
            return;
        };
        let length = length.max(0.0);
        let stiffness = stiffness.clamp(0.0, 1.0);

        let joint: GenericJoint = if stiffness >= RIGID_STIFFNESS {
            RopeJointBuilder::new(length).build().into()
        } else {
            SpringJointBuilder::new(length, stiffness * SPRING_STIFFNESS_SCALE, SPRING_DAMPING)
                .build()
                .into()
        };
        self.impulse_joints.insert(a, b, joint, true);
    }

    fn set_static(&mut self, body: BodyHandle, is_static: bool) {
        let Some(rb) = self.rigid_body_mut(body) else {
            return;
        };
        if is_static {
            rb.set_body_type(RigidBodyType::KinematicPositionBased, true);
            rb.set_linvel(vector![0.0, 0.0], true);
            rb.set_angvel(0.0, true);
            let current = *rb.translation();
            rb.set_next_kinematic_translation(current);
        } else {
            rb.set_body_type(RigidBodyType::Dynamic, true);
        }
    }

    fn set_position(&mut self, body: BodyHandle, position: Vec2) {
        if !position.is_finite() {
            return;
        }
        let Some(rb) = self.rigid_body_mut(body) else {
            return;
        };
        let target = to_vector(position);
        rb.set_translation(target, true);
        // Pin the kinematic target too, so the teleport carries no velocity.
        if rb.is_kinematic() {
            rb.set_next_kinematic_translation(target);
        }
    }

    fn position(&self, body: BodyHandle) -> Option<Vec2> {
        self.rigid_body(body).map(|rb| to_vec2(rb.translation()))
    }

    fn angle(&self, body: BodyHandle) -> Option<f32> {
        self.rigid_body(body).map(|rb| rb.rotation().angle())
    }

    fn remove(&mut self, body: BodyHandle) -> bool {
        let Some(handle) = self.handles.remove(body) else {
            return false;
        };
        // Drops the body's collider and every joint attached to it.
        self.bodies.remove(
            handle,
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
        true
    }

    fn step(&mut self, dt: f32) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        self.params.dt = dt;

        self.pipeline.step(
            &self.gravity,
            &self.params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &self.hooks,
            &(),
        );
    }

    fn body_count(&self) -> usize {
        self.handles.len()
    }
}
