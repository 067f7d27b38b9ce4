// Domain layer: core simulation types and rules.

pub mod geometry;
pub mod hand;
pub mod ports;
pub mod state;
pub mod systems;
pub mod tuning;

pub use geometry::{Frame, Vec2};
pub use hand::{HandObservation, Keypoint, ObservationError};
pub use ports::{BodyHandle, BodyOptions, CollisionFilter, PhysicsWorld};
pub use state::{HandSnapshot, LinkSnapshot, ParticleSnapshot};
