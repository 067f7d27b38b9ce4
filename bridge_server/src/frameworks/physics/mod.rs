// rapier2d adapter behind the `PhysicsWorld` port.

mod filter;
pub mod world;

pub use world::RapierWorld;
