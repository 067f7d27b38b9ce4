// Use cases layer: the per-frame sketch workflow and the loop that drives it.

pub mod sketch;
pub mod types;
pub mod world;

pub use sketch::Sketch;
pub use types::{TrackedHand, WorldUpdate};
pub use world::world_task;
