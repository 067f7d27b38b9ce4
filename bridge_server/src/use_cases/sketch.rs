use super::types::WorldUpdate;
use crate::domain::systems::{Bridge, ParticleField};
use crate::domain::tuning::bridge::BridgeTuning;
use crate::domain::tuning::particle::ParticleTuning;
use crate::domain::{Frame, HandObservation, HandSnapshot, PhysicsWorld};
use rand::Rng;

/// Application context for the bridge sketch: one physics world, the bridge
/// inside it and the particles falling onto it.
pub struct Sketch<W> {
    world: W,
    bridge: Bridge,
    particles: ParticleField,
    frame: Frame,
    tick: u64,
}

impl<W: PhysicsWorld> Sketch<W> {
    pub fn new(world: W, frame: Frame) -> Self {
        Self::with_tuning(world, frame, BridgeTuning::default(), ParticleTuning::default())
    }

    pub fn with_tuning(
        mut world: W,
        frame: Frame,
        bridge_tuning: BridgeTuning,
        particle_tuning: ParticleTuning,
    ) -> Self {
        let bridge = Bridge::new(&mut world, frame, bridge_tuning);
        Self {
            world,
            bridge,
            particles: ParticleField::new(particle_tuning),
            frame,
            tick: 0,
        }
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn bridge(&self) -> &Bridge {
        &self.bridge
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    /// Advance one frame: move the anchors, integrate, spawn, cull, then read
    /// back the render snapshot.
    pub fn tick<R: Rng>(&mut self, observation: Option<&HandObservation>, rng: &mut R, dt: f32) -> WorldUpdate {
        self.bridge.reposition_anchors(&mut self.world, observation);
        self.world.step(dt);
        self.particles.maybe_spawn(&mut self.world, rng, self.frame);
        self.particles.cull(&mut self.world, self.frame);

        self.tick += 1;
        self.snapshot(observation)
    }

    /// Pure read of the current state.
    pub fn snapshot(&self, observation: Option<&HandObservation>) -> WorldUpdate {
        WorldUpdate {
            tick: self.tick,
            links: self.bridge.links(&self.world),
            particles: self.particles.snapshots(&self.world),
            hand: observation.map(|hand| HandSnapshot {
                keypoints: hand.keypoints().iter().map(|k| k.position()).collect(),
                thumb_tip: hand.thumb_tip(),
                index_tip: hand.index_tip(),
            }),
        }
    }
}
