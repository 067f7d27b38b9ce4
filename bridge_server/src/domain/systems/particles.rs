// Falling particles: random spawning near the top of the frame, culling once they drop out of view.

use crate::domain::tuning::particle::ParticleTuning;
use crate::domain::{BodyHandle, BodyOptions, CollisionFilter, Frame, ParticleSnapshot, PhysicsWorld, Vec2};
use rand::Rng;
use tracing::debug;

/// A live particle. Its body is owned by the physics world.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub id: u64,
    pub body: BodyHandle,
    pub radius: f32,
}

#[derive(Debug)]
pub struct ParticleField {
    particles: Vec<Particle>,
    tuning: ParticleTuning,
    next_id: u64,
}

impl ParticleField {
    pub fn new(tuning: ParticleTuning) -> Self {
        Self {
            particles: Vec::new(),
            tuning: ParticleTuning {
                spawn_probability: tuning.spawn_probability.clamp(0.0, 1.0),
                spawn_spread: tuning.spawn_spread.abs(),
                ..tuning
            },
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Spawn one particle with the tuned probability. Returns whether one was spawned.
    pub fn maybe_spawn<W, R>(&mut self, world: &mut W, rng: &mut R, frame: Frame) -> bool
    where
        W: PhysicsWorld,
        R: Rng,
    {
        if !rng.random_bool(self.tuning.spawn_probability) {
            return false;
        }

        let spread = self.tuning.spawn_spread;
        let x = frame.center_x() + rng.random_range(-spread..=spread);
        self.spawn_at(world, Vec2::new(x, 0.0));
        true
    }

    /// Create a particle at `position` and start tracking it.
    pub fn spawn_at<W: PhysicsWorld>(&mut self, world: &mut W, position: Vec2) -> u64 {
        let body = world.create_circle(
            position,
            self.tuning.radius,
            BodyOptions {
                restitution: self.tuning.restitution,
                is_static: false,
                collision_filter: CollisionFilter::with_category(self.tuning.category),
            },
        );

        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.particles.push(Particle {
            id,
            body,
            radius: self.tuning.radius,
        });
        debug!(particle_id = id, x = position.x, "particle spawned");
        id
    }

    /// Remove every particle that has fallen below the frame, from both the
    /// world and the collection. Returns how many were removed.
    pub fn cull<W: PhysicsWorld>(&mut self, world: &mut W, frame: Frame) -> usize {
        let mut removed = 0;
        // Walk backwards so removal never shifts an unvisited entry.
        for i in (0..self.particles.len()).rev() {
            let particle = self.particles[i];
            let out_of_bounds = match world.position(particle.body) {
                Some(pos) => pos.y > frame.height + particle.radius,
                // The body is already gone from the world; stop tracking it.
                None => true,
            };

            if out_of_bounds {
                world.remove(particle.body);
                self.particles.remove(i);
                removed += 1;
            }
        }
        removed
    }

    pub fn snapshots<W: PhysicsWorld>(&self, world: &W) -> Vec<ParticleSnapshot> {
        self.particles
            .iter()
            .filter_map(|p| {
                let pos = world.position(p.body)?;
                Some(ParticleSnapshot {
                    id: p.id,
                    x: pos.x,
                    y: pos.y,
                    rot: world.angle(p.body).unwrap_or(0.0),
                    radius: p.radius,
                })
            })
            .collect()
    }
}

impl Default for ParticleField {
    fn default() -> Self {
        Self::new(ParticleTuning::default())
    }
}
