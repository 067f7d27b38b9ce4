// Chain of linked circles whose end links follow the thumb and index fingertips.

use crate::domain::tuning::bridge::BridgeTuning;
use crate::domain::{BodyHandle, BodyOptions, Frame, HandObservation, LinkSnapshot, PhysicsWorld, Vec2};

/// The bridge owns its link handles for the lifetime of the sketch; the
/// bodies themselves live in the physics world.
#[derive(Debug)]
pub struct Bridge {
    links: Vec<BodyHandle>,
    radius: f32,
}

impl Bridge {
    /// Lay out the links evenly across the tuned span, chain neighbours with
    /// distance constraints and pin both ends as static anchors.
    pub fn new<W: PhysicsWorld>(world: &mut W, frame: Frame, tuning: BridgeTuning) -> Self {
        // A chain needs two anchors.
        let tuning = BridgeTuning {
            links: tuning.links.max(2),
            ..tuning
        };
        let radius = tuning.radius();
        let y = frame.height * tuning.height_fraction;
        let last_index = (tuning.links - 1) as f32;

        let links: Vec<BodyHandle> = (0..tuning.links)
            .map(|i| {
                let t = i as f32 / last_index;
                let x = tuning.start_x + t * (tuning.end_x - tuning.start_x);
                world.create_circle(
                    Vec2::new(x, y),
                    radius,
                    BodyOptions {
                        restitution: tuning.restitution,
                        ..BodyOptions::default()
                    },
                )
            })
            .collect();

        for pair in links.windows(2) {
            world.add_distance_constraint(pair[0], pair[1], tuning.link_length(), tuning.stiffness);
        }

        let bridge = Self { links, radius };
        world.set_static(bridge.first(), true);
        world.set_static(bridge.last(), true);
        bridge
    }

    fn first(&self) -> BodyHandle {
        self.links[0]
    }

    fn last(&self) -> BodyHandle {
        self.links[self.links.len() - 1]
    }

    /// Teleport the anchors onto the fingertips: thumb first, then index.
    /// Without an observation the anchors stay where they were.
    pub fn reposition_anchors<W: PhysicsWorld>(&self, world: &mut W, observation: Option<&HandObservation>) {
        let Some(hand) = observation else {
            return;
        };
        world.set_position(self.first(), hand.thumb_tip());
        world.set_position(self.last(), hand.index_tip());
    }

    /// Current anchor positions (first, last).
    pub fn anchor_positions<W: PhysicsWorld>(&self, world: &W) -> Option<(Vec2, Vec2)> {
        Some((world.position(self.first())?, world.position(self.last())?))
    }

    pub fn links<W: PhysicsWorld>(&self, world: &W) -> Vec<LinkSnapshot> {
        let last = self.links.len() - 1;
        self.links
            .iter()
            .enumerate()
            .filter_map(|(i, &handle)| {
                world.position(handle).map(|pos| LinkSnapshot {
                    x: pos.x,
                    y: pos.y,
                    radius: self.radius,
                    anchor: i == 0 || i == last,
                })
            })
            .collect()
    }
}
