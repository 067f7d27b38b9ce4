use super::sketch::Sketch;
use super::types::{TrackedHand, WorldUpdate};
use crate::domain::PhysicsWorld;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Notify, broadcast, watch};
use tracing::{debug, info};

/// Drive the sketch at a fixed tick rate until `shutdown` fires.
///
/// `hands_rx` is a latest-value cell: observations that arrive between ticks
/// overwrite each other and only the most recent one is used.
pub async fn world_task<W, R>(
    mut sketch: Sketch<W>,
    hands_rx: watch::Receiver<Option<TrackedHand>>,
    world_tx: broadcast::Sender<WorldUpdate>,
    tick_interval: Duration,
    mut rng: R,
    shutdown: Arc<Notify>,
) where
    W: PhysicsWorld,
    R: Rng,
{
    let dt = tick_interval.as_secs_f32();
    let mut interval = tokio::time::interval(tick_interval);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    info!(
        tick_ms = tick_interval.as_millis() as u64,
        links = sketch.bridge().links(sketch.world()).len(),
        "sketch loop started"
    );

    let mut tracking = false;

    loop {
        tokio::select! {
            _ = shutdown.notified() => {
                break;
            }
            _ = interval.tick() => {}
        }

        // Clone out of the cell so the sender is never blocked by a tick.
        let observation = hands_rx
            .borrow()
            .as_ref()
            .map(|hand| hand.observation.clone());
        if observation.is_some() != tracking {
            tracking = observation.is_some();
            debug!(tracking, "hand tracking changed");
        }

        let update = sketch.tick(observation.as_ref(), &mut rng, dt);

        // No receivers just means nobody is watching yet.
        let _ = world_tx.send(update);
    }

    info!(particles = sketch.particles().len(), "sketch loop stopped");
}
