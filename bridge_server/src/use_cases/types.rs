// Use-case level outputs of the sketch loop.

use crate::domain::{HandObservation, HandSnapshot, LinkSnapshot, ParticleSnapshot};

/// Everything a client needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldUpdate {
    pub tick: u64,
    pub links: Vec<LinkSnapshot>,
    pub particles: Vec<ParticleSnapshot>,
    /// Present only while a hand is being tracked.
    pub hand: Option<HandSnapshot>,
}

/// The hand currently steering the bridge, tagged with the connection that
/// published it so only that connection's disconnect clears it.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedHand {
    pub source: u64,
    pub observation: HandObservation,
}
