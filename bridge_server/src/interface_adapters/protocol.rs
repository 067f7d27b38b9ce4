// Wire protocol DTOs and conversions for the sketch WebSocket.

use crate::domain::hand::MAX_HANDS;
use crate::domain::{
    Frame, HandObservation, HandSnapshot, Keypoint, LinkSnapshot, ObservationError,
    ParticleSnapshot, Vec2,
};
use crate::use_cases::WorldUpdate;
use serde::{Deserialize, Serialize};

/// Messages the server sends to connected clients over the WebSocket.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum ServerMessage {
    // Canvas setup, sent once right after the upgrade.
    Frame(FrameDto),
    // Render snapshot for a given tick.
    WorldUpdate(WorldUpdateDto),
}

/// Messages the client sends to the server over the WebSocket.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ClientMessage {
    // Latest pose-model result; an empty list means no hand in view.
    Hands(HandsPayload),
}

#[derive(Debug, Clone, Deserialize)]
pub struct HandsPayload {
    #[serde(default)]
    pub hands: Vec<HandDto>,
}

impl HandsPayload {
    /// First detected hand as an observation, `None` when nothing was detected.
    pub fn into_observation(self) -> Result<Option<HandObservation>, ObservationError> {
        let Some(hand) = self.hands.into_iter().take(MAX_HANDS).next() else {
            return Ok(None);
        };
        let keypoints = hand.keypoints.into_iter().map(Keypoint::from).collect();
        HandObservation::from_keypoints(keypoints).map(Some)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HandDto {
    pub keypoints: Vec<KeypointDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KeypointDto {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub name: Option<String>,
}

impl From<KeypointDto> for Keypoint {
    fn from(keypoint: KeypointDto) -> Self {
        Self {
            x: keypoint.x,
            y: keypoint.y,
            name: keypoint.name,
        }
    }
}

/// Canvas dimensions and display hints for the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrameDto {
    pub width: f32,
    pub height: f32,
    // Mirror the video and overlay like a selfie camera.
    pub flip_horizontal: bool,
    pub max_hands: usize,
}

impl FrameDto {
    pub fn new(frame: Frame, flip_horizontal: bool) -> Self {
        Self {
            width: frame.width,
            height: frame.height,
            flip_horizontal,
            max_hands: MAX_HANDS,
        }
    }
}

/// Snapshot of the sketch sent to clients on each tick.
#[derive(Debug, Clone, Serialize)]
pub struct WorldUpdateDto {
    pub tick: u64,
    pub links: Vec<LinkDto>,
    pub particles: Vec<ParticleDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hand: Option<HandStateDto>,
}

impl From<WorldUpdate> for WorldUpdateDto {
    fn from(update: WorldUpdate) -> Self {
        Self {
            tick: update.tick,
            links: update.links.iter().map(LinkDto::from).collect(),
            particles: update.particles.iter().map(ParticleDto::from).collect(),
            hand: update.hand.as_ref().map(HandStateDto::from),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PointDto {
    pub x: f32,
    pub y: f32,
}

impl From<Vec2> for PointDto {
    fn from(point: Vec2) -> Self {
        Self {
            x: point.x,
            y: point.y,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LinkDto {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub anchor: bool,
}

impl From<&LinkSnapshot> for LinkDto {
    fn from(link: &LinkSnapshot) -> Self {
        Self {
            x: link.x,
            y: link.y,
            radius: link.radius,
            anchor: link.anchor,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ParticleDto {
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub rot: f32,
    pub radius: f32,
}

impl From<&ParticleSnapshot> for ParticleDto {
    fn from(particle: &ParticleSnapshot) -> Self {
        Self {
            id: particle.id.to_string(),
            x: particle.x,
            y: particle.y,
            rot: particle.rot,
            radius: particle.radius,
        }
    }
}

/// Overlay data: every keypoint plus the two fingertips that drive the bridge.
#[derive(Debug, Clone, Serialize)]
pub struct HandStateDto {
    pub keypoints: Vec<PointDto>,
    pub thumb_tip: PointDto,
    pub index_tip: PointDto,
}

impl From<&HandSnapshot> for HandStateDto {
    fn from(hand: &HandSnapshot) -> Self {
        Self {
            keypoints: hand.keypoints.iter().copied().map(PointDto::from).collect(),
            thumb_tip: hand.thumb_tip.into(),
            index_tip: hand.index_tip.into(),
        }
    }
}
