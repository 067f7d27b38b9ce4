// Hand-tracking observations as delivered by the pose model.

use super::geometry::Vec2;

/// Keypoint index of the thumb tip in the 21-point hand model.
pub const THUMB_TIP: usize = 4;
/// Keypoint index of the index fingertip in the 21-point hand model.
pub const INDEX_FINGER_TIP: usize = 8;
/// Only the first detected hand drives the bridge.
pub const MAX_HANDS: usize = 1;
/// Largest fingertip coordinate accepted, in pixels either side of the origin.
/// Real detections sit inside the frame; anything this far out is garbage.
pub const MAX_KEYPOINT_MAGNITUDE: f32 = 10_000.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Keypoint {
    pub x: f32,
    pub y: f32,
    /// Landmark name when the model provides one (e.g. "thumb_tip").
    pub name: Option<String>,
}

impl Keypoint {
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Why a keypoint list could not be used as an observation.
#[derive(Debug, Clone, PartialEq)]
pub enum ObservationError {
    /// Fewer keypoints than needed to reach the index fingertip.
    MissingKeypoints { found: usize },
    /// A fingertip coordinate was NaN or infinite.
    NonFiniteFingertip,
    /// A fingertip coordinate lies beyond `MAX_KEYPOINT_MAGNITUDE`.
    FingertipOutOfRange,
}

impl std::fmt::Display for ObservationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObservationError::MissingKeypoints { found } => {
                write!(f, "expected at least {} keypoints, got {found}", INDEX_FINGER_TIP + 1)
            }
            ObservationError::NonFiniteFingertip => write!(f, "fingertip coordinate is not finite"),
            ObservationError::FingertipOutOfRange => {
                write!(f, "fingertip coordinate exceeds {MAX_KEYPOINT_MAGNITUDE}")
            }
        }
    }
}

impl std::error::Error for ObservationError {}

/// One tracked hand for one frame.
///
/// Keeps the full ordered keypoint list for the overlay while guaranteeing the
/// two fingertips the bridge needs are present, finite and within range.
#[derive(Debug, Clone, PartialEq)]
pub struct HandObservation {
    keypoints: Vec<Keypoint>,
}

impl HandObservation {
    pub fn from_keypoints(keypoints: Vec<Keypoint>) -> Result<Self, ObservationError> {
        if keypoints.len() <= INDEX_FINGER_TIP {
            return Err(ObservationError::MissingKeypoints {
                found: keypoints.len(),
            });
        }

        let tips = [THUMB_TIP, INDEX_FINGER_TIP].map(|i| keypoints[i].position());
        if !tips.iter().all(|tip| tip.is_finite()) {
            return Err(ObservationError::NonFiniteFingertip);
        }
        if tips
            .iter()
            .any(|tip| tip.abs().max_element() > MAX_KEYPOINT_MAGNITUDE)
        {
            return Err(ObservationError::FingertipOutOfRange);
        }

        Ok(Self { keypoints })
    }

    pub fn thumb_tip(&self) -> Vec2 {
        self.keypoints[THUMB_TIP].position()
    }

    pub fn index_tip(&self) -> Vec2 {
        self.keypoints[INDEX_FINGER_TIP].position()
    }

    pub fn keypoints(&self) -> &[Keypoint] {
        &self.keypoints
    }
}

#[cfg(test)]
pub(crate) fn hand_with_tips(thumb: Vec2, index: Vec2) -> HandObservation {
    let mut keypoints: Vec<Keypoint> = (0..21)
        .map(|_| Keypoint {
            x: 0.0,
            y: 0.0,
            name: None,
        })
        .collect();
    keypoints[THUMB_TIP] = Keypoint {
        x: thumb.x,
        y: thumb.y,
        name: Some("thumb_tip".to_string()),
    };
    keypoints[INDEX_FINGER_TIP] = Keypoint {
        x: index.x,
        y: index.y,
        name: Some("index_finger_tip".to_string()),
    };
    HandObservation::from_keypoints(keypoints).expect("test hand should be valid")
}
