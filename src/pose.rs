//! Pose extraction: finger extension state and pinch distance from hand landmarks.

use crate::{
    constants::landmarks::{FINGER_TIPS, INDEX_FINGER_TIP, THUMB_IP, THUMB_TIP, TIP_TO_REFERENCE_JOINT},
    error::{Error, Result},
    observation::{HandObservation, Landmark},
};
use std::fmt;

/// Which fingers are extended, ordered thumb, index, middle, ring, pinky
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FingerState(pub [bool; 5]);

impl FingerState {
    pub const THUMB: usize = 0;
    pub const INDEX: usize = 1;
    pub const MIDDLE: usize = 2;
    pub const RING: usize = 3;
    pub const PINKY: usize = 4;

    #[must_use]
    pub const fn new(extended: [bool; 5]) -> Self {
        Self(extended)
    }

    /// Number of extended fingers
    #[must_use]
    pub fn count(&self) -> usize {
        self.0.iter().filter(|&&up| up).count()
    }

    #[must_use]
    pub const fn is_extended(&self, finger: usize) -> bool {
        finger < 5 && self.0[finger]
    }

    #[must_use]
    pub const fn as_array(&self) -> [bool; 5] {
        self.0
    }
}

impl fmt::Display for FingerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for up in self.0 {
            f.write_str(if up { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Derived per-frame pose of one hand
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandPose {
    pub fingers: FingerState,
    /// Thumb-tip to index-tip distance in pixels
    pub pinch: f64,
}

/// Derive finger extension and pinch distance from an observation.
///
/// Pure: the same observation always yields the same pose.
///
/// # Errors
///
/// Returns `Error::MalformedObservation` if any landmark the computation
/// reads is missing or has non-finite coordinates.
pub fn extract(observation: &HandObservation) -> Result<HandPose> {
    let thumb_tip = required(observation, THUMB_TIP)?;
    let thumb_ip = required(observation, THUMB_IP)?;
    let index_tip = required(observation, INDEX_FINGER_TIP)?;

    let mut fingers = [false; 5];

    // The thumb folds sideways, so it is tested on x rather than y
    fingers[FingerState::THUMB] = thumb_tip.x > thumb_ip.x;

    for (slot, &tip_id) in FINGER_TIPS.iter().enumerate() {
        let tip = required(observation, tip_id)?;
        let joint = required(observation, tip_id - TIP_TO_REFERENCE_JOINT)?;
        // Image y grows downward
        fingers[slot + 1] = tip.y < joint.y;
    }

    Ok(HandPose {
        fingers: FingerState(fingers),
        pinch: thumb_tip.distance_to(index_tip),
    })
}

fn required(observation: &HandObservation, id: usize) -> Result<&Landmark> {
    observation.landmark(id).ok_or_else(|| {
        Error::MalformedObservation(format!(
            "landmark {id} missing or invalid ({} landmarks present)",
            observation.landmarks.len()
        ))
    })
}
