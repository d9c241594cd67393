//! Landmark model boundary: frames in, at most one hand observation out.

use crate::{
    capture::{DetectionRecord, HandRecord},
    config::SourceConfig,
    constants::NUM_HAND_LANDMARKS,
    observation::{HandObservation, Handedness, Landmark},
    utils::normalized_to_pixel,
    Error, Result,
};
use log::debug;

/// Turns a frame into the hand observation it contains, if any
pub trait LandmarkModel {
    type Frame;

    /// Detect a hand in one frame
    ///
    /// # Errors
    ///
    /// Returns `Error::MalformedObservation` if a hand was reported but its
    /// coordinates cannot be placed in pixel space
    fn detect(&mut self, frame: &Self::Frame) -> Result<Option<HandObservation>>;

    /// Pixel size of a frame
    fn frame_size(&self, frame: &Self::Frame) -> (u32, u32);
}

/// Landmark model backed by the JSON bridge's detection records.
///
/// Only the first reported hand is used.
#[derive(Debug, Clone)]
pub struct BridgeHandModel {
    min_hand_score: f32,
    flip_x: bool,
    default_size: (u32, u32),
}

impl BridgeHandModel {
    #[must_use]
    pub fn new(min_hand_score: f32, flip_x: bool, default_size: (u32, u32)) -> Self {
        Self {
            min_hand_score: min_hand_score.clamp(0.0, 1.0),
            flip_x,
            default_size,
        }
    }

    #[must_use]
    pub fn from_config(config: &SourceConfig) -> Self {
        Self::new(
            config.min_hand_score,
            config.flip_x,
            (config.frame_width, config.frame_height),
        )
    }

    fn to_observation(&self, hand: &HandRecord, (width, height): (u32, u32)) -> Result<HandObservation> {
        let landmarks = hand
            .landmarks
            .iter()
            .enumerate()
            .map(|(id, lm)| {
                let nx = if self.flip_x { 1.0 - lm.x } else { lm.x };
                let x = normalized_to_pixel(nx, width);
                let y = normalized_to_pixel(lm.y, height);
                match (x, y) {
                    (Ok(x), Ok(y)) => Ok(Landmark::new(id, x, y)),
                    _ => Err(Error::MalformedObservation(format!(
                        "Landmark {id} has unusable coordinates ({}, {})",
                        lm.x, lm.y
                    ))),
                }
            })
            .collect::<Result<Vec<_>>>()?;

        let observation = HandObservation::new(landmarks, Handedness::from_label(&hand.handedness));
        if !observation.is_complete() {
            return Err(Error::MalformedObservation(format!(
                "Expected {} landmarks, got {}",
                NUM_HAND_LANDMARKS,
                observation.landmarks.len()
            )));
        }
        Ok(observation)
    }
}

impl Default for BridgeHandModel {
    fn default() -> Self {
        Self::from_config(&SourceConfig::default())
    }
}

impl LandmarkModel for BridgeHandModel {
    type Frame = DetectionRecord;

    fn detect(&mut self, frame: &DetectionRecord) -> Result<Option<HandObservation>> {
        let Some(hand) = frame.hands.first() else {
            return Ok(None);
        };

        if hand.score < self.min_hand_score {
            debug!(
                "Ignoring {} hand with score {:.2} (< {:.2})",
                hand.handedness, hand.score, self.min_hand_score
            );
            return Ok(None);
        }

        self.to_observation(hand, self.frame_size(frame)).map(Some)
    }

    /// Record size if reported and non-zero, else the configured one
    fn frame_size(&self, frame: &DetectionRecord) -> (u32, u32) {
        (
            frame.width.filter(|&w| w > 0).unwrap_or(self.default_size.0),
            frame.height.filter(|&h| h > 0).unwrap_or(self.default_size.1),
        )
    }
}
