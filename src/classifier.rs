//! Gesture classification: finger state and pinch distance to pending actions.
//!
//! MEDIA mode maps the number of extended fingers onto one discrete action.
//! VOLUME mode maps the pinch distance onto a percentage and fires a volume
//! step when it sits at either extreme.

use crate::{
    action::ActionClass,
    constants::{PERCENT_MAX, PERCENT_MIN},
    mode::Mode,
    pose::{FingerState, HandPose},
    utils::interp,
};
use serde::{Deserialize, Serialize};

/// Pinch calibration and trigger thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PinchCalibration {
    /// Pinch distance (pixels) mapped to 0%
    pub min_px: f64,
    /// Pinch distance (pixels) mapped to 100%
    pub max_px: f64,
    /// Below this percentage the volume steps down
    pub low_percent: f64,
    /// Above this percentage the volume steps up
    pub high_percent: f64,
}

impl Default for PinchCalibration {
    fn default() -> Self {
        use crate::constants::{
            DEFAULT_PINCH_HIGH_PERCENT, DEFAULT_PINCH_LOW_PERCENT, DEFAULT_PINCH_MAX_PX, DEFAULT_PINCH_MIN_PX,
        };
        Self {
            min_px: DEFAULT_PINCH_MIN_PX,
            max_px: DEFAULT_PINCH_MAX_PX,
            low_percent: DEFAULT_PINCH_LOW_PERCENT,
            high_percent: DEFAULT_PINCH_HIGH_PERCENT,
        }
    }
}

impl PinchCalibration {
    /// Map a pinch distance to a clamped `[0, 100]` percentage
    #[must_use]
    pub fn percent(&self, pinch: f64) -> f64 {
        interp(pinch, (self.min_px, self.max_px), (PERCENT_MIN, PERCENT_MAX)).clamp(PERCENT_MIN, PERCENT_MAX)
    }

    /// Volume step requested by a percentage, if any
    #[must_use]
    pub fn intent(&self, percent: f64) -> Option<ActionClass> {
        if percent > self.high_percent {
            Some(ActionClass::VolumeUp)
        } else if percent < self.low_percent {
            Some(ActionClass::VolumeDown)
        } else {
            None
        }
    }
}

/// Finger-count categories, in the order they are matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FingerCount {
    Five,
    Four,
    /// Exactly two fingers; `victory` is set when they are index and middle
    Two { victory: bool },
    Zero,
    Other(usize),
}

impl FingerCount {
    #[must_use]
    pub fn of(fingers: &FingerState) -> Self {
        match fingers.count() {
            5 => Self::Five,
            4 => Self::Four,
            2 => Self::Two {
                victory: fingers.is_extended(FingerState::INDEX) && fingers.is_extended(FingerState::MIDDLE),
            },
            0 => Self::Zero,
            n => Self::Other(n),
        }
    }
}

/// Map a finger state to its MEDIA-mode action.
///
/// Count-only: any four extended fingers give `PrevTrack`, whichever finger is down.
#[must_use]
pub fn media_action(fingers: &FingerState) -> Option<ActionClass> {
    match FingerCount::of(fingers) {
        FingerCount::Five => Some(ActionClass::NextTrack),
        FingerCount::Four => Some(ActionClass::PrevTrack),
        FingerCount::Two { victory: true } => Some(ActionClass::PlayPause),
        FingerCount::Zero => Some(ActionClass::Mute),
        FingerCount::Two { victory: false } | FingerCount::Other(_) => None,
    }
}

/// VOLUME-mode reading of the pinch distance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeReading {
    /// Pinch distance mapped into `[0, 100]`
    pub percent: f64,
    /// `VolumeUp`, `VolumeDown`, or nothing
    pub intent: Option<ActionClass>,
}

/// Output of classifying one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Classification {
    Media { action: Option<ActionClass> },
    Volume(VolumeReading),
}

impl Classification {
    #[must_use]
    pub const fn mode(&self) -> Mode {
        match self {
            Self::Media { .. } => Mode::Media,
            Self::Volume(_) => Mode::Volume,
        }
    }

    /// The action this frame asks for, before any cooldown is applied
    #[must_use]
    pub const fn pending(&self) -> Option<ActionClass> {
        match self {
            Self::Media { action } => *action,
            Self::Volume(reading) => reading.intent,
        }
    }

    /// Pinch percentage, only present in VOLUME mode
    #[must_use]
    pub const fn volume_percent(&self) -> Option<f64> {
        match self {
            Self::Media { .. } => None,
            Self::Volume(reading) => Some(reading.percent),
        }
    }
}

/// Stateless gesture classifier
#[derive(Debug, Clone, Copy, Default)]
pub struct GestureClassifier {
    calibration: PinchCalibration,
}

impl GestureClassifier {
    #[must_use]
    pub const fn new(calibration: PinchCalibration) -> Self {
        Self { calibration }
    }

    #[must_use]
    pub const fn calibration(&self) -> &PinchCalibration {
        &self.calibration
    }

    /// Classify a pose under the given mode
    #[must_use]
    pub fn classify(&self, mode: Mode, pose: &HandPose) -> Classification {
        match mode {
            Mode::Media => Classification::Media {
                action: media_action(&pose.fingers),
            },
            Mode::Volume => {
                let percent = self.calibration.percent(pose.pinch);
                Classification::Volume(VolumeReading {
                    percent,
                    intent: self.calibration.intent(percent),
                })
            }
        }
    }
}
