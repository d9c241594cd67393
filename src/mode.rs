//! Operating mode selection from handedness.

use crate::observation::Handedness;
use std::fmt;

/// What the hand in view controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Discrete track and playback gestures
    Media,
    /// Continuous volume via pinch distance
    Volume,
}

impl Mode {
    /// Pick the mode for a hand: left hand drives media, anything else drives volume
    #[must_use]
    pub const fn from_handedness(handedness: Handedness) -> Self {
        match handedness {
            Handedness::Left => Self::Media,
            Handedness::Right | Handedness::Unknown => Self::Volume,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Media => "MEDIA",
            Self::Volume => "VOLUME",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
