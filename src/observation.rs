//! Per-frame hand observation types produced by the landmark model.

use crate::constants::NUM_HAND_LANDMARKS;
use std::fmt;

/// A single anatomically identified hand keypoint in pixel space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landmark {
    /// Anatomical identifier (0-20)
    pub id: usize,
    /// Horizontal position, growing to the right
    pub x: f64,
    /// Vertical position, growing downward
    pub y: f64,
}

impl Landmark {
    #[must_use]
    pub const fn new(id: usize, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    /// Euclidean distance to another landmark
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Which hand the landmark model believes it saw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handedness {
    Left,
    Right,
    /// Any label the model reports that is neither left nor right
    Unknown,
}

impl Handedness {
    /// Parse a model label such as `"Left"` or `"Right"`.
    ///
    /// Matching ignores ASCII case and surrounding whitespace.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        if label.eq_ignore_ascii_case("left") {
            Self::Left
        } else if label.eq_ignore_ascii_case("right") {
            Self::Right
        } else {
            Self::Unknown
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "Left",
            Self::Right => "Right",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Handedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One hand seen in one frame: its landmarks plus handedness.
///
/// A well-formed observation holds exactly 21 landmarks ordered by id.
/// Nothing here enforces that; the pose extractor checks the landmarks it
/// reads and rejects the frame otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct HandObservation {
    pub landmarks: Vec<Landmark>,
    pub handedness: Handedness,
}

impl HandObservation {
    #[must_use]
    pub fn new(landmarks: Vec<Landmark>, handedness: Handedness) -> Self {
        Self { landmarks, handedness }
    }

    /// Build an observation from `(x, y)` pixel positions, assigning ids by position
    #[must_use]
    pub fn from_points(points: &[(f64, f64)], handedness: Handedness) -> Self {
        let landmarks = points
            .iter()
            .enumerate()
            .map(|(id, &(x, y))| Landmark::new(id, x, y))
            .collect();
        Self { landmarks, handedness }
    }

    /// Look up a landmark by anatomical id.
    ///
    /// Returns `None` if the slot is absent, carries a different id, or has
    /// non-finite coordinates.
    #[must_use]
    pub fn landmark(&self, id: usize) -> Option<&Landmark> {
        self.landmarks
            .get(id)
            .filter(|lm| lm.id == id && lm.x.is_finite() && lm.y.is_finite())
    }

    /// Whether all 21 landmarks are present and usable
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.landmarks.len() == NUM_HAND_LANDMARKS && (0..NUM_HAND_LANDMARKS).all(|id| self.landmark(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handedness_labels() {
        assert_eq!(Handedness::from_label("Left"), Handedness::Left);
        assert_eq!(Handedness::from_label("right"), Handedness::Right);
        assert_eq!(Handedness::from_label(" LEFT "), Handedness::Left);
        assert_eq!(Handedness::from_label("Ambidextrous"), Handedness::Unknown);
        assert_eq!(Handedness::from_label(""), Handedness::Unknown);
    }

    #[test]
    fn test_landmark_lookup() {
        let points: Vec<(f64, f64)> = (0..21).map(|i| (f64::from(i), 0.0)).collect();
        let obs = HandObservation::from_points(&points, Handedness::Left);
        assert!(obs.is_complete());
        assert_eq!(obs.landmark(8).map(|lm| lm.x), Some(8.0));
        assert!(obs.landmark(21).is_none());
    }

    #[test]
    fn test_incomplete_observation() {
        let mut obs = HandObservation::from_points(&[(0.0, 0.0); 10], Handedness::Right);
        assert!(!obs.is_complete());

        obs = HandObservation::from_points(&[(0.0, 0.0); 21], Handedness::Right);
        obs.landmarks[4].y = f64::NAN;
        assert!(obs.landmark(4).is_none());
        assert!(!obs.is_complete());
    }

    #[test]
    fn test_distance() {
        let a = Landmark::new(4, 0.0, 0.0);
        let b = Landmark::new(8, 3.0, 4.0);
        assert_eq!(a.distance_to(&b), 5.0);
    }
}
