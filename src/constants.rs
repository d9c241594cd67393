//! Constants used throughout the application

/// Number of landmarks in a complete hand observation
pub const NUM_HAND_LANDMARKS: usize = 21;

/// Hand landmark indices (MediaPipe hand model numbering)
pub mod landmarks {
    pub const THUMB_IP: usize = 3;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_FINGER_TIP: usize = 8;
    pub const MIDDLE_FINGER_TIP: usize = 12;
    pub const RING_FINGER_TIP: usize = 16;
    pub const PINKY_TIP: usize = 20;

    /// Tips of the four non-thumb fingers, index to pinky
    pub const FINGER_TIPS: [usize; 4] = [INDEX_FINGER_TIP, MIDDLE_FINGER_TIP, RING_FINGER_TIP, PINKY_TIP];

    /// Offset from a fingertip to the joint it is compared against (the PIP joint)
    pub const TIP_TO_REFERENCE_JOINT: usize = 2;

    /// Bone connections used when drawing a hand skeleton
    #[rustfmt::skip]
    pub const CONNECTIONS: [(usize, usize); 21] = [
        (0, 1), (1, 2), (2, 3), (3, 4),
        (0, 5), (5, 6), (6, 7), (7, 8),
        (5, 9), (9, 10), (10, 11), (11, 12),
        (9, 13), (13, 14), (14, 15), (15, 16),
        (13, 17), (17, 18), (18, 19), (19, 20),
        (0, 17),
    ];
}

/// Default cooldown between discrete (media) actions, in seconds
pub const DEFAULT_DISCRETE_COOLDOWN_SECS: f64 = 2.0;

/// Default cooldown between continuous (volume step) actions, in seconds
pub const DEFAULT_CONTINUOUS_COOLDOWN_SECS: f64 = 0.05;

/// Default pinch calibration range in pixels
pub const DEFAULT_PINCH_MIN_PX: f64 = 20.0;
pub const DEFAULT_PINCH_MAX_PX: f64 = 200.0;

/// Default pinch trigger thresholds in percent
pub const DEFAULT_PINCH_LOW_PERCENT: f64 = 5.0;
pub const DEFAULT_PINCH_HIGH_PERCENT: f64 = 95.0;

/// Default minimum hand detection score accepted from the landmark bridge
pub const DEFAULT_MIN_HAND_SCORE: f32 = 0.7;

/// Default frame size used when a bridge record omits it
pub const DEFAULT_FRAME_WIDTH: u32 = 640;
pub const DEFAULT_FRAME_HEIGHT: u32 = 480;

/// Default pinch smoothing window / alpha
pub const DEFAULT_MOVING_AVERAGE_WINDOW: usize = 5;
pub const DEFAULT_EXPONENTIAL_ALPHA: f64 = 0.5;

/// Percentage range the pinch distance is mapped onto
pub const PERCENT_MIN: f64 = 0.0;
pub const PERCENT_MAX: f64 = 100.0;
