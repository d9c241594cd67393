//! One hand's path from observation to emitted action.
//!
//! The pipeline owns everything stateful for a single tracked hand: the
//! cooldown gate and the optional pinch smoothing. Running two hands means
//! running two pipelines.

use crate::{
    action::ActionClass,
    classifier::{Classification, GestureClassifier, PinchCalibration},
    config::Config,
    debounce::{CooldownConfig, DebounceEngine},
    filters::{create_filter, NoFilter, PinchFilter},
    mode::Mode,
    observation::{HandObservation, Handedness},
    pose::{self, HandPose},
    Result,
};
use log::{debug, info};

/// Everything decided about one frame with a hand in view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutcome {
    pub handedness: Handedness,
    pub mode: Mode,
    /// Pose as extracted, before any pinch smoothing
    pub pose: HandPose,
    pub classification: Classification,
    /// The action that passed the cooldown gate, if any
    pub emitted: Option<ActionClass>,
}

/// Extractor, mode selector, classifier and cooldown gate for a single hand
pub struct GesturePipeline {
    classifier: GestureClassifier,
    debounce: DebounceEngine,
    pinch_filter: Box<dyn PinchFilter>,
}

impl GesturePipeline {
    /// Create a pipeline whose cooldowns start at `started_at`
    #[must_use]
    pub fn new(calibration: PinchCalibration, cooldown: CooldownConfig, started_at: f64) -> Self {
        Self {
            classifier: GestureClassifier::new(calibration),
            debounce: DebounceEngine::new(cooldown, started_at),
            pinch_filter: Box::new(NoFilter),
        }
    }

    /// Build a pipeline from the cooldown and pinch sections of a configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the smoothing descriptor is invalid
    pub fn from_config(config: &Config, started_at: f64) -> Result<Self> {
        Self::new(config.pinch.calibration, config.cooldown, started_at).with_smoothing(&config.pinch.smoothing)
    }

    /// Smooth the pinch distance with a filter built from `descriptor` (see [`create_filter`])
    ///
    /// # Errors
    ///
    /// Returns an error if the filter descriptor is invalid
    pub fn with_smoothing(mut self, descriptor: &str) -> Result<Self> {
        self.pinch_filter = create_filter(descriptor)?;
        Ok(self)
    }

    /// Run one observation through the pipeline at time `now`.
    ///
    /// # Errors
    ///
    /// Returns `Error::MalformedObservation` if the observation lacks required
    /// landmarks. Nothing is classified and no cooldown changes in that case.
    pub fn process(&mut self, observation: &HandObservation, now: f64) -> Result<FrameOutcome> {
        let pose = pose::extract(observation)?;
        let mode = Mode::from_handedness(observation.handedness);

        let smoothed = HandPose {
            pinch: self.pinch_filter.apply(pose.pinch),
            ..pose
        };
        let classification = self.classifier.classify(mode, &smoothed);

        debug!(
            "{} hand, mode {}, fingers {}, pinch {:.1}px",
            observation.handedness, mode, pose.fingers, smoothed.pinch
        );

        let pending = classification.pending();
        let emitted = pending.filter(|&action| self.debounce.try_fire(action, now));

        match (pending, emitted) {
            (_, Some(action)) => info!("Action: {}", action.label()),
            (Some(action), None) => debug!(
                "{} held back, {:.2}s of cooldown left",
                action,
                self.debounce.remaining(action.group(), now)
            ),
            (None, None) => {}
        }

        Ok(FrameOutcome {
            handedness: observation.handedness,
            mode,
            pose,
            classification,
            emitted,
        })
    }

    /// Note a frame without a hand: smoothing history no longer applies
    pub fn idle(&mut self) {
        self.pinch_filter.reset();
    }

    #[must_use]
    pub const fn debounce(&self) -> &DebounceEngine {
        &self.debounce
    }

    #[must_use]
    pub const fn classifier(&self) -> &GestureClassifier {
        &self.classifier
    }

    #[must_use]
    pub fn smoothing(&self) -> &str {
        self.pinch_filter.name()
    }
}
