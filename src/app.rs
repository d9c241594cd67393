//! Main application module: the frame orchestration loop.

use crate::{
    action::ActionClass,
    capture::CaptureSource,
    clock::Clock,
    dispatch::CommandDispatcher,
    error::Result,
    landmarks::LandmarkModel,
    observation::{HandObservation, Landmark},
    pipeline::{FrameOutcome, GesturePipeline},
    render::{FrameView, NullRenderer, RenderControl, Renderer},
};
use log::{debug, info, warn};
use std::fmt;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Counters reported when the loop ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Cycles run, including skipped ones
    pub frames: u64,
    /// Frames in which a hand was observed
    pub hands: u64,
    /// Frames dropped because of a transient or malformed input
    pub skipped: u64,
    /// Actions handed to the dispatcher
    pub actions: u64,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} frames, {} with a hand, {} skipped, {} actions",
            self.frames, self.hands, self.skipped, self.actions
        )
    }
}

/// The orchestration loop: capture, detect, classify, gate, dispatch, render
pub struct HandControlApp<S, M, C>
where
    S: CaptureSource,
    M: LandmarkModel<Frame = S::Frame>,
    C: Clock,
{
    source: S,
    model: M,
    pipeline: GesturePipeline,
    dispatcher: Box<dyn CommandDispatcher>,
    renderer: Box<dyn Renderer>,
    clock: C,
    max_frames: Option<u64>,
    /// Set from outside the loop (e.g. a signal handler) to stop after the current cycle
    quit: Arc<AtomicBool>,
    summary: RunSummary,
    /// Size of the last frame read, reused when a frame is lost
    frame_size: (u32, u32),
}

impl<S, M, C> HandControlApp<S, M, C>
where
    S: CaptureSource,
    M: LandmarkModel<Frame = S::Frame>,
    C: Clock,
{
    /// Create a headless application with no frame limit
    pub fn new(source: S, model: M, pipeline: GesturePipeline, dispatcher: Box<dyn CommandDispatcher>, clock: C) -> Self {
        info!("Initializing hand media control application (dispatch: {})", dispatcher.name());
        Self {
            source,
            model,
            pipeline,
            dispatcher,
            renderer: Box::new(NullRenderer),
            clock,
            max_frames: None,
            quit: Arc::new(AtomicBool::new(false)),
            summary: RunSummary::default(),
            frame_size: (0, 0),
        }
    }

    #[must_use]
    pub fn with_renderer(mut self, renderer: Box<dyn Renderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Stop cleanly after this many cycles
    #[must_use]
    pub const fn with_max_frames(mut self, max_frames: Option<u64>) -> Self {
        self.max_frames = max_frames;
        self
    }

    /// Stop cleanly once `quit` is set
    #[must_use]
    pub fn with_quit_flag(mut self, quit: Arc<AtomicBool>) -> Self {
        self.quit = quit;
        self
    }

    #[must_use]
    pub fn quit_requested(&self) -> bool {
        self.quit.load(Ordering::Relaxed)
    }

    #[must_use]
    pub const fn summary(&self) -> RunSummary {
        self.summary
    }

    #[must_use]
    pub const fn pipeline(&self) -> &GesturePipeline {
        &self.pipeline
    }

    /// Run the main application loop until quit or a fatal error
    ///
    /// # Errors
    ///
    /// Returns the first error that is not a per-frame condition, typically
    /// `Error::CaptureFatal` when the source is exhausted
    pub fn run(&mut self) -> Result<RunSummary> {
        info!("Starting main application loop");

        loop {
            if self.quit_requested() {
                info!("Quit requested");
                break;
            }
            if self.max_frames.is_some_and(|max| self.summary.frames >= max) {
                info!("Frame limit reached");
                break;
            }

            match self.step() {
                Ok(RenderControl::Continue) => {}
                Ok(RenderControl::Quit) => break,
                // The bridge gets the same interrupt and closes its output
                Err(e) if self.quit_requested() => {
                    info!("Quit requested ({})", e);
                    break;
                }
                Err(e) => {
                    warn!("Stopping after {}: {}", self.summary, e);
                    return Err(e);
                }
            }
        }

        info!("Application shutting down: {}", self.summary);
        Ok(self.summary)
    }

    /// Run exactly one cycle
    ///
    /// # Errors
    ///
    /// Returns errors that are not per-frame conditions
    pub fn step(&mut self) -> Result<RenderControl> {
        self.summary.frames += 1;

        let frame = match self.source.read_frame() {
            Ok(frame) => frame,
            Err(e) if e.is_frame_skippable() => {
                warn!("Failed to read frame, retrying... ({})", e);
                self.summary.skipped += 1;
                return Ok(self.render(&[], None));
            }
            Err(e) => return Err(e),
        };

        let now = self.clock.now();
        self.frame_size = self.model.frame_size(&frame);

        let observation = match self.model.detect(&frame) {
            Ok(observation) => observation,
            Err(e) if e.is_frame_skippable() => {
                warn!("Skipping frame {}: {}", self.summary.frames, e);
                self.summary.skipped += 1;
                return Ok(self.render(&[], None));
            }
            Err(e) => return Err(e),
        };

        let outcome = match &observation {
            Some(observation) => self.process_hand(observation, now)?,
            None => {
                self.pipeline.idle();
                None
            }
        };

        if let Some(action) = outcome.and_then(|o| o.emitted) {
            self.dispatch(action);
        }

        let landmarks = observation.as_ref().map_or(&[][..], |o| o.landmarks.as_slice());
        Ok(self.render(landmarks, outcome.as_ref()))
    }

    fn process_hand(&mut self, observation: &HandObservation, now: f64) -> Result<Option<FrameOutcome>> {
        self.summary.hands += 1;
        match self.pipeline.process(observation, now) {
            Ok(outcome) => Ok(Some(outcome)),
            Err(e) if e.is_frame_skippable() => {
                warn!("Skipping frame {}: {}", self.summary.frames, e);
                self.summary.skipped += 1;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn dispatch(&mut self, action: ActionClass) {
        self.summary.actions += 1;
        if let Err(e) = self.dispatcher.dispatch(action) {
            warn!("Failed to dispatch {} via {}: {}", action, self.dispatcher.name(), e);
        }
    }

    fn render(&mut self, landmarks: &[Landmark], outcome: Option<&FrameOutcome>) -> RenderControl {
        let view = FrameView {
            frame_index: self.summary.frames,
            frame_size: self.frame_size,
            landmarks,
            outcome,
        };
        match self.renderer.render(&view) {
            Ok(control) => control,
            Err(e) => {
                debug!("Render failed: {}", e);
                RenderControl::Continue
            }
        }
    }
}
