//! Hand gesture media controller.
//!
//! This library turns per-frame hand landmarks into media and volume commands:
//! - The left hand selects MEDIA mode, where the number of extended fingers
//!   picks next/previous track, play/pause or mute
//! - Any other hand selects VOLUME mode, where the thumb-index pinch distance
//!   raises or lowers the volume at either extreme
//! - A per-group cooldown keeps a held gesture from repeating
//!
//! The processing pipeline consists of:
//! 1. A capture source yielding frames (JSON detection records from a
//!    landmark bridge process)
//! 2. A landmark model picking at most one hand per frame
//! 3. Pose extraction into finger states and a pinch distance
//! 4. Mode selection, gesture classification and cooldown gating
//! 5. Dispatch of emitted actions to the host (log, X11 media keys, shell)
//!
//! # Examples
//!
//! ## Classifying a single frame
//!
//! ```no_run
//! use hand_media_control::{
//!     classifier::PinchCalibration,
//!     debounce::CooldownConfig,
//!     observation::{HandObservation, Handedness},
//!     pipeline::GesturePipeline,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut pipeline = GesturePipeline::new(PinchCalibration::default(), CooldownConfig::default(), 0.0);
//!
//! // 21 landmark pixels from some hand tracker
//! let points: Vec<(f64, f64)> = (0..21).map(|i| (f64::from(i) * 10.0, 100.0)).collect();
//! let hand = HandObservation::from_points(&points, Handedness::Left);
//!
//! let outcome = pipeline.process(&hand, 2.5)?;
//! if let Some(action) = outcome.emitted {
//!     println!("Action: {}", action.label());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Running the loop over a recording
//!
//! ```no_run
//! use hand_media_control::{
//!     app::HandControlApp, capture::JsonLinesCapture, clock::MonotonicClock, config::Config,
//!     dispatch::LogDispatcher, landmarks::BridgeHandModel, pipeline::GesturePipeline,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let source = JsonLinesCapture::open("session.jsonl")?;
//! let model = BridgeHandModel::from_config(&config.source);
//! let pipeline = GesturePipeline::from_config(&config, 0.0)?;
//!
//! let mut app = HandControlApp::new(source, model, pipeline, Box::new(LogDispatcher), MonotonicClock::new());
//! let summary = app.run();
//! println!("{summary:?}");
//! # Ok(())
//! # }
//! ```

/// Action classes and their cooldown groups
pub mod action;

/// Frame orchestration loop
pub mod app;

/// Frame sources
pub mod capture;

/// Finger-state and pinch classification
pub mod classifier;

/// Time sources
pub mod clock;

/// Configuration management
pub mod config;

/// Landmark indices and default tunables
pub mod constants;

/// Cooldown gating of emitted actions
pub mod debounce;

/// Command dispatch backends
pub mod dispatch;

/// Error types
pub mod error;

/// Pinch smoothing filters
pub mod filters;

/// Landmark model boundary
pub mod landmarks;

/// X11 media key injection
pub mod media_keys;

/// Handedness to mode mapping
pub mod mode;

/// Hand observation types
pub mod observation;

/// Single-hand gesture pipeline
pub mod pipeline;

/// Pose extraction
pub mod pose;

/// Preview rendering
pub mod render;

/// Numeric helpers
pub mod utils;

pub use error::{Error, Result};
