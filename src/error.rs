//! Error types for the hand media control library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// A hand observation is missing landmarks the pose extractor needs
    #[error("Malformed observation: {0}")]
    MalformedObservation(String),

    /// The capture source failed for this frame only; retry on the next cycle
    #[error("Capture transient failure: {0}")]
    CaptureTransient(String),

    /// The capture source is gone for good
    #[error("Capture fatal failure: {0}")]
    CaptureFatal(String),

    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Command dispatch to the host failed
    #[error("Dispatch error: {0}")]
    Dispatch(String),

    /// Preview rendering failed
    #[error("Render error: {0}")]
    Render(String),
}

impl Error {
    /// Whether the orchestration loop should skip the current frame and keep going.
    ///
    /// Only malformed observations and transient capture failures are
    /// per-frame conditions; everything else terminates the loop.
    #[must_use]
    pub const fn is_frame_skippable(&self) -> bool {
        matches!(self, Self::MalformedObservation(_) | Self::CaptureTransient(_))
    }
}

#[cfg(feature = "preview")]
impl From<opencv::Error> for Error {
    fn from(e: opencv::Error) -> Self {
        Self::Render(e.to_string())
    }
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
