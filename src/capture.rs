//! Frame sources feeding the orchestration loop.
//!
//! Perception runs outside this crate. A bridge process (typically a
//! MediaPipe hand tracker) writes one JSON detection record per frame, one
//! record per line, and [`JsonLinesCapture`] turns that stream into frames.

use crate::{Error, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, StdinLock};
use std::path::Path;
use std::process::{Child, ChildStdout, Command, Stdio};

/// Anything that yields frames, one per orchestration cycle
pub trait CaptureSource {
    type Frame;

    /// Read the next frame
    ///
    /// # Errors
    ///
    /// `Error::CaptureTransient` when only this frame is lost,
    /// `Error::CaptureFatal` when the source is gone
    fn read_frame(&mut self) -> Result<Self::Frame>;
}

/// One landmark in normalized image coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandmarkRecord {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

/// One detected hand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    pub handedness: String,
    #[serde(default)]
    pub score: f32,
    pub landmarks: Vec<LandmarkRecord>,
}

/// Everything the bridge reported for one frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionRecord {
    /// Frame width in pixels, if the bridge reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Frame height in pixels, if the bridge reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default)]
    pub hands: Vec<HandRecord>,
    /// Set when the bridge failed on this frame
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DetectionRecord {
    /// Parse a single JSON line
    ///
    /// # Errors
    ///
    /// Returns `Error::CaptureTransient` for blank lines, invalid JSON or
    /// records carrying a bridge error
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        if line.is_empty() {
            return Err(Error::CaptureTransient("Empty detection record".to_string()));
        }

        let record: Self = serde_json::from_str(line)
            .map_err(|e| Error::CaptureTransient(format!("Failed to parse detection record: {e}")))?;

        if let Some(error) = record.error {
            return Err(Error::CaptureTransient(format!("Bridge reported: {error}")));
        }
        Ok(record)
    }
}

/// Detection records read line by line from any buffered reader
pub struct JsonLinesCapture<R: BufRead> {
    reader: R,
    line: String,
    records: usize,
    /// Bridge process whose stdout we are reading, if we started it
    child: Option<Child>,
}

impl<R: BufRead> JsonLinesCapture<R> {
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            records: 0,
            child: None,
        }
    }

    /// Number of lines consumed so far
    #[must_use]
    pub const fn records(&self) -> usize {
        self.records
    }
}

impl JsonLinesCapture<StdinLock<'static>> {
    /// Read records piped into our standard input
    #[must_use]
    pub fn stdin() -> Self {
        info!("Reading detection records from stdin");
        Self::from_reader(std::io::stdin().lock())
    }
}

impl JsonLinesCapture<BufReader<File>> {
    /// Replay records from a file
    ///
    /// # Errors
    ///
    /// Returns `Error::CaptureFatal` if the file cannot be opened
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening detection record file: {}", path.display());
        let file = File::open(path)
            .map_err(|e| Error::CaptureFatal(format!("Failed to open {}: {e}", path.display())))?;
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl JsonLinesCapture<BufReader<ChildStdout>> {
    /// Start a bridge command and read records from its stdout.
    ///
    /// The child is killed when the capture is dropped.
    ///
    /// # Errors
    ///
    /// Returns `Error::CaptureFatal` if the command is empty or fails to start
    pub fn spawn(argv: &[String]) -> Result<Self> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| Error::CaptureFatal("Empty bridge command".to_string()))?;

        info!("Starting landmark bridge: {} {}", program, args.join(" "));

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| Error::CaptureFatal(format!("Failed to start {program}: {e}")))?;

        let Some(stdout) = child.stdout.take() else {
            // Best effort; the child is useless without its stdout
            let _ = child.kill();
            let _ = child.wait();
            return Err(Error::CaptureFatal("Failed to get bridge stdout".to_string()));
        };

        let mut capture = Self::from_reader(BufReader::new(stdout));
        capture.child = Some(child);
        Ok(capture)
    }
}

impl<R: BufRead> CaptureSource for JsonLinesCapture<R> {
    type Frame = DetectionRecord;

    fn read_frame(&mut self) -> Result<DetectionRecord> {
        self.line.clear();
        let read = self
            .reader
            .read_line(&mut self.line)
            .map_err(|e| Error::CaptureFatal(format!("Failed to read detection record: {e}")))?;

        if read == 0 {
            return Err(Error::CaptureFatal(format!(
                "Detection stream ended after {} records",
                self.records
            )));
        }
        self.records += 1;

        DetectionRecord::parse(&self.line)
    }
}

impl<R: BufRead> Drop for JsonLinesCapture<R> {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            debug!("Stopping landmark bridge (pid {})", child.id());
            if let Err(e) = child.kill() {
                warn!("Failed to stop landmark bridge: {}", e);
            }
            let _ = child.wait();
        }
    }
}
