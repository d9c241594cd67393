//! Configuration management for the hand media controller

use crate::{
    classifier::PinchCalibration,
    constants::{DEFAULT_FRAME_HEIGHT, DEFAULT_FRAME_WIDTH, DEFAULT_MIN_HAND_SCORE},
    debounce::CooldownConfig,
    dispatch::DispatchBackend,
    filters::create_filter,
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Cooldown intervals per action group
    pub cooldown: CooldownConfig,

    /// Pinch calibration, thresholds and smoothing
    pub pinch: PinchConfig,

    /// Landmark source configuration
    pub source: SourceConfig,

    /// Command dispatch configuration
    pub dispatch: DispatchConfig,

    /// Display configuration
    pub display: DisplayConfig,
}

/// Pinch-to-volume configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PinchConfig {
    #[serde(flatten)]
    pub calibration: PinchCalibration,

    /// Smoothing filter descriptor (`none`, `exponential:<alpha>`, `moving_average:<window>`)
    pub smoothing: String,
}

/// Landmark bridge parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Hands scored below this are treated as not detected (0.0-1.0)
    pub min_hand_score: f32,

    /// Mirror x coordinates
    pub flip_x: bool,

    /// Frame width used when a record omits it
    pub frame_width: u32,

    /// Frame height used when a record omits it
    pub frame_height: u32,
}

/// Command dispatch configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Backend name (`log`, `x11`, `shell`)
    pub backend: String,

    /// Commands for the shell backend
    pub shell: ShellCommands,
}

/// Command line to run for each action under the shell backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellCommands {
    pub next_track: Vec<String>,
    pub prev_track: Vec<String>,
    pub play_pause: Vec<String>,
    pub mute: Vec<String>,
    pub volume_up: Vec<String>,
    pub volume_down: Vec<String>,
}

/// Display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Open the preview window (needs the `preview` feature)
    pub gui: bool,

    /// Preview window title
    pub window_title: String,
}

impl Default for PinchConfig {
    fn default() -> Self {
        Self {
            calibration: PinchCalibration::default(),
            smoothing: "none".to_string(),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            min_hand_score: DEFAULT_MIN_HAND_SCORE,
            flip_x: false,
            frame_width: DEFAULT_FRAME_WIDTH,
            frame_height: DEFAULT_FRAME_HEIGHT,
        }
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            backend: "log".to_string(),
            shell: ShellCommands::default(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            gui: false,
            window_title: "Hand Gesture Media Controller".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid configuration
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_yaml()?)?;
        Ok(())
    }

    /// Serialize configuration to YAML text
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigError` describing the first invalid setting
    pub fn validate(&self) -> Result<()> {
        // Cooldowns
        for (name, secs) in [
            ("Discrete cooldown", self.cooldown.discrete_secs),
            ("Continuous cooldown", self.cooldown.continuous_secs),
        ] {
            if !secs.is_finite() || secs < 0.0 {
                return Err(Error::ConfigError(format!(
                    "{name} must be a non-negative number of seconds"
                )));
            }
        }

        // Pinch calibration
        let pinch = &self.pinch.calibration;
        if !pinch.min_px.is_finite() || !pinch.max_px.is_finite() || pinch.max_px <= pinch.min_px {
            return Err(Error::ConfigError(
                "Pinch max_px must be greater than min_px".to_string(),
            ));
        }
        if !(0.0..=100.0).contains(&pinch.low_percent)
            || !(0.0..=100.0).contains(&pinch.high_percent)
            || pinch.low_percent >= pinch.high_percent
        {
            return Err(Error::ConfigError(
                "Pinch thresholds must satisfy 0 <= low_percent < high_percent <= 100".to_string(),
            ));
        }
        create_filter(&self.pinch.smoothing)?;

        // Source
        if !(0.0..=1.0).contains(&self.source.min_hand_score) {
            return Err(Error::ConfigError(
                "Minimum hand score must be between 0.0 and 1.0".to_string(),
            ));
        }
        if self.source.frame_width == 0 || self.source.frame_height == 0 {
            return Err(Error::ConfigError("Frame size must be non-zero".to_string()));
        }

        // Dispatch
        self.dispatch.backend.parse::<DispatchBackend>()?;

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Hand Gesture Media Controller Configuration

# Minimum time between actions of the same group, in seconds
cooldown:
  discrete_secs: 2.0      # next/prev track, play/pause, mute
  continuous_secs: 0.05   # volume up/down steps

# Thumb-index pinch calibration (right hand, VOLUME mode)
pinch:
  min_px: 20.0            # distance mapped to 0%
  max_px: 200.0           # distance mapped to 100%
  low_percent: 5.0        # below this: volume down
  high_percent: 95.0      # above this: volume up
  smoothing: "none"       # none | exponential:<alpha> | moving_average:<window>

# Landmark bridge
source:
  min_hand_score: 0.7
  flip_x: false
  frame_width: 640
  frame_height: 480

# Where actions go: log | x11 | shell
dispatch:
  backend: "log"
  shell:
    next_track: ["playerctl", "next"]
    prev_track: ["playerctl", "previous"]
    play_pause: ["playerctl", "play-pause"]
    mute: ["pactl", "set-sink-mute", "@DEFAULT_SINK@", "toggle"]
    volume_up: ["pactl", "set-sink-volume", "@DEFAULT_SINK@", "+2%"]
    volume_down: ["pactl", "set-sink-volume", "@DEFAULT_SINK@", "-2%"]

# Preview window
display:
  gui: false
  window_title: "Hand Gesture Media Controller"
"#;
