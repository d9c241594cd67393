//! Command dispatch: delivering emitted actions to the host.
//!
//! Dispatch is fire-and-forget from the controller's point of view. A failed
//! dispatch is logged by the caller and never feeds back into gesture or
//! cooldown state.

use crate::{
    action::ActionClass,
    config::{DispatchConfig, ShellCommands},
    media_keys::X11MediaKeys,
    Error, Result,
};
use log::{debug, info};
use std::process::{Child, Command, Stdio};
use std::str::FromStr;

/// Trait for all command sinks
pub trait CommandDispatcher {
    /// Deliver one action to the host
    ///
    /// # Errors
    ///
    /// Returns `Error::Dispatch` if the host rejected or never received the command
    fn dispatch(&mut self, action: ActionClass) -> Result<()>;

    /// Get dispatcher name
    fn name(&self) -> &str;
}

/// Available dispatch backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchBackend {
    /// Log actions without touching the host
    Log,
    /// Synthesize media keys through the X11 XTEST extension
    X11,
    /// Run a configured command line per action
    Shell,
}

impl FromStr for DispatchBackend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "log" | "none" | "dry-run" => Ok(Self::Log),
            "x11" | "xtest" => Ok(Self::X11),
            "shell" | "command" => Ok(Self::Shell),
            other => Err(Error::ConfigError(format!("Unknown dispatch backend: {other}"))),
        }
    }
}

/// Dry-run sink that only logs
#[derive(Debug, Default)]
pub struct LogDispatcher;

impl CommandDispatcher for LogDispatcher {
    fn dispatch(&mut self, action: ActionClass) -> Result<()> {
        info!("Dispatch (dry run): {action}");
        Ok(())
    }

    fn name(&self) -> &str {
        "log"
    }
}

/// Runs an external command for each action, e.g. `playerctl play-pause`
#[derive(Debug)]
pub struct ShellDispatcher {
    commands: ShellCommands,
    running: Vec<Child>,
}

impl ShellDispatcher {
    #[must_use]
    pub fn new(commands: ShellCommands) -> Self {
        Self {
            commands,
            running: Vec::new(),
        }
    }

    /// The configured command line for an action, empty if none
    #[must_use]
    pub fn command_for(&self, action: ActionClass) -> &[String] {
        let argv = match action {
            ActionClass::NextTrack => &self.commands.next_track,
            ActionClass::PrevTrack => &self.commands.prev_track,
            ActionClass::PlayPause => &self.commands.play_pause,
            ActionClass::Mute => &self.commands.mute,
            ActionClass::VolumeUp => &self.commands.volume_up,
            ActionClass::VolumeDown => &self.commands.volume_down,
        };
        argv.as_slice()
    }
}

impl CommandDispatcher for ShellDispatcher {
    fn dispatch(&mut self, action: ActionClass) -> Result<()> {
        let argv = self.command_for(action).to_vec();
        let Some((program, args)) = argv.split_first() else {
            return Err(Error::Dispatch(format!("No shell command configured for {action}")));
        };

        debug!("Running {program} {args:?} for {action}");

        // Reap finished commands; unfinished ones are left running
        self.running.retain_mut(|child| matches!(child.try_wait(), Ok(None)));

        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .spawn()
            .map_err(|e| Error::Dispatch(format!("Failed to run {program}: {e}")))?;
        self.running.push(child);
        Ok(())
    }

    fn name(&self) -> &str {
        "shell"
    }
}

/// Create the dispatcher selected by the configuration
///
/// # Errors
///
/// Returns an error if the backend name is unknown or the backend cannot start
pub fn create_dispatcher(config: &DispatchConfig) -> Result<Box<dyn CommandDispatcher>> {
    match config.backend.parse::<DispatchBackend>()? {
        DispatchBackend::Log => Ok(Box::new(LogDispatcher)),
        DispatchBackend::X11 => Ok(Box::new(X11MediaKeys::new()?)),
        DispatchBackend::Shell => Ok(Box::new(ShellDispatcher::new(config.shell.clone()))),
    }
}
