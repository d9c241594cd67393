//! Symbolic commands the controller can emit and their cooldown groups.

use std::fmt;

/// Cooldown group an action belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionGroup {
    /// One-shot media commands, one per gesture hold
    Discrete,
    /// Repeatable volume steps
    Continuous,
}

/// A symbolic command for the host's media controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionClass {
    NextTrack,
    PrevTrack,
    PlayPause,
    Mute,
    VolumeUp,
    VolumeDown,
}

impl ActionClass {
    /// Every action, discrete ones first
    pub const ALL: [Self; 6] = [
        Self::NextTrack,
        Self::PrevTrack,
        Self::PlayPause,
        Self::Mute,
        Self::VolumeUp,
        Self::VolumeDown,
    ];

    #[must_use]
    pub const fn group(&self) -> ActionGroup {
        match self {
            Self::NextTrack | Self::PrevTrack | Self::PlayPause | Self::Mute => ActionGroup::Discrete,
            Self::VolumeUp | Self::VolumeDown => ActionGroup::Continuous,
        }
    }

    /// Upper-case symbolic name, e.g. `PLAY_PAUSE`
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NextTrack => "NEXT_TRACK",
            Self::PrevTrack => "PREV_TRACK",
            Self::PlayPause => "PLAY_PAUSE",
            Self::Mute => "MUTE",
            Self::VolumeUp => "VOLUME_UP",
            Self::VolumeDown => "VOLUME_DOWN",
        }
    }

    /// Media key name as used by common key-injection tools
    #[must_use]
    pub const fn key_name(&self) -> &'static str {
        match self {
            Self::NextTrack => "nexttrack",
            Self::PrevTrack => "prevtrack",
            Self::PlayPause => "playpause",
            Self::Mute => "volumemute",
            Self::VolumeUp => "volumeup",
            Self::VolumeDown => "volumedown",
        }
    }

    /// Human readable label for logs and overlays
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::NextTrack => "Next Track",
            Self::PrevTrack => "Previous Track",
            Self::PlayPause => "Play/Pause",
            Self::Mute => "Mute",
            Self::VolumeUp => "Volume Up",
            Self::VolumeDown => "Volume Down",
        }
    }
}

impl fmt::Display for ActionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups() {
        let discrete: Vec<_> = ActionClass::ALL
            .iter()
            .filter(|a| a.group() == ActionGroup::Discrete)
            .collect();
        assert_eq!(discrete.len(), 4);
        assert_eq!(ActionClass::VolumeUp.group(), ActionGroup::Continuous);
        assert_eq!(ActionClass::VolumeDown.group(), ActionGroup::Continuous);
    }

    #[test]
    fn test_names() {
        assert_eq!(ActionClass::PlayPause.to_string(), "PLAY_PAUSE");
        assert_eq!(ActionClass::Mute.key_name(), "volumemute");
        assert_eq!(ActionClass::PrevTrack.label(), "Previous Track");
    }
}
