//! Cooldown gate that turns held gestures into single actions.
//!
//! Two independent clocks are kept: one shared by every discrete media
//! action and one shared by the two volume steps. An action fires only when
//! strictly more than its group's interval has passed since the last action
//! that fired in the same group.

use crate::action::{ActionClass, ActionGroup};
use crate::constants::{DEFAULT_CONTINUOUS_COOLDOWN_SECS, DEFAULT_DISCRETE_COOLDOWN_SECS};
use serde::{Deserialize, Serialize};

/// Cooldown intervals, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CooldownConfig {
    pub discrete_secs: f64,
    pub continuous_secs: f64,
}

impl Default for CooldownConfig {
    fn default() -> Self {
        Self {
            discrete_secs: DEFAULT_DISCRETE_COOLDOWN_SECS,
            continuous_secs: DEFAULT_CONTINUOUS_COOLDOWN_SECS,
        }
    }
}

impl CooldownConfig {
    #[must_use]
    pub const fn interval(&self, group: ActionGroup) -> f64 {
        match group {
            ActionGroup::Discrete => self.discrete_secs,
            ActionGroup::Continuous => self.continuous_secs,
        }
    }
}

/// Time of the last emission in each group.
///
/// Both fields only move forward, and only when an action in that group fires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CooldownState {
    pub last_discrete: f64,
    pub last_continuous: f64,
}

impl CooldownState {
    /// Both clocks start at `started_at`, so nothing fires until an interval has passed
    #[must_use]
    pub const fn starting_at(started_at: f64) -> Self {
        Self {
            last_discrete: started_at,
            last_continuous: started_at,
        }
    }

    #[must_use]
    pub const fn last(&self, group: ActionGroup) -> f64 {
        match group {
            ActionGroup::Discrete => self.last_discrete,
            ActionGroup::Continuous => self.last_continuous,
        }
    }

    fn mark(&mut self, group: ActionGroup, now: f64) {
        match group {
            ActionGroup::Discrete => self.last_discrete = now,
            ActionGroup::Continuous => self.last_continuous = now,
        }
    }
}

/// Per-group cooldown gate.
///
/// `try_fire` is a single read-check-write on the owned state. A caller that
/// shares one engine between threads must hold a lock across the whole call.
#[derive(Debug, Clone)]
pub struct DebounceEngine {
    config: CooldownConfig,
    state: CooldownState,
}

impl DebounceEngine {
    /// Create an engine whose clocks both start at `started_at`
    #[must_use]
    pub const fn new(config: CooldownConfig, started_at: f64) -> Self {
        Self {
            config,
            state: CooldownState::starting_at(started_at),
        }
    }

    /// Whether `action` could fire at `now`, without changing any state
    #[must_use]
    pub fn would_fire(&self, action: ActionClass, now: f64) -> bool {
        let group = action.group();
        now - self.state.last(group) > self.config.interval(group)
    }

    /// Decide whether `action` fires at `now`; if it does, restart its group's cooldown.
    pub fn try_fire(&mut self, action: ActionClass, now: f64) -> bool {
        if !self.would_fire(action, now) {
            return false;
        }
        self.state.mark(action.group(), now);
        true
    }

    /// Seconds until `group` may fire again, zero if it already can
    #[must_use]
    pub fn remaining(&self, group: ActionGroup, now: f64) -> f64 {
        (self.state.last(group) + self.config.interval(group) - now).max(0.0)
    }

    #[must_use]
    pub const fn state(&self) -> CooldownState {
        self.state
    }

    #[must_use]
    pub const fn config(&self) -> &CooldownConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_lockout() {
        let mut engine = DebounceEngine::new(CooldownConfig::default(), 10.0);
        assert!(!engine.try_fire(ActionClass::PlayPause, 11.0));
        assert!(!engine.try_fire(ActionClass::PlayPause, 12.0));
        assert!(engine.try_fire(ActionClass::PlayPause, 12.01));
    }

    #[test]
    fn test_discrete_cooldown() {
        let mut engine = DebounceEngine::new(CooldownConfig::default(), -10.0);
        assert!(engine.try_fire(ActionClass::NextTrack, 0.0));
        assert!(!engine.try_fire(ActionClass::NextTrack, 1.0));
        assert!(engine.try_fire(ActionClass::NextTrack, 2.1));
    }

    #[test]
    fn test_discrete_actions_share_a_clock() {
        let mut engine = DebounceEngine::new(CooldownConfig::default(), -10.0);
        assert!(engine.try_fire(ActionClass::Mute, 0.0));
        assert!(!engine.try_fire(ActionClass::PlayPause, 0.5));
        assert!(!engine.try_fire(ActionClass::NextTrack, 1.9));
        assert!(engine.try_fire(ActionClass::PrevTrack, 2.5));
    }

    #[test]
    fn test_groups_are_independent() {
        let mut engine = DebounceEngine::new(CooldownConfig::default(), -10.0);
        assert!(engine.try_fire(ActionClass::NextTrack, 0.0));
        assert!(engine.try_fire(ActionClass::VolumeUp, 0.01));
        assert!(!engine.try_fire(ActionClass::VolumeDown, 0.03));
        assert!(engine.try_fire(ActionClass::VolumeDown, 0.07));
        assert_eq!(engine.state().last_discrete, 0.0);
        assert_eq!(engine.state().last_continuous, 0.07);
    }

    #[test]
    fn test_exact_interval_is_suppressed() {
        let mut engine = DebounceEngine::new(
            CooldownConfig {
                discrete_secs: 2.0,
                continuous_secs: 0.5,
            },
            0.0,
        );
        assert!(!engine.try_fire(ActionClass::Mute, 2.0));
        assert!(!engine.try_fire(ActionClass::VolumeUp, 0.5));
    }

    #[test]
    fn test_clock_going_backwards_does_not_rewind_state() {
        let mut engine = DebounceEngine::new(CooldownConfig::default(), -10.0);
        assert!(engine.try_fire(ActionClass::Mute, 5.0));
        assert!(!engine.try_fire(ActionClass::Mute, -100.0));
        assert_eq!(engine.state().last_discrete, 5.0);
    }

    #[test]
    fn test_remaining() {
        let mut engine = DebounceEngine::new(CooldownConfig::default(), 0.0);
        assert!((engine.remaining(ActionGroup::Discrete, 0.5) - 1.5).abs() < 1e-12);
        assert_eq!(engine.remaining(ActionGroup::Discrete, 5.0), 0.0);
        assert!(engine.try_fire(ActionClass::Mute, 5.0));
        assert_eq!(engine.remaining(ActionGroup::Discrete, 5.0), 2.0);
        assert_eq!(engine.remaining(ActionGroup::Continuous, 5.0), 0.0);
    }
}
