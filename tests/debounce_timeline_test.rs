//! Cooldown behaviour over realistic frame timelines

mod test_helpers;

use hand_media_control::{
    action::{ActionClass, ActionGroup},
    classifier::PinchCalibration,
    clock::{Clock, ManualClock},
    debounce::{CooldownConfig, DebounceEngine},
    observation::Handedness,
    pipeline::GesturePipeline,
};
use test_helpers::{hand_points, observation, pinch_points};

#[test]
fn test_discrete_requests_at_zero_one_and_two_point_one() {
    let mut engine = DebounceEngine::new(CooldownConfig::default(), -10.0);
    assert!(engine.try_fire(ActionClass::NextTrack, 0.0));
    assert!(!engine.try_fire(ActionClass::NextTrack, 1.0));
    assert!(engine.try_fire(ActionClass::NextTrack, 2.1));
}

#[test]
fn test_continuous_not_blocked_by_discrete() {
    let mut engine = DebounceEngine::new(CooldownConfig::default(), -10.0);
    assert!(engine.try_fire(ActionClass::Mute, 0.0));
    assert!(engine.try_fire(ActionClass::VolumeUp, 0.01));
}

#[test]
fn test_first_gesture_waits_out_startup() {
    let clock = ManualClock::new(0.0);
    let mut pipeline = GesturePipeline::new(PinchCalibration::default(), CooldownConfig::default(), clock.now());
    let open = observation(&hand_points([true; 5]), Handedness::Left);

    let mut fired = Vec::new();
    for _ in 0..30 {
        clock.advance(0.1);
        if let Some(action) = pipeline.process(&open, clock.now()).unwrap().emitted {
            fired.push((clock.now(), action));
        }
    }

    // Nothing before two seconds have passed since start-up
    assert!(!fired.is_empty());
    assert!(fired.iter().all(|&(t, _)| t > 2.0));
    assert!(fired.iter().all(|&(_, a)| a == ActionClass::NextTrack));
}

#[test]
fn test_volume_ramp_rate_limited_by_continuous_interval() {
    let clock = ManualClock::new(0.0);
    let mut pipeline = GesturePipeline::new(PinchCalibration::default(), CooldownConfig::default(), -1.0);
    let wide = observation(&pinch_points(250.0), Handedness::Right);

    // 120 frames at 1/64 s: with a 0.05 s gate every fourth frame fires
    let mut fired = 0;
    for _ in 0..120 {
        if pipeline.process(&wide, clock.now()).unwrap().emitted == Some(ActionClass::VolumeUp) {
            fired += 1;
        }
        clock.advance(1.0 / 64.0);
    }
    assert_eq!(fired, 30);
}

#[test]
fn test_suppressed_requests_do_not_extend_cooldown() {
    let mut engine = DebounceEngine::new(CooldownConfig::default(), -10.0);
    assert!(engine.try_fire(ActionClass::PlayPause, 0.0));
    for step in 1..=19 {
        assert!(!engine.try_fire(ActionClass::PlayPause, f64::from(step) * 0.1));
    }
    assert_eq!(engine.state().last(ActionGroup::Discrete), 0.0);
    assert!(engine.try_fire(ActionClass::PrevTrack, 2.01));
}

#[test]
fn test_hand_leaving_view_keeps_cooldown() {
    let mut pipeline = GesturePipeline::new(PinchCalibration::default(), CooldownConfig::default(), -10.0);
    let fist = observation(&hand_points([false; 5]), Handedness::Left);

    assert_eq!(pipeline.process(&fist, 0.0).unwrap().emitted, Some(ActionClass::Mute));
    pipeline.idle();
    assert_eq!(pipeline.process(&fist, 1.0).unwrap().emitted, None);
    assert_eq!(pipeline.process(&fist, 2.5).unwrap().emitted, Some(ActionClass::Mute));
}
