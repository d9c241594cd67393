//! Property tests for pose extraction, mode selection and classification

mod test_helpers;

use hand_media_control::{
    action::ActionClass,
    classifier::{media_action, GestureClassifier},
    mode::Mode,
    observation::Handedness,
    pose::{self, FingerState},
};
use proptest::prelude::*;
use test_helpers::{hand_points, observation, pinch_points};

fn finger_state() -> impl Strategy<Value = [bool; 5]> {
    prop::array::uniform5(any::<bool>())
}

proptest! {
    #[test]
    fn prop_extraction_is_idempotent(
        points in prop::collection::vec((0f64..640.0, 0f64..480.0), 21),
        left in any::<bool>(),
    ) {
        let handedness = if left { Handedness::Left } else { Handedness::Right };
        let hand = observation(&points, handedness);
        let first = pose::extract(&hand).unwrap();
        let second = pose::extract(&hand).unwrap();
        prop_assert_eq!(first.fingers, second.fingers);
        prop_assert_eq!(first.pinch.to_bits(), second.pinch.to_bits());
    }

    #[test]
    fn prop_extracted_fingers_match_construction(fingers in finger_state()) {
        let hand = observation(&hand_points(fingers), Handedness::Left);
        prop_assert_eq!(pose::extract(&hand).unwrap().fingers, FingerState(fingers));
    }

    #[test]
    fn prop_media_action_depends_on_count(fingers in finger_state()) {
        let state = FingerState(fingers);
        let expected = match state.count() {
            5 => Some(ActionClass::NextTrack),
            4 => Some(ActionClass::PrevTrack),
            2 if fingers == [false, true, true, false, false] => Some(ActionClass::PlayPause),
            0 => Some(ActionClass::Mute),
            _ => None,
        };
        prop_assert_eq!(media_action(&state), expected);
    }

    #[test]
    fn prop_media_actions_are_discrete(fingers in finger_state(), pinch in 0f64..400.0) {
        let classifier = GestureClassifier::default();
        let pose = pose::HandPose { fingers: FingerState(fingers), pinch };
        if let Some(action) = classifier.classify(Mode::Media, &pose).pending() {
            prop_assert!(!matches!(action, ActionClass::VolumeUp | ActionClass::VolumeDown));
        }
    }

    #[test]
    fn prop_volume_intent_only_at_extremes(distance in 0f64..400.0) {
        let hand = observation(&pinch_points(distance), Handedness::Right);
        let pose = pose::extract(&hand).unwrap();
        let result = GestureClassifier::default().classify(Mode::from_handedness(hand.handedness), &pose);

        let percent = result.volume_percent().unwrap();
        prop_assert!((0.0..=100.0).contains(&percent));
        match result.pending() {
            Some(ActionClass::VolumeUp) => prop_assert!(percent > 95.0),
            Some(ActionClass::VolumeDown) => prop_assert!(percent < 5.0),
            None => prop_assert!((5.0..=95.0).contains(&percent)),
            Some(other) => prop_assert!(false, "unexpected {}", other),
        }
    }

    #[test]
    fn prop_non_left_labels_select_volume(label in "[A-Za-z ]{0,12}") {
        let mode = Mode::from_handedness(Handedness::from_label(&label));
        if label.trim().eq_ignore_ascii_case("left") {
            prop_assert_eq!(mode, Mode::Media);
        } else {
            prop_assert_eq!(mode, Mode::Volume);
        }
    }
}

#[test]
fn test_calibration_points() {
    let classifier = GestureClassifier::default();
    for (distance, percent, intent) in [
        (20.0, 0.0, Some(ActionClass::VolumeDown)),
        (200.0, 100.0, Some(ActionClass::VolumeUp)),
        (110.0, 50.0, None),
    ] {
        let pose = pose::extract(&observation(&pinch_points(distance), Handedness::Right)).unwrap();
        assert_eq!(pose.pinch, distance);
        let result = classifier.classify(Mode::Volume, &pose);
        assert_eq!(result.volume_percent(), Some(percent));
        assert_eq!(result.pending(), intent);
    }
}
