//! Helper functions and utilities for tests

#![allow(dead_code)]

use hand_media_control::{
    action::ActionClass,
    capture::{DetectionRecord, HandRecord, LandmarkRecord},
    clock::Clock,
    dispatch::CommandDispatcher,
    observation::{HandObservation, Handedness},
    Result,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub const WIDTH: u32 = 640;
pub const HEIGHT: u32 = 480;

/// Dispatcher that records every action it receives
#[derive(Clone, Default)]
pub struct RecordingDispatcher {
    pub actions: Rc<RefCell<Vec<ActionClass>>>,
}

impl RecordingDispatcher {
    pub fn taken(&self) -> Vec<ActionClass> {
        self.actions.borrow().clone()
    }
}

impl CommandDispatcher for RecordingDispatcher {
    fn dispatch(&mut self, action: ActionClass) -> Result<()> {
        self.actions.borrow_mut().push(action);
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }
}

/// Clock that moves forward by a fixed step every time it is read
pub struct SteppingClock {
    next: Cell<f64>,
    step: f64,
}

impl SteppingClock {
    pub fn new(start: f64, step: f64) -> Self {
        Self {
            next: Cell::new(start),
            step,
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> f64 {
        let now = self.next.get();
        self.next.set(now + self.step);
        now
    }
}

/// Pixel positions for a hand with the given fingers extended.
///
/// Coordinates are multiples of 5 horizontally and 15 vertically so they
/// survive normalization to a 640x480 frame exactly.
pub fn hand_points(fingers: [bool; 5]) -> Vec<(f64, f64)> {
    let mut points = vec![(320.0, 420.0); 21];

    // Thumb: lateral test against the IP joint
    points[3] = (200.0, 300.0);
    points[4] = if fingers[0] { (230.0, 285.0) } else { (170.0, 285.0) };

    // Other fingers: tip above or below the joint two below it
    for (k, tip) in [8usize, 12, 16, 20].into_iter().enumerate() {
        let x = 250.0 + 40.0 * k as f64;
        points[tip - 2] = (x, 240.0);
        points[tip - 1] = (x, 210.0);
        points[tip] = (x, if fingers[k + 1] { 180.0 } else { 300.0 });
    }
    points
}

/// Hand whose thumb and index tips are `distance` pixels apart horizontally
pub fn pinch_points(distance: f64) -> Vec<(f64, f64)> {
    let mut points = hand_points([true, true, false, false, false]);
    points[4] = (200.0, 300.0);
    points[3] = (195.0, 300.0);
    points[8] = (200.0 + distance, 300.0);
    points
}

pub fn observation(points: &[(f64, f64)], handedness: Handedness) -> HandObservation {
    HandObservation::from_points(points, handedness)
}

/// Detection record for one hand, in normalized coordinates
pub fn hand_record(points: &[(f64, f64)], handedness: &str, score: f32) -> HandRecord {
    HandRecord {
        handedness: handedness.to_string(),
        score,
        landmarks: points
            .iter()
            .map(|&(x, y)| LandmarkRecord {
                x: (x / f64::from(WIDTH)) as f32,
                y: (y / f64::from(HEIGHT)) as f32,
                z: 0.0,
            })
            .collect(),
    }
}

/// One JSON line carrying the given hands
pub fn record_line(hands: Vec<HandRecord>) -> String {
    let record = DetectionRecord {
        width: Some(WIDTH),
        height: Some(HEIGHT),
        hands,
        error: None,
    };
    serde_json::to_string(&record).expect("record serializes")
}

pub fn empty_line() -> String {
    record_line(Vec::new())
}
