use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::keypoint::{Keypoint, KeypointName};
use crate::geometry::Point;

/// One sampled instant for one tracked subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PoseFrame {
    pub frame_index: u64,
    /// Presentation time in milliseconds from clip start
    pub timestamp_ms: f64,
    /// Detected landmarks; absent entries were not detected at all
    #[serde(default)]
    pub keypoints: BTreeMap<KeypointName, Keypoint>,
}

/// The four torso landmarks of a frame, all reliable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Torso {
    pub left_shoulder: Point,
    pub right_shoulder: Point,
    pub left_hip: Point,
    pub right_hip: Point,
}

impl PoseFrame {
    pub fn new(frame_index: u64, timestamp_ms: f64) -> Self {
        Self { frame_index, timestamp_ms, keypoints: BTreeMap::new() }
    }

    /// Build from a raw COCO-ordered estimator output (index = landmark).
    pub fn from_coco(frame_index: u64, timestamp_ms: f64, raw: &[Keypoint]) -> Self {
        let keypoints = raw
            .iter()
            .enumerate()
            .filter_map(|(i, kp)| KeypointName::from_index(i).map(|name| (name, *kp)))
            .collect();
        Self { frame_index, timestamp_ms, keypoints }
    }

    pub fn with_keypoint(mut self, name: KeypointName, keypoint: Keypoint) -> Self {
        self.keypoints.insert(name, keypoint);
        self
    }

    /// Position of a landmark if present and above the confidence threshold.
    pub fn reliable(&self, name: KeypointName, threshold: f32) -> Option<Point> {
        self.keypoints
            .get(&name)
            .filter(|kp| kp.is_reliable(threshold))
            .map(Keypoint::point)
    }

    /// Torso landmarks, or `None` if any of the four is missing/unreliable.
    pub fn torso(&self, threshold: f32) -> Option<Torso> {
        Some(Torso {
            left_shoulder: self.reliable(KeypointName::LeftShoulder, threshold)?,
            right_shoulder: self.reliable(KeypointName::RightShoulder, threshold)?,
            left_hip: self.reliable(KeypointName::LeftHip, threshold)?,
            right_hip: self.reliable(KeypointName::RightHip, threshold)?,
        })
    }

}

impl Torso {
    /// Body center: mean of the four torso landmarks.
    pub fn center(&self) -> Point {
        Point::new(
            (self.left_shoulder.x + self.right_shoulder.x + self.left_hip.x + self.right_hip.x)
                / 4.0,
            (self.left_shoulder.y + self.right_shoulder.y + self.left_hip.y + self.right_hip.y)
                / 4.0,
        )
    }
}
