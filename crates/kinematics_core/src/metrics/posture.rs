//! Per-frame posture: body center, joint angles and balance.
//!
//! Everything here depends on a single frame only, so it can run on frames in
//! any order (or in parallel) before the sequential derivative pass.

use crate::config::{BalanceConfig, EngineConfig};
use crate::geometry::{angle_degrees, clamp_score, distance, mean, midpoint, Point};
use crate::pose::{KeypointName, PoseFrame, Torso};

use KeypointName::*;

/// Three landmarks defining a joint angle at the middle one.
type Joint = (KeypointName, KeypointName, KeypointName);

const ELBOWS: [Joint; 2] = [
    (LeftShoulder, LeftElbow, LeftWrist),
    (RightShoulder, RightElbow, RightWrist),
];
const KNEES: [Joint; 2] = [(LeftHip, LeftKnee, LeftAnkle), (RightHip, RightKnee, RightAnkle)];
const SHOULDERS: [Joint; 2] = [
    (LeftElbow, LeftShoulder, LeftHip),
    (RightElbow, RightShoulder, RightHip),
];
const HIPS: [Joint; 2] = [
    (LeftShoulder, LeftHip, LeftKnee),
    (RightShoulder, RightHip, RightKnee),
];

/// Joint-angle group averages for one frame (degrees).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct JointAngles {
    pub knees: Option<f32>,
    pub elbows: Option<f32>,
    pub shoulders: Option<f32>,
    pub hips: Option<f32>,
}

/// Single-frame measurements of a frame with a usable torso.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FramePosture {
    pub frame_index: u64,
    pub timestamp_ms: f64,
    pub center: Point,
    pub joint_angles: JointAngles,
    pub balance: f32,
}

impl FramePosture {
    /// Measure a frame, `None` when the torso is incomplete or the timestamp
    /// is not finite (frame skipped).
    pub fn measure(frame: &PoseFrame, config: &EngineConfig) -> Option<Self> {
        if !frame.timestamp_ms.is_finite() {
            return None;
        }
        let threshold = config.pose.confidence_threshold;
        let torso = frame.torso(threshold)?;

        Some(Self {
            frame_index: frame.frame_index,
            timestamp_ms: frame.timestamp_ms,
            center: torso.center(),
            joint_angles: JointAngles {
                knees: group_angle(frame, &KNEES, threshold),
                elbows: group_angle(frame, &ELBOWS, threshold),
                shoulders: group_angle(frame, &SHOULDERS, threshold),
                hips: group_angle(frame, &HIPS, threshold),
            },
            balance: balance_score(&torso, &config.balance),
        })
    }
}

/// Average of the left/right angles that could be measured.
fn group_angle(frame: &PoseFrame, sides: &[Joint; 2], threshold: f32) -> Option<f32> {
    let angles: Vec<f32> = sides
        .iter()
        .filter_map(|&(a, b, c)| {
            let a = frame.reliable(a, threshold)?;
            let b = frame.reliable(b, threshold)?;
            let c = frame.reliable(c, threshold)?;
            angle_degrees(&a, &b, &c)
        })
        .collect();
    mean(&angles)
}

/// Torso symmetry heuristic in `[0, 100]`.
pub fn balance_score(torso: &Torso, config: &BalanceConfig) -> f32 {
    let shoulder_width = distance(&torso.left_shoulder, &torso.right_shoulder);
    let hip_width = distance(&torso.left_hip, &torso.right_hip);
    let ratio = shoulder_width / hip_width.max(config.epsilon);

    let shoulder_mid = midpoint(&torso.left_shoulder, &torso.right_shoulder);
    let hip_mid = midpoint(&torso.left_hip, &torso.right_hip);
    let misalignment = (shoulder_mid.x - hip_mid.x).abs() / shoulder_width.max(config.epsilon);

    let penalty = (ratio - config.ideal_ratio).abs() * config.ratio_weight
        + misalignment * config.misalignment_weight;
    clamp_score(100.0 - penalty)
}
