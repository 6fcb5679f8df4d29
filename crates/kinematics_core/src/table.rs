//! Row-oriented view of [`PlayerMetrics`] for export and charting.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::metrics::PlayerMetrics;

/// One retained frame as a flat record. `None` cells are "no measurement".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FrameRow {
    pub frame_index: u64,
    pub timestamp_ms: f64,
    pub position_x: f32,
    pub position_y: f32,
    pub speed: Option<f32>,
    pub acceleration: Option<f32>,
    pub knee_angle: Option<f32>,
    pub elbow_angle: Option<f32>,
    pub shoulder_angle: Option<f32>,
    pub hip_angle: Option<f32>,
    pub balance: f32,
}

/// Flatten metrics into rows, one per retained frame.
///
/// Hand-built metrics with uneven series are cut to the shortest one.
pub fn to_rows(metrics: &PlayerMetrics) -> Vec<FrameRow> {
    let angles = &metrics.joint_angles;
    (0..metrics.common_len())
        .map(|i| FrameRow {
            frame_index: metrics.frame_indices[i],
            timestamp_ms: metrics.timestamps[i],
            position_x: metrics.position_x[i],
            position_y: metrics.position_y[i],
            speed: metrics.speed[i],
            acceleration: metrics.acceleration[i],
            knee_angle: angles.knees[i],
            elbow_angle: angles.elbows[i],
            shoulder_angle: angles.shoulders[i],
            hip_angle: angles.hips[i],
            balance: metrics.balance[i],
        })
        .collect()
}
