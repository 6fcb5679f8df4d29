use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Per-frame joint-angle series, one entry per retained frame.
///
/// `None` means the frame gave no usable measurement for that joint group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct JointAngleSeries {
    pub knees: Vec<Option<f32>>,
    pub elbows: Vec<Option<f32>>,
    pub shoulders: Vec<Option<f32>>,
    pub hips: Vec<Option<f32>>,
}

impl JointAngleSeries {
    /// Measured samples of each group, in knees/elbows/shoulders/hips order.
    pub fn measured_groups(&self) -> [Vec<f32>; 4] {
        [
            measured(&self.knees),
            measured(&self.elbows),
            measured(&self.shoulders),
            measured(&self.hips),
        ]
    }
}

/// Time-aligned output of the metrics calculator.
///
/// Every vector has the same length and index `i` refers to the `i`-th
/// retained frame. Derivative entries that could not be measured (first
/// speed, first two accelerations, non-positive `dt`) are `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PlayerMetrics {
    pub frame_indices: Vec<u64>,
    pub timestamps: Vec<f64>,
    pub position_x: Vec<f32>,
    pub position_y: Vec<f32>,
    /// Body-center speed (px/s)
    pub speed: Vec<Option<f32>>,
    /// Change of speed (px/s²)
    pub acceleration: Vec<Option<f32>>,
    pub joint_angles: JointAngleSeries,
    /// Postural balance (0 - 100)
    pub balance: Vec<f32>,
}

impl PlayerMetrics {
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// All series share the length of `timestamps`.
    pub fn is_aligned(&self) -> bool {
        self.series_lengths().iter().all(|&len| len == self.timestamps.len())
    }

    /// Length of the shortest series; equals `len()` when aligned.
    pub fn common_len(&self) -> usize {
        self.series_lengths().into_iter().min().unwrap_or(0)
    }

    fn series_lengths(&self) -> [usize; 11] {
        [
            self.timestamps.len(),
            self.frame_indices.len(),
            self.position_x.len(),
            self.position_y.len(),
            self.speed.len(),
            self.acceleration.len(),
            self.joint_angles.knees.len(),
            self.joint_angles.elbows.len(),
            self.joint_angles.shoulders.len(),
            self.joint_angles.hips.len(),
            self.balance.len(),
        ]
    }

    pub fn measured_speeds(&self) -> Vec<f32> {
        measured(&self.speed)
    }

    pub fn measured_accelerations(&self) -> Vec<f32> {
        measured(&self.acceleration)
    }

    /// Dense speed series for charting; unmeasured entries are 0.
    pub fn speed_or_zero(&self) -> Vec<f32> {
        self.speed.iter().map(|v| v.unwrap_or(0.0)).collect()
    }

    /// Dense acceleration series for charting; unmeasured entries are 0.
    pub fn acceleration_or_zero(&self) -> Vec<f32> {
        self.acceleration.iter().map(|v| v.unwrap_or(0.0)).collect()
    }

    /// Body-center positions as `(x, y)` pairs.
    pub fn positions(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.position_x.iter().copied().zip(self.position_y.iter().copied())
    }
}

fn measured(series: &[Option<f32>]) -> Vec<f32> {
    series.iter().flatten().copied().collect()
}
