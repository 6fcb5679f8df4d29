//! # Metrics Calculator
//!
//! Turns an ordered pose-frame sequence for one subject into time-aligned
//! metric series.
//!
//! ## Algorithm
//! 1. Measure each frame independently (center, joint angles, balance);
//!    frames without a complete reliable torso are skipped entirely
//! 2. Fold the retained postures in order through [`MotionState`] to derive
//!    speed and acceleration
//!
//! Step 1 runs on the rayon pool once the sequence reaches
//! `EngineConfig::parallel_threshold`; results are collected in frame order
//! before step 2.

use rayon::prelude::*;
use tracing::{debug, warn};

use super::model::PlayerMetrics;
use super::posture::FramePosture;
use crate::config::EngineConfig;
use crate::geometry::{distance, Point};
use crate::pose::PoseFrame;

/// Sequential state carried between retained frames.
#[derive(Debug, Clone, Copy, Default)]
pub struct MotionState {
    pub prev_position: Option<Point>,
    pub prev_speed: Option<f32>,
    pub prev_timestamp_ms: Option<f64>,
}

/// Derivatives produced by one fold step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MotionSample {
    pub speed: Option<f32>,
    pub acceleration: Option<f32>,
}

impl MotionState {
    /// Advance to the next retained position.
    ///
    /// A non-positive `dt` yields no speed sample, and acceleration needs a
    /// measured speed on both this and the previous step.
    pub fn step(&mut self, position: Point, timestamp_ms: f64) -> MotionSample {
        let mut sample = MotionSample::default();

        if let (Some(prev_pos), Some(prev_ts)) = (self.prev_position, self.prev_timestamp_ms) {
            let dt = ((timestamp_ms - prev_ts) / 1000.0) as f32;
            if dt.is_finite() && dt > 0.0 {
                let speed = distance(&prev_pos, &position) / dt;
                if speed.is_finite() {
                    sample.speed = Some(speed);
                    sample.acceleration = self
                        .prev_speed
                        .map(|prev| (speed - prev) / dt)
                        .filter(|a| a.is_finite());
                }
            } else if dt < 0.0 {
                warn!(prev_ts, timestamp_ms, "Out-of-order timestamp, derivative sample dropped");
            } else if dt == 0.0 {
                debug!(timestamp_ms, "Duplicate timestamp, speed sample dropped");
            } else {
                warn!(prev_ts, timestamp_ms, "Non-finite time step, derivative sample dropped");
            }
        }

        self.prev_position = Some(position);
        self.prev_timestamp_ms = Some(timestamp_ms);
        self.prev_speed = sample.speed;
        sample
    }
}

/// Incremental metrics builder; push frames in order, then `finish`.
///
/// The batch calculator is a fold over this accumulator, so streamed and
/// batch results are identical.
#[derive(Debug, Clone)]
pub struct MetricsAccumulator {
    config: EngineConfig,
    state: MotionState,
    metrics: PlayerMetrics,
    frames_seen: usize,
}

impl MetricsAccumulator {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            state: MotionState::default(),
            metrics: PlayerMetrics::default(),
            frames_seen: 0,
        }
    }

    /// Measure and append one frame. Returns `false` if it was skipped.
    pub fn push(&mut self, frame: &PoseFrame) -> bool {
        self.frames_seen += 1;
        match FramePosture::measure(frame, &self.config) {
            Some(posture) => {
                self.push_posture(posture);
                true
            }
            None => {
                debug!(
                    frame_index = frame.frame_index,
                    timestamp_ms = frame.timestamp_ms,
                    "Incomplete torso or invalid timestamp, frame skipped"
                );
                false
            }
        }
    }

    /// Append an already measured posture (frames must still arrive in order).
    pub fn push_posture(&mut self, posture: FramePosture) {
        let motion = self.state.step(posture.center, posture.timestamp_ms);

        let m = &mut self.metrics;
        m.frame_indices.push(posture.frame_index);
        m.timestamps.push(posture.timestamp_ms);
        m.position_x.push(posture.center.x);
        m.position_y.push(posture.center.y);
        m.speed.push(motion.speed);
        m.acceleration.push(motion.acceleration);
        m.joint_angles.knees.push(posture.joint_angles.knees);
        m.joint_angles.elbows.push(posture.joint_angles.elbows);
        m.joint_angles.shoulders.push(posture.joint_angles.shoulders);
        m.joint_angles.hips.push(posture.joint_angles.hips);
        m.balance.push(posture.balance);
    }

    pub fn frames_seen(&self) -> usize {
        self.frames_seen
    }

    pub fn frames_retained(&self) -> usize {
        self.metrics.len()
    }

    /// Metrics so far without consuming the accumulator.
    pub fn snapshot(&self) -> &PlayerMetrics {
        &self.metrics
    }

    pub fn finish(self) -> PlayerMetrics {
        self.metrics
    }
}

/// Batch calculator over a complete frame sequence.
#[derive(Debug, Clone, Default)]
pub struct MetricsCalculator {
    config: EngineConfig,
}

impl MetricsCalculator {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Compute time-aligned metrics. Empty input gives empty metrics.
    pub fn compute(&self, frames: &[PoseFrame]) -> PlayerMetrics {
        let postures = self.measure_all(frames);

        let mut acc = MetricsAccumulator::new(self.config.clone());
        for posture in postures.into_iter().flatten() {
            acc.push_posture(posture);
        }

        let skipped = frames.len() - acc.frames_retained();
        if skipped > 0 {
            debug!(skipped, total = frames.len(), "Frames without a usable torso were skipped");
        }
        acc.finish()
    }

    fn measure_all(&self, frames: &[PoseFrame]) -> Vec<Option<FramePosture>> {
        if frames.len() >= self.config.parallel_threshold {
            // par_iter().collect() keeps input order
            frames
                .par_iter()
                .map(|frame| FramePosture::measure(frame, &self.config))
                .collect()
        } else {
            frames
                .iter()
                .map(|frame| FramePosture::measure(frame, &self.config))
                .collect()
        }
    }
}
