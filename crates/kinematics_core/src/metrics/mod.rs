//! # Metrics Module
//!
//! Frame-level movement metrics for a single tracked subject.
//!
//! - `posture` - single-frame measurements (center, joint angles, balance)
//! - `calculator` - ordered derivative pass (speed, acceleration)
//! - `model` - the time-aligned [`PlayerMetrics`] output

pub mod calculator;
pub mod model;
pub mod posture;

pub use calculator::{MetricsAccumulator, MetricsCalculator, MotionSample, MotionState};
pub use model::{JointAngleSeries, PlayerMetrics};
pub use posture::{balance_score, FramePosture, JointAngles};
