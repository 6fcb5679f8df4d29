//! # Pose Frame Model
//!
//! Normalized representation of the pose estimator's output: one
//! [`PoseFrame`] per sampled instant, keyed by the 17 COCO landmarks.
//!
//! - `keypoint` - landmark names and single detections
//! - `frame` - per-instant keypoint sets and torso lookup

pub mod frame;
pub mod keypoint;

pub use frame::{PoseFrame, Torso};
pub use keypoint::{Keypoint, KeypointName};
