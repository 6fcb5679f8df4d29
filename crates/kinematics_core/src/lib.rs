//! # kinematics_core - Kinematic Performance Metrics Engine
//!
//! Turns a time-ordered sequence of 2D pose keypoints for one tracked subject
//! into per-frame movement metrics and a fixed set of summary scores.
//!
//! ## Features
//! - Body-center trajectory, speed and acceleration from torso keypoints
//! - Knee / elbow / shoulder / hip joint angles and postural balance
//! - Technical, physical and movement-efficiency scores (0 - 100)
//! - Sprint segments and distance by intensity band
//! - Batch, streaming and JSON entry points
//!
//! ## Usage
//! ```rust
//! use kinematics_core::{EngineConfig, Keypoint, KeypointName, KinematicEngine, PoseFrame};
//!
//! let frame = |i: u64, x: f32| {
//!     PoseFrame::new(i, i as f64 * 100.0)
//!         .with_keypoint(KeypointName::LeftShoulder, Keypoint::new(x - 20.0, 50.0, 0.9))
//!         .with_keypoint(KeypointName::RightShoulder, Keypoint::new(x + 20.0, 50.0, 0.9))
//!         .with_keypoint(KeypointName::LeftHip, Keypoint::new(x - 20.0, 150.0, 0.9))
//!         .with_keypoint(KeypointName::RightHip, Keypoint::new(x + 20.0, 150.0, 0.9))
//! };
//!
//! let engine = KinematicEngine::new(EngineConfig::default()).unwrap();
//! let analysis = engine.analyze(&[frame(0, 0.0), frame(1, 10.0)]);
//! assert!((analysis.stats.max_speed - 100.0).abs() < 1e-3);
//! ```

// Doc formatting lints - purely cosmetic
#![allow(clippy::doc_lazy_continuation)]
// Config structs are tweaked from presets in tests and docs
#![allow(clippy::field_reassign_with_default)]
// Parallel series are indexed together
#![allow(clippy::needless_range_loop)]

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod geometry;
pub mod metrics;
pub mod pose;
pub mod stats;
pub mod table;

// Re-export main API
pub use api::{analyze_frames_json, request_schema_json, AnalysisRequest, AnalysisResponse};
pub use config::{BalanceConfig, EngineConfig, PoseConfig, ScoreConfig, SprintConfig};
pub use engine::{Analysis, KinematicEngine, SubjectAnalysis, SubjectFrames};
pub use error::{ApiError, ConfigError, Result};

// Re-export pipeline types
pub use events::{extract_sprints, movement_intensity, MovementIntensity, SprintSegment};
pub use metrics::{JointAngleSeries, MetricsAccumulator, MetricsCalculator, PlayerMetrics};
pub use pose::{Keypoint, KeypointName, PoseFrame};
pub use stats::{PlayerStats, StatsAggregator};
pub use table::{to_rows, FrameRow};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
