//! # Kinematic Engine
//!
//! Single entry point tying the calculator, aggregator and event extractor
//! to one validated [`EngineConfig`].
//!
//! ## Usage
//! ```rust
//! use kinematics_core::{EngineConfig, KinematicEngine};
//!
//! let engine = KinematicEngine::new(EngineConfig::default()).unwrap();
//! let analysis = engine.analyze(&[]);
//! assert_eq!(analysis.frames_total, 0);
//! assert_eq!(analysis.stats.distance_covered, 0.0);
//! ```

use rayon::prelude::*;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::error::Result;
use crate::events::{extract_sprints, movement_intensity, MovementIntensity, SprintSegment};
use crate::metrics::{MetricsAccumulator, MetricsCalculator, PlayerMetrics};
use crate::pose::PoseFrame;
use crate::stats::{PlayerStats, StatsAggregator};
use crate::table::{to_rows, FrameRow};

/// Result of analyzing one subject's sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Analysis {
    pub metrics: PlayerMetrics,
    pub stats: PlayerStats,
    pub frames_total: usize,
    pub frames_retained: usize,
    /// Frames dropped for lacking a reliable torso or a finite timestamp
    pub frames_skipped: usize,
}

impl Analysis {
    pub fn rows(&self) -> Vec<FrameRow> {
        to_rows(&self.metrics)
    }

    /// Share of input frames that produced a measurement (0.0 - 1.0).
    pub fn retention_ratio(&self) -> f32 {
        if self.frames_total == 0 {
            0.0
        } else {
            self.frames_retained as f32 / self.frames_total as f32
        }
    }
}

/// One subject's frames in a multi-subject batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SubjectFrames {
    pub subject_id: String,
    #[serde(default)]
    pub frames: Vec<PoseFrame>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SubjectAnalysis {
    pub subject_id: String,
    pub analysis: Analysis,
}

#[derive(Debug, Clone)]
pub struct KinematicEngine {
    calculator: MetricsCalculator,
    aggregator: StatsAggregator,
}

impl KinematicEngine {
    /// Fails if any config value is out of range.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            aggregator: StatsAggregator::new(config.scoring.clone()),
            calculator: MetricsCalculator::new(config),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        self.calculator.config()
    }

    /// Metrics and stats for one subject's ordered frame sequence.
    pub fn analyze(&self, frames: &[PoseFrame]) -> Analysis {
        let metrics = self.calculator.compute(frames);
        let stats = self.aggregator.aggregate(&metrics);
        let frames_retained = metrics.len();

        let analysis = Analysis {
            frames_total: frames.len(),
            frames_retained,
            frames_skipped: frames.len() - frames_retained,
            metrics,
            stats,
        };

        info!(
            frames = analysis.frames_total,
            retained = analysis.frames_retained,
            distance = analysis.stats.distance_covered,
            max_speed = analysis.stats.max_speed,
            "Sequence analyzed"
        );
        analysis
    }

    /// Analyze independent subjects on the rayon pool, preserving input order.
    pub fn analyze_batch(&self, subjects: &[SubjectFrames]) -> Vec<SubjectAnalysis> {
        debug!(subjects = subjects.len(), "Batch analysis started");
        subjects
            .par_iter()
            .map(|subject| SubjectAnalysis {
                subject_id: subject.subject_id.clone(),
                analysis: self.analyze(&subject.frames),
            })
            .collect()
    }

    /// Incremental accumulator sharing this engine's config.
    pub fn stream(&self) -> MetricsAccumulator {
        MetricsAccumulator::new(self.config().clone())
    }

    /// Stats for metrics produced by [`stream`](Self::stream).
    pub fn summarize(&self, metrics: &PlayerMetrics) -> PlayerStats {
        self.aggregator.aggregate(metrics)
    }

    pub fn sprints(&self, metrics: &PlayerMetrics) -> Vec<SprintSegment> {
        extract_sprints(metrics, &self.config().sprint)
    }

    pub fn intensity(&self, metrics: &PlayerMetrics) -> MovementIntensity {
        movement_intensity(metrics, &self.config().sprint)
    }
}
