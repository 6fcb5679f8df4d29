//! # Stats Module
//!
//! Scalar summary of a subject's clip.
//!
//! - `aggregator` - reduces [`PlayerMetrics`](crate::metrics::PlayerMetrics) to [`PlayerStats`]
//! - `scores` - technical / physical / movement-efficiency formulas

pub mod aggregator;
pub mod scores;

pub use aggregator::{distance_covered, StatsAggregator};
pub use scores::{movement_efficiency, physical_score, technical_score};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::geometry::clamp_score;

/// Summary statistics for one analyzed sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PlayerStats {
    /// Mean measured speed (px/s)
    pub avg_speed: f32,
    /// Peak measured speed (px/s)
    pub max_speed: f32,
    /// Mean signed acceleration (px/s²)
    pub avg_acceleration: f32,
    /// Body-center path length (px)
    pub distance_covered: f32,
    /// Mean balance (0 - 100)
    pub balance_score: f32,
    /// Joint-angle consistency (0 - 100)
    pub technical_score: f32,
    /// Speed/acceleration/distance composite (0 - 100)
    pub physical_score: f32,
    /// Distance per accumulated acceleration (0 - 100)
    pub movement_efficiency: f32,
}

impl PlayerStats {
    /// Composite scores all within `[0, 100]`.
    pub fn scores_in_range(&self) -> bool {
        [
            self.balance_score,
            self.technical_score,
            self.physical_score,
            self.movement_efficiency,
        ]
        .iter()
        .all(|s| (0.0..=100.0).contains(s))
    }

    pub fn is_finite(&self) -> bool {
        [
            self.avg_speed,
            self.max_speed,
            self.avg_acceleration,
            self.distance_covered,
            self.balance_score,
            self.technical_score,
            self.physical_score,
            self.movement_efficiency,
        ]
        .iter()
        .all(|v| v.is_finite())
    }

    /// Replace non-finite fields with 0 and enforce the range invariants.
    pub(crate) fn sanitized(self) -> Self {
        let finite = |v: f32| if v.is_finite() { v } else { 0.0 };

        let avg_speed = finite(self.avg_speed).max(0.0);
        let max_speed = finite(self.max_speed).max(avg_speed);

        Self {
            avg_speed,
            max_speed,
            avg_acceleration: finite(self.avg_acceleration),
            distance_covered: finite(self.distance_covered).max(0.0),
            balance_score: clamp_score(self.balance_score),
            technical_score: clamp_score(self.technical_score),
            physical_score: clamp_score(self.physical_score),
            movement_efficiency: clamp_score(self.movement_efficiency),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitized_repairs_invariants() {
        let stats = PlayerStats {
            avg_speed: f32::INFINITY,
            max_speed: 12.0,
            avg_acceleration: f32::NAN,
            distance_covered: -3.0,
            balance_score: 130.0,
            technical_score: -5.0,
            physical_score: f32::NAN,
            movement_efficiency: 50.0,
        }
        .sanitized();

        assert!(stats.is_finite());
        assert!(stats.scores_in_range());
        assert_eq!(stats.avg_speed, 0.0);
        assert_eq!(stats.max_speed, 12.0);
        assert_eq!(stats.distance_covered, 0.0);
        assert_eq!(stats.balance_score, 100.0);
        assert_eq!(stats.movement_efficiency, 50.0);
    }

    #[test]
    fn test_stats_json_field_names() {
        let json = serde_json::to_value(PlayerStats::default()).unwrap();
        for key in [
            "avg_speed",
            "max_speed",
            "avg_acceleration",
            "distance_covered",
            "balance_score",
            "technical_score",
            "physical_score",
            "movement_efficiency",
        ] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
    }
}
