use super::scores::{movement_efficiency, physical_score, technical_score};
use super::PlayerStats;
use crate::config::ScoreConfig;
use crate::geometry::{distance, mean, Point};
use crate::metrics::PlayerMetrics;

/// Reduces [`PlayerMetrics`] to a fixed-shape [`PlayerStats`].
#[derive(Debug, Clone, Default)]
pub struct StatsAggregator {
    config: ScoreConfig,
}

impl StatsAggregator {
    pub fn new(config: ScoreConfig) -> Self {
        Self { config }
    }

    /// Always fully populated; empty metrics give all-zero stats.
    pub fn aggregate(&self, metrics: &PlayerMetrics) -> PlayerStats {
        if metrics.is_empty() {
            return PlayerStats::default();
        }

        let speeds = metrics.measured_speeds();
        let accelerations = metrics.measured_accelerations();

        let avg_speed = mean(&speeds).unwrap_or(0.0);
        let max_speed = speeds.iter().copied().fold(0.0f32, f32::max);
        let avg_acceleration = mean(&accelerations).unwrap_or(0.0);
        let distance_covered = distance_covered(metrics);
        let balance_score = mean(&metrics.balance).unwrap_or(0.0);

        PlayerStats {
            avg_speed,
            max_speed,
            avg_acceleration,
            distance_covered,
            balance_score,
            technical_score: technical_score(
                &metrics.joint_angles.measured_groups(),
                &self.config,
            ),
            physical_score: physical_score(
                max_speed,
                avg_acceleration,
                distance_covered,
                &self.config,
            ),
            movement_efficiency: movement_efficiency(
                distance_covered,
                &accelerations,
                &self.config,
            ),
        }
        .sanitized()
    }
}

/// Path length over consecutive retained positions.
///
/// Independent of the speed series: a duplicate-timestamp frame has no speed
/// sample but its displacement still counts.
pub fn distance_covered(metrics: &PlayerMetrics) -> f32 {
    let points: Vec<Point> = metrics.positions().map(|(x, y)| Point::new(x, y)).collect();
    points
        .windows(2)
        .map(|w| distance(&w[0], &w[1]))
        .filter(|d| d.is_finite())
        .sum()
}
