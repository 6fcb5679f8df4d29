//! Composite score formulas. Every function returns a value in `[0, 100]`.

use crate::config::ScoreConfig;
use crate::geometry::{clamp_score, mean, normalize, stddev};

/// Joint-angle consistency.
///
/// Averages the stddev of every non-empty group; groups without samples are
/// left out rather than counted as zero variance. No samples at all scores 0.
pub fn technical_score(groups: &[Vec<f32>], config: &ScoreConfig) -> f32 {
    let deviations: Vec<f32> = groups
        .iter()
        .filter(|group| !group.is_empty())
        .map(|group| stddev(group))
        .collect();

    match mean(&deviations) {
        Some(avg_stddev) => clamp_score(100.0 - (avg_stddev / config.max_deviation_deg) * 100.0),
        None => 0.0,
    }
}

/// Weighted speed / acceleration / distance composite.
pub fn physical_score(
    max_speed: f32,
    avg_acceleration: f32,
    distance_covered: f32,
    config: &ScoreConfig,
) -> f32 {
    let combined = config.speed_weight * normalize(max_speed, config.speed_cap)
        + config.accel_weight * normalize(avg_acceleration.abs(), config.accel_cap)
        + config.distance_weight * normalize(distance_covered, config.distance_cap);
    clamp_score(combined * 100.0)
}

/// Distance covered per unit of accumulated |acceleration|.
///
/// The `+ 1` keeps a static subject (no acceleration) finite.
pub fn movement_efficiency(distance_covered: f32, accelerations: &[f32], config: &ScoreConfig) -> f32 {
    let total_accel: f32 = accelerations.iter().map(|a| a.abs()).sum();
    let ratio = distance_covered / (total_accel + 1.0);
    clamp_score(normalize(ratio, config.efficiency_cap) * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_technical_high_variance_scores_lower() {
        let config = ScoreConfig::default();
        let erratic: Vec<f32> = (0..20).map(|i| if i % 2 == 0 { 60.0 } else { 160.0 }).collect();
        let steady: Vec<f32> = (0..20).map(|i| if i % 2 == 0 { 108.0 } else { 112.0 }).collect();

        let erratic_score = technical_score(&[erratic], &config);
        let steady_score = technical_score(&[steady], &config);
        assert!(steady_score > erratic_score);
        assert!(steady_score > 90.0, "got {}", steady_score);
        assert_eq!(erratic_score, 0.0);
    }

    #[test]
    fn test_technical_ignores_empty_groups() {
        let config = ScoreConfig::default();
        let constant = vec![90.0; 5];
        let with_empty = technical_score(&[constant.clone(), vec![], vec![], vec![]], &config);
        assert_eq!(with_empty, 100.0);
        assert_eq!(technical_score(&[vec![], vec![]], &config), 0.0);
    }

    #[test]
    fn test_physical_score_weights() {
        let config = ScoreConfig::default();
        assert_eq!(physical_score(0.0, 0.0, 0.0, &config), 0.0);
        let full = physical_score(1000.0, -500.0, 1e6, &config);
        assert!((full - 100.0).abs() < 1e-3);
        // Half the speed cap only: 0.4 * 0.5 = 20
        let half_speed = physical_score(100.0, 0.0, 0.0, &config);
        assert!((half_speed - 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_movement_efficiency() {
        let config = ScoreConfig::default();
        // Static subject
        assert_eq!(movement_efficiency(0.0, &[], &config), 0.0);
        // 100px with no acceleration: ratio 100 -> capped
        assert_eq!(movement_efficiency(100.0, &[], &config), 100.0);
        // 45px over |a| sum of 8 -> ratio 5 -> 50
        let score = movement_efficiency(45.0, &[3.0, -5.0], &config);
        assert!((score - 50.0).abs() < 1e-3);
    }
}
