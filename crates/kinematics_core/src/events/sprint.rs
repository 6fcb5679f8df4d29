//! # Sprint Extractor
//!
//! Detects high-intensity running segments in a subject's speed series.
//!
//! ## Algorithm
//! 1. Scan retained frames in order
//! 2. A sprint starts when measured speed >= `sprint_speed`
//! 3. It continues while speed >= `high_intensity_speed`
//! 4. It ends on a slower or unmeasured sample
//! 5. Filter: duration >= `min_duration_ms`
//!
//! Speeds are in the pose estimator's units (px/s), so thresholds must be
//! calibrated per camera setup.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::SprintConfig;
use crate::geometry::{distance, Point};
use crate::metrics::PlayerMetrics;

/// A detected sprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SprintSegment {
    pub start_frame: u64,
    pub end_frame: u64,
    pub t0_ms: f64,
    pub t1_ms: f64,
    /// Body-center path length during the sprint (px)
    pub distance: f32,
    pub max_speed: f32,
    pub avg_speed: f32,
}

impl SprintSegment {
    pub fn duration_ms(&self) -> f64 {
        (self.t1_ms - self.t0_ms).max(0.0)
    }
}

/// Distance split by intensity band.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MovementIntensity {
    pub total_distance: f32,
    /// Distance covered at >= sprint speed
    pub sprint_distance: f32,
    /// Distance covered at >= high intensity speed (includes sprint distance)
    pub high_intensity_distance: f32,
    pub sprint_count: u32,
    pub sprint_ratio: f32,
    pub high_intensity_ratio: f32,
}

/// Samples of an in-progress sprint: (frame, timestamp, position, speed).
struct SprintBuilder {
    samples: Vec<(u64, f64, Point, f32)>,
}

impl SprintBuilder {
    fn new(frame: u64, ts: f64, pos: Point, speed: f32) -> Self {
        Self { samples: vec![(frame, ts, pos, speed)] }
    }

    fn add(&mut self, frame: u64, ts: f64, pos: Point, speed: f32) {
        self.samples.push((frame, ts, pos, speed));
    }

    fn build(self, config: &SprintConfig) -> Option<SprintSegment> {
        let &(start_frame, t0, _, _) = self.samples.first()?;
        let &(end_frame, t1, _, _) = self.samples.last()?;
        if self.samples.len() < 2 || t1 - t0 < config.min_duration_ms {
            return None;
        }

        let distance = self
            .samples
            .windows(2)
            .map(|w| distance(&w[0].2, &w[1].2))
            .sum();
        let max_speed = self.samples.iter().map(|s| s.3).fold(0.0f32, f32::max);
        let avg_speed = self.samples.iter().map(|s| s.3).sum::<f32>() / self.samples.len() as f32;

        Some(SprintSegment {
            start_frame,
            end_frame,
            t0_ms: t0,
            t1_ms: t1,
            distance,
            max_speed,
            avg_speed,
        })
    }
}

/// Extract sprint segments, ordered by start time.
pub fn extract_sprints(metrics: &PlayerMetrics, config: &SprintConfig) -> Vec<SprintSegment> {
    let mut sprints = Vec::new();
    let mut current: Option<SprintBuilder> = None;

    for i in 0..metrics.common_len() {
        let frame = metrics.frame_indices[i];
        let ts = metrics.timestamps[i];
        let pos = Point::new(metrics.position_x[i], metrics.position_y[i]);
        let speed = metrics.speed[i];

        let is_sprinting = speed.is_some_and(|s| s >= config.sprint_speed);
        let is_high_intensity = speed.is_some_and(|s| s >= config.high_intensity_speed);

        match (&mut current, is_sprinting, is_high_intensity) {
            (None, true, _) => {
                current = Some(SprintBuilder::new(frame, ts, pos, speed.unwrap_or_default()));
            }
            (Some(builder), _, true) => {
                builder.add(frame, ts, pos, speed.unwrap_or_default());
            }
            (Some(_), _, false) => {
                if let Some(sprint) = current.take().and_then(|b| b.build(config)) {
                    sprints.push(sprint);
                }
            }
            (None, false, _) => {}
        }
    }

    if let Some(sprint) = current.take().and_then(|b| b.build(config)) {
        sprints.push(sprint);
    }

    sprints
}

/// Split the subject's path length by speed band.
///
/// Each step's displacement is attributed to the band of the speed measured
/// on arrival; steps without a speed sample only count toward the total.
/// `sprint_count` counts the segments [`extract_sprints`] reports.
pub fn movement_intensity(metrics: &PlayerMetrics, config: &SprintConfig) -> MovementIntensity {
    let n = metrics.common_len();
    if n < 2 {
        return MovementIntensity::default();
    }

    let mut total = 0.0f32;
    let mut sprint = 0.0f32;
    let mut high_intensity = 0.0f32;

    for i in 1..n {
        let prev = Point::new(metrics.position_x[i - 1], metrics.position_y[i - 1]);
        let curr = Point::new(metrics.position_x[i], metrics.position_y[i]);
        let step = distance(&prev, &curr);
        total += step;

        match metrics.speed[i] {
            Some(s) if s >= config.sprint_speed => {
                sprint += step;
                high_intensity += step;
            }
            Some(s) if s >= config.high_intensity_speed => high_intensity += step,
            _ => {}
        }
    }

    let ratio = |part: f32| if total > 0.0 { part / total } else { 0.0 };
    MovementIntensity {
        total_distance: total,
        sprint_distance: sprint,
        high_intensity_distance: high_intensity,
        sprint_count: extract_sprints(metrics, config).len() as u32,
        sprint_ratio: ratio(sprint),
        high_intensity_ratio: ratio(high_intensity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::JointAngleSeries;

    /// Metrics along the x axis with the given per-frame speeds, 250ms apart.
    fn run(xs: &[f32], speeds: &[Option<f32>]) -> PlayerMetrics {
        let n = xs.len();
        PlayerMetrics {
            frame_indices: (0..n as u64).collect(),
            timestamps: (0..n).map(|i| i as f64 * 250.0).collect(),
            position_x: xs.to_vec(),
            position_y: vec![0.0; n],
            speed: speeds.to_vec(),
            acceleration: vec![None; n],
            joint_angles: JointAngleSeries {
                knees: vec![None; n],
                elbows: vec![None; n],
                shoulders: vec![None; n],
                hips: vec![None; n],
            },
            balance: vec![100.0; n],
        }
    }

    #[test]
    fn test_sprint_segment_duration() {
        let sprint = SprintSegment {
            start_frame: 10,
            end_frame: 40,
            t0_ms: 1000.0,
            t1_ms: 3500.0,
            distance: 400.0,
            max_speed: 210.0,
            avg_speed: 170.0,
        };
        assert_eq!(sprint.duration_ms(), 2500.0);
    }

    #[test]
    fn test_short_sprint_rejected() {
        // Only 250ms above threshold
        let metrics = run(
            &[0.0, 40.0, 80.0, 90.0],
            &[None, Some(160.0), Some(160.0), Some(40.0)],
        );
        assert!(extract_sprints(&metrics, &SprintConfig::default()).is_empty());
    }

    #[test]
    fn test_valid_sprint_detection() {
        let metrics = run(
            &[0.0, 45.0, 90.0, 135.0, 180.0, 190.0],
            &[None, Some(180.0), Some(180.0), Some(180.0), Some(180.0), Some(40.0)],
        );
        let sprints = extract_sprints(&metrics, &SprintConfig::default());
        assert_eq!(sprints.len(), 1);
        let sprint = &sprints[0];
        assert_eq!(sprint.start_frame, 1);
        assert_eq!(sprint.end_frame, 4);
        assert!((sprint.distance - 135.0).abs() < 1e-3);
        assert!((sprint.max_speed - 180.0).abs() < 1e-3);
        assert_eq!(sprint.duration_ms(), 750.0);
    }

    #[test]
    fn test_sprint_continues_at_high_intensity() {
        let metrics = run(
            &[0.0, 40.0, 70.0, 110.0, 140.0, 150.0],
            &[None, Some(160.0), Some(120.0), Some(160.0), Some(120.0), Some(20.0)],
        );
        let sprints = extract_sprints(&metrics, &SprintConfig::default());
        assert_eq!(sprints.len(), 1, "Should be one continuous sprint");
        assert!(sprints[0].duration_ms() >= 750.0);
    }

    #[test]
    fn test_unmeasured_speed_ends_sprint() {
        let metrics = run(
            &[0.0, 40.0, 80.0, 120.0, 160.0, 200.0, 240.0, 280.0],
            &[
                None,
                Some(160.0),
                Some(160.0),
                Some(160.0),
                None,
                Some(160.0),
                Some(160.0),
                Some(160.0),
            ],
        );
        let sprints = extract_sprints(&metrics, &SprintConfig::default());
        assert_eq!(sprints.len(), 2);
        assert_eq!(sprints[1].end_frame, 7);
    }

    #[test]
    fn test_movement_intensity() {
        let metrics = run(
            &[0.0, 10.0, 40.0, 80.0, 90.0],
            &[None, Some(40.0), Some(120.0), Some(160.0), Some(40.0)],
        );
        let intensity = movement_intensity(&metrics, &SprintConfig::default());
        assert!((intensity.total_distance - 90.0).abs() < 1e-3);
        assert!((intensity.sprint_distance - 40.0).abs() < 1e-3);
        assert!((intensity.high_intensity_distance - 70.0).abs() < 1e-3);
        // One 250ms step above sprint speed is below the minimum duration
        assert_eq!(intensity.sprint_count, 0);
        assert!(intensity.high_intensity_distance >= intensity.sprint_distance);
    }

    #[test]
    fn test_sprint_count_matches_extracted_segments() {
        let config = SprintConfig::default();

        // Dips to high intensity and recovers: one sprint
        let metrics = run(
            &[0.0, 40.0, 70.0, 110.0, 140.0, 150.0],
            &[None, Some(160.0), Some(120.0), Some(160.0), Some(120.0), Some(20.0)],
        );
        let intensity = movement_intensity(&metrics, &config);
        assert_eq!(intensity.sprint_count, 1);
        assert_eq!(intensity.sprint_count as usize, extract_sprints(&metrics, &config).len());

        // Single fast step: no sprint
        let blip = run(&[0.0, 40.0, 50.0], &[None, Some(160.0), Some(40.0)]);
        let intensity = movement_intensity(&blip, &config);
        assert_eq!(intensity.sprint_count, 0);
        assert!(extract_sprints(&blip, &config).is_empty());
        assert!((intensity.sprint_distance - 40.0).abs() < 1e-3);
    }

    #[test]
    fn test_movement_intensity_short_input() {
        let metrics = run(&[5.0], &[None]);
        assert_eq!(movement_intensity(&metrics, &SprintConfig::default()), MovementIntensity::default());
    }
}
