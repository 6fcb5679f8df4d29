use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::check_positive;
use crate::error::{ConfigError, Result};

/// Composite score normalization.
///
/// Caps are unit-agnostic calibration knobs in the pose estimator's
/// coordinate space (pixels by default), not real-world units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ScoreConfig {
    /// Average joint-angle stddev (degrees) that maps to a technical score of 0
    pub max_deviation_deg: f32,
    /// Max speed giving a full physical speed component (px/s)
    pub speed_cap: f32,
    /// |avg acceleration| giving a full physical accel component (px/s²)
    pub accel_cap: f32,
    /// Distance giving a full physical distance component (px)
    pub distance_cap: f32,
    /// Distance per unit of accumulated |acceleration| that maps to 100
    pub efficiency_cap: f32,
    pub speed_weight: f32,
    pub accel_weight: f32,
    pub distance_weight: f32,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            max_deviation_deg: 30.0,
            speed_cap: 200.0,
            accel_cap: 50.0,
            distance_cap: 5000.0,
            efficiency_cap: 10.0,
            speed_weight: 0.4,
            accel_weight: 0.3,
            distance_weight: 0.3,
        }
    }
}

impl ScoreConfig {
    pub fn validate(&self) -> Result<()> {
        check_positive("scoring.max_deviation_deg", self.max_deviation_deg)?;
        check_positive("scoring.speed_cap", self.speed_cap)?;
        check_positive("scoring.accel_cap", self.accel_cap)?;
        check_positive("scoring.distance_cap", self.distance_cap)?;
        check_positive("scoring.efficiency_cap", self.efficiency_cap)?;

        for (field, weight) in [
            ("scoring.speed_weight", self.speed_weight),
            ("scoring.accel_weight", self.accel_weight),
            ("scoring.distance_weight", self.distance_weight),
        ] {
            if !weight.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
            if !(0.0..=1.0).contains(&weight) {
                return Err(ConfigError::OutOfRange {
                    field,
                    value: weight as f64,
                    min: 0.0,
                    max: 1.0,
                });
            }
        }

        let sum = self.speed_weight + self.accel_weight + self.distance_weight;
        if (sum - 1.0).abs() > 1e-3 {
            return Err(ConfigError::InvalidWeights { sum: sum as f64 });
        }
        Ok(())
    }
}
