use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::check_positive;
use crate::error::{ConfigError, Result};

/// High-intensity segment detection thresholds (px/s, ms).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SprintConfig {
    /// Speed at which a sprint starts
    pub sprint_speed: f32,
    /// Sprint continues while speed stays at or above this
    pub high_intensity_speed: f32,
    /// Shorter segments are discarded
    pub min_duration_ms: f64,
}

impl Default for SprintConfig {
    fn default() -> Self {
        Self {
            sprint_speed: 150.0,
            high_intensity_speed: 100.0,
            min_duration_ms: 500.0,
        }
    }
}

impl SprintConfig {
    pub fn validate(&self) -> Result<()> {
        check_positive("sprint.sprint_speed", self.sprint_speed)?;
        check_positive("sprint.high_intensity_speed", self.high_intensity_speed)?;
        if !self.min_duration_ms.is_finite() {
            return Err(ConfigError::NonFinite { field: "sprint.min_duration_ms" });
        }
        if self.min_duration_ms < 0.0 {
            return Err(ConfigError::Negative {
                field: "sprint.min_duration_ms",
                value: self.min_duration_ms,
            });
        }
        if self.sprint_speed < self.high_intensity_speed {
            return Err(ConfigError::InvalidSprintThresholds {
                sprint: self.sprint_speed as f64,
                high_intensity: self.high_intensity_speed as f64,
            });
        }
        Ok(())
    }
}
