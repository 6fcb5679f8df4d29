use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{check_finite, check_positive};
use crate::error::{ConfigError, Result};

/// Balance score calibration.
///
/// `balance = 100 - (|ratio - ideal_ratio| * ratio_weight + misalignment * misalignment_weight)`
/// where `ratio` is shoulder width over hip width and `misalignment` is the
/// horizontal offset between shoulder and hip midpoints over shoulder width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BalanceConfig {
    /// Typical shoulder/hip width ratio of a balanced stance
    pub ideal_ratio: f32,
    /// Penalty per unit of ratio deviation
    pub ratio_weight: f32,
    /// Penalty per unit of torso misalignment
    pub misalignment_weight: f32,
    /// Floor for width denominators (pixels)
    pub epsilon: f32,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            ideal_ratio: 1.1,
            ratio_weight: 20.0,
            misalignment_weight: 50.0,
            epsilon: 1e-6,
        }
    }
}

impl BalanceConfig {
    pub fn validate(&self) -> Result<()> {
        check_positive("balance.ideal_ratio", self.ideal_ratio)?;
        check_finite("balance.ratio_weight", self.ratio_weight)?;
        check_finite("balance.misalignment_weight", self.misalignment_weight)?;
        if self.ratio_weight < 0.0 {
            return Err(ConfigError::Negative {
                field: "balance.ratio_weight",
                value: self.ratio_weight as f64,
            });
        }
        if self.misalignment_weight < 0.0 {
            return Err(ConfigError::Negative {
                field: "balance.misalignment_weight",
                value: self.misalignment_weight as f64,
            });
        }
        check_positive("balance.epsilon", self.epsilon)
    }
}
