//! # Engine Configuration Module
//!
//! All calibration constants of the metrics engine live here instead of
//! being scattered through the calculator and aggregator.
//!
//! ## Presets
//! - `broadcast` (default) - typical broadcast/phone footage
//! - `strict` - only high-confidence keypoints are used
//! - `lenient` - noisy, low-resolution footage
//!
//! ## Usage
//! ```rust
//! use kinematics_core::config::EngineConfig;
//!
//! let config = EngineConfig::default();
//! let strict = EngineConfig::strict();
//! assert!(strict.pose.confidence_threshold > config.pose.confidence_threshold);
//! ```
//!
//! ## Environment Variables
//!
//! - `KINEMATICS_PROFILE`: Select preset (strict, lenient, broadcast)
//! - `KINEMATICS_CONFIG_PATH`: Path to a YAML or JSON config file

mod balance_config;
mod score_config;
mod sprint_config;

pub use balance_config::BalanceConfig;
pub use score_config::ScoreConfig;
pub use sprint_config::SprintConfig;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::{env, fs};

use crate::error::{ConfigError, Result};

pub const PROFILE_ENV: &str = "KINEMATICS_PROFILE";
pub const CONFIG_PATH_ENV: &str = "KINEMATICS_CONFIG_PATH";

/// Keypoint acceptance settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PoseConfig {
    /// Keypoints below this confidence are treated as missing (0.0 - 1.0)
    pub confidence_threshold: f32,
}

impl Default for PoseConfig {
    fn default() -> Self {
        Self { confidence_threshold: 0.3 }
    }
}

impl PoseConfig {
    pub fn validate(&self) -> Result<()> {
        let value = self.confidence_threshold;
        if !value.is_finite() {
            return Err(ConfigError::NonFinite { field: "pose.confidence_threshold" });
        }
        // A zero threshold would accept undetected placeholder keypoints
        if value <= 0.0 || value > 1.0 {
            return Err(ConfigError::OutOfRange {
                field: "pose.confidence_threshold",
                value: value as f64,
                min: 0.0,
                max: 1.0,
            });
        }
        Ok(())
    }
}

/// Full engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct EngineConfig {
    pub pose: PoseConfig,
    pub balance: BalanceConfig,
    pub scoring: ScoreConfig,
    pub sprint: SprintConfig,
    /// Sequences at least this long compute per-frame posture in parallel
    pub parallel_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pose: PoseConfig::default(),
            balance: BalanceConfig::default(),
            scoring: ScoreConfig::default(),
            sprint: SprintConfig::default(),
            parallel_threshold: 256,
        }
    }
}

impl EngineConfig {
    /// Typical broadcast footage (default)
    pub fn broadcast() -> Self {
        Self::default()
    }

    /// Only high-confidence detections count
    pub fn strict() -> Self {
        let mut cfg = Self::default();
        cfg.pose.confidence_threshold = 0.5;
        cfg
    }

    /// Noisy footage: accept weak detections
    pub fn lenient() -> Self {
        let mut cfg = Self::default();
        cfg.pose.confidence_threshold = 0.1;
        cfg.scoring.max_deviation_deg = 40.0;
        cfg
    }

    pub fn validate(&self) -> Result<()> {
        self.pose.validate()?;
        self.balance.validate()?;
        self.scoring.validate()?;
        self.sprint.validate()?;
        if self.parallel_threshold == 0 {
            return Err(ConfigError::NonPositive { field: "parallel_threshold", value: 0.0 });
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let cfg: Self =
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load a `.json` file as JSON, anything else as YAML.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&content),
            _ => Self::from_yaml(&content),
        }
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Preset selected by `KINEMATICS_PROFILE`, default otherwise.
    pub fn from_env_or_default() -> Self {
        Self::from_profile(&env::var(PROFILE_ENV).unwrap_or_default())
    }

    pub fn from_profile(profile: &str) -> Self {
        match profile.trim().to_lowercase().as_str() {
            "strict" => Self::strict(),
            "lenient" => Self::lenient(),
            _ => Self::default(),
        }
    }

    /// File named by `KINEMATICS_CONFIG_PATH` if set, else the env profile.
    pub fn load_from_env() -> Result<Self> {
        let Ok(path) = env::var(CONFIG_PATH_ENV) else {
            return Ok(Self::from_env_or_default());
        };

        let path = path.trim();
        if path.is_empty() {
            return Ok(Self::from_env_or_default());
        }
        Self::from_file(Path::new(path))
    }
}

pub(crate) fn check_finite(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field })
    }
}

pub(crate) fn check_positive(field: &'static str, value: f32) -> Result<()> {
    check_finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value: value as f64 })
    }
}

// ========== Tests ==========

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let cfg = EngineConfig::default();
        assert!((cfg.pose.confidence_threshold - 0.3).abs() < 1e-6);
        assert!((cfg.scoring.max_deviation_deg - 30.0).abs() < 1e-6);
        assert!((cfg.scoring.speed_cap - 200.0).abs() < 1e-6);
        assert!((cfg.scoring.accel_cap - 50.0).abs() < 1e-6);
        assert!((cfg.scoring.distance_cap - 5000.0).abs() < 1e-6);
        assert!((cfg.scoring.efficiency_cap - 10.0).abs() < 1e-6);
        assert!((cfg.balance.ideal_ratio - 1.1).abs() < 1e-6);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_presets_are_valid() {
        for cfg in [EngineConfig::broadcast(), EngineConfig::strict(), EngineConfig::lenient()] {
            assert!(cfg.validate().is_ok());
        }
        assert!(
            EngineConfig::strict().pose.confidence_threshold
                > EngineConfig::lenient().pose.confidence_threshold
        );
    }

    #[test]
    fn test_profile_selection() {
        assert_eq!(EngineConfig::from_profile("STRICT"), EngineConfig::strict());
        assert_eq!(EngineConfig::from_profile(" lenient "), EngineConfig::lenient());
        assert_eq!(EngineConfig::from_profile("unknown"), EngineConfig::default());
    }

    #[test]
    fn test_rejects_non_positive_caps() {
        let mut cfg = EngineConfig::default();
        cfg.scoring.speed_cap = 0.0;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::NonPositive { field: "scoring.speed_cap", .. })
        ));

        let mut cfg = EngineConfig::default();
        cfg.scoring.distance_cap = -10.0;
        assert!(cfg.validate().is_err());

        let mut cfg = EngineConfig::default();
        cfg.scoring.max_deviation_deg = f32::NAN;
        assert!(matches!(cfg.validate(), Err(ConfigError::NonFinite { .. })));
    }

    #[test]
    fn test_rejects_bad_threshold_and_weights() {
        let mut cfg = EngineConfig::default();
        cfg.pose.confidence_threshold = 1.5;
        assert!(matches!(cfg.validate(), Err(ConfigError::OutOfRange { .. })));

        let mut cfg = EngineConfig::default();
        cfg.pose.confidence_threshold = 0.0;
        assert!(cfg.validate().is_err());

        let mut cfg = EngineConfig::default();
        cfg.scoring.speed_weight = 0.6;
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidWeights { .. })));

        let mut cfg = EngineConfig::default();
        cfg.sprint.sprint_speed = 50.0;
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidSprintThresholds { .. })));

        let mut cfg = EngineConfig::default();
        cfg.parallel_threshold = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_sprint_duration_validation() {
        let mut cfg = EngineConfig::default();
        cfg.sprint.min_duration_ms = f64::NAN;
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::NonFinite { field: "sprint.min_duration_ms" })
        );

        cfg.sprint.min_duration_ms = f64::INFINITY;
        assert!(matches!(cfg.validate(), Err(ConfigError::NonFinite { .. })));

        cfg.sprint.min_duration_ms = -1.0;
        assert!(matches!(cfg.validate(), Err(ConfigError::Negative { .. })));

        cfg.sprint.min_duration_ms = 0.0;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = "pose:\n  confidence_threshold: 0.45\nscoring:\n  speed_cap: 350.0\n";
        let cfg = EngineConfig::from_yaml(yaml).expect("valid yaml");
        assert!((cfg.pose.confidence_threshold - 0.45).abs() < 1e-6);
        assert!((cfg.scoring.speed_cap - 350.0).abs() < 1e-6);
        assert!((cfg.scoring.accel_cap - 50.0).abs() < 1e-6);
        assert_eq!(cfg.balance, BalanceConfig::default());
    }

    #[test]
    fn test_invalid_yaml_fails_fast() {
        let yaml = "scoring:\n  efficiency_cap: -1.0\n";
        assert!(EngineConfig::from_yaml(yaml).is_err());
        assert!(matches!(EngineConfig::from_json("{not json"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_config_serialization() {
        let cfg = EngineConfig::strict();
        let json = serde_json::to_string(&cfg).unwrap();
        let parsed = EngineConfig::from_json(&json).unwrap();
        assert_eq!(parsed, cfg);

        let yaml = cfg.to_yaml().unwrap();
        assert_eq!(EngineConfig::from_yaml(&yaml).unwrap(), cfg);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"scoring": {{"distance_cap": 8000.0}}}}"#).unwrap();
        let cfg = EngineConfig::from_file(file.path()).unwrap();
        assert!((cfg.scoring.distance_cap - 8000.0).abs() < 1e-6);

        let missing = EngineConfig::from_file(Path::new("/nonexistent/kinematics.yaml"));
        assert!(matches!(missing, Err(ConfigError::Io(_))));
    }
}
