use thiserror::Error;

/// Invalid engine configuration.
///
/// The only failure the metrics pipeline surfaces: noisy or sparse pose data
/// is always absorbed, a bad cap or threshold is a caller mistake.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} must be within [{min}, {max}], got {value}")]
    OutOfRange { field: &'static str, value: f64, min: f64, max: f64 },

    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    #[error("physical score weights must sum to 1.0, got {sum}")]
    InvalidWeights { sum: f64 },

    #[error("sprint speed ({sprint}) must not be below high intensity speed ({high_intensity})")]
    InvalidSprintThresholds { sprint: f64, high_intensity: f64 },

    #[error("Config parse error: {0}")]
    Parse(String),

    #[error("Config IO error: {0}")]
    Io(String),
}

/// Errors raised by the JSON API layer.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid JSON request: {0}")]
    InvalidRequest(#[from] serde_json::Error),

    #[error("Unsupported schema version: {found} (expected {expected})")]
    UnsupportedSchema { found: u8, expected: u8 },

    #[error("Invalid config: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
