//! JSON entry point for hosts that exchange pose data as strings.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::config::EngineConfig;
use crate::engine::KinematicEngine;
use crate::error::ApiError;
use crate::events::{MovementIntensity, SprintSegment};
use crate::metrics::PlayerMetrics;
use crate::pose::PoseFrame;
use crate::stats::PlayerStats;
use crate::table::FrameRow;

pub const SCHEMA_VERSION: u8 = 1;

/// Analysis request for one subject.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisRequest {
    pub schema_version: u8,
    #[serde(default)]
    pub subject_id: Option<String>,
    /// Defaults to the broadcast preset
    #[serde(default)]
    pub config: Option<EngineConfig>,
    pub frames: Vec<PoseFrame>,
    #[serde(default)]
    pub include_metrics: bool,
    #[serde(default)]
    pub include_rows: bool,
    #[serde(default)]
    pub include_sprints: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisResponse {
    pub schema_version: u8,
    pub subject_id: Option<String>,
    pub stats: PlayerStats,
    pub frames_total: usize,
    pub frames_retained: usize,
    pub frames_skipped: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<PlayerMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<FrameRow>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sprints: Option<Vec<SprintSegment>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intensity: Option<MovementIntensity>,
}

/// Analyze a JSON request, returning the JSON response.
pub fn analyze_frames_json(request_json: &str) -> Result<String, String> {
    let response = handle_request(request_json).map_err(|e| {
        error!(error = %e, "Analysis request rejected");
        e.to_string()
    })?;
    serde_json::to_string(&response).map_err(|e| format!("Failed to serialize response: {}", e))
}

fn handle_request(request_json: &str) -> Result<AnalysisResponse, ApiError> {
    let request: AnalysisRequest = serde_json::from_str(request_json)?;

    if request.schema_version != SCHEMA_VERSION {
        return Err(ApiError::UnsupportedSchema {
            found: request.schema_version,
            expected: SCHEMA_VERSION,
        });
    }

    debug!(
        subject = request.subject_id.as_deref().unwrap_or("-"),
        frames = request.frames.len(),
        "Analysis request received"
    );

    let engine = KinematicEngine::new(request.config.unwrap_or_default())?;
    let analysis = engine.analyze(&request.frames);

    let rows = request.include_rows.then(|| analysis.rows());
    let (sprints, intensity) = if request.include_sprints {
        (Some(engine.sprints(&analysis.metrics)), Some(engine.intensity(&analysis.metrics)))
    } else {
        (None, None)
    };

    Ok(AnalysisResponse {
        schema_version: SCHEMA_VERSION,
        subject_id: request.subject_id,
        stats: analysis.stats,
        frames_total: analysis.frames_total,
        frames_retained: analysis.frames_retained,
        frames_skipped: analysis.frames_skipped,
        metrics: request.include_metrics.then_some(analysis.metrics),
        rows,
        sprints,
        intensity,
    })
}

/// JSON schema of [`AnalysisRequest`], pretty-printed.
pub fn request_schema_json() -> Result<String, String> {
    let schema = schemars::schema_for!(AnalysisRequest);
    serde_json::to_string_pretty(&schema).map_err(|e| e.to_string())
}
