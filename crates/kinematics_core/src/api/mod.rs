pub mod analysis_json;

pub use analysis_json::{
    analyze_frames_json, request_schema_json, AnalysisRequest, AnalysisResponse, SCHEMA_VERSION,
};
