//! Kinematics CLI Library
//!
//! Pose-frame JSON → analysis report JSON / per-frame CSV
//! SHA256 sequence fingerprints for caching analyses

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use kinematics_core::{
    EngineConfig, FrameRow, KinematicEngine, MovementIntensity, PlayerMetrics, PlayerStats,
    PoseFrame, SprintSegment, SubjectFrames,
};

/// Report format version
pub const REPORT_SCHEMA: &str = "v1";

/// Accepted input layouts.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FrameFile {
    /// Bare frame list for one subject
    Frames(Vec<PoseFrame>),
    /// `{ "subject_id": ..., "frames": [...] }`
    Subject(SubjectFrames),
    /// List of subjects
    Batch(Vec<SubjectFrames>),
}

/// Report metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Report format version (e.g. "v1")
    pub schema_version: String,
    /// kinematics_core version that produced the report
    pub engine_version: String,
    /// SHA256 of (subject id, frame sequence), hex
    pub fingerprint: String,
    /// Creation time (RFC3339)
    pub created_at: String,
    pub frames_total: usize,
    pub frames_retained: usize,
}

/// Per-subject analysis report written by `kinematics analyze`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub subject_id: String,
    pub metadata: ReportMetadata,
    pub stats: PlayerStats,
    pub intensity: MovementIntensity,
    pub sprints: Vec<SprintSegment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<PlayerMetrics>,
}

/// Load subjects from a pose-frame JSON file.
///
/// A bare frame list is named after the file stem.
pub fn load_subjects(path: &Path) -> Result<Vec<SubjectFrames>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read frames file: {}", path.display()))?;

    let parsed: FrameFile = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse frames file: {}", path.display()))?;

    let subjects = match parsed {
        FrameFile::Frames(frames) => {
            let subject_id = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("subject")
                .to_string();
            vec![SubjectFrames { subject_id, frames }]
        }
        FrameFile::Subject(subject) => vec![subject],
        FrameFile::Batch(subjects) => subjects,
    };

    debug!(subjects = subjects.len(), path = %path.display(), "Frames loaded");
    Ok(subjects)
}

/// Explicit file, then explicit profile, then `KINEMATICS_CONFIG_PATH` / `KINEMATICS_PROFILE`.
pub fn load_config(config_path: Option<&Path>, profile: Option<&str>) -> Result<EngineConfig> {
    if let Some(path) = config_path {
        return EngineConfig::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()));
    }
    if let Some(profile) = profile {
        return Ok(EngineConfig::from_profile(profile));
    }
    EngineConfig::load_from_env().context("Failed to load config from environment")
}

/// Stable key for an analysis input: SHA256 over the subject id and every
/// frame's index, timestamp and keypoints (bit-exact).
pub fn sequence_fingerprint(subject_id: &str, frames: &[PoseFrame]) -> String {
    let mut hasher = Sha256::new();
    hasher.update((subject_id.len() as u64).to_le_bytes());
    hasher.update(subject_id.as_bytes());
    hasher.update((frames.len() as u64).to_le_bytes());

    for frame in frames {
        hasher.update(frame.frame_index.to_le_bytes());
        hasher.update(frame.timestamp_ms.to_bits().to_le_bytes());
        hasher.update((frame.keypoints.len() as u32).to_le_bytes());
        for (name, kp) in &frame.keypoints {
            hasher.update([name.index() as u8]);
            hasher.update(kp.x.to_bits().to_le_bytes());
            hasher.update(kp.y.to_bits().to_le_bytes());
            hasher.update(kp.confidence.to_bits().to_le_bytes());
        }
    }

    format!("{:x}", hasher.finalize())
}

/// Analyze one subject into a report.
pub fn build_report(
    engine: &KinematicEngine,
    subject: &SubjectFrames,
    include_metrics: bool,
) -> AnalysisReport {
    let analysis = engine.analyze(&subject.frames);

    AnalysisReport {
        subject_id: subject.subject_id.clone(),
        metadata: ReportMetadata {
            schema_version: REPORT_SCHEMA.to_string(),
            engine_version: kinematics_core::VERSION.to_string(),
            fingerprint: sequence_fingerprint(&subject.subject_id, &subject.frames),
            created_at: chrono::Utc::now().to_rfc3339(),
            frames_total: analysis.frames_total,
            frames_retained: analysis.frames_retained,
        },
        stats: analysis.stats,
        intensity: engine.intensity(&analysis.metrics),
        sprints: engine.sprints(&analysis.metrics),
        metrics: include_metrics.then_some(analysis.metrics),
    }
}

/// Load a frames file and analyze every subject in it.
pub fn analyze_file(
    input: &Path,
    engine: &KinematicEngine,
    include_metrics: bool,
) -> Result<Vec<AnalysisReport>> {
    let subjects = load_subjects(input)?;
    Ok(subjects
        .iter()
        .map(|subject| build_report(engine, subject, include_metrics))
        .collect())
}

/// Write reports as pretty JSON, creating parent directories.
pub fn save_reports(path: &Path, reports: &[AnalysisReport]) -> Result<()> {
    ensure_parent(path)?;
    let json = serde_json::to_string_pretty(reports).context("Failed to serialize reports")?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write report file: {}", path.display()))?;
    info!(path = %path.display(), reports = reports.len(), "Reports saved");
    Ok(())
}

/// Write frame rows as CSV with a header. Unmeasured values are empty cells.
pub fn write_rows_csv(path: &Path, rows: &[FrameRow]) -> Result<()> {
    ensure_parent(path)?;
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
    for row in rows {
        writer.serialize(row).context("Failed to write CSV row")?;
    }
    writer.flush().context("Failed to flush CSV file")?;
    Ok(())
}

/// File-system-safe name for a subject's export.
pub fn export_file_name(subject_id: &str) -> String {
    let name: String = subject_id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if name.is_empty() {
        "subject.csv".to_string()
    } else {
        format!("{}.csv", name)
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinematics_core::{Keypoint, KeypointName};
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    fn frame_at(index: u64, ts: f64, cx: f32) -> PoseFrame {
        PoseFrame::new(index, ts)
            .with_keypoint(KeypointName::LeftShoulder, Keypoint::new(cx - 22.0, 50.0, 0.9))
            .with_keypoint(KeypointName::RightShoulder, Keypoint::new(cx + 22.0, 50.0, 0.9))
            .with_keypoint(KeypointName::LeftHip, Keypoint::new(cx - 20.0, 150.0, 0.9))
            .with_keypoint(KeypointName::RightHip, Keypoint::new(cx + 20.0, 150.0, 0.9))
    }

    fn frames() -> Vec<PoseFrame> {
        (0..5).map(|i| frame_at(i, i as f64 * 1000.0, i as f32 * 100.0)).collect()
    }

    #[test]
    fn test_fingerprint_stable_and_sensitive() {
        let a = sequence_fingerprint("p1", &frames());
        assert_eq!(a, sequence_fingerprint("p1", &frames()));
        assert_eq!(a.len(), 64);

        assert_ne!(a, sequence_fingerprint("p2", &frames()));

        let mut moved = frames();
        moved[3].timestamp_ms += 1.0;
        assert_ne!(a, sequence_fingerprint("p1", &moved));
    }

    #[test]
    fn test_load_bare_frame_list() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("striker.json");
        fs::write(&path, serde_json::to_string(&frames())?)?;

        let subjects = load_subjects(&path)?;
        assert_eq!(subjects.len(), 1);
        assert_eq!(subjects[0].subject_id, "striker");
        assert_eq!(subjects[0].frames.len(), 5);
        Ok(())
    }

    #[test]
    fn test_load_subject_batch() -> Result<()> {
        let batch = vec![
            SubjectFrames { subject_id: "a".to_string(), frames: frames() },
            SubjectFrames { subject_id: "b".to_string(), frames: Vec::new() },
        ];
        let mut file = NamedTempFile::new()?;
        file.write_all(serde_json::to_string(&batch)?.as_bytes())?;

        let subjects = load_subjects(file.path())?;
        assert_eq!(subjects, batch);
        Ok(())
    }

    #[test]
    fn test_load_invalid_file() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        file.write_all(b"{\"not\": \"frames\"}")?;
        let err = load_subjects(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse frames file"));
        Ok(())
    }

    #[test]
    fn test_analyze_and_save_reports() -> Result<()> {
        let dir = tempdir()?;
        let input = dir.path().join("winger.json");
        fs::write(&input, serde_json::to_string(&frames())?)?;

        let engine = KinematicEngine::new(EngineConfig::default())?;
        let reports = analyze_file(&input, &engine, true)?;
        assert_eq!(reports.len(), 1);

        let report = &reports[0];
        assert!((report.stats.avg_speed - 100.0).abs() < 1e-3);
        assert_eq!(report.metadata.frames_retained, 5);
        assert_eq!(report.metadata.schema_version, REPORT_SCHEMA);
        assert!(report.metrics.is_some());

        let out = dir.path().join("nested/out/report.json");
        save_reports(&out, &reports)?;
        let loaded: Vec<AnalysisReport> = serde_json::from_str(&fs::read_to_string(&out)?)?;
        assert_eq!(loaded, reports);
        Ok(())
    }

    #[test]
    fn test_csv_empty_cells_for_unmeasured() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("rows.csv");

        let engine = KinematicEngine::new(EngineConfig::default())?;
        let rows = engine.analyze(&frames()).rows();
        write_rows_csv(&path, &rows)?;

        let content = fs::read_to_string(&path)?;
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("frame_index,timestamp_ms,position_x,position_y,speed"));
        // First frame: no speed, no acceleration
        let cells: Vec<&str> = lines[1].split(',').collect();
        assert_eq!(cells[4], "");
        assert_eq!(cells[5], "");
        Ok(())
    }

    #[test]
    fn test_load_config_profile() -> Result<()> {
        let cfg = load_config(None, Some("strict"))?;
        assert_eq!(cfg, EngineConfig::strict());

        let dir = tempdir()?;
        let path = dir.path().join("engine.json");
        fs::write(&path, r#"{"pose": {"confidence_threshold": 0.7}}"#)?;
        let cfg = load_config(Some(&path), Some("lenient"))?;
        assert!((cfg.pose.confidence_threshold - 0.7).abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name("player 7/home"), "player_7_home.csv");
        assert_eq!(export_file_name(""), "subject.csv");
    }
}
