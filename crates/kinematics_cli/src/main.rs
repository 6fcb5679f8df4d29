//! Kinematics CLI
//!
//! Pose-frame JSON → stats report JSON
//! Pose-frame JSON → per-frame metrics CSV

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "kinematics")]
#[command(about = "Kinematic performance metrics from pose keypoints", long_about = None)]
struct Cli {
    /// Debug-level logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Analyze a pose-frame file and print or save the stats report
    Analyze {
        /// Input frames JSON file path
        #[arg(long)]
        r#in: PathBuf,

        /// Output report JSON file path (stdout if omitted)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Engine config file (YAML or JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Preset: broadcast, strict, lenient
        #[arg(long)]
        profile: Option<String>,

        /// Include per-frame metric series in the report
        #[arg(long, default_value = "false")]
        include_metrics: bool,
    },

    /// Export per-frame metrics as one CSV per subject
    Export {
        /// Input frames JSON file path
        #[arg(long)]
        r#in: PathBuf,

        /// Output directory
        #[arg(long)]
        out_dir: PathBuf,

        /// Engine config file (YAML or JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Preset: broadcast, strict, lenient
        #[arg(long)]
        profile: Option<String>,
    },

    /// Print an engine config as YAML
    Config {
        /// Preset: broadcast, strict, lenient
        #[arg(long, default_value = "broadcast")]
        profile: String,

        /// Write to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Print the JSON schema of the analysis request
    Schema,
}

#[cfg(feature = "cli")]
fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    use anyhow::Context;
    use kinematics_core::KinematicEngine;

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Analyze {
            r#in,
            out,
            config,
            profile,
            include_metrics,
        } => {
            let engine_config = kinematics_cli::load_config(config.as_deref(), profile.as_deref())?;
            let engine = KinematicEngine::new(engine_config).context("Invalid engine config")?;

            run_analyze(&engine, &r#in, out.as_deref(), include_metrics, &mut std::io::stdout())?;
        }

        Commands::Export {
            r#in,
            out_dir,
            config,
            profile,
        } => {
            let engine_config = kinematics_cli::load_config(config.as_deref(), profile.as_deref())?;
            let engine = KinematicEngine::new(engine_config).context("Invalid engine config")?;

            println!("📊 Exporting per-frame metrics...");
            println!("   Input:  {}", r#in.display());
            println!("   Output: {}", out_dir.display());

            let subjects = kinematics_cli::load_subjects(&r#in)?;
            for subject in &subjects {
                let rows = engine.analyze(&subject.frames).rows();
                let path = out_dir.join(kinematics_cli::export_file_name(&subject.subject_id));
                kinematics_cli::write_rows_csv(&path, &rows)?;
                println!("   {} → {} ({} rows)", subject.subject_id, path.display(), rows.len());
            }

            println!("\n✅ Exported {} subject(s)", subjects.len());
        }

        Commands::Config { profile, out } => {
            let yaml = kinematics_core::EngineConfig::from_profile(&profile).to_yaml()?;
            match out {
                Some(path) => {
                    std::fs::write(&path, yaml)
                        .with_context(|| format!("Failed to write config: {}", path.display()))?;
                    println!("📄 Config saved to: {}", path.display());
                }
                None => print!("{}", yaml),
            }
        }

        Commands::Schema => {
            let schema = kinematics_core::request_schema_json().map_err(anyhow::Error::msg)?;
            println!("{}", schema);
        }
    }

    Ok(())
}

/// `analyze` subcommand. Without `out`, `w` receives only the report JSON.
#[cfg(feature = "cli")]
fn run_analyze(
    engine: &kinematics_core::KinematicEngine,
    input: &std::path::Path,
    out: Option<&std::path::Path>,
    include_metrics: bool,
    w: &mut impl std::io::Write,
) -> Result<()> {
    let Some(path) = out else {
        let reports = kinematics_cli::analyze_file(input, engine, include_metrics)?;
        writeln!(w, "{}", serde_json::to_string_pretty(&reports)?)?;
        return Ok(());
    };

    writeln!(w, "🏃 Analyzing {}...", input.display())?;
    let reports = kinematics_cli::analyze_file(input, engine, include_metrics)?;
    kinematics_cli::save_reports(path, &reports)?;
    for report in &reports {
        print_report(report, w)?;
    }
    writeln!(w, "\n📄 Report saved to: {}", path.display())?;
    Ok(())
}

#[cfg(feature = "cli")]
fn print_report(
    report: &kinematics_cli::AnalysisReport,
    w: &mut impl std::io::Write,
) -> std::io::Result<()> {
    let stats = &report.stats;
    writeln!(w, "\n✅ {}", report.subject_id)?;
    writeln!(
        w,
        "   Frames:      {} retained / {} total",
        report.metadata.frames_retained, report.metadata.frames_total
    )?;
    writeln!(w, "   Distance:    {:.1} px", stats.distance_covered)?;
    writeln!(w, "   Speed:       avg {:.1} / max {:.1} px/s", stats.avg_speed, stats.max_speed)?;
    writeln!(w, "   Balance:     {:.1}", stats.balance_score)?;
    writeln!(w, "   Technical:   {:.1}", stats.technical_score)?;
    writeln!(w, "   Physical:    {:.1}", stats.physical_score)?;
    writeln!(w, "   Efficiency:  {:.1}", stats.movement_efficiency)?;
    writeln!(w, "   Sprints:     {}", report.sprints.len())?;
    writeln!(w, "   Fingerprint: {}", report.metadata.fingerprint)
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("kinematics CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
