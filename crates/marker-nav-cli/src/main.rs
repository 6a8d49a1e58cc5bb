//! marker-nav CLI: the frame loop around the navigation core.

mod recording;
mod render;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use log::{info, warn};
use marker_nav::{FrameResult, HeadingPolicy, MarkerNavigator, MarkerSample, NavParams};
use serde::Serialize;

use crate::recording::{Recording, ReplayDetector};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "marker-nav")]
#[command(about = "Estimate heading and distance to rows of fiducial markers")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a recorded stream of marker detections frame by frame.
    Replay(ReplayArgs),

    /// Process one frame of marker centers given on the command line.
    Estimate(EstimateArgs),

    /// Print the default configuration as JSON.
    PrintConfig,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    Last,
    Nearest,
    Mean,
}

impl From<PolicyArg> for HeadingPolicy {
    fn from(p: PolicyArg) -> Self {
        match p {
            PolicyArg::Last => HeadingPolicy::LastRow,
            PolicyArg::Nearest => HeadingPolicy::NearestRow,
            PolicyArg::Mean => HeadingPolicy::MeanHeading,
        }
    }
}

#[derive(Debug, Clone, Args)]
struct ConfigArgs {
    /// JSON configuration file; omitted fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override how the frame heading is picked when several rows are visible.
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,
}

#[derive(Debug, Clone, Args)]
struct ReplayArgs {
    /// Recorded detections (JSON).
    #[arg(long)]
    input: PathBuf,

    /// Write a JSON report with every frame result.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Stop after this many frames.
    #[arg(long)]
    max_frames: Option<usize>,

    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(Debug, Clone, Args)]
struct EstimateArgs {
    /// Marker center x coordinates, comma separated.
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
    x: Vec<i32>,

    /// Marker center y coordinates, comma separated (one per x).
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
    y: Vec<i32>,

    /// Frame width in pixels.
    #[arg(long, default_value = "640")]
    width: u32,

    /// Frame height in pixels.
    #[arg(long, default_value = "480")]
    height: u32,

    /// Print the frame result as JSON instead of annotation lines.
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(Debug, Serialize)]
struct FrameReport {
    index: usize,
    width: u32,
    height: u32,
    result: FrameResult,
}

#[derive(Debug, Serialize)]
struct ReplayReport {
    input: String,
    params: NavParams,
    frames: Vec<FrameReport>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = init_logging(cli.verbose, cli.quiet) {
        eprintln!("warning: logger not installed: {err}");
    }

    let outcome = match cli.command {
        Commands::Replay(args) => run_replay(&args),
        Commands::Estimate(args) => run_estimate(&args),
        Commands::PrintConfig => run_print_config(),
    };
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(not(feature = "tracing"))]
fn init_logging(verbose: u8, quiet: bool) -> CliResult<()> {
    let level = marker_nav::core::level_from_verbosity(verbose, quiet);
    marker_nav::core::init_with_level(level).map_err(|e| e.to_string())?;
    Ok(())
}

#[cfg(feature = "tracing")]
fn init_logging(verbose: u8, quiet: bool) -> CliResult<()> {
    let level = marker_nav::core::level_from_verbosity(verbose, quiet);
    marker_nav::core::init_tracing(false, level);
    Ok(())
}

fn load_params(args: &ConfigArgs) -> CliResult<NavParams> {
    let mut params = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|e| format!("failed to read config {}: {e}", path.display()))?;
            serde_json::from_str::<NavParams>(&raw)
                .map_err(|e| format!("malformed config {}: {e}", path.display()))?
        }
        None => NavParams::default(),
    };
    if let Some(policy) = args.policy {
        params.heading_policy = policy.into();
    }
    Ok(params)
}

#[cfg_attr(feature = "tracing", tracing::instrument(level = "info", skip(args)))]
fn run_replay(args: &ReplayArgs) -> CliResult<()> {
    let params = load_params(&args.config)?;
    let recording = Recording::load(&args.input)?;
    info!(
        "replaying {} frame(s) from {}",
        recording.frames.len(),
        args.input.display()
    );

    let mut nav = MarkerNavigator::new(ReplayDetector::default(), params)?;
    let limit = args.max_frames.unwrap_or(usize::MAX);
    let mut reports = Vec::new();

    for (index, frame) in recording.frames.iter().enumerate().take(limit) {
        let result = nav.process_image(frame, frame.width, frame.height)?;
        if !result.has_rows() && !frame.markers.is_empty() {
            warn!("frame {index}: {} marker(s) but no complete row", frame.markers.len());
        }
        for line in render::frame_lines(index, &result) {
            println!("{line}");
        }
        reports.push(FrameReport {
            index,
            width: frame.width,
            height: frame.height,
            result,
        });
    }
    info!("stream ended after {} frame(s)", nav.detector().frames_seen());

    if let Some(out) = &args.out {
        let report = ReplayReport {
            input: args.input.display().to_string(),
            params,
            frames: reports,
        };
        write_json(out, &report)?;
        info!("report written to {}", out.display());
    }
    Ok(())
}

fn run_estimate(args: &EstimateArgs) -> CliResult<()> {
    if args.x.len() != args.y.len() {
        return Err(format!(
            "--x and --y must have the same length ({} vs {})",
            args.x.len(),
            args.y.len()
        )
        .into());
    }
    let params = load_params(&args.config)?;
    let nav = MarkerNavigator::without_detector(params)?;
    let geometry = nav.frame_geometry(args.width, args.height)?;

    let samples: Vec<MarkerSample> = args
        .x
        .iter()
        .zip(&args.y)
        .enumerate()
        .map(|(id, (&x, &y))| MarkerSample::new(id as u32, x, y))
        .collect();
    let result = nav.process_samples(&samples, &geometry);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        for line in render::frame_lines(0, &result) {
            println!("{line}");
        }
    }
    Ok(())
}

fn run_print_config() -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(&NavParams::default())?);
    Ok(())
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> CliResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, serde_json::to_string_pretty(value)?)?;
    Ok(())
}
