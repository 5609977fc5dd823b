//! Cadence CLI - sample keyframe timelines from the command line
//!
//! Loads a timeline from a TOML/JSON document (or a built-in scene preset),
//! evaluates it at the requested times and prints the values.

mod config;
mod sample;

use anyhow::{Context, Result};
use cadence_animation::{ScenePreset, Timeline};
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use crate::config::{CadenceConfig, OutputFormat};
use crate::sample::SamplePlan;

/// Sample keyframe timelines
#[derive(Parser, Debug)]
#[command(name = "cadence")]
#[command(about = "Sample keyframe animation timelines")]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to ./cadence.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List built-in scene presets
    Presets,

    /// Evaluate a timeline at given times
    Sample(SampleArgs),

    /// Validate a timeline document and print a summary
    Check {
        /// Timeline document (.toml or .json)
        file: PathBuf,
    },
}

#[derive(Args, Debug)]
struct SampleArgs {
    /// Timeline document (.toml or .json)
    #[arg(required_unless_present = "preset", conflicts_with = "preset")]
    file: Option<PathBuf>,

    /// Built-in scene preset instead of a file
    #[arg(short, long)]
    preset: Option<String>,

    /// Elapsed time in seconds (repeatable)
    #[arg(long = "at", allow_negative_numbers = true)]
    at: Vec<f32>,

    /// Progress fraction 0.0-1.0 (repeatable)
    #[arg(long = "progress", allow_negative_numbers = true)]
    progress: Vec<f32>,

    /// Sweep one cycle at this frame rate
    #[arg(long)]
    fps: Option<u32>,

    /// Output format
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cwd = std::env::current_dir().context("Failed to read working directory")?;
    let config = CadenceConfig::discover(cli.config.as_deref(), &cwd)?;
    init_logging(&config, cli.verbose);

    match cli.command {
        Commands::Presets => {
            for name in ScenePreset::NAMES {
                println!("{}", name);
            }
            Ok(())
        }
        Commands::Sample(args) => cmd_sample(&config, args),
        Commands::Check { file } => cmd_check(&file),
    }
}

fn init_logging(config: &CadenceConfig, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log.level))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_sample(config: &CadenceConfig, args: SampleArgs) -> Result<()> {
    let timeline = match (&args.file, &args.preset) {
        (Some(file), _) => load_timeline(file)?,
        (None, Some(name)) => match ScenePreset::by_name(name) {
            Some(timeline) => timeline?,
            None => anyhow::bail!(
                "Unknown preset `{}`. Available: {}",
                name,
                ScenePreset::NAMES.join(", ")
            ),
        },
        (None, None) => anyhow::bail!("Either a timeline file or --preset is required"),
    };

    let mut plan = SamplePlan {
        at: args.at,
        progress: args.progress,
        fps: args.fps,
    };
    if plan.is_empty() {
        plan.fps = Some(config.sample.fps);
    }

    let samples = sample::sample(&timeline, &plan)?;
    let output = match args.format.unwrap_or(config.sample.format) {
        OutputFormat::Table => sample::render_table(&samples, config.sample.precision),
        OutputFormat::Json => sample::render_json(&samples)?,
    };
    print!("{}", output);
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}

fn cmd_check(file: &Path) -> Result<()> {
    let timeline = load_timeline(file)?;

    println!(
        "{}: {} track(s), {:.3}s{}",
        file.display(),
        timeline.tracks().count(),
        timeline.total_duration(),
        if timeline.is_repeating() {
            ", repeating"
        } else {
            ""
        }
    );
    for (name, track) in timeline.tracks() {
        println!(
            "  {:<16} {} keyframe(s), {:.3}s, {} -> {}",
            name,
            track.keyframes().len(),
            track.duration(),
            track.initial(),
            track.final_value()
        );
    }
    Ok(())
}

/// Read a timeline document, choosing the parser by file extension
fn load_timeline(path: &Path) -> Result<Timeline> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let timeline = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?,
        Some("toml") => toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?,
        _ => anyhow::bail!(
            "Unsupported timeline format for {} (expected .toml or .json)",
            path.display()
        ),
    };

    tracing::info!(path = %path.display(), "Loaded timeline");
    Ok(timeline)
}
