//! Cadence configuration file handling

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default file looked up in the working directory
pub const CONFIG_FILE: &str = "cadence.toml";

/// Top-level Cadence configuration (cadence.toml)
#[derive(Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct CadenceConfig {
    #[serde(default)]
    pub sample: SampleConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// Output format for sampled values
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Sampling defaults
#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct SampleConfig {
    /// Frame rate used when sweeping a timeline
    #[serde(default = "default_fps")]
    pub fps: u32,
    #[serde(default)]
    pub format: OutputFormat,
    /// Decimal places in table output
    #[serde(default = "default_precision")]
    pub precision: usize,
}

fn default_fps() -> u32 {
    60
}

fn default_precision() -> usize {
    3
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            format: OutputFormat::default(),
            precision: default_precision(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct LogConfig {
    /// Filter directive used when RUST_LOG is unset
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "warn".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl CadenceConfig {
    /// Load configuration from an explicit path
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Load `path` if given, else `cadence.toml` in `dir` if present, else defaults
    pub fn discover(path: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        let candidate = dir.join(CONFIG_FILE);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: CadenceConfig = toml::from_str(content)?;
        if config.sample.fps == 0 {
            anyhow::bail!("sample.fps must be at least 1");
        }
        Ok(config)
    }
}
