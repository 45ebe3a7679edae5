//! Grader configuration.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Html,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Html => write!(f, "html"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "html" => Ok(OutputFormat::Html),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

/// Top-level labgrade configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraderConfig {
    /// Log file graded when none is given on the command line.
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
    /// Report format used when none is given on the command line.
    #[serde(default)]
    pub output_format: OutputFormat,
    /// Max persistent failures listed under recommendations.
    #[serde(default = "default_attention_limit")]
    pub attention_limit: usize,
}

fn default_log_file() -> PathBuf {
    PathBuf::from("labresults.log")
}
fn default_attention_limit() -> usize {
    5
}

impl Default for GraderConfig {
    fn default() -> Self {
        Self {
            log_file: default_log_file(),
            output_format: OutputFormat::default(),
            attention_limit: default_attention_limit(),
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order when `path` is `None`:
/// 1. `labgrade.toml` in the current directory
/// 2. `~/.config/labgrade/config.toml`
///
/// Environment variable overrides: `LABGRADE_LOG_FILE`, `LABGRADE_OUTPUT_FORMAT`.
pub fn load_config_from(path: Option<&Path>) -> Result<GraderConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("labgrade.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            parse_config_file(&path)?
        }
        None => GraderConfig::default(),
    };

    if let Ok(log_file) = std::env::var("LABGRADE_LOG_FILE") {
        config.log_file = PathBuf::from(log_file);
    }
    if let Ok(format) = std::env::var("LABGRADE_OUTPUT_FORMAT") {
        config.output_format = format
            .parse()
            .map_err(|e: String| anyhow::anyhow!("LABGRADE_OUTPUT_FORMAT: {e}"))?;
    }

    Ok(config)
}

fn parse_config_file(path: &Path) -> Result<GraderConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str::<GraderConfig>(&content)
        .with_context(|| format!("failed to parse config: {}", path.display()))
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("labgrade"))
}
