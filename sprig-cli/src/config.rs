//! Configuration handling for the sprig CLI

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use sprig_core::Limits;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub limits: Limits,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    #[serde(default)]
    pub stats: bool,

    /// Stack size for the parser thread, in MiB
    #[serde(default = "default_stack_mib")]
    pub stack_mib: usize,
}

/// How parsed values are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One re-serialized value per line
    #[default]
    Text,
    /// A JSON array of value snapshots
    Json,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            stats: false,
            stack_mib: default_stack_mib(),
        }
    }
}

fn default_stack_mib() -> usize { 16 }

/// Load configuration from file or use defaults
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    if let Some(path) = path {
        read_config(&path)
    } else if let Some(path) = default_config_path() {
        if path.exists() {
            read_config(&path)
        } else {
            Ok(Config::default())
        }
    } else {
        Ok(Config::default())
    }
}

/// `~/.sprig/config.toml`, when a home directory is known.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".sprig").join("config.toml"))
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("invalid config file {}", path.display()))?;
    Ok(config)
}
