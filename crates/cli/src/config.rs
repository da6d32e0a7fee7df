use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Accepted layouts for `--at`, `HOLIDAY_DATE_OVERRIDE` and `date_override`.
const INSTANT_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// How command results are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// CLI configuration loaded from TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Catalog file or directory.
    #[serde(default = "default_catalog")]
    pub catalog: PathBuf,

    /// Fixed local instant used instead of the wall clock, e.g. `2025-12-24T18:00`.
    #[serde(default)]
    pub date_override: Option<String>,

    #[serde(default)]
    pub output: OutputFormat,
}

fn default_catalog() -> PathBuf {
    PathBuf::from("data/holidays")
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            catalog: default_catalog(),
            date_override: None,
            output: OutputFormat::default(),
        }
    }
}

impl CliConfig {
    /// Return the default config directory path: ~/.config/holiday/
    pub fn default_config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("could not determine user config directory")?
            .join("holiday");
        Ok(config_dir)
    }

    /// Return the default config file path.
    pub fn default_config_path() -> Result<PathBuf> {
        Ok(Self::default_config_dir()?.join("config.toml"))
    }

    /// Load config from the given path, or the default path.
    /// Returns default config if the file does not exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_config_path()?,
        };

        if config_path.exists() {
            debug!(?config_path, "Loading config");
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("failed to read config: {}", config_path.display()))?;
            let config: Self = toml::from_str(&content)
                .with_context(|| format!("failed to parse config: {}", config_path.display()))?;
            Ok(config)
        } else {
            debug!(?config_path, "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Resolve the catalog path.
    /// Priority: cli_override (flag or `HOLIDAY_CATALOG`) > config file > default.
    pub fn resolve_catalog(&self, cli_override: Option<&Path>) -> PathBuf {
        cli_override.map_or_else(|| self.catalog.clone(), Path::to_path_buf)
    }

    /// Resolve the output format.
    /// Priority: cli_override (flag or `HOLIDAY_OUTPUT`) > config file.
    pub fn resolve_output(&self, cli_override: Option<OutputFormat>) -> OutputFormat {
        cli_override.unwrap_or(self.output)
    }

    /// Resolve a fixed reference instant, if any.
    /// Priority: cli_override (flag or `HOLIDAY_DATE_OVERRIDE`) > config file.
    /// `None` means "use the wall clock".
    pub fn resolve_override(&self, cli_override: Option<NaiveDateTime>) -> Result<Option<NaiveDateTime>> {
        if let Some(instant) = cli_override {
            return Ok(Some(instant));
        }
        match self.date_override.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => parse_instant(text)
                .map(Some)
                .map_err(|e| anyhow::anyhow!("config `date_override`: {e}")),
        }
    }
}

/// Parse a local wall-clock instant such as `2025-12-24T18:00`.
pub fn parse_instant(text: &str) -> std::result::Result<NaiveDateTime, String> {
    let text = text.trim();
    INSTANT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .ok_or_else(|| format!("invalid instant '{text}', expected YYYY-MM-DDTHH:MM[:SS]"))
}

/// The reference instant: the override when set, otherwise local now.
pub fn reference_instant(fixed: Option<NaiveDateTime>) -> NaiveDateTime {
    fixed.unwrap_or_else(|| Local::now().naive_local())
}
