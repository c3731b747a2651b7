//! CLI configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/veazzy/config.toml` by default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use veazzy_core::{TracingConfig, TracingOutputFormat};

use crate::error::{CliError, CliResult};

/// Configuration for the veazzy CLI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Logging settings.
    pub logging: LoggingSettings,

    /// Output settings.
    pub output: OutputSettings,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default level when `RUST_LOG` is not set.
    pub level: String,

    /// Log line format.
    pub format: TracingOutputFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: TracingOutputFormat::Compact,
        }
    }
}

/// Output settings for the codec commands.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Pretty-print decoded JSON.
    pub pretty_json: bool,

    /// Always wrap encoded payloads in an `<iq>`.
    pub wrap_iq: bool,
}

impl CliConfig {
    /// Loads configuration from the default path.
    ///
    /// A missing file yields the defaults.
    pub fn load() -> CliResult<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from TOML text.
    pub fn parse(content: &str) -> CliResult<Self> {
        toml::from_str(content).map_err(|e| CliError::Config(format!("failed to parse config: {}", e)))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("veazzy")
            .join("config.toml")
    }

    /// Builds the tracing configuration from the logging section.
    ///
    /// `debug` forces debug-level output regardless of the configured level.
    pub fn tracing(&self, debug: bool) -> CliResult<TracingConfig> {
        if debug {
            return Ok(TracingConfig::cli_debug());
        }
        TracingConfig::default()
            .with_format(self.logging.format)
            .with_level_name(&self.logging.level)
            .map_err(|e| CliError::Config(e.to_string()))
    }
}
