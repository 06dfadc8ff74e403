//! CLI configuration management
//!
//! Handles loading configuration from TOML files, `MIFIDPRU_*` environment
//! variables and command-line arguments.

use mifidpru_engine::monitor::MonitorThresholds;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Prefix of every environment variable read by [`CliConfig::apply_env`].
pub const ENV_PREFIX: &str = "MIFIDPRU_";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Log level not recognised.
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// Output format not recognised.
    #[error("Invalid output format: {0}. Must be one of: table, json")]
    InvalidOutputFormat(String),

    /// Configuration file could not be read or parsed.
    #[error("Configuration file error: {0}")]
    FileError(String),

    /// One or more settings failed validation.
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Everything
    Trace,
    /// Debug detail
    Debug,
    /// Progress messages
    #[default]
    Info,
    /// Warnings, including input corrections and limit breaches
    Warn,
    /// Errors only
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// How command results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" | "text" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ConfigError::InvalidOutputFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

fn deserialize_from_str<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let s = String::deserialize(deserializer)?;
    T::from_str(&s).map_err(serde::de::Error::custom)
}

/// Compliance monitor settings, in percent of the requirement used.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct MonitorSettings {
    /// Utilisation at which `Watch` starts
    pub watch: f64,
    /// Utilisation at which `Warning` starts
    pub warning: f64,
    /// Utilisation at which `Critical` starts
    pub critical: f64,
    /// Recovery trigger as a multiple of the own funds requirement
    pub recovery_multiplier: f64,
    /// Wind-down trigger as a multiple of the own funds requirement
    pub wind_down_multiplier: f64,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        let t = MonitorThresholds::default();
        Self {
            watch: t.watch,
            warning: t.warning,
            critical: t.critical,
            recovery_multiplier: t.recovery_multiplier,
            wind_down_multiplier: t.wind_down_multiplier,
        }
    }
}

impl From<MonitorSettings> for MonitorThresholds {
    fn from(s: MonitorSettings) -> Self {
        MonitorThresholds {
            watch: s.watch,
            warning: s.warning,
            critical: s.critical,
            recovery_multiplier: s.recovery_multiplier,
            wind_down_multiplier: s.wind_down_multiplier,
        }
    }
}

/// CLI configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level
    #[serde(deserialize_with = "deserialize_from_str")]
    pub log_level: LogLevel,
    /// JSON file holding every firm
    pub data_file: PathBuf,
    /// Directory for reports and documents
    pub output_dir: PathBuf,
    /// Reporting currency; only GBP is supported
    pub reporting_currency: String,
    /// How results are printed
    #[serde(deserialize_with = "deserialize_from_str")]
    pub output_format: OutputFormat,
    /// Compliance monitor settings
    pub monitor: MonitorSettings,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            data_file: PathBuf::from("mifidpru_data.json"),
            output_dir: PathBuf::from("reports"),
            reporting_currency: "GBP".to_string(),
            output_format: OutputFormat::Table,
            monitor: MonitorSettings::default(),
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Apply overrides from a variable lookup.
    ///
    /// Keys are looked up with the [`ENV_PREFIX`], e.g. `MIFIDPRU_LOG_LEVEL`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(&format!("{}{}", ENV_PREFIX, key));

        if let Some(level) = var("LOG_LEVEL") {
            self.log_level = LogLevel::from_str(&level)?;
        }
        if let Some(path) = var("DATA_FILE") {
            self.data_file = PathBuf::from(path);
        }
        if let Some(dir) = var("OUTPUT_DIR") {
            self.output_dir = PathBuf::from(dir);
        }
        if let Some(currency) = var("CURRENCY") {
            self.reporting_currency = currency;
        }
        if let Some(format) = var("OUTPUT_FORMAT") {
            self.output_format = OutputFormat::from_str(&format)?;
        }
        Ok(())
    }

    /// Apply overrides from the process environment
    pub fn with_env_override(mut self) -> Result<Self, ConfigError> {
        self.apply_env(|key| std::env::var(key).ok())?;
        Ok(self)
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(level) = &cli.log_level {
            self.log_level = LogLevel::from_str(level)?;
        }
        if let Some(path) = &cli.data_file {
            self.data_file = path.clone();
        }
        if let Some(dir) = &cli.output_dir {
            self.output_dir = dir.clone();
        }
        if let Some(format) = &cli.output_format {
            self.output_format = OutputFormat::from_str(format)?;
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.data_file.as_os_str().is_empty() {
            errors.push("data_file cannot be empty".to_string());
        }
        if self.output_dir.as_os_str().is_empty() {
            errors.push("output_dir cannot be empty".to_string());
        }
        if !self.reporting_currency.eq_ignore_ascii_case("GBP") {
            errors.push(format!(
                "Unsupported reporting_currency '{}'. Only GBP is supported",
                self.reporting_currency
            ));
        }

        let m = &self.monitor;
        if !(m.watch > 0.0 && m.watch < m.warning && m.warning <= m.critical) {
            errors.push(format!(
                "monitor thresholds must satisfy 0 < watch < warning <= critical (got {}, {}, {})",
                m.watch, m.warning, m.critical
            ));
        }
        if m.recovery_multiplier < 1.0 || m.wind_down_multiplier < 1.0 {
            errors.push("monitor trigger multipliers must be at least 1.0".to_string());
        }
        if m.wind_down_multiplier > m.recovery_multiplier {
            errors.push(
                "monitor wind_down_multiplier cannot exceed recovery_multiplier".to_string(),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Monitor thresholds in engine form.
    pub fn monitor_thresholds(&self) -> MonitorThresholds {
        self.monitor.into()
    }
}

/// CLI arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Log level override
    pub log_level: Option<String>,
    /// Data file override
    pub data_file: Option<PathBuf>,
    /// Output directory override
    pub output_dir: Option<PathBuf>,
    /// Output format override
    pub output_format: Option<String>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<CliConfig, ConfigError> {
    build_config_with(cli, |key| std::env::var(key).ok())
}

/// [`build_config`] with an explicit variable lookup.
pub fn build_config_with<F>(cli: &CliArgs, lookup: F) -> Result<CliConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match &cli.config_file {
        Some(path) => CliConfig::from_file(path)?,
        None => CliConfig::default(),
    };
    config.apply_env(lookup)?;
    config.merge_with_cli(cli)?;
    config.validate()?;
    Ok(config)
}
