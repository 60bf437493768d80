//! Configuration management for promptkit.
//!
//! Configuration is merged from several sources, lowest precedence first:
//! - Built-in defaults
//! - Config file (`$PROMPTKIT_CONFIG` or `.promptkit.yaml` in the current directory)
//! - Environment variables
//! - Command-line flags

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Name of the config file looked up in the current directory.
pub const CONFIG_FILE_NAME: &str = ".promptkit.yaml";

/// Severity names accepted by `min_severity`.
pub const SEVERITY_NAMES: [&str; 4] = ["fatal", "error", "warning", "info"];

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default prompt repository root used when a command gets no path
    pub repo_root: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,

    /// Lowest severity kept in repository reports
    pub min_severity: String,

    /// Exit non-zero when `validate repo` fails
    pub exit_code: bool,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    logging: Option<LoggingConfig>,
    validation: Option<ValidationConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ValidationConfig {
    #[serde(rename = "minSeverity")]
    min_severity: Option<String>,
    #[serde(rename = "exitCode")]
    exit_code: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            repo_root: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            log_level: None,
            verbose: false,
            no_color: false,
            min_severity: "error".to_string(),
            exit_code: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the config file and environment variables.
    ///
    /// Environment variables:
    /// - `PROMPTKIT_CONFIG`: Path to config file
    /// - `PROMPTKIT_REPO`: Default repository root
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    pub fn load() -> AppResult<Self> {
        Self::load_from(None)
    }

    /// Like [`AppConfig::load`], but `config_file` (from `--config`) takes
    /// the place of `PROMPTKIT_CONFIG` and the current-directory file.
    pub fn load_from(config_file: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();
        config.config_file =
            config_file.or_else(|| std::env::var_os("PROMPTKIT_CONFIG").map(PathBuf::from));

        let config_path = match config.config_file {
            Some(ref cf) => cf.clone(),
            None => PathBuf::from(CONFIG_FILE_NAME),
        };

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        } else if config.config_file.is_some() {
            return Err(AppError::Config(format!(
                "Config file does not exist: {:?}",
                config_path
            )));
        }

        // Environment variables override the config file
        Ok(config.apply_env(|key| std::env::var(key).ok()))
    }

    /// Apply `PROMPTKIT_REPO`, `RUST_LOG` and `NO_COLOR` as looked up by `var`.
    fn apply_env(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(repo) = var("PROMPTKIT_REPO") {
            self.repo_root = PathBuf::from(repo);
        }

        if let Some(level) = var("RUST_LOG") {
            self.log_level = Some(level);
        }

        if var("NO_COLOR").is_some() {
            self.no_color = true;
        }

        self
    }

    /// Merge a YAML configuration file into a copy of this config.
    pub fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        // An empty file deserializes to unit, not a mapping
        let config_file: ConfigFile = if contents.trim().is_empty() {
            ConfigFile::default()
        } else {
            serde_yaml::from_str(&contents).map_err(|e| {
                AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
            })?
        };

        let mut result = self.clone();

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        if let Some(validation) = config_file.validation {
            if let Some(min_severity) = validation.min_severity {
                result.min_severity = min_severity;
            }
            if let Some(exit_code) = validation.exit_code {
                result.exit_code = exit_code;
            }
        }

        tracing::debug!("Merged config file {:?}", path);
        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// Flags take precedence over both the config file and the environment.
    pub fn with_overrides(
        mut self,
        config_file: Option<PathBuf>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(config_file) = config_file {
            self.config_file = Some(config_file);
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Validate the merged configuration.
    pub fn validate(&self) -> AppResult<()> {
        let severity = self.min_severity.to_ascii_lowercase();
        if !SEVERITY_NAMES.contains(&severity.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown severity: {}. Supported: {}",
                self.min_severity,
                SEVERITY_NAMES.join(", ")
            )));
        }

        Ok(())
    }
}
