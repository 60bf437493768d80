//! Validate command handler.
//!
//! Validates a whole repository or one of its components.

use crate::output::{self, emit, format_diagnostics, format_field_errors, to_json, OutputFormat};
use clap::{Args, Subcommand};
use promptkit_core::{config::AppConfig, AppResult};
use promptkit_partials::list_partials;
use promptkit_prompt::{validate_prompt_file, validate_registry, RegistryError, REGISTRY_FILE_NAME};
use promptkit_validator::{validate_prompt_repo, Severity, ValidateOptions};
use std::path::PathBuf;
use std::process::ExitCode;

/// Validate prompt repository components
#[derive(Args, Debug)]
pub struct ValidateCommand {
    #[command(subcommand)]
    pub action: ValidateAction,
}

#[derive(Subcommand, Debug)]
pub enum ValidateAction {
    /// Validate the entire prompt repository
    Repo(ValidateRepoCommand),
    /// Validate a registry.yaml file
    Registry(ValidateRegistryCommand),
    /// Validate a single prompt file
    File(ValidateFileCommand),
    /// List the partials directory
    Partials(ValidatePartialsCommand),
}

impl ValidateCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<ExitCode> {
        match &self.action {
            ValidateAction::Repo(cmd) => cmd.execute(config),
            ValidateAction::Registry(cmd) => cmd.execute(config),
            ValidateAction::File(cmd) => cmd.execute(),
            ValidateAction::Partials(cmd) => cmd.execute(config),
        }
    }
}

/// Validate the entire prompt repository
#[derive(Args, Debug)]
pub struct ValidateRepoCommand {
    /// Repository root path (default: configured repository)
    pub path: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Write the report to a file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Exit with a non-zero code when validation fails
    #[arg(long)]
    pub exit_code: bool,

    /// Least severe diagnostic to report (fatal, error, warning, info)
    #[arg(long)]
    pub min_severity: Option<Severity>,
}

impl ValidateRepoCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<ExitCode> {
        let repo_root = super::repo_path(self.path.as_ref(), config);
        tracing::info!("Executing validate repo for {:?}", repo_root);

        let min_severity = match self.min_severity {
            Some(severity) => severity,
            None => config.min_severity.parse()?,
        };
        let report = validate_prompt_repo(&repo_root, &ValidateOptions { min_severity })?;

        let rendered = if self.format.is_json() {
            to_json(&report)?
        } else if report.passed {
            output::success("All validations passed!")
        } else {
            format_diagnostics(&report.errors)
        };
        emit(&rendered, self.output.as_deref())?;

        if report.passed || !(self.exit_code || config.exit_code) {
            Ok(ExitCode::SUCCESS)
        } else {
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Validate a registry.yaml file
#[derive(Args, Debug)]
pub struct ValidateRegistryCommand {
    /// Registry file path, relative to the repository root
    #[arg(default_value = REGISTRY_FILE_NAME)]
    pub path: PathBuf,

    /// Repository root path
    #[arg(short, long)]
    pub repo_root: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl ValidateRegistryCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<ExitCode> {
        let repo_root = super::repo_path(self.repo_root.as_ref(), config);
        let registry_path = repo_root.join(&self.path);
        tracing::info!("Executing validate registry for {:?}", registry_path);

        match validate_registry(&registry_path, &repo_root) {
            Ok(registry) => {
                if self.format.is_json() {
                    let value = serde_json::json!({ "success": true, "data": registry });
                    println!("{}", to_json(&value)?);
                } else {
                    println!("{}", output::success("Registry is valid!"));
                }
                Ok(ExitCode::SUCCESS)
            }
            Err(RegistryError::NotFound(path)) => {
                eprintln!(
                    "{}",
                    output::error(&format!("Registry file does not exist: {}", path.display()))
                );
                Ok(ExitCode::FAILURE)
            }
            Err(RegistryError::Invalid(errors)) => {
                if self.format.is_json() {
                    let value = serde_json::json!({ "success": false, "errors": errors });
                    println!("{}", to_json(&value)?);
                } else {
                    eprintln!("{}", output::error("Registry validation failed:"));
                    println!("{}", format_field_errors(&errors).join("\n"));
                }
                Ok(ExitCode::FAILURE)
            }
        }
    }
}

/// Validate a single prompt file
#[derive(Args, Debug)]
pub struct ValidateFileCommand {
    /// Path to prompt YAML file
    pub file: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl ValidateFileCommand {
    pub fn execute(&self) -> AppResult<ExitCode> {
        tracing::info!("Executing validate file for {:?}", self.file);

        if !self.file.exists() {
            eprintln!(
                "{}",
                output::error(&format!("File does not exist: {}", self.file.display()))
            );
            return Ok(ExitCode::FAILURE);
        }

        match validate_prompt_file(&self.file) {
            Ok(prompt) => {
                if self.format.is_json() {
                    let value = serde_json::json!({ "success": true, "data": prompt });
                    println!("{}", to_json(&value)?);
                } else {
                    println!("{}", output::success("Prompt file is valid!"));
                }
                Ok(ExitCode::SUCCESS)
            }
            Err(violation) => {
                if self.format.is_json() {
                    let value = serde_json::json!({ "success": false, "errors": violation.errors });
                    println!("{}", to_json(&value)?);
                } else {
                    eprintln!("{}", output::error("Prompt file validation failed:"));
                    println!("{}", format_field_errors(&violation.errors).join("\n"));
                }
                Ok(ExitCode::FAILURE)
            }
        }
    }
}

/// List the partials directory
#[derive(Args, Debug)]
pub struct ValidatePartialsCommand {
    /// Repository root path (default: configured repository)
    pub path: Option<PathBuf>,

    /// Partials directory relative to the repository root
    #[arg(short, long, default_value = "partials")]
    pub partials_path: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl ValidatePartialsCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<ExitCode> {
        let repo_root = super::repo_path(self.path.as_ref(), config);
        tracing::info!("Executing validate partials for {:?}", repo_root);

        if !repo_root.exists() {
            eprintln!(
                "{}",
                output::error(&format!(
                    "Repository path does not exist: {}",
                    repo_root.display()
                ))
            );
            return Ok(ExitCode::FAILURE);
        }

        let partials = list_partials(&repo_root.join(&self.partials_path))?;

        if self.format.is_json() {
            let value = serde_json::json!({ "partials": partials, "count": partials.len() });
            println!("{}", to_json(&value)?);
        } else {
            println!(
                "{}",
                output::success(&format!("Found {} partial file(s):", partials.len()))
            );
            for partial in &partials {
                println!("  - {}", partial);
            }
        }

        Ok(ExitCode::SUCCESS)
    }
}
