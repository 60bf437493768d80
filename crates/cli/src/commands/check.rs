//! Check command handler.
//!
//! Runs the partials checks (missing partials and circular dependencies)
//! on their own, without reporting schema problems.

use crate::output::{self, emit, format_diagnostics, to_json, OutputFormat};
use clap::{Args, Subcommand};
use promptkit_core::{config::AppConfig, AppResult};
use promptkit_validator::check_partials;
use std::path::PathBuf;
use std::process::ExitCode;

/// Check prompt repository components
#[derive(Args, Debug)]
pub struct CheckCommand {
    #[command(subcommand)]
    pub action: CheckAction,
}

#[derive(Subcommand, Debug)]
pub enum CheckAction {
    /// Check partials usage (missing partials and circular dependencies)
    Partials(CheckPartialsCommand),
}

impl CheckCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<ExitCode> {
        match &self.action {
            CheckAction::Partials(cmd) => cmd.execute(config),
        }
    }
}

/// Check partials usage
#[derive(Args, Debug)]
pub struct CheckPartialsCommand {
    /// Repository root path (default: configured repository)
    pub path: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Write the report to a file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl CheckPartialsCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<ExitCode> {
        let Some((repo_root, registry)) = super::open_repo(self.path.as_ref(), config) else {
            return Ok(ExitCode::FAILURE);
        };
        tracing::info!("Executing check partials for {:?}", repo_root);

        if !registry.partials_enabled() {
            if self.format.is_json() {
                let value = serde_json::json!({
                    "enabled": false,
                    "message": "Partials are not enabled",
                });
                emit(&to_json(&value)?, self.output.as_deref())?;
            } else {
                eprintln!("{}", output::warning("Partials are not enabled in registry"));
            }
            return Ok(ExitCode::SUCCESS);
        }

        let diagnostics = check_partials(&repo_root, &registry)?;
        let passed = diagnostics.is_empty();

        let rendered = if self.format.is_json() {
            to_json(&serde_json::json!({ "passed": passed, "errors": diagnostics }))?
        } else if passed {
            output::success("All partials are valid!")
        } else {
            format_diagnostics(&diagnostics)
        };
        emit(&rendered, self.output.as_deref())?;

        Ok(if passed {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        })
    }
}
