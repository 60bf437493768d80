//! Output rendering shared by all commands.
//!
//! Reports go to stdout (or to `--output`); logs stay on stderr.

use clap::ValueEnum;
use colored::Colorize;
use promptkit_core::AppResult;
use promptkit_prompt::FieldError;
use promptkit_validator::{Diagnostic, DiagnosticKind};
use serde::Serialize;
use std::path::Path;

/// Report format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn is_json(self) -> bool {
        self == OutputFormat::Json
    }
}

/// Pretty-print `value` as JSON.
pub fn to_json<T: Serialize>(value: &T) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Print `content`, or write it to `output` when given.
pub fn emit(content: &str, output: Option<&Path>) -> AppResult<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)?;
            println!("{}", success(&format!("Output written to: {}", path.display())));
        }
        None => println!("{}", content),
    }
    Ok(())
}

pub fn success(message: &str) -> String {
    format!("✓ {}", message).green().to_string()
}

pub fn error(message: &str) -> String {
    format!("✗ {}", message).red().to_string()
}

pub fn warning(message: &str) -> String {
    format!("⚠ {}", message).yellow().to_string()
}

pub fn info(message: &str) -> String {
    format!("ℹ {}", message).blue().to_string()
}

/// Human-readable listing of diagnostics, grouped line by line per finding.
pub fn format_diagnostics(diagnostics: &[Diagnostic]) -> String {
    if diagnostics.is_empty() {
        return "No validation errors found.".green().to_string();
    }

    let mut lines = vec![format!("Found {} validation error(s):\n", diagnostics.len())
        .red()
        .to_string()];

    for diagnostic in diagnostics {
        let file = diagnostic.file.as_deref().unwrap_or("<repository>");
        lines.push(format!("File: {}", file).bold().to_string());
        lines.push(format!(
            "  [{}] {}",
            diagnostic.severity,
            diagnostic.code().dimmed()
        ));

        match &diagnostic.kind {
            DiagnosticKind::RepoRootNotFound { path } => {
                lines.push("  Type: Repository root not found".red().to_string());
                lines.push(format!("    - Path: {}", path));
            }
            DiagnosticKind::RegistryNotFound { path } => {
                lines.push("  Type: Registry file not found".red().to_string());
                lines.push(format!("    - Path: {}", path));
            }
            DiagnosticKind::RegistryInvalid { errors } => {
                lines.push("  Type: Registry validation error".red().to_string());
                lines.extend(format_field_errors(errors));
            }
            DiagnosticKind::Schema { errors } => {
                lines.push("  Type: Schema validation error".red().to_string());
                lines.extend(format_field_errors(errors));
            }
            DiagnosticKind::MissingPartial { partial } => {
                lines.push("  Type: Missing partial".red().to_string());
                lines.push(format!("    - Partial: {}", partial));
            }
            DiagnosticKind::CircularPartial { chain } => {
                lines.push("  Type: Circular dependency".red().to_string());
                lines.push(format!("    - Chain: {}", chain.join(" → ")));
            }
        }

        if let Some(hint) = diagnostic.kind.hint() {
            lines.push(format!("    Hint: {}", hint).dimmed().to_string());
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

pub fn format_field_errors(errors: &[FieldError]) -> Vec<String> {
    errors
        .iter()
        .map(|e| format!("    - {}: {}", e.display_path(), e.message))
        .collect()
}
