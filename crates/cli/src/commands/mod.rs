//! Command handlers for the promptkit CLI.
//!
//! This module organizes all CLI commands into separate submodules.

pub mod check;
pub mod list;
pub mod stats;
pub mod validate;

// Re-export command types for convenience
pub use check::CheckCommand;
pub use list::ListCommand;
pub use stats::StatsCommand;
pub use validate::ValidateCommand;

use crate::output;
use promptkit_core::config::AppConfig;
use promptkit_prompt::Registry;
use promptkit_validator::{load_registry, DiagnosticKind};
use std::path::PathBuf;

/// The repository a command works on: its argument, else the configured root.
pub(crate) fn repo_path(path: Option<&PathBuf>, config: &AppConfig) -> PathBuf {
    path.cloned().unwrap_or_else(|| config.repo_root.clone())
}

/// Resolve the repository root and load its registry.
///
/// Problems are printed to stderr; `None` means the command should exit
/// with a failure code.
pub(crate) fn open_repo(path: Option<&PathBuf>, config: &AppConfig) -> Option<(PathBuf, Registry)> {
    let repo_root = repo_path(path, config);

    if !repo_root.exists() {
        eprintln!(
            "{}",
            output::error(&format!(
                "Repository path does not exist: {}",
                repo_root.display()
            ))
        );
        return None;
    }

    match load_registry(&repo_root) {
        Ok(registry) => Some((repo_root, registry)),
        Err(diagnostic) => {
            eprintln!("{}", output::error(&diagnostic.message()));
            if let DiagnosticKind::RegistryInvalid { errors } = &diagnostic.kind {
                eprintln!("{}", output::format_field_errors(errors).join("\n"));
            }
            None
        }
    }
}
