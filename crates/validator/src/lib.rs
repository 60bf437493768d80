//! Repository validation for promptkit.
//!
//! Ties the registry, prompt schema and partials engine together and turns
//! every finding into a `Diagnostic` carrying a stable code, a severity and
//! the file it belongs to.

pub mod diagnostic;
pub mod repo;

#[cfg(test)]
mod tests;

// Re-export main API
pub use diagnostic::{filter_by_severity, Diagnostic, DiagnosticKind, Severity, Summary};
pub use repo::{check_partials, load_registry, validate_prompt_repo, RepoReport, ValidateOptions};
