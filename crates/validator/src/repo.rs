//! Whole-repository validation.

use crate::diagnostic::{filter_by_severity, Diagnostic, DiagnosticKind, Severity, Summary};
use promptkit_core::AppResult;
use promptkit_partials::validate_partials_usage;
use promptkit_prompt::{
    validate_prompt_file, validate_registry, Group, Registry, RegistryError, REGISTRY_FILE_NAME,
};
use serde::Serialize;
use std::path::Path;

/// Options for `validate_prompt_repo`.
#[derive(Debug, Clone, Default)]
pub struct ValidateOptions {
    /// Least severe diagnostic kept in the report
    pub min_severity: Severity,
}

/// Outcome of validating a repository.
#[derive(Debug, Clone, Serialize)]
pub struct RepoReport {
    /// True when no diagnostic survived severity filtering
    pub passed: bool,
    pub errors: Vec<Diagnostic>,
    pub summary: Summary,
}

impl RepoReport {
    fn new(diagnostics: Vec<Diagnostic>, min_severity: Severity) -> Self {
        let errors = filter_by_severity(diagnostics, min_severity);
        Self {
            passed: errors.is_empty(),
            summary: Summary::from_diagnostics(&errors),
            errors,
        }
    }
}

/// Validate the registry, every prompt file of every enabled group and,
/// when partials are enabled, how each prompt uses them.
///
/// Missing repository roots and registry problems end validation early and
/// are reported as fatal diagnostics. Only failures that prevent reading a
/// partial that exists are returned as errors.
///
/// # Example
/// ```no_run
/// use promptkit_validator::{validate_prompt_repo, ValidateOptions};
/// use std::path::Path;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let report = validate_prompt_repo(Path::new("."), &ValidateOptions::default())?;
/// println!("passed: {} ({} errors)", report.passed, report.summary.error);
/// # Ok(())
/// # }
/// ```
pub fn validate_prompt_repo(repo_root: &Path, options: &ValidateOptions) -> AppResult<RepoReport> {
    tracing::info!("Validating prompt repository {:?}", repo_root);

    if !repo_root.exists() {
        let diagnostic = Diagnostic::new(DiagnosticKind::RepoRootNotFound {
            path: repo_root.display().to_string(),
        });
        return Ok(RepoReport::new(vec![diagnostic], options.min_severity));
    }

    let registry = match load_registry(repo_root) {
        Ok(registry) => registry,
        Err(diagnostic) => return Ok(RepoReport::new(vec![diagnostic], options.min_severity)),
    };

    let partial_root = registry.partials_root(repo_root);
    let mut diagnostics = Vec::new();

    for group in registry.enabled_groups() {
        validate_group(
            repo_root,
            group,
            partial_root.as_deref(),
            true,
            &mut diagnostics,
        )?;
    }

    tracing::info!("Repository validation found {} diagnostic(s)", diagnostics.len());
    Ok(RepoReport::new(diagnostics, options.min_severity))
}

/// Run only the partials checks across the repository.
///
/// Prompt files that fail schema validation are skipped silently; returns
/// an empty list when partials are disabled.
pub fn check_partials(repo_root: &Path, registry: &Registry) -> AppResult<Vec<Diagnostic>> {
    let mut diagnostics = Vec::new();

    let Some(partial_root) = registry.partials_root(repo_root) else {
        tracing::debug!("Partials are disabled; nothing to check");
        return Ok(diagnostics);
    };

    for group in registry.enabled_groups() {
        validate_group(repo_root, group, Some(&partial_root), false, &mut diagnostics)?;
    }

    Ok(diagnostics)
}

/// Load `registry.yaml` from `repo_root`, turning failures into a diagnostic.
pub fn load_registry(repo_root: &Path) -> Result<Registry, Diagnostic> {
    let registry_path = repo_root.join(REGISTRY_FILE_NAME);

    validate_registry(&registry_path, repo_root).map_err(|err| {
        tracing::debug!("Registry rejected: {}", err);
        let kind = match err {
            RegistryError::NotFound(path) => DiagnosticKind::RegistryNotFound {
                path: path.display().to_string(),
            },
            RegistryError::Invalid(errors) => DiagnosticKind::RegistryInvalid { errors },
        };
        Diagnostic::new(kind).in_file(REGISTRY_FILE_NAME)
    })
}

fn validate_group(
    repo_root: &Path,
    group: &Group,
    partial_root: Option<&Path>,
    report_schema: bool,
    diagnostics: &mut Vec<Diagnostic>,
) -> AppResult<()> {
    tracing::debug!("Validating group '{}' ({} prompt(s))", group.name, group.prompts.len());

    for file in &group.prompts {
        let relative = format!("{}/{}", group.path, file);
        let full = repo_root.join(&group.path).join(file);

        let prompt = match validate_prompt_file(&full) {
            Ok(prompt) => prompt,
            Err(violation) => {
                tracing::warn!("Skipping {}: {}", relative, violation);
                if report_schema {
                    diagnostics.push(
                        Diagnostic::new(DiagnosticKind::Schema {
                            errors: violation.errors,
                        })
                        .in_file(relative.as_str()),
                    );
                }
                continue;
            }
        };

        if let Some(partial_root) = partial_root {
            for issue in validate_partials_usage(&prompt.template, partial_root)? {
                diagnostics.push(Diagnostic::new(issue.into()).in_file(relative.as_str()));
            }
        }
    }

    Ok(())
}
