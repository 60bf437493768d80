//! Repository-level diagnostics.

use promptkit_core::{AppError, AppResult};
use promptkit_partials::PartialIssue;
use promptkit_prompt::FieldError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// How serious a diagnostic is. Lower levels are more severe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Fatal,
    #[default]
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn level(self) -> i8 {
        match self {
            Severity::Fatal => -1,
            Severity::Error => 0,
            Severity::Warning => 1,
            Severity::Info => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Fatal => "fatal",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "fatal" => Ok(Severity::Fatal),
            "error" => Ok(Severity::Error),
            "warning" => Ok(Severity::Warning),
            "info" => Ok(Severity::Info),
            other => Err(AppError::Config(format!("Unknown severity: {}", other))),
        }
    }
}

/// What went wrong.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum DiagnosticKind {
    RepoRootNotFound { path: String },
    RegistryNotFound { path: String },
    RegistryInvalid { errors: Vec<FieldError> },
    Schema { errors: Vec<FieldError> },
    MissingPartial { partial: String },
    CircularPartial { chain: Vec<String> },
}

impl DiagnosticKind {
    /// Stable code for programmatic matching.
    pub fn code(&self) -> &'static str {
        match self {
            DiagnosticKind::RepoRootNotFound { .. } => "REPO_ROOT_NOT_FOUND",
            DiagnosticKind::RegistryNotFound { .. } => "REGISTRY_FILE_NOT_FOUND",
            DiagnosticKind::RegistryInvalid { .. } => "REGISTRY_SCHEMA_INVALID",
            DiagnosticKind::Schema { .. } => "PROMPT_SCHEMA_INVALID",
            DiagnosticKind::MissingPartial { .. } => "PARTIAL_NOT_FOUND",
            DiagnosticKind::CircularPartial { .. } => "PARTIAL_CIRCULAR_DEPENDENCY",
        }
    }

    pub fn default_severity(&self) -> Severity {
        match self {
            DiagnosticKind::RepoRootNotFound { .. }
            | DiagnosticKind::RegistryNotFound { .. }
            | DiagnosticKind::RegistryInvalid { .. } => Severity::Fatal,
            DiagnosticKind::Schema { .. }
            | DiagnosticKind::MissingPartial { .. }
            | DiagnosticKind::CircularPartial { .. } => Severity::Error,
        }
    }

    pub fn message(&self) -> String {
        match self {
            DiagnosticKind::RepoRootNotFound { path } => {
                format!("Repository root path not found: {}", path)
            }
            DiagnosticKind::RegistryNotFound { path } => {
                format!("Registry file not found: {}", path)
            }
            DiagnosticKind::RegistryInvalid { errors } => {
                format!("Registry schema validation failed ({} error(s))", errors.len())
            }
            DiagnosticKind::Schema { errors } => {
                format!("Prompt schema validation failed ({} error(s))", errors.len())
            }
            DiagnosticKind::MissingPartial { partial } => {
                format!("Partial not found: {}", partial)
            }
            DiagnosticKind::CircularPartial { chain } => {
                format!("Circular partial dependency: {}", chain.join(" -> "))
            }
        }
    }

    pub fn hint(&self) -> Option<&'static str> {
        match self {
            DiagnosticKind::RepoRootNotFound { .. } => {
                Some("Ensure the repository path exists and is accessible")
            }
            DiagnosticKind::RegistryNotFound { .. } => {
                Some("Create a registry.yaml file in the repository root")
            }
            DiagnosticKind::MissingPartial { .. } => {
                Some("Create the partial file or fix the reference name")
            }
            DiagnosticKind::CircularPartial { .. } => {
                Some("Break the cycle by removing one of the partial references")
            }
            DiagnosticKind::RegistryInvalid { .. } | DiagnosticKind::Schema { .. } => None,
        }
    }
}

impl From<PartialIssue> for DiagnosticKind {
    fn from(issue: PartialIssue) -> Self {
        match issue {
            PartialIssue::MissingPartial { partial } => DiagnosticKind::MissingPartial { partial },
            PartialIssue::CircularPartial { chain } => DiagnosticKind::CircularPartial { chain },
        }
    }
}

/// A single finding, optionally attributed to a file in the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Path relative to the repository root
    pub file: Option<String>,
    pub severity: Severity,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    /// Build a diagnostic with the kind's default severity.
    pub fn new(kind: DiagnosticKind) -> Self {
        Self {
            file: None,
            severity: kind.default_severity(),
            kind,
        }
    }

    #[must_use]
    pub fn in_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn message(&self) -> String {
        self.kind.message()
    }
}

impl Serialize for Diagnostic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Flat<'a> {
            code: &'static str,
            severity: Severity,
            message: String,
            #[serde(skip_serializing_if = "Option::is_none")]
            file: Option<&'a str>,
            #[serde(skip_serializing_if = "Option::is_none")]
            hint: Option<&'static str>,
            #[serde(flatten)]
            kind: &'a DiagnosticKind,
        }

        Flat {
            code: self.code(),
            severity: self.severity,
            message: self.message(),
            file: self.file.as_deref(),
            hint: self.kind.hint(),
            kind: &self.kind,
        }
        .serialize(serializer)
    }
}

/// Diagnostic counts per severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub fatal: usize,
    pub error: usize,
    pub warning: usize,
    pub info: usize,
}

impl Summary {
    pub fn from_diagnostics(diagnostics: &[Diagnostic]) -> Self {
        let mut summary = Summary::default();
        for diagnostic in diagnostics {
            match diagnostic.severity {
                Severity::Fatal => summary.fatal += 1,
                Severity::Error => summary.error += 1,
                Severity::Warning => summary.warning += 1,
                Severity::Info => summary.info += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.fatal + self.error + self.warning + self.info
    }
}

/// Keep diagnostics at least as severe as `min_severity`.
pub fn filter_by_severity(diagnostics: Vec<Diagnostic>, min_severity: Severity) -> Vec<Diagnostic> {
    diagnostics
        .into_iter()
        .filter(|d| d.severity.level() <= min_severity.level())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Diagnostic> {
        vec![
            Diagnostic::new(DiagnosticKind::RepoRootNotFound {
                path: "/nowhere".to_string(),
            }),
            Diagnostic::new(DiagnosticKind::MissingPartial {
                partial: "x".to_string(),
            })
            .in_file("common/a.yaml"),
            Diagnostic {
                file: None,
                severity: Severity::Warning,
                kind: DiagnosticKind::MissingPartial {
                    partial: "y".to_string(),
                },
            },
            Diagnostic {
                file: None,
                severity: Severity::Info,
                kind: DiagnosticKind::MissingPartial {
                    partial: "z".to_string(),
                },
            },
        ]
    }

    #[test]
    fn test_severity_parse() {
        assert_eq!("warning".parse::<Severity>().unwrap(), Severity::Warning);
        assert_eq!("FATAL".parse::<Severity>().unwrap(), Severity::Fatal);
        assert!("loud".parse::<Severity>().is_err());
    }

    #[test]
    fn test_default_severities() {
        let missing = Diagnostic::new(DiagnosticKind::MissingPartial {
            partial: "x".to_string(),
        });
        assert_eq!(missing.severity, Severity::Error);

        let registry = Diagnostic::new(DiagnosticKind::RegistryInvalid { errors: vec![] });
        assert_eq!(registry.severity, Severity::Fatal);
    }

    #[test]
    fn test_filter_by_severity() {
        assert_eq!(filter_by_severity(sample(), Severity::Fatal).len(), 1);
        assert_eq!(filter_by_severity(sample(), Severity::Error).len(), 2);
        assert_eq!(filter_by_severity(sample(), Severity::Warning).len(), 3);
        assert_eq!(filter_by_severity(sample(), Severity::Info).len(), 4);
    }

    #[test]
    fn test_summary() {
        let summary = Summary::from_diagnostics(&sample());
        assert_eq!(
            summary,
            Summary {
                fatal: 1,
                error: 1,
                warning: 1,
                info: 1
            }
        );
        assert_eq!(summary.total(), 4);
    }

    #[test]
    fn test_from_partial_issue() {
        let kind: DiagnosticKind = PartialIssue::CircularPartial {
            chain: vec!["a".to_string(), "a".to_string()],
        }
        .into();
        assert_eq!(kind.code(), "PARTIAL_CIRCULAR_DEPENDENCY");
        assert_eq!(kind.message(), "Circular partial dependency: a -> a");
    }

    #[test]
    fn test_serialize_flat() {
        let diagnostic = Diagnostic::new(DiagnosticKind::MissingPartial {
            partial: "role-expert".to_string(),
        })
        .in_file("common/api-design.yaml");

        let json = serde_json::to_value(&diagnostic).unwrap();
        assert_eq!(json["type"], "missing-partial");
        assert_eq!(json["code"], "PARTIAL_NOT_FOUND");
        assert_eq!(json["severity"], "error");
        assert_eq!(json["file"], "common/api-design.yaml");
        assert_eq!(json["partial"], "role-expert");
    }

    #[test]
    fn test_serialize_without_file() {
        let diagnostic = Diagnostic::new(DiagnosticKind::RegistryNotFound {
            path: "registry.yaml".to_string(),
        });
        let json = serde_json::to_value(&diagnostic).unwrap();
        assert!(json.get("file").is_none());
        assert_eq!(json["type"], "registry-not-found");
    }
}
