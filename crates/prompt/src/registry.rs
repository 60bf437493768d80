//! Registry loading and validation.
//!
//! `registry.yaml` sits at the repository root and lists the prompt groups
//! and whether partials are enabled:
//!
//! ```yaml
//! version: 1
//! partials:
//!   enabled: true
//!   path: partials
//! groups:
//!   common:
//!     path: common
//!     enabled: true
//!     prompts:
//!       - api-design.yaml
//! ```
//!
//! Groups keep the order they have in the file.

use crate::types::FieldError;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the registry at the repository root.
pub const REGISTRY_FILE_NAME: &str = "registry.yaml";

/// A validated registry.
#[derive(Debug, Clone, Serialize)]
pub struct Registry {
    pub version: u64,

    /// Free-form values shared by all prompts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub globals: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub partials: Option<PartialsConfig>,

    pub groups: Vec<Group>,
}

/// Partials support settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialsConfig {
    #[serde(default)]
    pub enabled: bool,

    /// Partials directory relative to the repository root
    #[serde(default = "default_partials_path")]
    pub path: String,
}

fn default_partials_path() -> String {
    "partials".to_string()
}

/// A group of prompt files sharing a directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    pub name: String,

    /// Directory relative to the repository root
    pub path: String,

    pub enabled: bool,

    /// Prompt file names inside `path`, in registry order
    pub prompts: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawGroup {
    path: String,
    #[serde(default = "default_enabled")]
    enabled: bool,
    prompts: Vec<String>,
}

fn default_enabled() -> bool {
    true
}

/// Why a registry could not be loaded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Registry file not found: {0:?}")]
    NotFound(PathBuf),

    #[error("Registry is invalid ({} error(s))", .0.len())]
    Invalid(Vec<FieldError>),
}

impl Registry {
    /// Absolute partials directory, if partials are enabled.
    pub fn partials_root(&self, repo_root: &Path) -> Option<PathBuf> {
        self.partials
            .as_ref()
            .filter(|p| p.enabled)
            .map(|p| repo_root.join(&p.path))
    }

    pub fn partials_enabled(&self) -> bool {
        self.partials.as_ref().is_some_and(|p| p.enabled)
    }

    /// Groups marked enabled, in registry order.
    pub fn enabled_groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter().filter(|g| g.enabled)
    }

    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.name == name)
    }
}

/// Load `registry_path` and validate it against the repository at `repo_root`.
///
/// All shape problems are collected before returning, so one run reports
/// every broken group. Group directories must exist under `repo_root`,
/// whether or not the group is enabled.
pub fn validate_registry(registry_path: &Path, repo_root: &Path) -> Result<Registry, RegistryError> {
    tracing::debug!("Validating registry: {:?}", registry_path);

    if !registry_path.is_file() {
        return Err(RegistryError::NotFound(registry_path.to_path_buf()));
    }

    let contents = std::fs::read_to_string(registry_path).map_err(|e| {
        RegistryError::Invalid(vec![FieldError::new(
            &[],
            format!("Failed to read registry: {}", e),
            "file_unreadable",
        )])
    })?;

    let root: Value = serde_yaml::from_str(&contents).map_err(|e| {
        RegistryError::Invalid(vec![FieldError::new(
            &[],
            format!("Failed to parse registry YAML: {}", e),
            "invalid_yaml",
        )])
    })?;

    let Value::Mapping(root) = root else {
        return Err(RegistryError::Invalid(vec![FieldError::new(
            &[],
            "Registry must be a mapping",
            "invalid_type",
        )]));
    };

    let mut errors = Vec::new();

    let version = parse_version(&root, &mut errors);
    let partials = parse_partials(&root, &mut errors);
    let groups = parse_groups(&root, repo_root, &mut errors);

    if !errors.is_empty() {
        return Err(RegistryError::Invalid(errors));
    }

    let registry = Registry {
        version: version.unwrap_or_default(),
        globals: root.get("globals").cloned(),
        partials,
        groups,
    };

    tracing::debug!(
        "Loaded registry v{} with {} group(s)",
        registry.version,
        registry.groups.len()
    );
    Ok(registry)
}

fn parse_version(root: &Mapping, errors: &mut Vec<FieldError>) -> Option<u64> {
    match root.get("version") {
        None => {
            errors.push(FieldError::new(&["version"], "Missing required field 'version'", "required"));
            None
        }
        Some(value) => match value.as_u64() {
            Some(v) if v >= 1 => Some(v),
            _ => {
                errors.push(FieldError::new(
                    &["version"],
                    "Version must be a positive integer",
                    "invalid_type",
                ));
                None
            }
        },
    }
}

fn parse_partials(root: &Mapping, errors: &mut Vec<FieldError>) -> Option<PartialsConfig> {
    let value = root.get("partials")?;
    match serde_yaml::from_value::<PartialsConfig>(value.clone()) {
        Ok(config) => Some(config),
        Err(e) => {
            errors.push(FieldError::new(&["partials"], e.to_string(), "invalid_type"));
            None
        }
    }
}

fn parse_groups(root: &Mapping, repo_root: &Path, errors: &mut Vec<FieldError>) -> Vec<Group> {
    let groups = match root.get("groups") {
        None => {
            errors.push(FieldError::new(&["groups"], "Missing required field 'groups'", "required"));
            return Vec::new();
        }
        Some(Value::Mapping(groups)) => groups,
        Some(_) => {
            errors.push(FieldError::new(&["groups"], "Groups must be a mapping", "invalid_type"));
            return Vec::new();
        }
    };

    let mut parsed = Vec::with_capacity(groups.len());

    for (key, value) in groups {
        let Some(name) = key.as_str() else {
            errors.push(FieldError::new(&["groups"], "Group names must be strings", "invalid_type"));
            continue;
        };

        let raw = match serde_yaml::from_value::<RawGroup>(value.clone()) {
            Ok(raw) => raw,
            Err(e) => {
                errors.push(FieldError::new(&["groups", name], e.to_string(), "invalid_group"));
                continue;
            }
        };

        if !repo_root.join(&raw.path).is_dir() {
            errors.push(FieldError::new(
                &["groups", name, "path"],
                format!("Group directory not found: {}", raw.path),
                "directory_not_found",
            ));
            continue;
        }

        parsed.push(Group {
            name: name.to_string(),
            path: raw.path,
            enabled: raw.enabled,
            prompts: raw.prompts,
        });
    }

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const VALID_REGISTRY: &str = r#"
version: 1
globals:
  api_version: v1
partials:
  enabled: true
  path: partials
groups:
  laravel:
    path: laravel
    enabled: true
    prompts:
      - laravel-api-implementation.yaml
  common:
    path: common
    enabled: false
    prompts:
      - api-design.yaml
      - code-review.yaml
"#;

    fn repo(registry: &str, dirs: &[&str]) -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(REGISTRY_FILE_NAME), registry).unwrap();
        for dir in dirs {
            fs::create_dir_all(temp.path().join(dir)).unwrap();
        }
        temp
    }

    fn load(temp: &TempDir) -> Result<Registry, RegistryError> {
        validate_registry(&temp.path().join(REGISTRY_FILE_NAME), temp.path())
    }

    fn invalid_paths(err: RegistryError) -> Vec<String> {
        match err {
            RegistryError::Invalid(errors) => errors.iter().map(|e| e.display_path()).collect(),
            other => panic!("expected invalid registry, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_registry() {
        let temp = repo(VALID_REGISTRY, &["common", "laravel"]);
        let registry = load(&temp).unwrap();

        assert_eq!(registry.version, 1);
        assert!(registry.globals.is_some());
        assert!(registry.partials_enabled());
        assert_eq!(
            registry.partials_root(temp.path()),
            Some(temp.path().join("partials"))
        );

        // File order, not alphabetical
        let names: Vec<&str> = registry.groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["laravel", "common"]);

        let enabled: Vec<&str> = registry.enabled_groups().map(|g| g.name.as_str()).collect();
        assert_eq!(enabled, vec!["laravel"]);
        assert_eq!(registry.group("common").unwrap().prompts.len(), 2);
    }

    #[test]
    fn test_missing_registry() {
        let temp = TempDir::new().unwrap();
        assert!(matches!(load(&temp), Err(RegistryError::NotFound(_))));
    }

    #[test]
    fn test_missing_prompts_field() {
        let temp = repo(
            "version: 1\ngroups:\n  common:\n    path: common\n    enabled: true\n",
            &["common"],
        );
        assert_eq!(invalid_paths(load(&temp).unwrap_err()), vec!["groups.common"]);
    }

    #[test]
    fn test_missing_version_and_groups() {
        let temp = repo("globals: {}\n", &[]);
        assert_eq!(
            invalid_paths(load(&temp).unwrap_err()),
            vec!["version", "groups"]
        );
    }

    #[test]
    fn test_bad_version() {
        let temp = repo("version: zero\ngroups: {}\n", &[]);
        assert_eq!(invalid_paths(load(&temp).unwrap_err()), vec!["version"]);
    }

    #[test]
    fn test_missing_group_directory() {
        let temp = repo(VALID_REGISTRY, &["laravel"]);
        assert_eq!(
            invalid_paths(load(&temp).unwrap_err()),
            vec!["groups.common.path"]
        );
    }

    #[test]
    fn test_invalid_yaml() {
        let temp = repo("version: 1\ngroups:\n  common: [\n", &[]);
        assert_eq!(invalid_paths(load(&temp).unwrap_err()), vec!["<root>"]);
    }

    #[test]
    fn test_partials_defaults() {
        let temp = repo(
            "version: 1\npartials:\n  enabled: true\ngroups: {}\n",
            &[],
        );
        let registry = load(&temp).unwrap();
        assert_eq!(registry.partials.unwrap().path, "partials");
    }

    #[test]
    fn test_partials_disabled() {
        let temp = repo(
            "version: 1\npartials:\n  enabled: false\n  path: partials\ngroups: {}\n",
            &[],
        );
        let registry = load(&temp).unwrap();
        assert!(!registry.partials_enabled());
        assert_eq!(registry.partials_root(temp.path()), None);
    }

    #[test]
    fn test_group_enabled_by_default() {
        let temp = repo(
            "version: 1\ngroups:\n  common:\n    path: common\n    prompts: []\n",
            &["common"],
        );
        assert!(load(&temp).unwrap().groups[0].enabled);
    }
}
