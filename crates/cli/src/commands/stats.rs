//! Stats command handler.
//!
//! Shows repository statistics.

use crate::output::{to_json, OutputFormat};
use clap::Args;
use promptkit_core::{config::AppConfig, AppResult};
use promptkit_partials::list_partials;
use promptkit_prompt::Registry;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Show repository statistics
#[derive(Args, Debug)]
pub struct StatsCommand {
    /// Repository root path (default: configured repository)
    pub path: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Debug, Serialize)]
struct RepoStats {
    repository: RepositoryStats,
    groups: GroupStats,
    prompts: PromptStats,
    partials: PartialStats,
}

#[derive(Debug, Serialize)]
struct RepositoryStats {
    path: String,
    version: u64,
}

#[derive(Debug, Serialize)]
struct GroupStats {
    total: usize,
    enabled: usize,
    disabled: usize,
}

#[derive(Debug, Serialize)]
struct PromptStats {
    total: usize,
    enabled: usize,
    disabled: usize,
}

#[derive(Debug, Serialize)]
struct PartialStats {
    enabled: bool,
    path: String,
    count: usize,
}

impl StatsCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<ExitCode> {
        let Some((repo_root, registry)) = super::open_repo(self.path.as_ref(), config) else {
            return Ok(ExitCode::FAILURE);
        };
        tracing::info!("Executing stats command");

        let stats = collect_stats(&repo_root, &registry)?;

        if self.format.is_json() {
            println!("{}", to_json(&stats)?);
        } else {
            println!("\nRepository Statistics:");
            println!("  Path: {}", stats.repository.path);
            println!("  Version: {}", stats.repository.version);
            println!("\nGroups:");
            println!("  Total: {}", stats.groups.total);
            println!("  Enabled: {}", stats.groups.enabled);
            println!("  Disabled: {}", stats.groups.disabled);
            println!("\nPrompts:");
            println!("  Total: {}", stats.prompts.total);
            println!("  Enabled: {}", stats.prompts.enabled);
            println!("  Disabled: {}", stats.prompts.disabled);
            println!("\nPartials:");
            println!("  Enabled: {}", if stats.partials.enabled { "Yes" } else { "No" });
            if stats.partials.enabled {
                println!("  Path: {}", stats.partials.path);
                println!("  Count: {}", stats.partials.count);
            }
        }

        Ok(ExitCode::SUCCESS)
    }
}

fn collect_stats(repo_root: &Path, registry: &Registry) -> AppResult<RepoStats> {
    let total_groups = registry.groups.len();
    let enabled_groups = registry.enabled_groups().count();

    let total_prompts: usize = registry.groups.iter().map(|g| g.prompts.len()).sum();
    let enabled_prompts: usize = registry.enabled_groups().map(|g| g.prompts.len()).sum();

    let partials_path = registry
        .partials
        .as_ref()
        .map(|p| p.path.clone())
        .unwrap_or_else(|| "partials".to_string());
    let partial_count = match registry.partials_root(repo_root) {
        Some(root) => list_partials(&root)?.len(),
        None => 0,
    };

    Ok(RepoStats {
        repository: RepositoryStats {
            path: repo_root.display().to_string(),
            version: registry.version,
        },
        groups: GroupStats {
            total: total_groups,
            enabled: enabled_groups,
            disabled: total_groups - enabled_groups,
        },
        prompts: PromptStats {
            total: total_prompts,
            enabled: enabled_prompts,
            disabled: total_prompts - enabled_prompts,
        },
        partials: PartialStats {
            enabled: registry.partials_enabled(),
            path: partials_path,
            count: partial_count,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptkit_validator::load_registry;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_collect_stats() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::write(
            root.join("registry.yaml"),
            "version: 2\npartials:\n  enabled: true\ngroups:\n  a:\n    path: a\n    prompts: [x.yaml, y.yaml]\n  b:\n    path: b\n    enabled: false\n    prompts: [z.yaml]\n",
        )
        .unwrap();
        fs::create_dir_all(root.join("a")).unwrap();
        fs::create_dir_all(root.join("b")).unwrap();
        fs::create_dir_all(root.join("partials/common")).unwrap();
        fs::write(root.join("partials/one.hbs"), "").unwrap();
        fs::write(root.join("partials/common/two.hbs"), "").unwrap();

        let registry = load_registry(root).unwrap();
        let stats = collect_stats(root, &registry).unwrap();

        assert_eq!(stats.repository.version, 2);
        assert_eq!((stats.groups.total, stats.groups.enabled, stats.groups.disabled), (2, 1, 1));
        assert_eq!((stats.prompts.total, stats.prompts.enabled, stats.prompts.disabled), (3, 2, 1));
        assert!(stats.partials.enabled);
        assert_eq!(stats.partials.path, "partials");
        assert_eq!(stats.partials.count, 2);
    }
}
