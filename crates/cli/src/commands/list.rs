//! List command handler.
//!
//! Lists prompts and groups declared in the registry.

use crate::output::{self, to_json, OutputFormat};
use clap::{Args, Subcommand};
use promptkit_core::{config::AppConfig, AppResult};
use promptkit_prompt::Registry;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

/// List prompt repository components
#[derive(Args, Debug)]
pub struct ListCommand {
    #[command(subcommand)]
    pub action: ListAction,
}

#[derive(Subcommand, Debug)]
pub enum ListAction {
    /// List all prompts
    Prompts(ListPromptsCommand),
    /// List all groups
    Groups(ListGroupsCommand),
}

impl ListCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<ExitCode> {
        match &self.action {
            ListAction::Prompts(cmd) => cmd.execute(config),
            ListAction::Groups(cmd) => cmd.execute(config),
        }
    }
}

/// List all prompts
#[derive(Args, Debug)]
pub struct ListPromptsCommand {
    /// Repository root path (default: configured repository)
    pub path: Option<PathBuf>,

    /// Filter by group name
    #[arg(short, long)]
    pub group: Option<String>,

    /// Show only prompts of enabled groups
    #[arg(long)]
    pub enabled_only: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Debug, Serialize)]
struct PromptEntry<'a> {
    group: &'a str,
    file: &'a str,
    enabled: bool,
}

impl ListPromptsCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<ExitCode> {
        let Some((_, registry)) = super::open_repo(self.path.as_ref(), config) else {
            return Ok(ExitCode::FAILURE);
        };
        tracing::info!("Executing list prompts");

        let prompts = self.collect(&registry);

        if self.format.is_json() {
            let value = serde_json::json!({ "prompts": prompts, "count": prompts.len() });
            println!("{}", to_json(&value)?);
        } else if prompts.is_empty() {
            println!("{}", output::info("No prompts found"));
        } else {
            println!("\nPrompts:");
            for prompt in &prompts {
                let status = if prompt.enabled { "✓" } else { "✗" };
                println!("  {} [{}] {}", status, prompt.group, prompt.file);
            }
        }

        Ok(ExitCode::SUCCESS)
    }

    fn collect<'a>(&self, registry: &'a Registry) -> Vec<PromptEntry<'a>> {
        registry
            .groups
            .iter()
            .filter(|g| self.group.as_deref().map_or(true, |name| g.name == name))
            .filter(|g| !self.enabled_only || g.enabled)
            .flat_map(|g| {
                g.prompts.iter().map(move |file| PromptEntry {
                    group: &g.name,
                    file,
                    enabled: g.enabled,
                })
            })
            .collect()
    }
}

/// List all groups
#[derive(Args, Debug)]
pub struct ListGroupsCommand {
    /// Repository root path (default: configured repository)
    pub path: Option<PathBuf>,

    /// Show only enabled groups
    #[arg(long)]
    pub enabled_only: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Debug, Serialize)]
struct GroupEntry<'a> {
    name: &'a str,
    path: &'a str,
    enabled: bool,
    #[serde(rename = "promptCount")]
    prompt_count: usize,
}

impl ListGroupsCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<ExitCode> {
        let Some((_, registry)) = super::open_repo(self.path.as_ref(), config) else {
            return Ok(ExitCode::FAILURE);
        };
        tracing::info!("Executing list groups");

        let groups: Vec<GroupEntry> = registry
            .groups
            .iter()
            .filter(|g| !self.enabled_only || g.enabled)
            .map(|g| GroupEntry {
                name: &g.name,
                path: &g.path,
                enabled: g.enabled,
                prompt_count: g.prompts.len(),
            })
            .collect();

        if self.format.is_json() {
            let value = serde_json::json!({ "groups": groups, "count": groups.len() });
            println!("{}", to_json(&value)?);
        } else if groups.is_empty() {
            println!("{}", output::info("No groups found"));
        } else {
            println!("\nGroups:");
            for group in &groups {
                let status = if group.enabled { "✓" } else { "✗" };
                println!(
                    "  {} {} ({} prompts) - {}",
                    status, group.name, group.prompt_count, group.path
                );
            }
        }

        Ok(ExitCode::SUCCESS)
    }
}
