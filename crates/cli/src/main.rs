//! promptkit CLI
//!
//! Main entry point for the promptkit command-line tool.
//! Validates prompt repositories: registry, prompt files and partials.

mod commands;
mod output;

use clap::{Parser, Subcommand};
use commands::{CheckCommand, ListCommand, StatsCommand, ValidateCommand};
use promptkit_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;
use std::process::ExitCode;

/// promptkit - validate prompt repositories and their partials
#[derive(Parser, Debug)]
#[command(name = "promptkit")]
#[command(about = "Validate prompt repositories and Handlebars partials", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, env = "PROMPTKIT_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate prompt repository components
    Validate(ValidateCommand),

    /// Check prompt repository components
    Check(CheckCommand),

    /// List prompts and groups
    List(ListCommand),

    /// Show repository statistics
    Stats(StatsCommand),
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Validate(_) => "validate",
            Commands::Check(_) => "check",
            Commands::List(_) => "list",
            Commands::Stats(_) => "stats",
        }
    }
}

fn main() -> ExitCode {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}", output::error(&e.to_string()));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> AppResult<ExitCode> {
    // Load base configuration from the config file and environment
    let config = AppConfig::load_from(cli.config.clone())?;

    // Apply CLI overrides
    let config = config.with_overrides(cli.config, cli.log_level, cli.verbose, cli.no_color);
    config.validate()?;

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;
    if config.no_color {
        colored::control::set_override(false);
    }

    tracing::info!("promptkit starting");
    tracing::debug!("Repository root: {:?}", config.repo_root);
    tracing::debug!("Minimum severity: {}", config.min_severity);

    let _span = tracing::info_span!("command", name = cli.command.name()).entered();

    // Route to command handlers
    let result = match &cli.command {
        Commands::Validate(cmd) => cmd.execute(&config),
        Commands::Check(cmd) => cmd.execute(&config),
        Commands::List(cmd) => cmd.execute(&config),
        Commands::Stats(cmd) => cmd.execute(&config),
    };

    match &result {
        Ok(_) => tracing::info!("Command completed"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
