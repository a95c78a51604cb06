//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// docgen-hook - Regenerate API documentation on push and publish it
#[derive(Parser, Debug)]
#[command(name = "docgen-hook")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the documentation pipeline for a push
    Run(commands::run::RunArgs),

    /// Show the effective settings of a repository
    Settings(commands::settings::SettingsArgs),

    /// Validate the settings catalog
    Validate(commands::validate::ValidateArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        // Errors are reported once, by `main` returning them.
        match self.command {
            Commands::Run(args) => commands::run::execute(args),
            Commands::Settings(args) => commands::settings::execute(args),
            Commands::Validate(args) => commands::validate::execute(args),
        }
    }
}

/// Initializes `env_logger` from `RUST_LOG`, falling back to `level`.
fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    // A logger may already be installed when embedded in tests.
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp_secs()
        .try_init();
}
