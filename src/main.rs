//! # docgen-hook CLI
//!
//! This is the binary entry point for the `docgen-hook` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Setting up logging.
//! - Executing the appropriate command and reporting fatal errors.
//!
//! The core logic lives in the `docgen_hook` library crate, so the binary is a
//! thin wrapper that can be replaced by any other trigger source.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
