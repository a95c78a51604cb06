//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `docgen-hook` command-line tool. Each subcommand is defined in its own
//! file.
//!
//! ## Structure
//!
//! Each command module contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and performs the
//!   command's logic by calling into the `docgen_hook` library.
//!
//! Options locating the working root and the settings catalog are shared
//! through [`CatalogArgs`].

pub mod run;
pub mod settings;
pub mod validate;

use clap::Args;
use docgen_hook::config::SettingsCatalog;
use docgen_hook::defaults;
use std::path::PathBuf;

/// Options locating the working root and the settings catalog.
#[derive(Args, Debug, Clone, Default)]
pub struct CatalogArgs {
    /// Working root holding the mirrors and, by default, the catalog.
    ///
    /// If not provided, it defaults to the platform data directory
    /// (e.g., `~/.local/share/docgen-hook` on Linux).
    #[arg(long, value_name = "DIR", env = "DOCGEN_HOOK_ROOT")]
    pub root: Option<PathBuf>,

    /// Path to the settings catalog [default: <ROOT>/config/repositories.yml]
    #[arg(short, long, value_name = "FILE", env = "DOCGEN_HOOK_CONFIG")]
    pub config: Option<PathBuf>,
}

impl CatalogArgs {
    pub fn root(&self) -> PathBuf {
        self.root.clone().unwrap_or_else(defaults::default_root)
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| defaults::catalog_path(&self.root()))
    }

    pub fn load(&self) -> docgen_hook::error::Result<SettingsCatalog> {
        SettingsCatalog::from_file(self.catalog_path())
    }
}
