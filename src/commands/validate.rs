//! # Validate Command Implementation
//!
//! This module implements the `validate` subcommand, which checks the
//! settings catalog without running anything.
//!
//! ## Functionality
//!
//! - **Parsing**: the catalog must be a YAML mapping of entries to option
//!   maps (or null).
//! - **Keys**: every key must be `defaults`, `owner/*` or `owner/repo`.
//! - **Options**: option names the generator does not recognize are reported
//!   as warnings, and fail validation with `--strict`.

use anyhow::Result;
use clap::Args;

use super::CatalogArgs;
use docgen_hook::config::{SettingsCatalog, DEFAULTS_KEY};
use docgen_hook::generator::RECOGNIZED_OPTIONS;
use docgen_hook::settings::BRANCH;

/// Validate the settings catalog
#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Use strict validation (fail on warnings).
    #[arg(long)]
    pub strict: bool,
}

/// What a catalog key refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
enum EntryKind {
    Defaults,
    Wildcard,
    Repository,
    Invalid,
}

fn entry_kind(key: &str) -> EntryKind {
    if key == DEFAULTS_KEY {
        return EntryKind::Defaults;
    }
    match key.split_once('/') {
        Some((owner, "*")) if !owner.is_empty() => EntryKind::Wildcard,
        Some((owner, repo))
            if !owner.is_empty() && !repo.is_empty() && !repo.contains(|c: char| c == '/' || c == '*') =>
        {
            EntryKind::Repository
        }
        _ => EntryKind::Invalid,
    }
}

/// Findings of a catalog check.
#[derive(Debug, Default)]
struct Report {
    wildcards: usize,
    repositories: usize,
    has_defaults: bool,
    errors: Vec<String>,
    warnings: Vec<String>,
}

fn check(catalog: &SettingsCatalog) -> Report {
    let mut report = Report::default();

    for key in catalog.keys() {
        match entry_kind(key) {
            EntryKind::Defaults => report.has_defaults = true,
            EntryKind::Wildcard => report.wildcards += 1,
            EntryKind::Repository => report.repositories += 1,
            EntryKind::Invalid => {
                report.errors.push(format!(
                    "'{}' is not 'defaults', 'owner/*' or 'owner/repo'",
                    key
                ));
                continue;
            }
        }

        for name in catalog.entry(key).unwrap_or_default().keys() {
            if name != BRANCH && !RECOGNIZED_OPTIONS.contains(&name.as_str()) {
                report
                    .warnings
                    .push(format!("{}: unknown option '{}'", key, name));
            }
        }
    }

    report
}

/// Execute the `validate` command.
pub fn execute(args: ValidateArgs) -> Result<()> {
    let path = args.catalog.catalog_path();
    let catalog = SettingsCatalog::from_file(&path)?;
    let report = check(&catalog);

    println!("Catalog: {}", path.display());
    println!(
        "  defaults: {}",
        if report.has_defaults { "yes" } else { "no" }
    );
    println!("  owner wildcards: {}", report.wildcards);
    println!("  repositories: {}", report.repositories);

    for warning in &report.warnings {
        println!("warning: {}", warning);
    }
    for error in &report.errors {
        println!("error: {}", error);
    }

    if !report.errors.is_empty() {
        anyhow::bail!("Catalog has {} invalid entries", report.errors.len());
    }
    if args.strict && !report.warnings.is_empty() {
        anyhow::bail!(
            "Catalog has {} warnings (strict mode)",
            report.warnings.len()
        );
    }

    println!("Catalog is valid");
    Ok(())
}
