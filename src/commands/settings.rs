//! # Settings Command Implementation
//!
//! Prints the effective settings a run for the given repository would use,
//! without touching any mirror. Useful to check how `defaults`, wildcard and
//! exact catalog entries combine.

use anyhow::Result;
use clap::{Args, ValueEnum};

use super::CatalogArgs;
use docgen_hook::generator::RECOGNIZED_OPTIONS;
use docgen_hook::settings::{self, EffectiveSettings};
use docgen_hook::trigger::RepositoryIdentity;

/// Output format for the settings command
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Yaml,
    Json,
}

/// Show the effective settings of a repository
#[derive(Args, Debug)]
pub struct SettingsArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Repository owner
    #[arg(long)]
    pub owner: String,

    /// Repository name
    #[arg(long)]
    pub repo: String,

    /// Default branch used when no branch is configured
    #[arg(long, value_name = "BRANCH", default_value = "main")]
    pub default_branch: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Yaml)]
    pub format: Format,
}

/// Execute the settings command.
pub fn execute(args: SettingsArgs) -> Result<()> {
    let catalog = args.catalog.load()?;
    let identity = RepositoryIdentity::new(args.owner.as_str(), args.repo.as_str())?;
    let settings = settings::resolve(&identity, &catalog, &args.default_branch)?;

    print!("{}", render(&settings, args.format)?);
    Ok(())
}

fn render(settings: &EffectiveSettings, format: Format) -> Result<String> {
    let rendered = match format {
        Format::Yaml => serde_yaml::to_string(settings.values())?,
        Format::Json => serde_json::to_string_pretty(settings.values())? + "\n",
    };

    let ignored: Vec<&str> = settings
        .values()
        .keys()
        .map(String::as_str)
        .filter(|name| *name != settings::BRANCH && !RECOGNIZED_OPTIONS.contains(name))
        .collect();
    if !ignored.is_empty() {
        log::warn!("Options not passed to the generator: {}", ignored.join(", "));
    }

    Ok(rendered)
}
