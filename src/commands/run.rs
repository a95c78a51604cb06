//! Run command implementation
//!
//! The run command executes the documentation pipeline for one push:
//! 1. Resolve the repository's effective settings
//! 2. Skip unless the configured branch was pushed
//! 3. Sync the source mirror
//! 4. Prepare the docs mirror and publishing branch
//! 5. Generate documentation
//! 6. Commit if changed, then push
//!
//! The push is described either by a push event payload file (`--payload`)
//! or by explicit flags.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::CatalogArgs;
use docgen_hook::defaults;
use docgen_hook::generator::SystemGenerator;
use docgen_hook::mirror::RemoteUrls;
use docgen_hook::pipeline::{Hook, HookOptions, RunOutcome};
use docgen_hook::trigger::{PushEvent, RepositoryIdentity, Trigger};

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Push event payload (JSON) describing the push
    #[arg(long, value_name = "FILE", conflicts_with_all = ["owner", "repo", "branch"])]
    pub payload: Option<PathBuf>,

    /// Repository owner
    #[arg(long, required_unless_present = "payload")]
    pub owner: Option<String>,

    /// Repository name
    #[arg(long, required_unless_present = "payload")]
    pub repo: Option<String>,

    /// Branch that received the push
    #[arg(long, required_unless_present = "payload")]
    pub branch: Option<String>,

    /// Default branch of the repository [default: the pushed branch]
    #[arg(long, value_name = "BRANCH")]
    pub default_branch: Option<String>,

    /// Commit message for the documentation commit
    /// [default: Update documentation from <BRANCH>]
    #[arg(short, long, default_value = "", hide_default_value = true)]
    pub message: String,

    /// URL template of the read-only source remote
    #[arg(long, value_name = "TEMPLATE", default_value = defaults::SOURCE_URL_TEMPLATE)]
    pub source_url: String,

    /// URL template of the authenticated publishing remote
    #[arg(long, value_name = "TEMPLATE", default_value = defaults::PUBLISH_URL_TEMPLATE)]
    pub publish_url: String,

    /// Branch the documentation is published to
    #[arg(long, value_name = "BRANCH", default_value = defaults::PUBLISHING_BRANCH)]
    pub publishing_branch: String,

    /// Documentation generator program
    #[arg(long, value_name = "PROGRAM", env = "DOCGEN_HOOK_GENERATOR", default_value = defaults::GENERATOR)]
    pub generator: String,

    /// Argument placed before the generated ones (repeatable)
    #[arg(long = "generator-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub generator_args: Vec<String>,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl RunArgs {
    fn trigger(&self) -> Result<(RepositoryIdentity, Trigger)> {
        if let Some(payload) = &self.payload {
            return Ok(PushEvent::from_file(payload)?.into_parts()?);
        }

        // clap guarantees these are present without --payload
        let (Some(owner), Some(repo), Some(branch)) = (&self.owner, &self.repo, &self.branch) else {
            anyhow::bail!("--owner, --repo and --branch are required without --payload");
        };

        let default_branch = self.default_branch.as_deref().unwrap_or(branch);
        let identity = RepositoryIdentity::new(owner.as_str(), repo.as_str())?;
        let trigger = Trigger::new(branch.as_str(), default_branch, self.message.as_str())?;
        Ok((identity, trigger))
    }

    fn options(&self) -> HookOptions {
        HookOptions {
            root: self.catalog.root(),
            remotes: RemoteUrls {
                source: self.source_url.clone(),
                publish: self.publish_url.clone(),
            },
            publishing_branch: self.publishing_branch.clone(),
        }
    }
}

/// Execute the run command
pub fn execute(args: RunArgs) -> Result<()> {
    let (identity, trigger) = args.trigger()?;
    let catalog = args.catalog.load()?;

    let generator = SystemGenerator::new(args.generator.clone(), args.generator_args.clone());
    let hook = Hook::new(args.options(), generator);

    let outcome = hook.run(&catalog, &identity, &trigger)?;

    if !args.quiet {
        match outcome {
            RunOutcome::Published { committed: true, .. } => {
                println!(
                    "Published documentation for {} to {}",
                    identity, args.publishing_branch
                );
            }
            RunOutcome::Published {
                committed: false, ..
            } => {
                println!(
                    "Documentation for {} unchanged, pushed {}",
                    identity, args.publishing_branch
                );
            }
            RunOutcome::Skipped { expected, pushed } => {
                println!(
                    "Skipped {}: pushed branch {} is not {}",
                    identity, pushed, expected
                );
            }
        }
    }

    Ok(())
}
