//! # Hook Pipeline
//!
//! This module coordinates one hook run from trigger to published
//! documentation:
//!
//! 1. Resolve the effective settings for the repository.
//! 2. Skip the run if the pushed branch is not the configured branch.
//! 3. Bring the source mirror to the tip of the configured branch.
//! 4. Prepare the docs mirror with the publishing branch checked out.
//! 5. Run the documentation generator from the source into the docs mirror.
//! 6. Commit changed documentation and push the publishing branch.
//!
//! Steps run strictly in order. The first failure ends the run and is
//! returned to the caller; mirrors are left as the last successful step
//! left them.

use crate::config::SettingsCatalog;
use crate::defaults;
use crate::error::Result;
use crate::generator::{DocGenerator, GeneratorInvocation, SystemGenerator};
use crate::git::{GitOperations, SystemGit};
use crate::mirror::docs::{self, PublishingBranchState};
use crate::mirror::source::{self, SourceSync};
use crate::mirror::{MirrorLayout, MirrorPaths, RemoteUrls};
use crate::publish;
use crate::settings::{self, EffectiveSettings};
use crate::trigger::{RepositoryIdentity, Trigger};
use log::{debug, info};
use std::path::PathBuf;

/// Settings of the hook itself, shared by every run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookOptions {
    /// Directory holding the `sources/` and `docs/` mirrors.
    pub root: PathBuf,
    pub remotes: RemoteUrls,
    pub publishing_branch: String,
}

impl HookOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            remotes: RemoteUrls::default(),
            publishing_branch: defaults::PUBLISHING_BRANCH.to_string(),
        }
    }
}

/// Everything one run works with, fixed once the run has passed the
/// branch check.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub identity: RepositoryIdentity,
    pub trigger: Trigger,
    pub settings: EffectiveSettings,
    pub paths: MirrorPaths,
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Documentation was generated and the publishing branch pushed.
    Published {
        /// Whether generation changed anything, and a commit was made.
        committed: bool,
        source: SourceSync,
        branch_state: PublishingBranchState,
    },
    /// The pushed branch is not the configured one; nothing was touched.
    Skipped { expected: String, pushed: String },
}

/// Runs the pipeline with a given git and generator implementation.
pub struct Hook {
    git: Box<dyn GitOperations>,
    generator: Box<dyn DocGenerator>,
    layout: MirrorLayout,
    options: HookOptions,
}

impl Hook {
    /// Creates a hook using the system `git` and the given generator.
    pub fn new(options: HookOptions, generator: SystemGenerator) -> Self {
        Self::with_operations(Box::new(SystemGit), Box::new(generator), options)
    }

    /// Creates a hook with custom `GitOperations` and `DocGenerator`
    /// implementations.
    pub fn with_operations(
        git: Box<dyn GitOperations>,
        generator: Box<dyn DocGenerator>,
        options: HookOptions,
    ) -> Self {
        Self {
            git,
            generator,
            layout: MirrorLayout::new(options.root.clone()),
            options,
        }
    }

    /// Executes one run for `identity` triggered by `trigger`.
    pub fn run(
        &self,
        catalog: &SettingsCatalog,
        identity: &RepositoryIdentity,
        trigger: &Trigger,
    ) -> Result<RunOutcome> {
        info!(
            "Run documentation for {}, branch {}: {}",
            identity,
            trigger.branch(),
            trigger.message()
        );

        let settings = settings::resolve(identity, catalog, trigger.default_branch())?;

        if settings.branch() != trigger.branch() {
            debug!(
                "Skip branch {}, expect branch {}",
                trigger.branch(),
                settings.branch()
            );
            return Ok(RunOutcome::Skipped {
                expected: settings.branch().to_string(),
                pushed: trigger.branch().to_string(),
            });
        }

        self.generator.ensure_installed()?;

        let context = RunContext {
            identity: identity.clone(),
            trigger: trigger.clone(),
            settings,
            paths: self.layout.prepare(identity)?,
        };

        self.execute(&context)
    }

    fn execute(&self, context: &RunContext) -> Result<RunOutcome> {
        let remotes = &self.options.remotes;
        let branch = &self.options.publishing_branch;

        let source = source::sync(
            self.git.as_ref(),
            &context.paths.source,
            &remotes.source_url(&context.identity),
            context.settings.branch(),
        )?;

        let branch_state = docs::prepare(
            self.git.as_ref(),
            &context.paths.docs,
            &remotes.publish_url(&context.identity),
            branch,
        )?;

        let invocation = GeneratorInvocation::from_settings(
            &context.settings,
            &context.paths.source,
            &context.paths.docs,
        );
        self.generator.generate(&invocation)?;

        let committed = publish::publish(
            self.git.as_ref(),
            &context.paths.docs,
            branch,
            context.trigger.message(),
        )?;

        info!(
            "Published documentation for {} to {}{}",
            context.identity,
            branch,
            if committed { "" } else { " (no changes)" }
        );

        Ok(RunOutcome::Published {
            committed,
            source,
            branch_state,
        })
    }
}
