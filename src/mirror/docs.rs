//! Docs mirror preparation.
//!
//! Leaves the docs mirror connected to the authenticated remote with the
//! publishing branch checked out, ready to receive generated output.
//!
//! Which way the branch is prepared depends on what already exists:
//!
//! | State             | Action                                              |
//! |-------------------|-----------------------------------------------------|
//! | `RemoteExists`    | `checkout -B` then `reset --hard origin/<branch>`   |
//! | `LocalOnlyExists` | `checkout -B`, keeping local history                |
//! | `NeitherExists`   | `checkout --orphan`, starting an unrelated history  |
//!
//! The remote branch is authoritative whenever it exists. Local history is
//! only kept when there is nothing upstream to converge to, so documentation
//! committed by an earlier run whose push failed is not thrown away.

use super::has_git_metadata;
use crate::error::Result;
use crate::git::{GitCommand, GitOperations, ORIGIN};
use log::debug;
use std::path::Path;

/// Where the publishing branch currently exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishingBranchState {
    /// `origin` has the branch.
    RemoteExists,
    /// Only the local repository has the branch.
    LocalOnlyExists,
    /// The branch exists nowhere yet.
    NeitherExists,
}

impl PublishingBranchState {
    /// Classifies the output of `git branch -a` for `branch`.
    ///
    /// Each line is stripped of the `*` current-branch marker and
    /// surrounding whitespace before being compared.
    pub fn classify(listing: &str, branch: &str) -> Self {
        let remote = format!("remotes/{}/{}", ORIGIN, branch);
        let names: Vec<&str> = listing
            .lines()
            .map(|line| line.trim_start_matches('*').trim())
            .collect();

        if names.contains(&remote.as_str()) {
            PublishingBranchState::RemoteExists
        } else if names.contains(&branch) {
            PublishingBranchState::LocalOnlyExists
        } else {
            PublishingBranchState::NeitherExists
        }
    }
}

/// Prepares the docs mirror at `path` and checks out `branch`.
pub fn prepare(
    git: &dyn GitOperations,
    path: &Path,
    url: &str,
    branch: &str,
) -> Result<PublishingBranchState> {
    if has_git_metadata(path) {
        git.run(&GitCommand::remote_set_url(path, url))?;
    } else {
        git.run(&GitCommand::init(path))?;
        git.run(&GitCommand::remote_add(path, url))?;
    }

    git.run(&GitCommand::fetch(path))?;

    let listing = git.run(&GitCommand::branch_list(path))?;
    let state = PublishingBranchState::classify(&listing.stdout, branch);

    match state {
        PublishingBranchState::RemoteExists => {
            debug!("Update docs {}", url);
            git.run(&GitCommand::checkout_force(path, branch))?;
            git.run(&GitCommand::reset_hard(path, &format!("{}/{}", ORIGIN, branch)))?;
        }
        PublishingBranchState::LocalOnlyExists => {
            debug!("Reuse local docs branch {}", url);
            git.run(&GitCommand::checkout_force(path, branch))?;
        }
        PublishingBranchState::NeitherExists => {
            debug!("Initialise empty docs {}", url);
            git.run(&GitCommand::checkout_orphan(path, branch))?;
        }
    }

    Ok(state)
}
