//! Commit and push of generated documentation.
//!
//! A commit is only made when `git status -s` reports changes in the docs
//! mirror. The push runs every time, with or without a new commit, so a
//! remote branch left behind by an earlier failed push catches up on the
//! next run.

use crate::error::Result;
use crate::git::{GitCommand, GitOperations};
use log::debug;
use std::path::Path;

/// Commits pending changes in `docs` with `message` and pushes `branch`.
///
/// Returns whether a commit was made.
pub fn publish(git: &dyn GitOperations, docs: &Path, branch: &str, message: &str) -> Result<bool> {
    debug!("Push docs {}", docs.display());

    let status = git.run(&GitCommand::status_short(docs))?;
    let changed = !status.stdout.trim().is_empty();

    if changed {
        git.run(&GitCommand::add_all(docs))?;
        git.run(&GitCommand::commit(docs, message))?;
    } else {
        debug!("No documentation changes to commit");
    }

    git.run(&GitCommand::push(docs, branch))?;

    Ok(changed)
}
