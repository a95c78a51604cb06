//! Source mirror synchronization.
//!
//! Brings the source mirror to the tip of `origin/<branch>`:
//!
//! - no working copy yet: clone the branch directly into the mirror,
//! - existing working copy: repoint `origin` (the upstream URL may have
//!   changed), fetch, and hard-reset to `origin/<branch>`, discarding any
//!   local drift.

use super::has_git_metadata;
use crate::error::Result;
use crate::git::{GitCommand, GitOperations, ORIGIN};
use log::debug;
use std::path::Path;

/// What [`sync`] had to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceSync {
    Cloned,
    Updated,
}

/// Synchronizes the source mirror at `path` with `url` at `branch`.
pub fn sync(git: &dyn GitOperations, path: &Path, url: &str, branch: &str) -> Result<SourceSync> {
    if has_git_metadata(path) {
        debug!("Update sources {}", path.display());

        git.run(&GitCommand::remote_set_url(path, url))?;
        git.run(&GitCommand::fetch(path))?;
        git.run(&GitCommand::reset_hard(path, &format!("{}/{}", ORIGIN, branch)))?;

        Ok(SourceSync::Updated)
    } else {
        debug!("Checkout source {}", url);

        git.run(&GitCommand::clone_branch(url, branch, path))?;

        Ok(SourceSync::Cloned)
    }
}
