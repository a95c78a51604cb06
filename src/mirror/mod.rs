//! # Repository Mirrors
//!
//! A mirror is a local working copy of a remote repository kept at a fixed
//! location under the hook's root directory:
//!
//! - `<root>/sources/<owner>/<repo>` - the source mirror, pinned to the
//!   configured branch and read through an anonymous URL,
//! - `<root>/docs/<owner>/<repo>` - the docs mirror, holding the publishing
//!   branch and written through an authenticated URL.
//!
//! Mirrors are created on the first run for a repository and updated in
//! place on every later run. They are never deleted. Two concurrent runs for
//! the same repository would share these directories, so callers must not
//! start a run for a repository while another one is in progress.

pub mod docs;
pub mod source;

use crate::defaults;
use crate::error::Result;
use crate::trigger::RepositoryIdentity;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Computes mirror locations below a root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorLayout {
    root: PathBuf,
}

impl MirrorLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn source_path(&self, identity: &RepositoryIdentity) -> PathBuf {
        self.root
            .join("sources")
            .join(identity.owner())
            .join(identity.name())
    }

    pub fn docs_path(&self, identity: &RepositoryIdentity) -> PathBuf {
        self.root
            .join("docs")
            .join(identity.owner())
            .join(identity.name())
    }

    /// Creates both mirror directories if they are missing.
    pub fn prepare(&self, identity: &RepositoryIdentity) -> Result<MirrorPaths> {
        let paths = MirrorPaths {
            source: self.source_path(identity),
            docs: self.docs_path(identity),
        };

        for dir in [&paths.source, &paths.docs] {
            if !dir.exists() {
                debug!("Init directory {}", dir.display());
                fs::create_dir_all(dir)?;
            }
        }

        Ok(paths)
    }
}

/// The two mirror directories of one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorPaths {
    pub source: PathBuf,
    pub docs: PathBuf,
}

/// Returns true if `path` already holds a git working copy.
pub fn has_git_metadata(path: &Path) -> bool {
    path.join(".git").exists()
}

/// URL templates for the two remotes.
///
/// Templates may contain `{owner}`, `{repo}` and `{repository}` (the full
/// `owner/repo` key).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteUrls {
    pub source: String,
    pub publish: String,
}

impl Default for RemoteUrls {
    fn default() -> Self {
        Self {
            source: defaults::SOURCE_URL_TEMPLATE.to_string(),
            publish: defaults::PUBLISH_URL_TEMPLATE.to_string(),
        }
    }
}

impl RemoteUrls {
    /// Read-only URL the source mirror is fetched from.
    pub fn source_url(&self, identity: &RepositoryIdentity) -> String {
        expand_template(&self.source, identity)
    }

    /// Authenticated URL the docs mirror fetches from and pushes to.
    pub fn publish_url(&self, identity: &RepositoryIdentity) -> String {
        expand_template(&self.publish, identity)
    }
}

fn expand_template(template: &str, identity: &RepositoryIdentity) -> String {
    template
        .replace("{repository}", &identity.key())
        .replace("{owner}", identity.owner())
        .replace("{repo}", identity.name())
}
