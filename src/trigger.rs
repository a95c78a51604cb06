//! # Trigger Input
//!
//! A run is triggered by a push to a repository. This module holds the two
//! immutable inputs describing that push:
//!
//! - [`RepositoryIdentity`] - which repository was pushed to,
//! - [`Trigger`] - which branch received the push, the repository's default
//!   branch, and the message to commit the regenerated documentation with.
//!
//! Both can be built directly (from command-line flags, for instance) or
//! extracted from a GitHub-style push event payload with [`PushEvent`].

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::path::Path;

/// Owner and name of a repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryIdentity {
    owner: String,
    name: String,
}

impl RepositoryIdentity {
    /// Creates an identity, rejecting empty parts and parts containing `/`.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        let owner = owner.into();
        let name = name.into();

        for (label, part) in [("owner", &owner), ("repository", &name)] {
            if part.is_empty() || part.contains('/') || part == "." || part == ".." {
                return Err(Error::Trigger {
                    message: format!("invalid {} name '{}'", label, part),
                });
            }
        }

        Ok(Self { owner, name })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The canonical `owner/repo` key.
    pub fn key(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    /// The `owner/*` key matching every repository of this owner.
    pub fn wildcard_key(&self) -> String {
        format!("{}/*", self.owner)
    }
}

impl fmt::Display for RepositoryIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// The push that triggered a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    branch: String,
    default_branch: String,
    message: String,
}

impl Trigger {
    /// Creates a trigger. Both branch names must be non-empty.
    ///
    /// A blank `message` is replaced by `Update documentation from <branch>`,
    /// since git refuses to commit with an empty message.
    pub fn new(
        branch: impl Into<String>,
        default_branch: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<Self> {
        let branch = branch.into();
        let default_branch = default_branch.into();

        if branch.is_empty() {
            return Err(Error::Trigger {
                message: "pushed branch is empty".to_string(),
            });
        }
        if default_branch.is_empty() {
            return Err(Error::Trigger {
                message: "default branch is empty".to_string(),
            });
        }

        let mut message = message.into();
        if message.trim().is_empty() {
            message = format!("Update documentation from {}", branch);
        }

        Ok(Self {
            branch,
            default_branch,
            message,
        })
    }

    /// The branch that received the push.
    pub fn branch(&self) -> &str {
        &self.branch
    }

    /// The repository's default branch, used when no branch is configured.
    pub fn default_branch(&self) -> &str {
        &self.default_branch
    }

    /// The commit message used for the documentation commit.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// The parts of a GitHub push event payload a run needs.
#[derive(Debug, Clone, Deserialize)]
pub struct PushEvent {
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub repository: PushRepository,
    #[serde(default)]
    pub head_commit: Option<PushCommit>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PushRepository {
    pub name: String,
    pub owner: PushOwner,
    #[serde(default)]
    pub master_branch: Option<String>,
    #[serde(default)]
    pub default_branch: Option<String>,
}

/// Push payloads name the owner `name`, other events name it `login`.
#[derive(Debug, Clone, Deserialize)]
pub struct PushOwner {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub login: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PushCommit {
    #[serde(default)]
    pub message: String,
}

impl PushEvent {
    /// Parses a push event from its JSON body.
    pub fn parse(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a push event from a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Extracts the repository and trigger from the payload.
    ///
    /// Only branch pushes (`refs/heads/...`) are accepted.
    pub fn into_parts(self) -> Result<(RepositoryIdentity, Trigger)> {
        let branch = self
            .git_ref
            .strip_prefix("refs/heads/")
            .ok_or_else(|| Error::Trigger {
                message: format!("'{}' is not a branch ref", self.git_ref),
            })?
            .to_string();

        let owner = self
            .repository
            .owner
            .name
            .or(self.repository.owner.login)
            .ok_or_else(|| Error::Trigger {
                message: "payload has no repository owner".to_string(),
            })?;

        let default_branch = self
            .repository
            .master_branch
            .or(self.repository.default_branch)
            .ok_or_else(|| Error::Trigger {
                message: "payload has no default branch".to_string(),
            })?;

        let message = self
            .head_commit
            .map(|commit| commit.message)
            .unwrap_or_default();

        let identity = RepositoryIdentity::new(owner, self.repository.name)?;
        let trigger = Trigger::new(branch, default_branch, message)?;
        Ok((identity, trigger))
    }
}
