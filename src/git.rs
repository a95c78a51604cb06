//! # Git Commands
//!
//! Every version-control step of a run is one invocation of the system `git`
//! binary. [`GitCommand`] is a typed builder for those invocations: it holds
//! an argument vector and a working directory, never a shell string, so
//! branch names, URLs and commit messages need no escaping.
//!
//! Commands are executed through the [`GitOperations`] trait. [`SystemGit`]
//! runs the real `git`, which picks up SSH keys, credential helpers and any
//! authentication configured in `~/.gitconfig`. Tests substitute a recording
//! implementation.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Error, Result};
use log::debug;

/// Name of the remote both mirrors track.
pub const ORIGIN: &str = "origin";

/// A single `git` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitCommand {
    args: Vec<OsString>,
    dir: Option<PathBuf>,
}

impl GitCommand {
    /// Creates a command running `git <args>` in the current directory.
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        Self {
            args: args.into_iter().map(|arg| arg.as_ref().to_owned()).collect(),
            dir: None,
        }
    }

    /// Runs the command inside `dir`.
    pub fn in_dir(mut self, dir: &Path) -> Self {
        self.dir = Some(dir.to_path_buf());
        self
    }

    /// `git remote set-url origin <url>`
    pub fn remote_set_url(dir: &Path, url: &str) -> Self {
        Self::new(["remote", "set-url", ORIGIN, url]).in_dir(dir)
    }

    /// `git remote add origin <url>`
    pub fn remote_add(dir: &Path, url: &str) -> Self {
        Self::new(["remote", "add", ORIGIN, url]).in_dir(dir)
    }

    /// `git fetch origin`
    pub fn fetch(dir: &Path) -> Self {
        Self::new(["fetch", ORIGIN]).in_dir(dir)
    }

    /// `git reset --hard <reference>`
    pub fn reset_hard(dir: &Path, reference: &str) -> Self {
        Self::new(["reset", "--hard", reference]).in_dir(dir)
    }

    /// `git clone -b <branch> <url> <target>`
    pub fn clone_branch(url: &str, branch: &str, target: &Path) -> Self {
        let mut command = Self::new(["clone", "-b", branch, url]);
        command.args.push(target.as_os_str().to_owned());
        command
    }

    /// `git branch -a`
    pub fn branch_list(dir: &Path) -> Self {
        Self::new(["branch", "-a"]).in_dir(dir)
    }

    /// `git checkout -B <branch>`: create or reset the branch and switch to it.
    pub fn checkout_force(dir: &Path, branch: &str) -> Self {
        Self::new(["checkout", "-B", branch]).in_dir(dir)
    }

    /// `git checkout --orphan <branch>`
    pub fn checkout_orphan(dir: &Path, branch: &str) -> Self {
        Self::new(["checkout", "--orphan", branch]).in_dir(dir)
    }

    /// `git init <path>`
    pub fn init(path: &Path) -> Self {
        let mut command = Self::new(["init"]);
        command.args.push(path.as_os_str().to_owned());
        command
    }

    /// `git status -s`
    pub fn status_short(dir: &Path) -> Self {
        Self::new(["status", "-s"]).in_dir(dir)
    }

    /// `git add .`
    pub fn add_all(dir: &Path) -> Self {
        Self::new(["add", "."]).in_dir(dir)
    }

    /// `git commit -m <message>`
    pub fn commit(dir: &Path, message: &str) -> Self {
        Self::new(["commit", "-m", message]).in_dir(dir)
    }

    /// `git push origin <branch>`
    pub fn push(dir: &Path, branch: &str) -> Self {
        Self::new(["push", ORIGIN, branch]).in_dir(dir)
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    /// The git subcommand, e.g. `fetch`.
    pub fn subcommand(&self) -> Option<&str> {
        self.args.first().and_then(|arg| arg.to_str())
    }

    /// The command as a shell-quoted string, for logs and error messages.
    pub fn command_line(&self) -> String {
        let mut words = vec!["git".to_string()];
        words.extend(
            self.args
                .iter()
                .map(|arg| arg.to_string_lossy().into_owned()),
        );
        shell_words::join(words)
    }
}

/// Captured output of a successful git command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Trait for git execution - allows mocking in tests
pub trait GitOperations: Send + Sync {
    /// Runs `command`, failing with [`Error::GitCommand`] if it cannot be
    /// started or exits non-zero.
    fn run(&self, command: &GitCommand) -> Result<GitOutput>;
}

/// Runs commands with the system `git` binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemGit;

impl GitOperations for SystemGit {
    fn run(&self, command: &GitCommand) -> Result<GitOutput> {
        debug!("Run {}", command.command_line());

        let mut process = Command::new("git");
        process.args(command.args());
        if let Some(dir) = command.dir() {
            process.current_dir(dir);
        }

        let output = process.output().map_err(|e| Error::GitCommand {
            command: command.command_line(),
            stderr: e.to_string(),
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            return Err(Error::GitCommand {
                command: command.command_line(),
                stderr,
            });
        }

        Ok(GitOutput { stdout, stderr })
    }
}
