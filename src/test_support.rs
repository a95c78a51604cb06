//! Recording test doubles for the git and generator seams.

use crate::error::{Error, Result};
use crate::generator::{DocGenerator, GeneratorInvocation};
use crate::git::{GitCommand, GitOperations, GitOutput};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Mock git: records every command and answers by subcommand.
///
/// `clone` and `init` create a `.git` directory in their target so that
/// later runs see the mirror as existing.
#[derive(Clone, Default)]
pub struct MockGit {
    commands: Arc<Mutex<Vec<GitCommand>>>,
    outputs: HashMap<String, String>,
    failures: HashMap<String, String>,
}

impl MockGit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers `subcommand` with `stdout`.
    pub fn with_output(mut self, subcommand: &str, stdout: &str) -> Self {
        self.outputs.insert(subcommand.to_string(), stdout.to_string());
        self
    }

    /// Fails `subcommand` with `stderr`.
    pub fn fail_on(mut self, subcommand: &str, stderr: &str) -> Self {
        self.failures.insert(subcommand.to_string(), stderr.to_string());
        self
    }

    pub fn commands(&self) -> Vec<GitCommand> {
        self.commands.lock().unwrap().clone()
    }

    pub fn command_lines(&self) -> Vec<String> {
        self.commands()
            .iter()
            .map(GitCommand::command_line)
            .collect()
    }
}

impl GitOperations for MockGit {
    fn run(&self, command: &GitCommand) -> Result<GitOutput> {
        self.commands.lock().unwrap().push(command.clone());

        let subcommand = command.subcommand().unwrap_or_default();
        if let Some(stderr) = self.failures.get(subcommand) {
            return Err(Error::GitCommand {
                command: command.command_line(),
                stderr: stderr.clone(),
            });
        }

        if matches!(subcommand, "clone" | "init") {
            if let Some(target) = command.args().last() {
                std::fs::create_dir_all(PathBuf::from(target).join(".git"))?;
            }
        }

        Ok(GitOutput {
            stdout: self.outputs.get(subcommand).cloned().unwrap_or_default(),
            stderr: String::new(),
        })
    }
}

/// Mock generator: records invocations, optionally failing.
#[derive(Clone, Default)]
pub struct MockGenerator {
    invocations: Arc<Mutex<Vec<GeneratorInvocation>>>,
    installed: Option<bool>,
    failure: Option<String>,
}

impl MockGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn not_installed() -> Self {
        Self {
            installed: Some(false),
            ..Self::default()
        }
    }

    pub fn failing(stderr: &str) -> Self {
        Self {
            failure: Some(stderr.to_string()),
            ..Self::default()
        }
    }

    pub fn invocations(&self) -> Vec<GeneratorInvocation> {
        self.invocations.lock().unwrap().clone()
    }
}

impl DocGenerator for MockGenerator {
    fn ensure_installed(&self) -> Result<()> {
        match self.installed {
            Some(false) => Err(Error::GeneratorNotInstalled {
                program: "mock-generator".to_string(),
            }),
            _ => Ok(()),
        }
    }

    fn generate(&self, invocation: &GeneratorInvocation) -> Result<()> {
        self.invocations.lock().unwrap().push(invocation.clone());
        match &self.failure {
            Some(stderr) => Err(Error::Generation {
                command: "mock-generator".to_string(),
                stderr: stderr.clone(),
            }),
            None => Ok(()),
        }
    }
}
