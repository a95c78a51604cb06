//! # Documentation Generator
//!
//! The generator is an external program. A run builds one
//! [`GeneratorInvocation`] from the effective settings: every recognized
//! option present in the settings becomes a `--<name> <value>` pair, followed
//! by `--source <source mirror>` and `--destination <docs mirror>`.
//!
//! Options outside [`RECOGNIZED_OPTIONS`] (such as `branch`) are never passed
//! to the generator. Boolean values are written as `yes`/`no`; list values
//! repeat the flag once per item.
//!
//! A failed generation is not cleaned up: whatever the generator wrote to the
//! docs mirror stays there for inspection.

use crate::error::{Error, Result};
use crate::settings::EffectiveSettings;
use log::debug;
use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::process::Command;

/// Option names passed through to the generator, in argument order.
pub const RECOGNIZED_OPTIONS: [&str; 26] = [
    "config",
    "extensions",
    "exclude",
    "skip-doc-path",
    "skip-doc-prefix",
    "charset",
    "main",
    "title",
    "base-url",
    "google-cse-id",
    "google-cse-label",
    "google-analytics",
    "template-config",
    "allowed-html",
    "groups",
    "autocomplete",
    "access-levels",
    "internal",
    "php",
    "tree",
    "deprecated",
    "todo",
    "source-code",
    "download",
    "report",
    "wipeout",
];

/// Arguments for one generator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorInvocation {
    args: Vec<OsString>,
}

impl GeneratorInvocation {
    /// Builds the argument list from `settings` and the two mirror paths.
    pub fn from_settings(settings: &EffectiveSettings, source: &Path, destination: &Path) -> Self {
        let mut args: Vec<OsString> = Vec::new();

        for name in RECOGNIZED_OPTIONS {
            if let Some(value) = settings.get(name) {
                for token in value.to_tokens() {
                    args.push(format!("--{}", name).into());
                    args.push(token.into());
                }
            }
        }

        args.push("--source".into());
        args.push(source.as_os_str().to_owned());
        args.push("--destination".into());
        args.push(destination.as_os_str().to_owned());

        Self { args }
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Returns the value following `--<flag>`, if present.
    pub fn value_of(&self, flag: &str) -> Option<&OsStr> {
        let flag = format!("--{}", flag);
        self.args
            .iter()
            .position(|arg| arg.as_os_str() == OsStr::new(&flag))
            .and_then(|index| self.args.get(index + 1))
            .map(OsString::as_os_str)
    }
}

/// Trait for generator execution - allows mocking in tests
pub trait DocGenerator: Send + Sync {
    /// Fails with [`Error::GeneratorNotInstalled`] if the program is missing.
    fn ensure_installed(&self) -> Result<()>;

    /// Runs the generator, failing with [`Error::Generation`] on a non-zero
    /// exit.
    fn generate(&self, invocation: &GeneratorInvocation) -> Result<()>;
}

/// Runs a generator program found on disk or on `PATH`.
///
/// `base_args` come before the generated arguments, which allows wrapping a
/// script in an interpreter (`php apigen.php ...`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemGenerator {
    program: String,
    base_args: Vec<String>,
}

impl SystemGenerator {
    pub fn new(program: impl Into<String>, base_args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            base_args,
        }
    }

    /// The script the program runs, if one is given: the first base argument
    /// that is not a flag and looks like a file (`apigen.php`,
    /// `vendor/bin/apigen`).
    pub fn script(&self) -> Option<&Path> {
        self.base_args
            .iter()
            .find(|arg| !arg.starts_with('-'))
            .map(Path::new)
            .filter(|path| path.components().count() > 1 || path.extension().is_some())
    }

    /// The full command as a shell-quoted string, for logs and errors.
    pub fn command_line(&self, invocation: &GeneratorInvocation) -> String {
        let mut words = vec![self.program.clone()];
        words.extend(self.base_args.iter().cloned());
        words.extend(
            invocation
                .args()
                .iter()
                .map(|arg| arg.to_string_lossy().into_owned()),
        );
        shell_words::join(words)
    }
}

impl DocGenerator for SystemGenerator {
    fn ensure_installed(&self) -> Result<()> {
        let program = Path::new(&self.program);
        let found = if program.components().count() > 1 {
            program.is_file()
        } else {
            which::which(&self.program).is_ok()
        };

        if !found {
            return Err(Error::GeneratorNotInstalled {
                program: self.program.clone(),
            });
        }

        match self.script() {
            Some(script) if !script.is_file() => Err(Error::GeneratorNotInstalled {
                program: script.display().to_string(),
            }),
            _ => Ok(()),
        }
    }

    fn generate(&self, invocation: &GeneratorInvocation) -> Result<()> {
        let command_line = self.command_line(invocation);
        debug!("Generate docs: {}", command_line);

        let output = Command::new(&self.program)
            .args(&self.base_args)
            .args(invocation.args())
            .output()
            .map_err(|e| Error::Generation {
                command: command_line.clone(),
                stderr: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(Error::Generation {
                command: command_line,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(())
    }
}
