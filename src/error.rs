//! # Error Handling
//!
//! This module defines the centralized error type for `docgen-hook`. It uses
//! the `thiserror` library to create an `Error` enum covering every failure
//! a hook run can end with, each carrying enough context to diagnose the
//! problem from a single log line.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum. Variants fall into the families reported by
//!   [`Error::kind`]:
//!   - configuration problems (unreadable or invalid settings catalog,
//!     repository not allowed, generator not installed),
//!   - version-control failures (a `git` command exited non-zero),
//!   - generation failures (the documentation generator exited non-zero),
//!   - input problems (an unusable push payload or trigger),
//!   - local filesystem failures.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! No error is retried or rolled back. Every variant is fatal for the run in
//! which it occurs; the caller decides how to report it.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for docgen-hook operations
#[derive(Error, Debug)]
pub enum Error {
    /// The settings catalog could not be interpreted.
    ///
    /// Includes the specific problem and optionally a hint about how to fix
    /// it.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// The settings catalog file does not exist.
    #[error("Settings catalog not found: {}", path.display())]
    CatalogNotFound { path: PathBuf },

    /// The catalog has neither an exact nor an owner-wildcard entry for the
    /// repository.
    #[error("Repository {repository} is not allowed")]
    RepositoryNotAllowed { repository: String },

    /// The documentation generator program cannot be found.
    #[error("Documentation generator is not installed: {program}")]
    GeneratorNotInstalled { program: String },

    /// A `git` command could not be started or exited with a non-zero status.
    #[error("Git command failed: {command}: {stderr}")]
    GitCommand { command: String, stderr: String },

    /// The documentation generator could not be started or exited with a
    /// non-zero status.
    #[error("Documentation generation failed: {command}: {stderr}")]
    Generation { command: String, stderr: String },

    /// The trigger input (push payload or explicit flags) is unusable.
    #[error("Invalid trigger: {message}")]
    Trigger { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A JSON parsing error, wrapped from `serde_json::Error`.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Broad classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or invalid catalog, repository not allowed, missing generator.
    /// Raised before any mirror is touched.
    Configuration,
    /// A version-control command failed.
    VersionControl,
    /// The documentation generator failed. The docs mirror may hold partial
    /// output.
    Generation,
    /// The trigger could not be turned into a run.
    Input,
    /// Local filesystem failure.
    Io,
}

impl Error {
    /// Returns the family this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::ConfigParse { .. }
            | Error::CatalogNotFound { .. }
            | Error::RepositoryNotAllowed { .. }
            | Error::GeneratorNotInstalled { .. }
            | Error::Yaml(_) => ErrorKind::Configuration,
            Error::GitCommand { .. } => ErrorKind::VersionControl,
            Error::Generation { .. } => ErrorKind::Generation,
            Error::Trigger { .. } | Error::Json(_) => ErrorKind::Input,
            Error::Io(_) => ErrorKind::Io,
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
