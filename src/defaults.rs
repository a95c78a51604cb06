//! Default values for docgen-hook configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

use std::path::{Path, PathBuf};

/// Branch the generated documentation is published to.
pub const PUBLISHING_BRANCH: &str = "gh-pages";

/// Anonymous, read-only URL the source mirror is cloned from.
pub const SOURCE_URL_TEMPLATE: &str = "https://github.com/{owner}/{repo}.git";

/// Authenticated URL the docs mirror pushes to.
pub const PUBLISH_URL_TEMPLATE: &str = "git@github.com:{owner}/{repo}.git";

/// Documentation generator program.
pub const GENERATOR: &str = "apigen";

/// Returns the default working root holding mirrors and configuration.
///
/// Uses the platform-appropriate data directory:
/// - Linux: `~/.local/share/docgen-hook`
/// - macOS: `~/Library/Application Support/docgen-hook`
/// - Windows: `{FOLDERID_RoamingAppData}\docgen-hook`
///
/// Falls back to `.docgen-hook` in the current directory if the platform
/// data directory cannot be determined.
///
/// This can be overridden by the `--root` CLI flag or the
/// `DOCGEN_HOOK_ROOT` environment variable.
pub fn default_root() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("docgen-hook"))
        .unwrap_or_else(|| PathBuf::from(".docgen-hook"))
}

/// Returns the settings catalog location below `root`.
pub fn catalog_path(root: &Path) -> PathBuf {
    root.join("config").join("repositories.yml")
}
