//! Shared test utilities for integration and E2E tests.
//!
//! This module provides common fixtures and catalogs to reduce duplication
//! across test files.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_catalog(catalogs::ACME);
//!     fixture.command().arg("validate").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::catalogs;
    pub use super::TestFixture;
}

/// Settings catalogs for testing.
#[allow(dead_code)]
pub mod catalogs {
    /// Allows every `acme` repository, with a specific `acme/widget` entry.
    pub const ACME: &str = r#"
defaults:
  deprecated: true
  access-levels: public
acme/*:
acme/widget:
  title: Widget API
"#;

    /// Builds from `release` instead of the default branch.
    pub const RELEASE_BRANCH: &str = r#"
acme/widget:
  branch: release
"#;

    /// Not a mapping.
    pub const NOT_A_MAPPING: &str = "- acme/widget\n";

    /// Invalid YAML for error testing.
    pub const INVALID_YAML: &str = "acme/widget:\n  title: [unclosed\n";
}

/// A temporary hook root with an optional settings catalog.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty root directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Write `config/repositories.yml` below the root.
    pub fn with_catalog(self, content: &str) -> Self {
        self.temp_dir
            .child("config/repositories.yml")
            .write_str(content)
            .expect("Failed to write catalog");
        self
    }

    /// Add a file with the given path and content.
    #[allow(dead_code)]
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the root directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get a child path within the root directory.
    #[allow(dead_code)]
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Get the path to the catalog.
    #[allow(dead_code)]
    pub fn catalog_path(&self) -> PathBuf {
        self.temp_dir.path().join("config/repositories.yml")
    }

    /// Create a command for the docgen-hook binary using this root.
    ///
    /// Environment overrides from the developer's shell are removed so that
    /// tests only see the fixture.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("docgen-hook");
        cmd.current_dir(self.path())
            .env("DOCGEN_HOOK_ROOT", self.path())
            .env_remove("DOCGEN_HOOK_CONFIG")
            .env_remove("DOCGEN_HOOK_GENERATOR")
            .env_remove("RUST_LOG");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_with_catalog() {
        let fixture = TestFixture::new().with_catalog(catalogs::ACME);
        assert!(fixture.catalog_path().exists());
    }

    #[test]
    fn test_catalogs_parse_as_yaml() {
        for catalog in [catalogs::ACME, catalogs::RELEASE_BRANCH, catalogs::NOT_A_MAPPING] {
            serde_yaml::from_str::<serde_yaml::Value>(catalog).expect("Catalog should be valid YAML");
        }
        assert!(serde_yaml::from_str::<serde_yaml::Value>(catalogs::INVALID_YAML).is_err());
    }
}
