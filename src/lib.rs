//! # docgen-hook Library
//!
//! This library regenerates API documentation when a repository receives a
//! push and publishes it to a dedicated branch (by default `gh-pages`) of the
//! same repository. It is used by the `docgen-hook` command-line tool but can
//! be driven by any trigger source, such as a webhook receiver.
//!
//! ## Quick Example
//!
//! ```
//! use docgen_hook::config::SettingsCatalog;
//! use docgen_hook::settings;
//! use docgen_hook::trigger::RepositoryIdentity;
//!
//! let catalog = SettingsCatalog::parse(r#"
//! defaults:
//!   deprecated: true
//! acme/*:
//! acme/widget:
//!   title: Widget API
//! "#).unwrap();
//!
//! let identity = RepositoryIdentity::new("acme", "widget").unwrap();
//! let settings = settings::resolve(&identity, &catalog, "main").unwrap();
//!
//! assert_eq!(settings.branch(), "main");
//! assert_eq!(settings.title(), "Widget API");
//! assert_eq!(settings.base_url(), "http://acme.github.io/widget/");
//! ```
//!
//! ## Core Concepts
//!
//! - **Settings catalog (`config`)**: the `repositories.yml` file listing
//!   which repositories are allowed and with which generator options.
//! - **Settings resolution (`settings`)**: merges defaults, owner-wildcard
//!   and exact entries into the effective settings of one run.
//! - **Mirrors (`mirror`)**: local working copies of the source branch and
//!   of the publishing branch, updated in place on every run.
//! - **Generator (`generator`)**: the external documentation tool and the
//!   arguments derived from the settings.
//! - **Publishing (`publish`)**: commit-if-changed, then push.
//!
//! ## Execution Flow
//!
//! [`pipeline::Hook::run`] executes, in order: settings resolution, the
//! branch check, source mirror sync, docs mirror preparation, generation,
//! and publishing. A push to a branch other than the configured one ends the
//! run early with [`pipeline::RunOutcome::Skipped`].

pub mod config;
pub mod defaults;
pub mod error;
pub mod generator;
pub mod git;
pub mod mirror;
pub mod pipeline;
pub mod publish;
pub mod settings;
pub mod trigger;

#[cfg(test)]
mod settings_proptest;
#[cfg(test)]
mod test_support;
