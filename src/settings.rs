//! # Settings Resolution
//!
//! Turns the settings catalog into the [`EffectiveSettings`] of one run.
//!
//! Resolution layers three sources, later layers overriding earlier ones
//! key by key:
//!
//! 1. the catalog's `defaults` entry, completed with a computed `base-url`
//!    (`http://<owner>.github.io/<repo>/`) and `title` (`<owner>/<repo>`)
//!    when `defaults` does not set them,
//! 2. the repository entry: the exact `owner/repo` entry if present,
//!    otherwise the `owner/*` wildcard entry,
//! 3. the trigger's default branch, used as `branch` when the repository
//!    entry does not name one.
//!
//! A repository with neither an exact nor a wildcard entry is not allowed.

use crate::config::{SettingValue, Settings, SettingsCatalog};
use crate::error::{Error, Result};
use crate::trigger::RepositoryIdentity;
use log::debug;

pub const BRANCH: &str = "branch";
pub const BASE_URL: &str = "base-url";
pub const TITLE: &str = "title";

/// The merged settings for one run.
///
/// `branch`, `base-url` and `title` are always present and non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveSettings {
    values: Settings,
    branch: String,
}

impl EffectiveSettings {
    /// The branch documentation is generated from.
    pub fn branch(&self) -> &str {
        &self.branch
    }

    pub fn title(&self) -> String {
        self.values[TITLE].to_string()
    }

    pub fn base_url(&self) -> String {
        self.values[BASE_URL].to_string()
    }

    pub fn get(&self, name: &str) -> Option<&SettingValue> {
        self.values.get(name)
    }

    pub fn values(&self) -> &Settings {
        &self.values
    }
}

/// Builds the defaults layer for `identity`.
pub fn default_settings(identity: &RepositoryIdentity, catalog: &SettingsCatalog) -> Settings {
    let mut defaults = catalog.defaults();
    fill_fallbacks(&mut defaults, identity);
    defaults
}

/// Resolves the effective settings for `identity`.
///
/// `default_branch` is the repository's default branch, used when the
/// matched entry has no `branch`.
pub fn resolve(
    identity: &RepositoryIdentity,
    catalog: &SettingsCatalog,
    default_branch: &str,
) -> Result<EffectiveSettings> {
    let mut settings = catalog
        .entry(&identity.key())
        .or_else(|| catalog.entry(&identity.wildcard_key()))
        .ok_or_else(|| Error::RepositoryNotAllowed {
            repository: identity.key(),
        })?;

    if settings.get(BRANCH).map_or(true, SettingValue::is_empty) {
        settings.insert(BRANCH.to_string(), SettingValue::from(default_branch));
    }

    let mut values = default_settings(identity, catalog);
    values.extend(settings);
    // An explicitly empty title or base-url in the entry still gets a value.
    fill_fallbacks(&mut values, identity);

    debug!(
        "Build settings for {}: {}",
        identity,
        serde_json::to_string(&values).unwrap_or_default()
    );

    let branch = values[BRANCH].to_string();
    Ok(EffectiveSettings { values, branch })
}

fn fill_fallbacks(settings: &mut Settings, identity: &RepositoryIdentity) {
    let fallbacks = [
        (
            BASE_URL,
            format!("http://{}.github.io/{}/", identity.owner(), identity.name()),
        ),
        (TITLE, identity.key()),
    ];

    for (key, fallback) in fallbacks {
        if settings.get(key).map_or(true, SettingValue::is_empty) {
            settings.insert(key.to_string(), SettingValue::Text(fallback));
        }
    }
}
