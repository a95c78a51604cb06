//! # Settings Catalog Schema and Parsing
//!
//! This module defines the data structures that represent the
//! `repositories.yml` settings catalog and the logic for loading it.
//!
//! The catalog is a single YAML mapping. Each key is one of:
//!
//! - `defaults` - options applied to every repository,
//! - `owner/*` - options for every repository of an owner,
//! - `owner/repo` - options for one repository.
//!
//! Each value is either a mapping of option names to values, or null (an
//! entry that allows the repository without setting anything):
//!
//! ```yaml
//! defaults:
//!   access-levels: public
//!   deprecated: true
//! acme/*:
//! acme/widget:
//!   title: Widget API
//!   exclude:
//!     - "*/tests/*"
//!     - "*/vendor/*"
//! ```
//!
//! Option values may be strings, booleans, numbers or lists of those. A null
//! option value is treated as if the option were absent. The catalog is
//! read-only: nothing in this crate writes it back.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Reserved catalog key holding options applied to every repository.
pub const DEFAULTS_KEY: &str = "defaults";

/// A single option value from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Number(serde_yaml::Number),
    Text(String),
    /// Several values for the same option, e.g. multiple exclusion globs.
    List(Vec<SettingValue>),
}

impl SettingValue {
    /// Returns true for an empty string or an empty list.
    pub fn is_empty(&self) -> bool {
        match self {
            SettingValue::Text(text) => text.is_empty(),
            SettingValue::List(items) => items.is_empty(),
            SettingValue::Bool(_) | SettingValue::Number(_) => false,
        }
    }

    /// Renders the value as command-line tokens.
    ///
    /// Booleans become `yes`/`no`, strings and numbers are passed verbatim,
    /// and lists yield one token per item.
    pub fn to_tokens(&self) -> Vec<String> {
        match self {
            SettingValue::List(items) => items.iter().flat_map(|item| item.to_tokens()).collect(),
            scalar => vec![scalar.to_string()],
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Bool(true) => f.write_str("yes"),
            SettingValue::Bool(false) => f.write_str("no"),
            SettingValue::Number(number) => write!(f, "{}", number),
            SettingValue::Text(text) => f.write_str(text),
            SettingValue::List(items) => {
                let rendered: Vec<String> = items.iter().map(|item| item.to_string()).collect();
                f.write_str(&rendered.join(","))
            }
        }
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::Text(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        SettingValue::Text(value)
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Bool(value)
    }
}

/// Option name to value mapping for one catalog entry.
pub type Settings = BTreeMap<String, SettingValue>;

/// Raw entry as written in YAML, before null option values are dropped.
type RawSettings = BTreeMap<String, Option<SettingValue>>;

/// The parsed settings catalog.
#[derive(Debug, Clone, Default)]
pub struct SettingsCatalog {
    entries: BTreeMap<String, Option<RawSettings>>,
}

impl SettingsCatalog {
    /// Creates an empty catalog. It allows no repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a YAML string into a catalog.
    ///
    /// An empty document (or one containing only comments) is an empty
    /// catalog. Any top-level value other than a mapping is rejected.
    pub fn parse(yaml_content: &str) -> Result<Self> {
        let value: serde_yaml::Value = serde_yaml::from_str(yaml_content)?;

        match value {
            serde_yaml::Value::Null => Ok(Self::new()),
            serde_yaml::Value::Mapping(_) => {
                let entries = serde_yaml::from_value(value)?;
                Ok(Self { entries })
            }
            _ => Err(Error::ConfigParse {
                message: "Settings catalog must be a mapping".to_string(),
                hint: Some(
                    "Key entries by 'defaults', 'owner/*' or 'owner/repo'".to_string(),
                ),
            }),
        }
    }

    /// Loads a catalog from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::CatalogNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Adds or replaces an entry. Used to build catalogs in code.
    pub fn insert(&mut self, key: impl Into<String>, settings: Option<Settings>) {
        let raw = settings.map(|settings| {
            settings
                .into_iter()
                .map(|(name, value)| (name, Some(value)))
                .collect()
        });
        self.entries.insert(key.into(), raw);
    }

    /// Returns true if the catalog has an entry under `key`, even a null one.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the options stored under `key`.
    ///
    /// `None` means there is no such entry. A null entry yields an empty map.
    pub fn entry(&self, key: &str) -> Option<Settings> {
        self.entries
            .get(key)
            .map(|raw| raw.as_ref().map(strip_nulls).unwrap_or_default())
    }

    /// Returns the `defaults` entry, or an empty map if there is none.
    pub fn defaults(&self) -> Settings {
        self.entry(DEFAULTS_KEY).unwrap_or_default()
    }

    /// Iterates over all entry keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn strip_nulls(raw: &RawSettings) -> Settings {
    raw.iter()
        .filter_map(|(name, value)| value.clone().map(|value| (name.clone(), value)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_catalog() {
        let yaml = r#"
defaults:
  access-levels: public
  deprecated: true
acme/*:
acme/widget:
  title: Widget API
  php: 5.3
  exclude:
    - "*/tests/*"
    - "*/vendor/*"
"#;

        let catalog = SettingsCatalog::parse(yaml).unwrap();
        assert_eq!(catalog.len(), 3);
        assert!(catalog.contains("acme/*"));

        let defaults = catalog.defaults();
        assert_eq!(defaults["access-levels"], SettingValue::from("public"));
        assert_eq!(defaults["deprecated"], SettingValue::Bool(true));

        let widget = catalog.entry("acme/widget").unwrap();
        assert_eq!(widget["title"], SettingValue::from("Widget API"));
        assert_eq!(widget["php"].to_string(), "5.3");
        assert_eq!(
            widget["exclude"].to_tokens(),
            vec!["*/tests/*".to_string(), "*/vendor/*".to_string()]
        );
    }

    #[test]
    fn test_null_entry_is_empty_settings() {
        let catalog = SettingsCatalog::parse("acme/*:\n").unwrap();
        assert_eq!(catalog.entry("acme/*"), Some(Settings::new()));
        assert_eq!(catalog.entry("acme/widget"), None);
    }

    #[test]
    fn test_null_option_value_is_absent() {
        let catalog = SettingsCatalog::parse("acme/widget:\n  title: ~\n  main: Acme\n").unwrap();
        let widget = catalog.entry("acme/widget").unwrap();
        assert!(!widget.contains_key("title"));
        assert_eq!(widget["main"], SettingValue::from("Acme"));
    }

    #[test]
    fn test_missing_defaults_is_empty() {
        let catalog = SettingsCatalog::parse("acme/widget:\n  title: Widget\n").unwrap();
        assert!(catalog.defaults().is_empty());
    }

    #[test]
    fn test_parse_empty_catalog() {
        assert!(SettingsCatalog::parse("").unwrap().is_empty());
        assert!(SettingsCatalog::parse("# no repositories yet\n")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_parse_rejects_non_mapping() {
        let result = SettingsCatalog::parse("- acme/widget\n- acme/gadget\n");
        match result {
            Err(Error::ConfigParse { message, hint }) => {
                assert!(message.contains("must be a mapping"));
                assert!(hint.is_some());
            }
            other => panic!("Expected ConfigParse error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_scalar_entry() {
        let result = SettingsCatalog::parse("acme/widget: yes please\n");
        assert!(matches!(result, Err(Error::Yaml(_))));
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let result = SettingsCatalog::parse("acme/widget:\n  title: [unclosed\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_file_missing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("repositories.yml");

        match SettingsCatalog::from_file(&path) {
            Err(Error::CatalogNotFound { path: missing }) => assert_eq!(missing, path),
            other => panic!("Expected CatalogNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("repositories.yml");
        fs::write(&path, "acme/widget:\n  branch: develop\n").unwrap();

        let catalog = SettingsCatalog::from_file(&path).unwrap();
        assert_eq!(
            catalog.entry("acme/widget").unwrap()["branch"],
            SettingValue::from("develop")
        );
    }

    #[test]
    fn test_insert_builds_catalog() {
        let mut catalog = SettingsCatalog::new();
        catalog.insert("acme/*", None);
        catalog.insert(
            "acme/widget",
            Some(Settings::from([("title".to_string(), SettingValue::from("W"))])),
        );

        assert_eq!(catalog.keys().collect::<Vec<_>>(), vec!["acme/*", "acme/widget"]);
        assert_eq!(catalog.entry("acme/*"), Some(Settings::new()));
    }

    #[test]
    fn test_setting_value_tokens() {
        assert_eq!(SettingValue::Bool(true).to_tokens(), vec!["yes"]);
        assert_eq!(SettingValue::Bool(false).to_tokens(), vec!["no"]);
        assert_eq!(SettingValue::from("utf-8").to_tokens(), vec!["utf-8"]);
        assert!(SettingValue::List(vec![]).to_tokens().is_empty());
    }

    #[test]
    fn test_setting_value_is_empty() {
        assert!(SettingValue::from("").is_empty());
        assert!(SettingValue::List(vec![]).is_empty());
        assert!(!SettingValue::Bool(false).is_empty());
        assert!(!SettingValue::from("main").is_empty());
    }
}
