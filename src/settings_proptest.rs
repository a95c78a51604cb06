//! Property-based tests for settings resolution.
//!
//! These tests use proptest to generate catalogs and verify that resolution
//! invariants hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::config::{SettingValue, Settings, SettingsCatalog};
    use crate::error::Error;
    use crate::settings::{resolve, BASE_URL, BRANCH, TITLE};
    use crate::trigger::RepositoryIdentity;
    use proptest::prelude::*;

    fn name() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9-]{0,10}"
    }

    fn text_value() -> impl Strategy<Value = SettingValue> {
        "[ -~]{0,12}".prop_map(SettingValue::Text)
    }

    fn entry() -> impl Strategy<Value = Option<Settings>> {
        proptest::option::of(proptest::collection::btree_map(
            prop_oneof![
                Just(TITLE.to_string()),
                Just(BASE_URL.to_string()),
                Just(BRANCH.to_string()),
                Just("charset".to_string()),
            ],
            text_value(),
            0..4,
        ))
    }

    proptest! {
        /// Property: a repository resolves iff it has an exact or wildcard
        /// entry, and the only failure is `RepositoryNotAllowed`.
        #[test]
        fn resolution_requires_exact_or_wildcard(
            owner in name(),
            repo in name(),
            exact in proptest::option::of(entry()),
            wildcard in proptest::option::of(entry()),
            defaults in proptest::option::of(entry()),
            default_branch in name(),
        ) {
            let identity = RepositoryIdentity::new(owner.clone(), repo.clone()).unwrap();
            let mut catalog = SettingsCatalog::new();
            if let Some(settings) = exact.clone() {
                catalog.insert(identity.key(), settings);
            }
            if let Some(settings) = wildcard.clone() {
                catalog.insert(identity.wildcard_key(), settings);
            }
            if let Some(settings) = defaults {
                catalog.insert("defaults", settings);
            }

            let result = resolve(&identity, &catalog, &default_branch);
            if exact.is_none() && wildcard.is_none() {
                let not_allowed = matches!(result, Err(Error::RepositoryNotAllowed { .. }));
                prop_assert!(not_allowed);
            } else {
                let settings = result.unwrap();
                prop_assert!(!settings.branch().is_empty());
                prop_assert!(!settings.title().is_empty());
                prop_assert!(!settings.base_url().is_empty());
            }
        }

        /// Property: exact entries always win over wildcard entries.
        #[test]
        fn exact_title_beats_wildcard(
            exact_title in "[A-Za-z][A-Za-z ]{0,12}",
            wildcard_title in "[A-Za-z][A-Za-z ]{0,12}",
        ) {
            let identity = RepositoryIdentity::new("acme", "widget").unwrap();
            let mut catalog = SettingsCatalog::new();
            catalog.insert(
                "acme/*",
                Some(Settings::from([(TITLE.to_string(), SettingValue::Text(wildcard_title))])),
            );
            catalog.insert(
                "acme/widget",
                Some(Settings::from([(TITLE.to_string(), SettingValue::Text(exact_title.clone()))])),
            );

            let settings = resolve(&identity, &catalog, "main").unwrap();
            prop_assert_eq!(settings.title(), exact_title);
        }

        /// Property: without any configured title or base URL, the computed
        /// fallbacks are used.
        #[test]
        fn fallbacks_follow_identity(owner in name(), repo in name()) {
            let identity = RepositoryIdentity::new(owner.clone(), repo.clone()).unwrap();
            let mut catalog = SettingsCatalog::new();
            catalog.insert(identity.wildcard_key(), None);

            let settings = resolve(&identity, &catalog, "main").unwrap();
            prop_assert_eq!(settings.title(), format!("{}/{}", owner, repo));
            prop_assert_eq!(
                settings.base_url(),
                format!("http://{}.github.io/{}/", owner, repo)
            );
        }
    }
}
