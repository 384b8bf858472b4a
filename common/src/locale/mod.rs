//! Locale specifier validation.
//!
//! A file specifier is accepted only when it names an entry of the static
//! locale catalog. Matching folds ASCII case and nothing else: `FR-ca`
//! matches `fr-CA`, while `fr_CA` or `french` do not. The catalog is built
//! once per process on first use and never mutated.

use std::collections::HashMap;

use log::warn;
use once_cell::sync::Lazy;
use unic_langid::LanguageIdentifier;

mod catalog;

static BY_FOLDED_TAG: Lazy<HashMap<String, &'static str>> = Lazy::new(|| {
    catalog::entries()
        .filter(|tag| {
            let parses = tag.parse::<LanguageIdentifier>().is_ok();
            if !parses {
                warn!(target: "lexicon::locale", "skipping malformed catalog entry `{tag}`");
            }
            parses
        })
        .map(|tag| (tag.to_ascii_lowercase(), tag))
        .collect()
});

/// Returns the catalog spelling of `specifier`, if it names a known locale.
///
/// # Examples
///
/// ```
/// use lexicon_common::locale::canonical_locale;
///
/// assert_eq!(canonical_locale("FR-ca"), Some("fr-CA"));
/// assert_eq!(canonical_locale("xx"), None);
/// ```
#[must_use]
pub fn canonical_locale(specifier: &str) -> Option<&'static str> {
    if specifier.is_empty() {
        return None;
    }
    BY_FOLDED_TAG
        .get(&specifier.to_ascii_lowercase())
        .copied()
}

/// Whether `specifier` names a known locale.
#[must_use]
pub fn is_known_locale(specifier: &str) -> bool {
    canonical_locale(specifier).is_some()
}
