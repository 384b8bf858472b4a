//! Canonical locale identifiers recognised as file specifiers.
//!
//! `locales.txt` holds the CLDR available locales: neutral languages,
//! language-script and language-region pairs, and the UN M.49
//! macro-regions such as `001`, `150` and `419`. A handful of platform
//! cultures outside CLDR (`en-029`, `iu-Cans-CA`, `zh-SG`) are listed too.

const SOURCE: &str = include_str!("locales.txt");

/// Catalog entries in file order, comments and blank lines skipped.
pub(super) fn entries() -> impl Iterator<Item = &'static str> {
    SOURCE
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}
