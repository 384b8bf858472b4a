//! Combining the default table with per-locale tables.
//!
//! The default file owns the contract: its keys, in its order, are the
//! only keys any locale realisation exposes. Locale tables are completed
//! against it, with missing keys filled by an empty string and extra keys
//! dropped.

use lexicon_common::{Diagnostic, DiagnosticSink, KeyValueTable, StageError, canonical_locale};
use log::{debug, warn};

use crate::error::ReadErrors;
use crate::family::LocaleFile;

/// The canonical, fallback-complete result for one family.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalizationModel {
    default: KeyValueTable,
    locales: Vec<(String, KeyValueTable)>,
}

impl LocalizationModel {
    /// Starts a model from the default table.
    #[must_use]
    pub fn new(default: KeyValueTable) -> Self {
        Self {
            default,
            locales: Vec::new(),
        }
    }

    /// Adds a locale table, completing it against the default keys.
    ///
    /// Returns `false`, leaving the model unchanged, when `tag` was already
    /// accepted.
    pub fn add_locale(&mut self, tag: &str, table: &KeyValueTable) -> bool {
        if self.has_locale(tag) {
            return false;
        }
        let completed = complete_table(&self.default, table);
        self.locales.push((tag.to_owned(), completed));
        true
    }

    /// Whether `tag` has been accepted.
    #[must_use]
    pub fn has_locale(&self, tag: &str) -> bool {
        self.locales.iter().any(|(existing, _)| existing == tag)
    }

    /// Canonical keys in default-file order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.default.keys()
    }

    /// The default table.
    #[must_use]
    pub const fn default_table(&self) -> &KeyValueTable {
        &self.default
    }

    /// Accepted locales with their complete tables, in acceptance order.
    pub fn locales(&self) -> impl Iterator<Item = (&str, &KeyValueTable)> {
        self.locales.iter().map(|(tag, table)| (tag.as_str(), table))
    }

    /// Number of accepted locales, default excluded.
    #[must_use]
    pub fn locale_count(&self) -> usize {
        self.locales.len()
    }
}

/// Builds a table over exactly the keys of `default`, in its order.
///
/// # Examples
///
/// ```
/// use lexicon::merge::complete_table;
/// use lexicon_common::{KeyValueTable, Value};
///
/// let mut default = KeyValueTable::new();
/// default.try_insert("hello".into(), Value::plain("Hello")).unwrap();
/// default.try_insert("bye".into(), Value::plain("Bye")).unwrap();
/// let mut french = KeyValueTable::new();
/// french.try_insert("hello".into(), Value::plain("Bonjour")).unwrap();
/// french.try_insert("extra".into(), Value::plain("ignored")).unwrap();
///
/// let complete = complete_table(&default, &french);
/// assert_eq!(complete.keys().collect::<Vec<_>>(), ["hello", "bye"]);
/// assert_eq!(complete.get("bye"), Some(&Value::plain("")));
/// ```
#[must_use]
pub fn complete_table(default: &KeyValueTable, locale: &KeyValueTable) -> KeyValueTable {
    let mut completed = KeyValueTable::new();
    for key in default.keys() {
        let value = locale.get(key).cloned().unwrap_or_default();
        completed.insert(key.to_owned(), value);
    }
    completed
}

/// Builds a model from a default table and already-accepted locale tables.
///
/// Locales are kept in the given order; a tag seen earlier wins over later
/// repeats.
///
/// # Examples
///
/// ```
/// use lexicon::merge::merge;
/// use lexicon_common::{KeyValueTable, Value};
///
/// let mut default = KeyValueTable::new();
/// default.try_insert("hello".into(), Value::plain("Hello")).unwrap();
/// let mut first = KeyValueTable::new();
/// first.try_insert("hello".into(), Value::plain("Bonjour")).unwrap();
///
/// let model = merge(default, [("fr", first), ("fr", KeyValueTable::new())]);
/// assert_eq!(model.locale_count(), 1);
/// ```
#[must_use]
pub fn merge<'a, I>(default: KeyValueTable, locales: I) -> LocalizationModel
where
    I: IntoIterator<Item = (&'a str, KeyValueTable)>,
{
    let mut model = LocalizationModel::new(default);
    for (tag, table) in locales {
        model.add_locale(tag, &table);
    }
    model
}

/// Locale files split by whether their specifier names a known locale.
#[derive(Debug, Default)]
pub struct Classification<'a> {
    /// Files with an unrecognised specifier, in input order.
    pub rejected: Vec<&'a LocaleFile>,
    /// Files with a known specifier and its canonical tag, in input order.
    pub accepted: Vec<(&'static str, &'a LocaleFile)>,
}

/// Splits `files` by specifier validity.
#[must_use]
pub fn classify(files: &[LocaleFile]) -> Classification<'_> {
    let mut classification = Classification::default();
    for file in files {
        match canonical_locale(&file.specifier) {
            Some(tag) => classification.accepted.push((tag, file)),
            None => classification.rejected.push(file),
        }
    }
    classification
}

/// Merges every locale file of a family into `model`.
///
/// Unrecognised specifiers are warned about first. Accepted files are then
/// read in order through `read_locale`; a file whose canonical tag was
/// already accepted is skipped without being read. Every error from a
/// failed read is reported and the stage fails.
///
/// # Errors
///
/// Returns [`StageError::Reported`] when a locale file cannot be read.
pub fn merge_locales<F>(
    family: &str,
    mut model: LocalizationModel,
    files: &[LocaleFile],
    mut read_locale: F,
    sink: &mut DiagnosticSink,
) -> Result<LocalizationModel, StageError>
where
    F: FnMut(&LocaleFile) -> Result<KeyValueTable, ReadErrors>,
{
    let Classification { rejected, accepted } = classify(files);

    for file in rejected {
        warn!(
            target: "lexicon::merge",
            "ignoring {} in family `{family}`: unknown locale `{}`",
            file.file.name(),
            file.specifier
        );
        sink.report(Diagnostic::invalid_locale_specifier(
            &file.specifier,
            file.file.name(),
            family,
        ));
    }

    for (tag, file) in accepted {
        if model.has_locale(tag) {
            debug!(
                target: "lexicon::merge",
                "skipping {}: locale `{tag}` already provided",
                file.file.name()
            );
            continue;
        }
        let table = read_locale(file).map_err(|errors| errors.fail(sink))?;
        model.add_locale(tag, &table);
    }

    Ok(model)
}
