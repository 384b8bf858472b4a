//! Readers for the supported localisation file formats.
//!
//! The format set is closed: a file's extension selects one of
//! [`FileFormat::Resx`], [`FileFormat::Csv`] or [`FileFormat::Json`], and
//! each turns file text into a [`KeyValueTable`]. Keys are normalised with
//! [`normalise_key`] before insertion, so collisions are detected on the
//! normalised spelling. Every extra occurrence of a key is reported, not
//! only the first.

use std::fmt;

use camino::Utf8Path;
use lexicon_common::{KeyValueTable, Value, normalise_key};
use log::trace;

use crate::error::{ReadError, ReadErrors};

mod csv;
mod json;
mod resx;

/// A supported localisation file format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FileFormat {
    /// XML resource file (`.resx`).
    Resx,
    /// Two-column delimited table with a header row (`.csv`).
    Csv,
    /// Object document (`.json`).
    Json,
}

impl FileFormat {
    /// Every supported format.
    pub const ALL: [Self; 3] = [Self::Resx, Self::Csv, Self::Json];

    /// File extension including the leading dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Resx => ".resx",
            Self::Csv => ".csv",
            Self::Json => ".json",
        }
    }

    /// File extension without the leading dot.
    #[must_use]
    pub const fn extension_name(self) -> &'static str {
        match self {
            Self::Resx => "resx",
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    /// Name used for a single entry in diagnostics.
    #[must_use]
    pub const fn entry_label(self) -> &'static str {
        match self {
            Self::Resx => "ResX data node",
            Self::Csv => "CSV item",
            Self::Json => "JSON property",
        }
    }

    /// Selects the format whose extension terminates `name`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|format| name.ends_with(format.extension()))
    }

    /// Selects the format for `path` from its file name.
    #[must_use]
    pub fn from_path(path: &Utf8Path) -> Option<Self> {
        path.file_name().and_then(Self::from_name)
    }

    /// Parses `text` into a key table.
    ///
    /// # Errors
    ///
    /// Returns a single [`ReadError::Parse`] when `text` is not a valid
    /// document, otherwise one [`ReadError::DuplicateKey`] per entry whose
    /// key normalises to one already seen.
    pub fn read(self, text: &str, origin: &ReadOrigin<'_>) -> Result<KeyValueTable, ReadErrors> {
        trace!(
            target: "lexicon::format",
            "reading {} as {} for specifier `{}`",
            origin.file,
            self,
            origin.specifier
        );
        match self {
            Self::Resx => resx::read(text, origin),
            Self::Csv => csv::read(text, origin),
            Self::Json => json::read(text, origin),
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.extension_name())
    }
}

/// Whether `path` has one of the supported extensions.
#[must_use]
pub fn is_supported(path: &Utf8Path) -> bool {
    FileFormat::from_path(path).is_some()
}

/// Where a table is being read from, for diagnostics.
#[derive(Clone, Copy, Debug)]
pub struct ReadOrigin<'a> {
    /// File name.
    pub file: &'a str,
    /// Specifier label, `(default)` for the default file.
    pub specifier: &'a str,
    /// Family name.
    pub family: &'a str,
}

impl ReadOrigin<'_> {
    pub(crate) fn parse_error(&self, format: FileFormat, reason: impl fmt::Display) -> ReadError {
        ReadError::Parse {
            format,
            file: self.file.to_owned(),
            family: self.family.to_owned(),
            reason: reason.to_string(),
        }
    }
}

/// Accumulates normalised entries for one file.
pub(crate) struct TableBuilder<'a> {
    format: FileFormat,
    origin: &'a ReadOrigin<'a>,
    table: KeyValueTable,
    duplicates: Vec<ReadError>,
}

impl<'a> TableBuilder<'a> {
    pub(crate) fn new(format: FileFormat, origin: &'a ReadOrigin<'a>) -> Self {
        Self {
            format,
            origin,
            table: KeyValueTable::new(),
            duplicates: Vec::new(),
        }
    }

    /// Normalises `raw_key` and inserts `value`. A key already present is
    /// recorded as a duplicate and the later value dropped.
    pub(crate) fn insert(&mut self, raw_key: &str, value: Value) {
        let normalised = normalise_key(raw_key);
        if let Err(occupied) = self.table.try_insert(normalised, value) {
            self.duplicates.push(ReadError::DuplicateKey {
                format: self.format,
                original: raw_key.to_owned(),
                normalised: occupied.key,
                file: self.origin.file.to_owned(),
                specifier: self.origin.specifier.to_owned(),
                family: self.origin.family.to_owned(),
            });
        }
    }

    /// Returns the table, or every duplicate seen.
    pub(crate) fn finish(self) -> Result<KeyValueTable, ReadErrors> {
        match ReadErrors::from_errors(self.duplicates) {
            Some(errors) => Err(errors),
            None => Ok(self.table),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rstest::rstest;

    pub(crate) const ORIGIN: ReadOrigin<'static> = ReadOrigin {
        file: "Texts.resx",
        specifier: "(default)",
        family: "Texts",
    };

    #[rstest]
    #[case("Texts.resx", Some(FileFormat::Resx))]
    #[case("Texts.fr.csv", Some(FileFormat::Csv))]
    #[case("dir/Texts.de-DE.json", Some(FileFormat::Json))]
    #[case("Texts.yaml", None)]
    #[case("Texts.resx.bak", None)]
    #[case("Texts.RESX", None)]
    fn detects_formats(#[case] path: &str, #[case] expected: Option<FileFormat>) {
        assert_eq!(FileFormat::from_path(Utf8Path::new(path)), expected);
        assert_eq!(is_supported(Utf8Path::new(path)), expected.is_some());
    }

    /// Original spellings of every duplicate in `errors`.
    pub(crate) fn duplicate_originals(errors: &ReadErrors) -> Vec<&str> {
        errors
            .as_slice()
            .iter()
            .map(|error| match error {
                ReadError::DuplicateKey { original, .. } => original.as_str(),
                other => panic!("expected a duplicate key, got {other}"),
            })
            .collect()
    }

    #[rstest]
    fn builder_reports_collisions_after_normalisation() {
        let mut builder = TableBuilder::new(FileFormat::Csv, &ORIGIN);
        builder.insert("a-b", Value::plain("1"));
        builder.insert("a.b", Value::plain("2"));

        let errors = builder
            .finish()
            .err()
            .unwrap_or_else(|| panic!("collision should be reported"));

        match errors.as_slice() {
            [ReadError::DuplicateKey {
                original,
                normalised,
                ..
            }] => {
                assert_eq!(original, "a.b");
                assert_eq!(normalised, "a_b");
            }
            other => panic!("unexpected errors {other:?}"),
        }
    }

    #[rstest]
    fn builder_reports_every_extra_occurrence() {
        let mut builder = TableBuilder::new(FileFormat::Csv, &ORIGIN);
        builder.insert("a-b", Value::plain("1"));
        builder.insert("a.b", Value::plain("2"));
        builder.insert("other", Value::plain("3"));
        builder.insert("a_b", Value::plain("4"));

        let errors = builder
            .finish()
            .err()
            .unwrap_or_else(|| panic!("collisions should be reported"));

        assert_eq!(duplicate_originals(&errors), vec!["a.b", "a_b"]);
    }

    #[rstest]
    fn builder_without_collisions_yields_the_table() {
        let mut builder = TableBuilder::new(FileFormat::Json, &ORIGIN);
        builder.insert("hello", Value::plain("Hello"));

        let table = builder
            .finish()
            .unwrap_or_else(|errors| panic!("unexpected errors: {errors}"));
        assert_eq!(table.get("hello"), Some(&Value::plain("Hello")));
    }
}
