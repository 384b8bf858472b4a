//! Partitioning a flat file set into families.
//!
//! A family is every file whose name shares the prefix before the first
//! `.`: `Texts.resx`, `Texts.fr.resx` and `Texts.de-DE.resx` form the
//! `Texts` family. The default file is the member named exactly
//! `{class_name}{extension}`.

use camino::{Utf8Path, Utf8PathBuf};
use lexicon_common::{Diagnostic, DiagnosticSink, StageError};
use log::debug;

use crate::format::FileFormat;

/// A supported file with its detected format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceFile {
    path: Utf8PathBuf,
    format: FileFormat,
}

impl SourceFile {
    /// Wraps `path` when it has a supported extension.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Option<Self> {
        let path = path.into();
        let format = FileFormat::from_path(&path)?;
        Some(Self { path, format })
    }

    /// Full path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// File name component.
    #[must_use]
    pub fn name(&self) -> &str {
        self.path.file_name().unwrap_or_default()
    }

    /// Detected format.
    #[must_use]
    pub const fn format(&self) -> FileFormat {
        self.format
    }
}

/// Files sharing a class name, before any validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileFamily {
    class_name: String,
    members: Vec<SourceFile>,
    default_index: Option<usize>,
}

impl FileFamily {
    fn new(class_name: String, members: Vec<SourceFile>) -> Self {
        let default_index = find_default(&class_name, &members);
        Self {
            class_name,
            members,
            default_index,
        }
    }

    /// Shared base name of the family.
    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Every member in input order, default included.
    #[must_use]
    pub fn members(&self) -> &[SourceFile] {
        &self.members
    }

    /// The default file, if exactly one format provides one.
    #[must_use]
    pub fn default_file(&self) -> Option<&SourceFile> {
        self.default_index
            .and_then(|position| self.members.get(position))
    }

    /// Validates the family and extracts its locale candidates.
    ///
    /// Reports a missing default as an error and fails the stage. Members
    /// whose extension differs from the default's are reported once as
    /// mixed extensions and left out of the candidates.
    ///
    /// # Errors
    ///
    /// Returns [`StageError::Reported`] when no default file exists.
    pub fn resolve(self, sink: &mut DiagnosticSink) -> Result<ResolvedFamily, StageError> {
        let Self {
            class_name,
            members,
            default_index,
        } = self;

        let Some(position) = default_index else {
            return Err(sink.fail(Diagnostic::missing_default_file(&class_name)));
        };

        let mut default_file = None;
        let mut candidates = Vec::new();
        let mut mismatched = false;
        for (index, file) in members.into_iter().enumerate() {
            if index == position {
                default_file = Some(file);
            } else {
                candidates.push(file);
            }
        }
        let Some(default_file) = default_file else {
            return Err(StageError::unexpected(format!(
                "default file of family \"{class_name}\" vanished during resolution"
            )));
        };

        let format = default_file.format();
        let locale_files = candidates
            .into_iter()
            .filter(|file| {
                let matches = file.format() == format;
                mismatched |= !matches;
                matches
            })
            .map(|file| LocaleFile::new(&class_name, file))
            .collect();

        if mismatched {
            sink.report(Diagnostic::mixed_extensions(&class_name));
        }

        Ok(ResolvedFamily {
            class_name,
            default_file,
            locale_files,
        })
    }
}

/// A family with a confirmed default file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedFamily {
    /// Shared base name.
    pub class_name: String,
    /// The default file.
    pub default_file: SourceFile,
    /// Non-default members with the default's extension, in input order.
    pub locale_files: Vec<LocaleFile>,
}

impl ResolvedFamily {
    /// Format shared by the default and every locale file.
    #[must_use]
    pub const fn format(&self) -> FileFormat {
        self.default_file.format()
    }
}

/// A non-default member and the specifier taken from its name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocaleFile {
    /// The file.
    pub file: SourceFile,
    /// Name text between the class name and the extension, without
    /// surrounding dots.
    pub specifier: String,
}

impl LocaleFile {
    fn new(class_name: &str, file: SourceFile) -> Self {
        let specifier = file
            .name()
            .strip_prefix(class_name)
            .and_then(|rest| rest.strip_suffix(file.format().extension()))
            .unwrap_or_default()
            .trim_matches('.')
            .to_owned();
        Self { file, specifier }
    }
}

/// Groups `paths` into families keyed by the name prefix before the first
/// dot.
///
/// Unsupported files are skipped. Families appear in the order their first
/// member appears; members keep input order.
///
/// # Examples
///
/// ```
/// use camino::Utf8PathBuf;
/// use lexicon::family::group_families;
///
/// let families = group_families(&[
///     Utf8PathBuf::from("i18n/Texts.resx"),
///     Utf8PathBuf::from("i18n/Texts.fr.resx"),
///     Utf8PathBuf::from("i18n/Menu.json"),
/// ]);
/// assert_eq!(families.len(), 2);
/// assert_eq!(families[0].class_name(), "Texts");
/// ```
#[must_use]
pub fn group_families(paths: &[Utf8PathBuf]) -> Vec<FileFamily> {
    let mut groups: Vec<(String, Vec<SourceFile>)> = Vec::new();

    for path in paths {
        let Some(file) = SourceFile::new(path.clone()) else {
            debug!(target: "lexicon::family", "ignoring unsupported file {path}");
            continue;
        };
        let class_name = class_name_of(file.name()).to_owned();
        match groups.iter_mut().find(|(name, _)| *name == class_name) {
            Some((_, members)) => members.push(file),
            None => groups.push((class_name, vec![file])),
        }
    }

    groups
        .into_iter()
        .map(|(class_name, members)| {
            let family = FileFamily::new(class_name, members);
            debug!(
                target: "lexicon::family",
                "family `{}` has {} file(s), default {:?}",
                family.class_name(),
                family.members().len(),
                family.default_file().map(SourceFile::name)
            );
            family
        })
        .collect()
}

fn class_name_of(name: &str) -> &str {
    name.split_once('.').map_or(name, |(prefix, _)| prefix)
}

fn find_default(class_name: &str, members: &[SourceFile]) -> Option<usize> {
    let mut found: Option<(usize, FileFormat)> = None;
    for (index, file) in members.iter().enumerate() {
        let format = file.format();
        let is_default_name = file
            .name()
            .strip_prefix(class_name)
            .is_some_and(|rest| rest == format.extension());
        if !is_default_name {
            continue;
        }
        match found {
            None => found = Some((index, format)),
            Some((_, existing)) if existing != format => return None,
            Some(_) => {}
        }
    }
    found.map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexicon_common::DiagnosticCode;
    use rstest::rstest;

    fn paths(names: &[&str]) -> Vec<Utf8PathBuf> {
        names.iter().map(Utf8PathBuf::from).collect()
    }

    fn single(names: &[&str]) -> FileFamily {
        let mut families = group_families(&paths(names));
        assert_eq!(families.len(), 1, "expected a single family");
        families.remove(0)
    }

    #[rstest]
    fn groups_by_prefix_in_first_seen_order() {
        let families = group_families(&paths(&[
            "b/Menu.json",
            "a/Texts.resx",
            "b/Menu.fr.json",
            "a/Texts.de.resx",
            "notes.txt",
        ]));

        let names: Vec<_> = families.iter().map(FileFamily::class_name).collect();
        assert_eq!(names, vec!["Menu", "Texts"]);
        assert_eq!(families[0].members().len(), 2);
    }

    #[rstest]
    #[case::resx(&["Texts.fr.resx", "Texts.resx"], Some("Texts.resx"))]
    #[case::none(&["Texts.fr.resx", "Texts.de.resx"], None)]
    #[case::two_formats(&["Texts.resx", "Texts.csv"], None)]
    #[case::same_name_twice(&["a/Texts.csv", "b/Texts.csv"], Some("Texts.csv"))]
    fn picks_the_default_file(#[case] names: &[&str], #[case] expected: Option<&str>) {
        let family = single(names);
        assert_eq!(family.default_file().map(SourceFile::name), expected);
    }

    #[rstest]
    fn missing_default_fails_with_one_error() {
        let mut sink = DiagnosticSink::default();

        let outcome = single(&["Texts.fr.resx"]).resolve(&mut sink);

        assert!(matches!(outcome, Err(StageError::Reported)));
        let [diagnostic] = sink.recorded() else {
            panic!("expected one diagnostic");
        };
        assert_eq!(diagnostic.code(), DiagnosticCode::MissingDefaultFile);
        assert!(diagnostic.message().contains("\"Texts\""));
    }

    #[rstest]
    fn extracts_specifiers() {
        let mut sink = DiagnosticSink::default();

        let resolved = single(&["Texts.resx", "Texts.fr.resx", "Texts.de-DE.resx", "Texts..x.resx"])
            .resolve(&mut sink)
            .unwrap_or_else(|error| panic!("resolution failed: {error}"));

        let specifiers: Vec<_> = resolved
            .locale_files
            .iter()
            .map(|file| file.specifier.as_str())
            .collect();
        assert_eq!(specifiers, vec!["fr", "de-DE", "x"]);
        assert!(sink.recorded().is_empty());
    }

    #[rstest]
    fn mixed_extensions_are_reported_once_and_excluded() {
        let mut sink = DiagnosticSink::default();

        let resolved = single(&["Texts.resx", "Texts.fr.csv", "Texts.de.json", "Texts.it.resx"])
            .resolve(&mut sink)
            .unwrap_or_else(|error| panic!("resolution failed: {error}"));

        assert_eq!(resolved.locale_files.len(), 1);
        assert_eq!(resolved.locale_files[0].specifier, "it");
        let codes: Vec<_> = sink.recorded().iter().map(Diagnostic::code).collect();
        assert_eq!(codes, vec![DiagnosticCode::MixedExtensions]);
    }

    #[rstest]
    fn duplicate_default_name_becomes_empty_specifier() {
        let mut sink = DiagnosticSink::default();

        let resolved = single(&["a/Texts.csv", "b/Texts.csv"])
            .resolve(&mut sink)
            .unwrap_or_else(|error| panic!("resolution failed: {error}"));

        assert_eq!(resolved.default_file.path(), Utf8Path::new("a/Texts.csv"));
        assert_eq!(resolved.locale_files[0].specifier, "");
    }
}
