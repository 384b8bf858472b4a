//! Diagnostics reported to the host for every processed file family.
//!
//! Each diagnostic carries a stable numeric code, a severity and a
//! human-readable message naming the family, file or specifier involved.
//! Codes are rendered as `LEX` followed by three digits.

use std::fmt;

/// Severity attached to a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Recoverable problem; the offending item is skipped.
    Warning,
    /// Fatal to the family; suppresses the artifact.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => formatter.write_str("warning"),
            Self::Error => formatter.write_str("error"),
        }
    }
}

/// Stable identifiers for every diagnostic the generator can raise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    /// No default file found for a family.
    MissingDefaultFile,
    /// A locale specifier does not name a recognised locale.
    InvalidLocaleSpecifier,
    /// Two entries of one file normalise to the same key.
    DuplicateKey,
    /// Family members use an extension other than the default file's.
    MixedExtensions,
    /// A stage failed in a way no other code describes.
    UnexpectedError,
    /// A file could not be parsed as its format.
    ParseError,
    /// A file could not be read.
    ReadFailure,
}

impl DiagnosticCode {
    /// Returns the numeric code.
    #[must_use]
    pub const fn number(self) -> u16 {
        match self {
            Self::MissingDefaultFile => 1,
            Self::InvalidLocaleSpecifier => 2,
            Self::DuplicateKey => 3,
            Self::MixedExtensions => 4,
            Self::UnexpectedError => 5,
            Self::ParseError => 6,
            Self::ReadFailure => 7,
        }
    }

    /// Returns the severity this code is always reported with.
    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::InvalidLocaleSpecifier => Severity::Warning,
            Self::MissingDefaultFile
            | Self::DuplicateKey
            | Self::MixedExtensions
            | Self::UnexpectedError
            | Self::ParseError
            | Self::ReadFailure => Severity::Error,
        }
    }

    /// Returns the printable identifier, e.g. `LEX002`.
    #[must_use]
    pub fn id(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "LEX{:03}", self.number())
    }
}

/// A single message destined for the host.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    code: DiagnosticCode,
    severity: Severity,
    message: String,
}

impl Diagnostic {
    /// Creates a diagnostic using the code's own severity.
    ///
    /// # Examples
    ///
    /// ```
    /// use lexicon_common::diagnostics::{Diagnostic, DiagnosticCode, Severity};
    ///
    /// let diagnostic = Diagnostic::new(DiagnosticCode::MissingDefaultFile, "no default");
    /// assert_eq!(diagnostic.severity(), Severity::Error);
    /// assert_eq!(diagnostic.to_string(), "error[LEX001]: no default");
    /// ```
    #[must_use]
    pub fn new(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: code.severity(),
            message: message.into(),
        }
    }

    /// Returns the diagnostic code.
    #[must_use]
    pub const fn code(&self) -> DiagnosticCode {
        self.code
    }

    /// Returns the severity.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether this diagnostic blocks artifact emission.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// No default file for `family`.
    #[must_use]
    pub fn missing_default_file(family: &str) -> Self {
        Self::new(
            DiagnosticCode::MissingDefaultFile,
            format!("No default file found for file family \"{family}\"."),
        )
    }

    /// Rejected locale specifier on `file` within `family`.
    #[must_use]
    pub fn invalid_locale_specifier(specifier: &str, file: &str, family: &str) -> Self {
        Self::new(
            DiagnosticCode::InvalidLocaleSpecifier,
            format!(
                "Invalid culture specifier \"{specifier}\" on file \"{file}\" found for file family \"{family}\". It'll be ignored."
            ),
        )
    }

    /// Members of `family` use differing extensions.
    #[must_use]
    pub fn mixed_extensions(family: &str) -> Self {
        Self::new(
            DiagnosticCode::MixedExtensions,
            format!("Files with different extensions found for file family \"{family}\"."),
        )
    }

    /// A stage failed unexpectedly.
    #[must_use]
    pub fn unexpected(detail: &str) -> Self {
        Self::new(
            DiagnosticCode::UnexpectedError,
            format!("Unexpected error: {detail}"),
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}[{}]: {}", self.severity, self.code, self.message)
    }
}

/// Returns `true` when any of `diagnostics` is an error.
#[must_use]
pub fn has_errors(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(Diagnostic::is_error)
}
