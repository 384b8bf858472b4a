//! Error types for reading localisation files and loading configuration.
//!
//! Read errors are fatal to the family they occur in; each maps onto a
//! stable diagnostic code so the host sees a uniform report.

use std::fmt;

use camino::Utf8PathBuf;
use lexicon_common::{Diagnostic, DiagnosticCode, DiagnosticSink, StageError};
use thiserror::Error;

use crate::format::FileFormat;

/// Failure to turn one file into a key table.
#[derive(Debug, Error)]
pub enum ReadError {
    /// Two entries normalise to the same key.
    #[error(
        "{} entry '{original}'{} in localization {} file '{file}' with specifier '{specifier}' ('{family}') is contained multiple times.",
        .format.entry_label(),
        renamed(.original, .normalised),
        .format.extension_name()
    )]
    DuplicateKey {
        /// Format of the offending file.
        format: FileFormat,
        /// Key as spelled in the file.
        original: String,
        /// Key after normalisation.
        normalised: String,
        /// File name.
        file: String,
        /// Specifier label of the file.
        specifier: String,
        /// Family the file belongs to.
        family: String,
    },

    /// The text is not a valid document of its format.
    #[error("Error while reading {} file '{file}' ('{family}'): {reason}", .format.extension_name())]
    Parse {
        /// Format of the offending file.
        format: FileFormat,
        /// File name.
        file: String,
        /// Family the file belongs to.
        family: String,
        /// Parser message.
        reason: String,
    },

    /// The file could not be read.
    #[error("Could not read file '{path}' ('{family}'): {source}")]
    Io {
        /// Path that failed.
        path: Utf8PathBuf,
        /// Family the file belongs to.
        family: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl ReadError {
    /// Returns the diagnostic code reported for this error.
    #[must_use]
    pub const fn code(&self) -> DiagnosticCode {
        match self {
            Self::DuplicateKey { .. } => DiagnosticCode::DuplicateKey,
            Self::Parse { .. } => DiagnosticCode::ParseError,
            Self::Io { .. } => DiagnosticCode::ReadFailure,
        }
    }

    /// Converts the error into a host diagnostic.
    #[must_use]
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::new(self.code(), self.to_string())
    }
}

/// Every failure found while reading one file, in document order.
///
/// A parse or I/O failure stands alone; duplicate keys are collected so
/// each extra occurrence is reported.
#[derive(Debug)]
pub struct ReadErrors(Vec<ReadError>);

impl ReadErrors {
    /// Wraps `errors`, or returns `None` when there are none.
    #[must_use]
    pub fn from_errors(errors: Vec<ReadError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self(errors))
        }
    }

    /// The individual errors.
    #[must_use]
    pub fn as_slice(&self) -> &[ReadError] {
        &self.0
    }

    /// Reports every error to `sink` and fails the stage.
    pub fn fail(self, sink: &mut DiagnosticSink) -> StageError {
        for error in &self.0 {
            sink.report(error.to_diagnostic());
        }
        StageError::Reported
    }
}

impl From<ReadError> for ReadErrors {
    fn from(error: ReadError) -> Self {
        Self(vec![error])
    }
}

impl fmt::Display for ReadErrors {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, error) in self.0.iter().enumerate() {
            if index > 0 {
                formatter.write_str("; ")?;
            }
            write!(formatter, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ReadErrors {}

fn renamed(original: &str, normalised: &str) -> String {
    if original == normalised {
        String::new()
    } else {
        format!(" (\"{normalised}\")")
    }
}

/// Failure to load a [`crate::config::GeneratorConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("could not read configuration at {path}: {source}")]
    Read {
        /// Path that failed.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid TOML for the expected schema.
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}
