//! Errors that stop a run before or around generation.
//!
//! Problems inside a family are diagnostics, not errors; these variants
//! cover the command's own inputs.

use std::path::PathBuf;

use camino::Utf8PathBuf;
use lexicon::ConfigError;
use thiserror::Error;

/// Exit status for invalid arguments, configuration or inputs.
pub const USAGE_EXIT_CODE: i32 = 2;

/// Failures of the command itself.
#[derive(Debug, Error)]
pub enum CliError {
    /// The configuration file could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An input path does not exist.
    #[error("input {path} does not exist")]
    MissingInput {
        /// The missing path.
        path: Utf8PathBuf,
    },

    /// A directory input could not be turned into a search pattern.
    #[error("cannot search {path}: {source}")]
    Pattern {
        /// The directory input.
        path: Utf8PathBuf,
        /// Pattern error.
        #[source]
        source: glob::PatternError,
    },

    /// Walking a directory input failed.
    #[error("cannot search {path}: {source}")]
    Walk {
        /// The directory input.
        path: Utf8PathBuf,
        /// Walk error.
        #[source]
        source: glob::GlobError,
    },

    /// A discovered file has a non UTF-8 path.
    #[error("path {} is not valid UTF-8", .path.display())]
    NonUtf8Path {
        /// The offending path.
        path: PathBuf,
    },

    /// The output directory could not be created.
    #[error("cannot create output directory {path}: {source}")]
    OutputDir {
        /// The output directory.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl CliError {
    /// Process exit status for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        USAGE_EXIT_CODE
    }
}

/// Result alias for the command.
pub type Result<T> = std::result::Result<T, CliError>;
