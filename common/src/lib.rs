//! Shared building blocks for the Lexicon generator: diagnostics, the
//! diagnostic-carrying pipeline value, locale validation and the
//! translation value model.

pub mod carrier;
pub mod diagnostics;
pub mod locale;
pub mod value;

pub use carrier::{DiagnosticSink, StageError, Staged};
pub use diagnostics::{Diagnostic, DiagnosticCode, Severity, has_errors};
pub use locale::{canonical_locale, is_known_locale};
pub use value::{KeyValueTable, Occupied, PluralStrings, Value, normalise_key};
