//! Generator configuration loaded from TOML.
//!
//! Every setting is optional. Missing or whitespace-only values resolve to
//! the built-in defaults, so a templated `lexicon.toml` containing
//! `namespace = ""` behaves like one that omits the key.

use camino::Utf8Path;
use serde::Deserialize;

use crate::error::ConfigError;

/// Namespace used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "lexicon.generated";
/// Tag reported by the default realisation when none is configured.
pub const DEFAULT_INVARIANT_TAG: &str = "und";
/// Plural variant exposed by single-string accessors when none is
/// configured.
pub const DEFAULT_PLURAL_VARIANT: &str = "other";

/// Settings shared by every family in a run.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Dotted namespace the generated items are nested in.
    pub namespace: Option<String>,
    /// Locale tag of the default realisation.
    pub invariant_tag: Option<String>,
    /// Preferred plural variant for single-string accessors.
    pub plural_variant: Option<String>,
}

impl GeneratorConfig {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use lexicon::config::GeneratorConfig;
    ///
    /// let config = GeneratorConfig::from_toml_str("namespace = \"app.i18n\"\n").unwrap();
    /// assert_eq!(config.namespace(), "app.i18n");
    /// assert_eq!(config.invariant_tag(), "und");
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses the configuration file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read and
    /// [`ConfigError::Parse`] when its contents are invalid.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Configured namespace, or [`DEFAULT_NAMESPACE`].
    #[must_use]
    pub fn namespace(&self) -> &str {
        normalise_setting(self.namespace.as_deref()).unwrap_or(DEFAULT_NAMESPACE)
    }

    /// Configured invariant tag, or [`DEFAULT_INVARIANT_TAG`].
    #[must_use]
    pub fn invariant_tag(&self) -> &str {
        normalise_setting(self.invariant_tag.as_deref()).unwrap_or(DEFAULT_INVARIANT_TAG)
    }

    /// Configured plural variant, or [`DEFAULT_PLURAL_VARIANT`].
    #[must_use]
    pub fn plural_variant(&self) -> &str {
        normalise_setting(self.plural_variant.as_deref()).unwrap_or(DEFAULT_PLURAL_VARIANT)
    }
}

fn normalise_setting(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|trimmed| !trimmed.is_empty())
}
