//! Translation values and the per-file key table.

use std::collections::HashMap;

/// Replaces `-` and `.` with `_` so keys become identifier-friendly.
///
/// Normalisation is idempotent.
///
/// ```
/// use lexicon_common::value::normalise_key;
///
/// assert_eq!(normalise_key("greeting-one.short"), "greeting_one_short");
/// assert_eq!(normalise_key(&normalise_key("a-b")), "a_b");
/// ```
#[must_use]
pub fn normalise_key(raw: &str) -> String {
    raw.replace(['-', '.'], "_")
}

/// Plural variants of one entry, keyed by category name.
///
/// Variant names are unique; iteration follows the order the variants were
/// read in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PluralStrings {
    variants: Vec<(String, String)>,
}

impl PluralStrings {
    /// Builds a variant set, keeping the last text for a repeated name at the
    /// position of its first occurrence.
    #[must_use]
    pub fn new(variants: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut collected: Vec<(String, String)> = Vec::new();
        for (name, text) in variants {
            match collected.iter_mut().find(|(existing, _)| *existing == name) {
                Some(slot) => slot.1 = text,
                None => collected.push((name, text)),
            }
        }
        Self {
            variants: collected,
        }
    }

    /// Returns the text of `name`, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.variants
            .iter()
            .find(|(candidate, _)| candidate == name)
            .map(|(_, text)| text.as_str())
    }

    /// Iterates over `(name, text)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.variants
            .iter()
            .map(|(name, text)| (name.as_str(), text.as_str()))
    }

    /// Number of variants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    /// Whether no variants are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Picks the text a single-string accessor exposes: `preferred` when
    /// present, else the first variant, else the empty string.
    #[must_use]
    pub fn select(&self, preferred: &str) -> &str {
        self.get(preferred)
            .or_else(|| self.variants.first().map(|(_, text)| text.as_str()))
            .unwrap_or_default()
    }
}

/// A translation entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    /// A single string.
    Plain(String),
    /// Several strings keyed by plural category.
    Plural(PluralStrings),
}

impl Value {
    /// The empty plain string substituted for missing locale keys.
    #[must_use]
    pub const fn empty() -> Self {
        Self::Plain(String::new())
    }

    /// Builds a plain value.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self::Plain(text.into())
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::empty()
    }
}

/// Attempted to insert a key that is already present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Occupied {
    /// The rejected key.
    pub key: String,
}

/// Insertion-ordered map from normalised key to [`Value`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyValueTable {
    entries: Vec<(String, Value)>,
    index: HashMap<String, usize>,
}

impl KeyValueTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a key that must not already exist.
    ///
    /// # Errors
    ///
    /// Returns [`Occupied`] when `key` is already present; the table is left
    /// unchanged.
    pub fn try_insert(&mut self, key: String, value: Value) -> Result<(), Occupied> {
        if self.index.contains_key(&key) {
            return Err(Occupied { key });
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        Ok(())
    }

    /// Inserts or replaces `key`, returning the previous value.
    ///
    /// A replaced key keeps its original position.
    pub fn insert(&mut self, key: String, value: Value) -> Option<Value> {
        if let Some(slot) = self
            .index
            .get(&key)
            .and_then(|position| self.entries.get_mut(*position))
        {
            return Some(std::mem::replace(&mut slot.1, value));
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        None
    }

    /// Returns the value stored for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.index
            .get(key)
            .and_then(|position| self.entries.get(*position))
            .map(|(_, value)| value)
    }

    /// Whether `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
