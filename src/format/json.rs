//! `.json` reader.
//!
//! The root must be an object. Object-valued fields become plural variant
//! sets; scalars become plain strings; anything else is an empty string.
//! Root fields are visited one by one so a repeated name reaches the
//! duplicate check instead of overwriting the earlier field.

use std::fmt;

use lexicon_common::{KeyValueTable, PluralStrings, Value};
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde_json::Value as Json;

use super::{FileFormat, ReadOrigin, TableBuilder};
use crate::error::ReadErrors;

const FORMAT: FileFormat = FileFormat::Json;

/// Root object fields in document order, repeats included.
struct RootFields(Vec<(String, Json)>);

impl<'de> Deserialize<'de> for RootFields {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RootFieldsVisitor)
    }
}

struct RootFieldsVisitor;

impl<'de> Visitor<'de> for RootFieldsVisitor {
    type Value = RootFields;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a top-level object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut fields = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(field) = map.next_entry::<String, Json>()? {
            fields.push(field);
        }
        Ok(RootFields(fields))
    }
}

pub(super) fn read(text: &str, origin: &ReadOrigin<'_>) -> Result<KeyValueTable, ReadErrors> {
    let RootFields(fields) = serde_json::from_str::<RootFields>(text)
        .map_err(|error| origin.parse_error(FORMAT, error))?;

    let mut builder = TableBuilder::new(FORMAT, origin);
    for (name, field) in fields {
        builder.insert(&name, to_value(field));
    }
    builder.finish()
}

fn to_value(field: Json) -> Value {
    match field {
        Json::Object(variants) => Value::Plural(PluralStrings::new(
            variants
                .into_iter()
                .map(|(name, text)| (name, scalar_text(text))),
        )),
        Json::Array(_) => Value::empty(),
        scalar => Value::Plain(scalar_text(scalar)),
    }
}

fn scalar_text(value: Json) -> String {
    match value {
        Json::String(text) => text,
        Json::Null => String::new(),
        other => other.to_string(),
    }
}
