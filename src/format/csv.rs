//! `.csv` reader: a header row followed by `key,value` records.

use ::csv::ReaderBuilder;
use lexicon_common::{KeyValueTable, Value};

use super::{FileFormat, ReadOrigin, TableBuilder};
use crate::error::ReadErrors;

const FORMAT: FileFormat = FileFormat::Csv;

pub(super) fn read(text: &str, origin: &ReadOrigin<'_>) -> Result<KeyValueTable, ReadErrors> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());
    let mut builder = TableBuilder::new(FORMAT, origin);

    for record in reader.records() {
        let record = record.map_err(|error| origin.parse_error(FORMAT, error))?;
        let (Some(key), Some(value)) = (record.get(0), record.get(1)) else {
            let line = record.position().map_or(0, ::csv::Position::line);
            return Err(origin
                .parse_error(
                    FORMAT,
                    format!(
                        "line {line} has {} field(s); expected a key and a value",
                        record.len()
                    ),
                )
                .into());
        };
        builder.insert(key, Value::plain(value));
    }

    builder.finish()
}
