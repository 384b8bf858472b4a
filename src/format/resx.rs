//! `.resx` reader.
//!
//! Every `<data name="…">` child of the document root is an entry whose
//! value is the text of its `<value>` element. Headers, metadata, assembly
//! references and comments are ignored; typed resources keep their raw
//! text.

use lexicon_common::{KeyValueTable, Value};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::{FileFormat, ReadOrigin, TableBuilder};
use crate::error::{ReadError, ReadErrors};

const FORMAT: FileFormat = FileFormat::Resx;

#[derive(Default)]
struct PendingEntry {
    name: String,
    value: String,
    capturing: bool,
}

pub(super) fn read(text: &str, origin: &ReadOrigin<'_>) -> Result<KeyValueTable, ReadErrors> {
    let mut reader = Reader::from_str(text);
    let mut builder = TableBuilder::new(FORMAT, origin);
    let mut depth: usize = 0;
    let mut seen_root = false;
    let mut pending: Option<PendingEntry> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|error| origin.parse_error(FORMAT, error))?;
        match event {
            Event::Start(element) => {
                if depth == 0 {
                    if seen_root {
                        return Err(origin.parse_error(FORMAT, "multiple root elements").into());
                    }
                    seen_root = true;
                } else if depth == 1 && element.name().as_ref() == b"data" {
                    pending = Some(PendingEntry {
                        name: data_name(&element, origin)?,
                        ..PendingEntry::default()
                    });
                } else if depth == 2 && element.name().as_ref() == b"value" {
                    if let Some(entry) = pending.as_mut() {
                        entry.capturing = true;
                    }
                }
                depth += 1;
            }
            Event::Empty(element) => {
                if depth == 0 {
                    if seen_root {
                        return Err(origin.parse_error(FORMAT, "multiple root elements").into());
                    }
                    seen_root = true;
                } else if depth == 1 && element.name().as_ref() == b"data" {
                    let name = data_name(&element, origin)?;
                    builder.insert(&name, Value::empty());
                }
            }
            Event::Text(content) => {
                if let Some(entry) = pending.as_mut().filter(|entry| entry.capturing) {
                    let unescaped = content
                        .unescape()
                        .map_err(|error| origin.parse_error(FORMAT, error))?;
                    entry.value.push_str(&unescaped);
                }
            }
            Event::CData(content) => {
                if let Some(entry) = pending.as_mut().filter(|entry| entry.capturing) {
                    entry.value.push_str(&String::from_utf8_lossy(&content));
                }
            }
            Event::End(element) => {
                depth = depth.saturating_sub(1);
                if depth == 2 && element.name().as_ref() == b"value" {
                    if let Some(entry) = pending.as_mut() {
                        entry.capturing = false;
                    }
                } else if depth == 1 && element.name().as_ref() == b"data" {
                    if let Some(entry) = pending.take() {
                        builder.insert(&entry.name, Value::Plain(entry.value));
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !seen_root {
        return Err(origin.parse_error(FORMAT, "document has no root element").into());
    }
    if depth != 0 {
        return Err(origin.parse_error(FORMAT, "unexpected end of document").into());
    }
    builder.finish()
}

fn data_name(element: &BytesStart<'_>, origin: &ReadOrigin<'_>) -> Result<String, ReadError> {
    for attribute in element.attributes() {
        let attribute = attribute.map_err(|error| origin.parse_error(FORMAT, error))?;
        if attribute.key.as_ref() == b"name" {
            let value = attribute
                .unescape_value()
                .map_err(|error| origin.parse_error(FORMAT, error))?;
            return Ok(value.into_owned());
        }
    }
    Err(origin.parse_error(FORMAT, "`data` element without a `name` attribute"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::tests::{ORIGIN, duplicate_originals};
    use rstest::rstest;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<root>
  <resheader name="resmimetype">
    <value>text/microsoft-resx</value>
  </resheader>
  <data name="hello" xml:space="preserve">
    <value>Hello &amp; welcome</value>
    <comment>Shown on start-up</comment>
  </data>
  <data name="goodbye.short" xml:space="preserve">
    <value>Bye</value>
  </data>
  <data name="blank" />
  <data name="cdata"><value><![CDATA[<b>bold</b>]]></value></data>
</root>"#;

    fn parse(text: &str) -> Result<KeyValueTable, ReadErrors> {
        read(text, &ORIGIN)
    }

    #[rstest]
    fn reads_data_nodes_in_order() {
        let table = parse(SAMPLE).unwrap_or_else(|error| panic!("parse failed: {error}"));

        assert_eq!(
            table.keys().collect::<Vec<_>>(),
            vec!["hello", "goodbye_short", "blank", "cdata"]
        );
        assert_eq!(table.get("hello"), Some(&Value::plain("Hello & welcome")));
        assert_eq!(table.get("goodbye_short"), Some(&Value::plain("Bye")));
        assert_eq!(table.get("blank"), Some(&Value::plain("")));
        assert_eq!(table.get("cdata"), Some(&Value::plain("<b>bold</b>")));
    }

    #[rstest]
    fn data_without_value_is_empty() {
        let table = parse(r#"<root><data name="x"><comment>c</comment></data></root>"#)
            .unwrap_or_else(|error| panic!("parse failed: {error}"));

        assert_eq!(table.get("x"), Some(&Value::plain("")));
    }

    #[rstest]
    fn detects_normalised_duplicates() {
        let text = r#"<root>
            <data name="greeting-one"><value>a</value></data>
            <data name="greeting.one"><value>b</value></data>
        </root>"#;

        let error = parse(text).err().unwrap_or_else(|| panic!("expected duplicate"));
        assert_eq!(duplicate_originals(&error), vec!["greeting.one"]);
    }

    #[rstest]
    fn reports_exact_repeats_and_empty_data_nodes() {
        let text = r#"<root>
            <data name="a"><value>1</value></data>
            <data name="a" />
            <data name="a"><value>3</value></data>
        </root>"#;

        let error = parse(text).err().unwrap_or_else(|| panic!("expected duplicates"));
        assert_eq!(duplicate_originals(&error), vec!["a", "a"]);
    }

    #[rstest]
    #[case::unclosed("<root><data name=\"a\"><value>x</value>")]
    #[case::mismatched("<root><data name=\"a\"></value></root>")]
    #[case::nameless("<root><data><value>x</value></data></root>")]
    #[case::empty("")]
    fn rejects_malformed_documents(#[case] text: &str) {
        let error = parse(text).err().unwrap_or_else(|| panic!("expected parse error"));
        assert!(
            matches!(error.as_slice(), [ReadError::Parse { .. }]),
            "got {error}"
        );
    }
}
