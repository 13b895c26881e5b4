//! Two-column table output.

use std::borrow::Cow;
use std::io;

use csv::{QuoteStyle, WriterBuilder};

use crate::error::OutputError;
use crate::models::config::{OutputConfig, SeparatorPolicy};

use super::FieldRow;

/// Write a header row and one row per field, in order.
pub fn write_csv<W: io::Write>(
    rows: &[FieldRow],
    writer: W,
    config: &OutputConfig,
) -> Result<(), OutputError> {
    if !config.delimiter.is_ascii() {
        return Err(OutputError::Delimiter(config.delimiter));
    }
    let delimiter = config.delimiter as u8;

    let mut wtr = WriterBuilder::new()
        .delimiter(delimiter)
        .quote_style(QuoteStyle::Necessary)
        .from_writer(writer);

    wtr.write_record([config.key_header.as_str(), config.value_header.as_str()])?;

    for (key, value) in rows {
        let key = sanitize(key, config);
        let value = sanitize(value, config);
        wtr.write_record([&*key, &*value])?;
    }

    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Render the table into a string.
pub fn to_csv_string(rows: &[FieldRow], config: &OutputConfig) -> Result<String, OutputError> {
    let mut buf = Vec::new();
    write_csv(rows, &mut buf, config)?;
    String::from_utf8(buf).map_err(|_| OutputError::Utf8)
}

fn sanitize<'s>(text: &'s str, config: &OutputConfig) -> Cow<'s, str> {
    match config.separator_policy {
        SeparatorPolicy::Strip if text.contains(config.delimiter) => {
            Cow::Owned(text.replace(config.delimiter, ""))
        }
        _ => Cow::Borrowed(text),
    }
}
