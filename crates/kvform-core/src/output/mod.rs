//! Serialization of resolved fields.

mod table;

pub use table::{to_csv_string, write_csv};

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::OutputError;

/// Field name to field value, iterated in insertion order.
///
/// Re-inserting an existing name replaces its value in place.
pub type FieldMap = IndexMap<String, String>;

/// One output row: field name and field value.
///
/// Row sequences may repeat a name; each occurrence is emitted.
pub type FieldRow = (String, String);

/// Rows of a field map, in map order.
pub fn rows_from_map(fields: FieldMap) -> Vec<FieldRow> {
    fields.into_iter().collect()
}

#[derive(Serialize)]
struct JsonRow<'a> {
    key: &'a str,
    value: &'a str,
}

/// Render rows as `key:value` lines.
pub fn format_text(rows: &[FieldRow]) -> String {
    let mut output = String::new();
    for (key, value) in rows {
        output.push_str(&format!("{}:{}\n", key, value));
    }
    output
}

/// Render rows as a JSON array of `{"key", "value"}` objects, preserving order.
pub fn to_json(rows: &[FieldRow]) -> Result<String, OutputError> {
    let rows: Vec<JsonRow<'_>> = rows
        .iter()
        .map(|(key, value)| JsonRow { key, value })
        .collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rows(entries: &[(&str, &str)]) -> Vec<FieldRow> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_format_text() {
        let rows = rows(&[("Invoice Number", "INV-0042"), ("Total", "1,234.56")]);

        assert_eq!(
            format_text(&rows),
            "Invoice Number:INV-0042\nTotal:1,234.56\n"
        );
    }

    #[test]
    fn test_json_keeps_order_and_repeats() {
        let rows = rows(&[("b", "1"), ("a", "2"), ("b", "3")]);

        let json: serde_json::Value = serde_json::from_str(&to_json(&rows).unwrap()).unwrap();

        assert_eq!(
            json,
            serde_json::json!([
                {"key": "b", "value": "1"},
                {"key": "a", "value": "2"},
                {"key": "b", "value": "3"}
            ])
        );
    }

    #[test]
    fn test_rows_from_map_follow_insertion_order() {
        let mut fields = FieldMap::new();
        fields.insert("Date".to_string(), "2024-01-01".to_string());
        fields.insert("Total".to_string(), "99".to_string());
        fields.insert("Date".to_string(), "2024-02-02".to_string());

        assert_eq!(
            rows_from_map(fields),
            rows(&[("Date", "2024-02-02"), ("Total", "99")])
        );
    }
}
