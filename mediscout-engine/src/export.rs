//! CSV export of record sets.
//!
//! Nested `vitals` and `simulatedAiImageAnalysis` objects are flattened into
//! `vitals_<field>` and `aiImage_<field>` columns; any other object is kept as
//! JSON text. Column order follows the first record. Every cell is written as
//! its JSON literal, so strings are double-quoted and escaped.

use mediscout_core::MediscoutError;
use serde::Serialize;
use serde_json::{Map, Value};

pub const EXPORT_FILE_NAME: &str = "mediscout_synthetic_data.csv";

const VITALS_FIELD: &str = "vitals";
const VITALS_PREFIX: &str = "vitals_";
const IMAGE_FIELD: &str = "simulatedAiImageAnalysis";
const IMAGE_PREFIX: &str = "aiImage_";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Column {
    Plain(String),
    Nested {
        field: &'static str,
        prefix: &'static str,
        key: String,
    },
}

impl Column {
    fn header(&self) -> String {
        match self {
            Column::Plain(name) => name.clone(),
            Column::Nested { prefix, key, .. } => format!("{prefix}{key}"),
        }
    }

    fn cell(&self, row: &Map<String, Value>) -> String {
        let value = match self {
            Column::Plain(name) => row.get(name),
            Column::Nested { field, key, .. } => row.get(*field).and_then(|nested| nested.get(key)),
        };
        match value {
            None => String::new(),
            Some(Value::Null) => "\"\"".to_string(),
            Some(nested @ (Value::Object(_) | Value::Array(_))) => {
                Value::String(nested.to_string()).to_string()
            }
            Some(scalar) => scalar.to_string(),
        }
    }
}

/// Renders `rows` as CSV text with a header line and CRLF line endings.
/// Returns `None` when there is nothing to export.
pub fn export_csv<T: Serialize>(rows: &[T]) -> Result<Option<String>, MediscoutError> {
    let rows = rows
        .iter()
        .map(|row| match serde_json::to_value(row) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(MediscoutError::Serialization(
                "export rows must serialize to JSON objects".to_string(),
            )),
            Err(err) => Err(MediscoutError::Serialization(err.to_string())),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let Some(first) = rows.first() else {
        return Ok(None);
    };

    let columns = flatten_columns(first);
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(
        columns
            .iter()
            .map(Column::header)
            .collect::<Vec<_>>()
            .join(","),
    );
    for row in &rows {
        lines.push(
            columns
                .iter()
                .map(|column| column.cell(row))
                .collect::<Vec<_>>()
                .join(","),
        );
    }

    Ok(Some(lines.join("\r\n")))
}

fn flatten_columns(first: &Map<String, Value>) -> Vec<Column> {
    let mut columns = Vec::new();
    for (name, value) in first {
        let nested = match (name.as_str(), value) {
            (VITALS_FIELD, Value::Object(fields)) => Some((VITALS_FIELD, VITALS_PREFIX, fields)),
            (IMAGE_FIELD, Value::Object(fields)) => Some((IMAGE_FIELD, IMAGE_PREFIX, fields)),
            _ => None,
        };
        match nested {
            Some((field, prefix, fields)) => {
                columns.extend(fields.keys().map(|key| Column::Nested {
                    field,
                    prefix,
                    key: key.clone(),
                }));
            }
            None => columns.push(Column::Plain(name.clone())),
        }
    }
    columns
}
