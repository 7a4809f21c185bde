use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{Map, Value as JsonValue};
use thiserror::Error;

use super::model::{CellValue, Column, Dataset};

/// Ways a parsed JSON document can fail to be a table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableShapeError {
    #[error("expected a JSON array of objects or an object of arrays, found {0}")]
    NotTabular(&'static str),
    #[error("row {row} is not a JSON object (found {found})")]
    RowNotObject { row: usize, found: &'static str },
    #[error("column '{column}' is not an array")]
    ColumnNotArray { column: String },
    #[error("column '{column}' has {found} values but '{first}' has {expected}")]
    RaggedColumns {
        column: String,
        found: usize,
        first: String,
        expected: usize,
    },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Read and parse a dataset file.
///
/// Expected schema (records-oriented):
///
/// ```json
/// [
///   { "village_name": "A", "pop": 10 },
///   { "village_name": "B", "pop": 20, "district": "North" }
/// ]
/// ```
///
/// An object of equal-length arrays (`{"village_name": ["A", "B"], ...}`)
/// is accepted as well. Keys missing from a record become nulls.
pub fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let root: JsonValue = serde_json::from_str(&text)
        .with_context(|| format!("parsing JSON in {}", path.display()))?;

    let dataset = dataset_from_json(&root)
        .with_context(|| format!("{} is not tabular", path.display()))?;

    log::debug!(
        "Parsed {}: {} rows x {} columns",
        path.display(),
        dataset.row_count,
        dataset.columns.len()
    );
    Ok(dataset)
}

/// Convert an already-parsed JSON document into a [`Dataset`].
pub fn dataset_from_json(root: &JsonValue) -> Result<Dataset, TableShapeError> {
    match root {
        JsonValue::Array(records) => from_records(records),
        JsonValue::Object(columns) => from_columns(columns),
        other => Err(TableShapeError::NotTabular(json_type_name(other))),
    }
}

// ---------------------------------------------------------------------------
// Records: [{...}, {...}]
// ---------------------------------------------------------------------------

fn from_records(records: &[JsonValue]) -> Result<Dataset, TableShapeError> {
    let mut rows: Vec<&Map<String, JsonValue>> = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let obj = rec.as_object().ok_or(TableShapeError::RowNotObject {
            row: i,
            found: json_type_name(rec),
        })?;
        rows.push(obj);
    }

    // Union of keys in first-seen order.
    let mut names: Vec<&String> = Vec::new();
    for obj in &rows {
        for key in obj.keys() {
            if !names.contains(&key) {
                names.push(key);
            }
        }
    }

    let columns = names
        .into_iter()
        .map(|name| {
            let values = rows
                .iter()
                .map(|obj| obj.get(name).map(json_to_cell).unwrap_or(CellValue::Null))
                .collect();
            Column::new(name.clone(), values)
        })
        .collect();

    Ok(Dataset {
        columns,
        row_count: rows.len(),
    })
}

// ---------------------------------------------------------------------------
// Columns: {"a": [...], "b": [...]}
// ---------------------------------------------------------------------------

fn from_columns(obj: &Map<String, JsonValue>) -> Result<Dataset, TableShapeError> {
    let mut columns = Vec::with_capacity(obj.len());
    let mut first: Option<(&String, usize)> = None;

    for (name, val) in obj {
        let arr = val.as_array().ok_or_else(|| TableShapeError::ColumnNotArray {
            column: name.clone(),
        })?;
        match first {
            None => first = Some((name, arr.len())),
            Some((first_name, expected)) if expected != arr.len() => {
                return Err(TableShapeError::RaggedColumns {
                    column: name.clone(),
                    found: arr.len(),
                    first: first_name.clone(),
                    expected,
                });
            }
            Some(_) => {}
        }
        columns.push(Column::new(name.clone(), arr.iter().map(json_to_cell).collect()));
    }

    Ok(Dataset {
        columns,
        row_count: first.map(|(_, n)| n).unwrap_or(0),
    })
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::Text(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::Text(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        nested => CellValue::Nested(nested.to_string()),
    }
}

fn json_type_name(val: &JsonValue) -> &'static str {
    match val {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
