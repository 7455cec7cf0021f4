//! Inventory record representation and JSON record I/O.
//!
//! Records are schema-loose: any field may be absent, and field values may
//! be scalars, arrays, or nested tag mappings. The map type preserves
//! insertion order, which fixes both the search-text field order and the
//! key order of rendered output.

use serde_json::{Map, Value};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use thiserror::Error;

/// One displayable entity (compute unit or server) as a loosely-typed
/// field mapping. Never mutated by the view engine.
pub type Record = Map<String, Value>;

/// Field name under which tag mappings live.
pub const TAGS_FIELD: &str = "tags";

/// Maximum length of the compact tag rendering before truncation.
const COMPACT_TAGS_LIMIT: usize = 60;

/// Errors that can occur while loading record collections.
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid record format: {0}")]
    InvalidFormat(String),
}

pub type Result<T> = std::result::Result<T, RecordError>;

/// Read a record collection from a JSON file.
///
/// The document must be a JSON array of objects.
pub fn read_records<P: AsRef<Path>>(path: P) -> Result<Vec<Record>> {
    let file = File::open(path)?;
    read_records_from(BufReader::new(file))
}

/// Read a record collection from any readable source.
pub fn read_records_from<R: Read>(reader: R) -> Result<Vec<Record>> {
    let value: Value = serde_json::from_reader(reader)?;
    records_from_value(value)
}

/// Parse a record collection from a string (useful for testing).
pub fn parse_records(content: &str) -> Result<Vec<Record>> {
    let value: Value = serde_json::from_str(content)?;
    records_from_value(value)
}

fn records_from_value(value: Value) -> Result<Vec<Record>> {
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(RecordError::InvalidFormat(format!(
                "expected a JSON array of records, got {}",
                type_name(&other)
            )))
        }
    };

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match item {
            Value::Object(map) => records.push(map),
            other => {
                return Err(RecordError::InvalidFormat(format!(
                    "element {} is not an object, got {}",
                    index,
                    type_name(&other)
                )))
            }
        }
    }
    Ok(records)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Display text for a JSON value: scalars stringified, arrays of scalars
/// joined with commas. Returns `None` for null and nested mappings.
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(value_text)
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Object(_) => None,
    }
}

/// Display text for a top-level field, empty when absent or null.
pub fn field_text(record: &Record, field: &str) -> String {
    record
        .get(field)
        .and_then(value_text)
        .unwrap_or_default()
}

/// Look up a tag value, joining array entries with commas.
pub fn tag_value(record: &Record, key: &str) -> Option<String> {
    let tags = record.get(TAGS_FIELD)?.as_object()?;
    value_text(tags.get(key)?)
}

/// Compact `k=v` rendering of a record's tags for narrow table cells,
/// truncated with an ellipsis past 60 characters.
pub fn compact_tags(record: &Record) -> String {
    let tags = match record.get(TAGS_FIELD).and_then(Value::as_object) {
        Some(tags) => tags,
        None => return String::new(),
    };

    let text = tags
        .iter()
        .map(|(k, v)| format!("{}={}", k, value_text(v).unwrap_or_default()))
        .collect::<Vec<_>>()
        .join(" ");

    if text.chars().count() > COMPACT_TAGS_LIMIT {
        let mut truncated: String = text.chars().take(COMPACT_TAGS_LIMIT).collect();
        truncated.push('…');
        truncated
    } else {
        text
    }
}

/// Build the lowercase search string a filter query is matched against.
///
/// Top-level fields contribute in insertion order: scalar fields as their
/// display text, arrays joined with commas, and tag-like nested mappings
/// flattened to `key:value` entries. Null and empty values contribute
/// nothing.
pub fn search_text(record: &Record) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(record.len());

    for (_, value) in record.iter() {
        match value {
            Value::Object(map) => {
                for (key, entry) in map.iter() {
                    if let Some(text) = value_text(entry) {
                        parts.push(format!("{}:{}", key, text));
                    }
                }
            }
            other => {
                if let Some(text) = value_text(other) {
                    if !text.is_empty() {
                        parts.push(text);
                    }
                }
            }
        }
    }

    parts.join(" ").to_lowercase()
}
