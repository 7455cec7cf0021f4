//! Column schemas: how each table column extracts and orders its values.
//!
//! Schemas are deployment-time data, not code. Two built-ins replicate the
//! stock compute-unit and server tables, and arbitrary schemas load from
//! JSON files (an array of column descriptors). A column's index is its
//! position in the schema; nothing assumes a fixed column count.

use crate::record::{self, Record, RecordError};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Declared value kind of a column, driving sort-key coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    String,
    Number,
    Date,
    Ip,
}

/// Rule deriving a column's display text from a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Extract {
    /// A top-level field, rendered as display text.
    Field(String),
    /// An entry of the record's tag mapping.
    Tag(String),
    /// The compact `k=v` rendering of the whole tag mapping.
    Tags,
    /// Several fields joined with a separator, `-` substituted for
    /// missing values.
    Join {
        fields: Vec<String>,
        separator: String,
    },
}

impl Extract {
    /// Derive the display text for one record. Missing data degrades to
    /// an empty string, never an error.
    pub fn display_text(&self, rec: &Record) -> String {
        match self {
            Extract::Field(name) => record::field_text(rec, name),
            Extract::Tag(key) => record::tag_value(rec, key).unwrap_or_default(),
            Extract::Tags => record::compact_tags(rec),
            Extract::Join { fields, separator } => fields
                .iter()
                .map(|name| {
                    let text = record::field_text(rec, name);
                    if text.is_empty() {
                        "-".to_string()
                    } else {
                        text
                    }
                })
                .collect::<Vec<_>>()
                .join(separator),
        }
    }
}

/// Static metadata describing one displayable column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub label: String,
    pub extract: Extract,
    pub kind: ValueKind,
}

impl ColumnDescriptor {
    fn field(label: &str, kind: ValueKind) -> Self {
        Self {
            label: label.to_string(),
            extract: Extract::Field(label.to_string()),
            kind,
        }
    }

    /// Display text for one record via this column's extraction rule.
    pub fn display_text(&self, rec: &Record) -> String {
        self.extract.display_text(rec)
    }

    /// Sort key for one record: extract, then coerce per the column kind.
    pub fn sort_key(&self, rec: &Record) -> SortKey {
        self.kind.coerce(&self.display_text(rec))
    }
}

/// An ordered set of column descriptors for one table deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnSchema {
    columns: Vec<ColumnDescriptor>,
}

impl ColumnSchema {
    /// Build a schema from explicit descriptors.
    pub fn new(columns: Vec<ColumnDescriptor>) -> Self {
        Self { columns }
    }

    /// Load a schema from a JSON file containing an array of descriptors.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RecordError> {
        let file = File::open(path)?;
        let columns: Vec<ColumnDescriptor> = serde_json::from_reader(BufReader::new(file))?;
        Ok(Self { columns })
    }

    /// The stock compute-unit table (10 columns).
    pub fn compute_units() -> Self {
        Self {
            columns: vec![
                ColumnDescriptor {
                    label: "deployment_id".to_string(),
                    extract: Extract::Tag("deployment_id".to_string()),
                    kind: ValueKind::String,
                },
                ColumnDescriptor::field("compute_id", ValueKind::String),
                ColumnDescriptor {
                    label: "location".to_string(),
                    extract: Extract::Join {
                        fields: vec!["region".to_string(), "zone".to_string()],
                        separator: "-".to_string(),
                    },
                    kind: ValueKind::String,
                },
                ColumnDescriptor::field("hostname", ValueKind::String),
                ColumnDescriptor::field("ip", ValueKind::Ip),
                ColumnDescriptor::field("cpu_count", ValueKind::Number),
                ColumnDescriptor::field("cpu_range", ValueKind::String),
                ColumnDescriptor::field("ports_range", ValueKind::String),
                ColumnDescriptor::field("started_at", ValueKind::Date),
                ColumnDescriptor::field("status", ValueKind::String),
            ],
        }
    }

    /// The stock server table (11 columns).
    pub fn servers() -> Self {
        Self {
            columns: vec![
                ColumnDescriptor::field("hostname", ValueKind::String),
                ColumnDescriptor::field("ip", ValueKind::Ip),
                ColumnDescriptor::field("user_id", ValueKind::String),
                ColumnDescriptor::field("region", ValueKind::String),
                ColumnDescriptor::field("zone", ValueKind::String),
                ColumnDescriptor::field("cpu_count", ValueKind::Number),
                ColumnDescriptor::field("mem_gb", ValueKind::Number),
                ColumnDescriptor::field("disk_count", ValueKind::Number),
                ColumnDescriptor::field("disk_size_gb", ValueKind::Number),
                ColumnDescriptor {
                    label: "tags".to_string(),
                    extract: Extract::Tags,
                    kind: ValueKind::String,
                },
                ColumnDescriptor::field("status", ValueKind::String),
            ],
        }
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if the schema has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Get a column descriptor by index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&ColumnDescriptor> {
        self.columns.get(index)
    }

    /// Iterate over all column descriptors in order.
    pub fn columns(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.columns.iter()
    }

    /// Display text for one record and column, empty when the index is out
    /// of range.
    pub fn display_text(&self, rec: &Record, index: usize) -> String {
        self.get(index)
            .map(|c| c.display_text(rec))
            .unwrap_or_default()
    }
}

/// A comparable sort key coerced from a column's display text.
///
/// All keys produced for one sort share a variant because they come from a
/// single column; the cross-variant arm exists only to keep the comparison
/// total.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Number(f64),
    Time(i64),
    Text(String),
}

impl SortKey {
    /// Three-way comparison.
    #[inline]
    pub fn compare(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Time(a), SortKey::Time(b)) => a.cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Number(_) => 0,
            SortKey::Time(_) => 1,
            SortKey::Text(_) => 2,
        }
    }
}

impl ValueKind {
    /// Coerce display text into a sort key. Every kind has a defined
    /// fallback for malformed values, so coercion never fails:
    /// unparseable numbers sink to negative infinity, unparseable dates
    /// to epoch zero.
    pub fn coerce(&self, text: &str) -> SortKey {
        let trimmed = text.trim();
        match self {
            ValueKind::Number => {
                let n = trimmed
                    .parse::<f64>()
                    .ok()
                    .filter(|n| n.is_finite())
                    .unwrap_or(f64::NEG_INFINITY);
                SortKey::Number(n)
            }
            ValueKind::Date => SortKey::Time(parse_timestamp_millis(trimmed).unwrap_or(0)),
            ValueKind::Ip => SortKey::Text(pad_octets(trimmed)),
            ValueKind::String => SortKey::Text(trimmed.to_lowercase()),
        }
    }
}

/// Zero-pad each dotted-quad octet to 3 digits so lexicographic order
/// matches numeric order without full address parsing.
fn pad_octets(ip: &str) -> String {
    ip.split('.')
        .map(|octet| format!("{:0>3}", octet))
        .collect::<Vec<_>>()
        .join(".")
}

/// Parse a timestamp into epoch milliseconds. Accepts RFC 3339 plus the
/// space-separated and date-only forms the inventory API emits.
fn parse_timestamp_millis(text: &str) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.timestamp_millis());
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis());
    }
    None
}
