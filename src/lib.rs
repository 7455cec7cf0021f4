// Clippy allows for the whole crate
#![allow(clippy::should_implement_trait)]

//! Vantage: inventory view toolkit
//!
//! This library provides the reusable core of an infrastructure-inventory
//! presentation layer: type-aware table views over loosely-typed record
//! collections, human-readable rendering of JSON documents, and CPU-range
//! allocation helpers.
//!
//! # Features
//!
//! - **Table views**: substring filtering plus stable, type-aware sorting
//!   (string, number, date, ip) driven by configurable column schemas
//! - **Structured rendering**: deterministic YAML-like or pretty-JSON output
//!   for inspecting API payloads
//! - **Range allocation**: partition `[0, end]` into fixed-size chunks and
//!   expand range tokens back into sorted id sets
//!
//! # Example
//!
//! ```rust
//! use vantage_inventory::{column::ColumnSchema, record, view::{SortDirective, TableView}};
//!
//! let records = record::parse_records(
//!     r#"[{"hostname": "web-2", "ip": "10.0.0.10"}, {"hostname": "web-1", "ip": "10.0.0.2"}]"#,
//! ).unwrap();
//!
//! let schema = ColumnSchema::servers();
//! let view = TableView::new().with_sort(SortDirective::ascending(1));
//! let rows = view.apply(&records, &schema);
//!
//! assert_eq!(rows[0]["ip"], "10.0.0.2");
//! ```

pub mod column;
pub mod encode;
pub mod generate;
pub mod range;
pub mod record;
pub mod view;

// Re-export commonly used types
pub use column::{ColumnDescriptor, ColumnSchema, ValueKind};
pub use encode::{encode, RenderFormat};
pub use range::{chunk, expand, RangeError};
pub use record::{parse_records, read_records, Record, RecordError};
pub use view::{SortDirection, SortDirective, TableView};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::column::{ColumnDescriptor, ColumnSchema, Extract, ValueKind};
    pub use crate::encode::{encode, RenderFormat};
    pub use crate::range::{chunk, expand, RangeError};
    pub use crate::record::{parse_records, read_records, Record, RecordError};
    pub use crate::view::{SortDirection, SortDirective, TableView};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_basic_workflow() {
        use crate::column::ColumnSchema;
        use crate::record::parse_records;
        use crate::view::{SortDirective, TableView};

        let content = r#"[
            {"hostname": "db-1", "ip": "10.0.0.9", "status": "ready"},
            {"hostname": "web-1", "ip": "10.0.0.2", "status": "ready"}
        ]"#;
        let records = parse_records(content).unwrap();

        let view = TableView::new()
            .with_query("web")
            .with_sort(SortDirective::ascending(0));
        let rows = view.apply(&records, &ColumnSchema::servers());

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["hostname"], "web-1");
    }

    #[test]
    fn test_allocation_workflow() {
        use crate::range::{chunk, expand};

        let ranges = chunk(7, 4).unwrap();
        assert_eq!(ranges, vec!["0-3", "4-7"]);

        let ids = expand(&ranges);
        assert_eq!(ids, (0..=7).collect::<Vec<u64>>());
    }
}
