//! Table view engine: filter then sort, as a pure recomputation.
//!
//! The surrounding shell owns all state (current query, sort column,
//! direction) and re-invokes [`TableView::apply`] on every data refresh,
//! filter keystroke, or sort-header click. Each call is self-contained:
//! no I/O, no shared state, no mutation of the source collection.
//!
//! Sort order:
//! 1. Primary: the selected column's coerced value (string, number, date,
//!    or ip semantics per the column kind)
//! 2. Ties: input order preserved (stable sort)
//!
//! Descending inverts the key comparison, never the tiebreak, so ties keep
//! input order in both directions.

use crate::column::{ColumnSchema, SortKey};
use crate::record::{search_text, Record};
use rayon::prelude::*;

/// Minimum number of records before enabling parallel sorting. Below this
/// threshold, sequential sorting is faster due to thread overhead.
pub const PARALLEL_THRESHOLD: usize = 10_000;

/// Sort direction for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// The (column, direction) pair controlling current ordering.
///
/// `column = None` means no sort: the filtered collection keeps its
/// original relative order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortDirective {
    pub column: Option<usize>,
    pub direction: SortDirection,
}

impl SortDirective {
    /// No sorting; input order is preserved.
    pub fn none() -> Self {
        Self::default()
    }

    /// Ascending sort on the given column.
    pub fn ascending(column: usize) -> Self {
        Self {
            column: Some(column),
            direction: SortDirection::Ascending,
        }
    }

    /// Descending sort on the given column.
    pub fn descending(column: usize) -> Self {
        Self {
            column: Some(column),
            direction: SortDirection::Descending,
        }
    }

    /// Apply a sort-header click: selecting the current column flips the
    /// direction, selecting a new column resets it to ascending.
    pub fn toggle(&mut self, column: usize) {
        if self.column == Some(column) {
            self.direction = self.direction.flipped();
        } else {
            self.column = Some(column);
            self.direction = SortDirection::Ascending;
        }
    }
}

/// Filter and sort configuration for one table instance.
#[derive(Debug, Clone, Default)]
pub struct TableView {
    /// Free-text query, matched case-insensitively as a substring of each
    /// record's search text. Empty or whitespace matches everything.
    pub query: String,
    /// Current sort directive.
    pub sort: SortDirective,
}

impl TableView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the filter query.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Set the sort directive.
    pub fn with_sort(mut self, sort: SortDirective) -> Self {
        self.sort = sort;
        self
    }

    /// Produce the ordered, filtered subset of `records` to render.
    ///
    /// The source collection is never mutated; retained records are cloned
    /// into a new view. A sort column outside the schema preserves the
    /// filtered order, and malformed values degrade sort position via the
    /// per-kind coercion fallbacks rather than failing.
    pub fn apply(&self, records: &[Record], schema: &ColumnSchema) -> Vec<Record> {
        let rows = self.filter(records);

        let column = match self.sort.column.and_then(|index| schema.get(index)) {
            Some(column) => column,
            None => return rows,
        };
        let descending = self.sort.direction == SortDirection::Descending;

        // Pre-compute sort keys once so comparisons are cheap, then sort
        // the keyed rows. Both sort_by and par_sort_by are stable, which
        // keeps tied rows in input order.
        let mut keyed: Vec<(SortKey, Record)> = if rows.len() >= PARALLEL_THRESHOLD {
            rows.into_par_iter()
                .map(|rec| (column.sort_key(&rec), rec))
                .collect()
        } else {
            rows.into_iter()
                .map(|rec| (column.sort_key(&rec), rec))
                .collect()
        };

        let compare = |a: &(SortKey, Record), b: &(SortKey, Record)| {
            let ordering = a.0.compare(&b.0);
            if descending {
                ordering.reverse()
            } else {
                ordering
            }
        };

        if keyed.len() >= PARALLEL_THRESHOLD {
            keyed.par_sort_by(compare);
        } else {
            keyed.sort_by(compare);
        }

        keyed.into_iter().map(|(_, rec)| rec).collect()
    }

    fn filter(&self, records: &[Record]) -> Vec<Record> {
        let needle = self.query.trim().to_lowercase();
        if needle.is_empty() {
            return records.to_vec();
        }
        records
            .iter()
            .filter(|rec| search_text(rec).contains(&needle))
            .cloned()
            .collect()
    }
}
