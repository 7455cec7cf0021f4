//! End-to-end table view properties: filtering, type-aware sorting,
//! stability, and direction handling.

use vantage_inventory::column::{ColumnDescriptor, ColumnSchema, Extract, ValueKind};
use vantage_inventory::record::{parse_records, Record};
use vantage_inventory::view::{SortDirective, TableView};

fn units() -> Vec<Record> {
    parse_records(
        r#"[
            {"compute_id": "node-000_0-3", "hostname": "node-000", "ip": "10.0.0.2",
             "cpu_count": 4, "started_at": "2026-02-01T10:00:00Z", "status": "allocated",
             "tags": {"deployment_id": "deploy-01", "owner": "platform"}},
            {"compute_id": "node-001_0-7", "hostname": "node-001", "ip": "10.0.0.10",
             "cpu_count": 8, "started_at": "2026-01-15T09:30:00Z", "status": "free",
             "tags": {"deployment_id": "deploy-02"}},
            {"compute_id": "node-002_0-1", "hostname": "node-002", "ip": "2.0.0.1",
             "started_at": "not-a-date", "status": "free",
             "tags": {"deployment_id": "deploy-01"}}
        ]"#,
    )
    .unwrap()
}

fn ids(rows: &[Record]) -> Vec<&str> {
    rows.iter()
        .map(|r| r["compute_id"].as_str().unwrap())
        .collect()
}

#[test]
fn empty_query_returns_all_in_input_order() {
    let records = units();
    let rows = TableView::new().apply(&records, &ColumnSchema::compute_units());
    assert_eq!(ids(&rows), ids(&records));
}

#[test]
fn whitespace_query_matches_everything() {
    let records = units();
    let view = TableView::new().with_query("   ");
    let rows = view.apply(&records, &ColumnSchema::compute_units());
    assert_eq!(rows.len(), records.len());
}

#[test]
fn filter_substring_law() {
    let records = units();
    let schema = ColumnSchema::compute_units();

    // Matching records appear, non-matching are absent
    let rows = TableView::new()
        .with_query("deploy-01")
        .apply(&records, &schema);
    assert_eq!(ids(&rows), ["node-000_0-3", "node-002_0-1"]);

    let rows = TableView::new()
        .with_query("no-such-thing")
        .apply(&records, &schema);
    assert!(rows.is_empty());
}

#[test]
fn filter_is_case_insensitive() {
    let records = units();
    let rows = TableView::new()
        .with_query("ALLOCATED")
        .apply(&records, &ColumnSchema::compute_units());
    assert_eq!(ids(&rows), ["node-000_0-3"]);
}

#[test]
fn filter_reaches_flattened_tags() {
    let records = units();
    let rows = TableView::new()
        .with_query("owner:platform")
        .apply(&records, &ColumnSchema::compute_units());
    assert_eq!(ids(&rows), ["node-000_0-3"]);
}

#[test]
fn ip_kind_orders_dotted_quads_numerically() {
    let records = units();
    let view = TableView::new().with_sort(SortDirective::ascending(4));
    let rows = view.apply(&records, &ColumnSchema::compute_units());

    let addresses: Vec<&str> = rows.iter().map(|r| r["ip"].as_str().unwrap()).collect();
    assert_eq!(addresses, ["2.0.0.1", "10.0.0.2", "10.0.0.10"]);
}

#[test]
fn number_kind_sinks_missing_values_first_ascending() {
    let records = units();
    let schema = ColumnSchema::compute_units();

    // node-002 has no cpu_count, so it coerces to negative infinity
    let asc = TableView::new()
        .with_sort(SortDirective::ascending(5))
        .apply(&records, &schema);
    assert_eq!(ids(&asc), ["node-002_0-1", "node-000_0-3", "node-001_0-7"]);

    let desc = TableView::new()
        .with_sort(SortDirective::descending(5))
        .apply(&records, &schema);
    assert_eq!(ids(&desc), ["node-001_0-7", "node-000_0-3", "node-002_0-1"]);
}

#[test]
fn date_kind_coerces_unparseable_to_epoch_zero() {
    let records = units();
    let asc = TableView::new()
        .with_sort(SortDirective::ascending(8))
        .apply(&records, &ColumnSchema::compute_units());
    assert_eq!(ids(&asc), ["node-002_0-1", "node-001_0-7", "node-000_0-3"]);
}

#[test]
fn direction_toggle_reverses_distinct_keys() {
    let records = units();
    let schema = ColumnSchema::compute_units();

    let asc = TableView::new()
        .with_sort(SortDirective::ascending(3))
        .apply(&records, &schema);
    let desc = TableView::new()
        .with_sort(SortDirective::descending(3))
        .apply(&records, &schema);

    let mut reversed = ids(&asc);
    reversed.reverse();
    assert_eq!(ids(&desc), reversed);
}

#[test]
fn tied_keys_keep_input_order_in_both_directions() {
    let records = parse_records(
        r#"[
            {"compute_id": "a", "status": "free"},
            {"compute_id": "b", "status": "free"},
            {"compute_id": "c", "status": "allocated"},
            {"compute_id": "d", "status": "free"}
        ]"#,
    )
    .unwrap();
    let schema = ColumnSchema::compute_units();

    let asc = TableView::new()
        .with_sort(SortDirective::ascending(9))
        .apply(&records, &schema);
    assert_eq!(ids(&asc), ["c", "a", "b", "d"]);

    // Descending inverts the key comparison only; ties stay in input order
    let desc = TableView::new()
        .with_sort(SortDirective::descending(9))
        .apply(&records, &schema);
    assert_eq!(ids(&desc), ["a", "b", "d", "c"]);
}

#[test]
fn custom_schema_drives_extraction_and_kind() {
    let records = parse_records(
        r#"[
            {"name": "slow", "latency_ms": "12.5"},
            {"name": "fast", "latency_ms": "3.25"},
            {"name": "broken", "latency_ms": "n/a"}
        ]"#,
    )
    .unwrap();

    let schema = ColumnSchema::new(vec![
        ColumnDescriptor {
            label: "name".to_string(),
            extract: Extract::Field("name".to_string()),
            kind: ValueKind::String,
        },
        ColumnDescriptor {
            label: "latency_ms".to_string(),
            extract: Extract::Field("latency_ms".to_string()),
            kind: ValueKind::Number,
        },
    ]);

    let rows = TableView::new()
        .with_sort(SortDirective::ascending(1))
        .apply(&records, &schema);
    let names: Vec<&str> = rows.iter().map(|r| r["name"].as_str().unwrap()).collect();
    assert_eq!(names, ["broken", "fast", "slow"]);
}

#[test]
fn filter_then_sort_composes() {
    let records = units();
    let view = TableView::new()
        .with_query("free")
        .with_sort(SortDirective::ascending(4));
    let rows = view.apply(&records, &ColumnSchema::compute_units());
    assert_eq!(ids(&rows), ["node-002_0-1", "node-001_0-7"]);
}

#[test]
fn malformed_records_never_panic() {
    let records = parse_records(
        r#"[
            {"ip": 17, "cpu_count": [1, 2], "started_at": {"nested": true}},
            {},
            {"hostname": null}
        ]"#,
    )
    .unwrap();
    let schema = ColumnSchema::compute_units();

    for column in 0..schema.len() {
        let view = TableView::new().with_sort(SortDirective::ascending(column));
        let rows = view.apply(&records, &schema);
        assert_eq!(rows.len(), 3);
    }
}
