use funnelbook_model::Table;
use proptest::prelude::*;
use std::collections::BTreeMap;

fn record(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

#[test]
fn push_record_appends_last_and_preserves_order() {
    let mut table = Table::new(["a", "b"]);
    table.push_row(["1", "2"]);
    table.push_record(&record(&[("a", "3"), ("b", "4")]));
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.rows()[0], vec!["1", "2"]);
    assert_eq!(table.rows()[1], vec!["3", "4"]);
}

#[test]
fn push_record_unions_unknown_columns_and_backfills() {
    let mut table = Table::new(["a"]);
    table.push_row(["1"]);
    table.push_record(&record(&[("a", "2"), ("z", "9")]));
    assert_eq!(table.columns(), ["a", "z"]);
    assert_eq!(table.rows()[0], vec!["1", ""]);
    assert_eq!(table.rows()[1], vec!["2", "9"]);
}

#[test]
fn push_record_fills_missing_fields_with_empty_cells() {
    let mut table = Table::new(["a", "b", "c"]);
    table.push_record(&record(&[("b", "x")]));
    assert_eq!(table.rows()[0], vec!["", "x", ""]);
}

#[test]
fn drop_empty_columns_removes_only_fully_blank_ones() {
    let mut table = Table::new(["keep", "blank", "spaces"]);
    table.push_row(["v1", "", "  "]);
    table.push_row(["v2", "", ""]);
    let dropped = table.drop_empty_columns();
    assert_eq!(dropped, vec!["blank".to_string(), "spaces".to_string()]);
    assert_eq!(table.columns(), ["keep"]);
    assert_eq!(table.rows(), [vec!["v1".to_string()], vec!["v2".to_string()]]);
}

#[test]
fn drop_empty_columns_keeps_headers_of_rowless_table() {
    let mut table = Table::new(["a", "b"]);
    assert!(table.drop_empty_columns().is_empty());
    assert_eq!(table.columns(), ["a", "b"]);
}

#[test]
fn column_values_on_absent_column_is_empty() {
    let mut table = Table::new(["a"]);
    table.push_row(["1"]);
    assert!(table.column_values("missing").is_empty());
    assert_eq!(table.column_values("a"), ["1"]);
}

#[test]
fn short_rows_are_padded_rectangular() {
    let mut table = Table::new(["a", "b", "c"]);
    table.push_row(["1"]);
    assert_eq!(table.rows()[0], vec!["1", "", ""]);
    assert_eq!(table.cell(0, "c"), Some(""));
    assert_eq!(table.cell(0, "missing"), None);
}

proptest! {
    #[test]
    fn push_record_never_mutates_prior_rows(
        existing in prop::collection::vec(
            prop::collection::vec("[a-z0-9 ]{0,8}", 2..=2), 0..12),
        extra_value in "[a-z0-9]{0,8}",
    ) {
        let mut table = Table::new(["a", "b"]);
        for row in &existing {
            table.push_row(row.clone());
        }
        let before = table.rows().to_vec();

        table.push_record(&record(&[("a", "new"), ("extra", extra_value.as_str())]));

        prop_assert_eq!(table.row_count(), before.len() + 1);
        for (idx, row) in before.iter().enumerate() {
            // Prior rows survive unchanged modulo backfill of the new column.
            prop_assert_eq!(&table.rows()[idx][..row.len()], &row[..]);
        }
        let width = table.columns().len();
        for row in table.rows() {
            prop_assert_eq!(row.len(), width);
        }
    }
}
