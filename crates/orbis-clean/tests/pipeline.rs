//! Integration tests for the cleaning pass.

use orbis_clean::{CleanError, CoercionConfig, clean_table};
use orbis_model::{CellValue, Column, ColumnType, Table};

fn raw_table() -> Table {
    let cell = |value: Option<&str>| value.map_or(CellValue::Missing, CellValue::text);
    Table::from_parts(
        vec![
            Column::text("A B"),
            Column::text("a_b"),
            Column::text("Tons (2019)"),
            Column::text("Empty"),
        ],
        vec![
            vec![cell(Some(" x ")), cell(Some("1")), cell(Some(" 10 ")), cell(Some(""))],
            vec![cell(Some("x")), cell(Some("1")), cell(Some("10")), cell(None)],
            vec![cell(Some("y")), cell(Some("2")), cell(Some("n/a")), cell(None)],
        ],
    )
    .unwrap()
}

#[test]
fn cleans_names_types_and_rows() {
    let input = raw_table();
    let outcome = clean_table(&input, &CoercionConfig::default()).unwrap();
    let table = &outcome.table;

    assert_eq!(
        table.column_names().collect::<Vec<_>>(),
        vec!["a_b", "a_b_2", "tons_2019"]
    );
    let types: Vec<ColumnType> = table.columns().iter().map(|c| c.dtype).collect();
    assert_eq!(
        types,
        vec![ColumnType::Text, ColumnType::Numeric, ColumnType::Text]
    );
    assert_eq!(table.row_count(), 2);
    assert_eq!(
        table.rows()[0],
        vec![
            CellValue::text("x"),
            CellValue::Number(1.0),
            CellValue::text("10")
        ]
    );
    assert_eq!(outcome.duplicates_removed, 1);
    assert_eq!(outcome.dropped_columns, vec!["empty".to_string()]);
    assert_eq!(outcome.coerced_columns().collect::<Vec<_>>(), vec!["a_b_2"]);
}

#[test]
fn records_name_mapping() {
    let outcome = clean_table(&raw_table(), &CoercionConfig::default()).unwrap();
    let mapping = outcome
        .descriptors
        .iter()
        .map(|d| format!("{} -> {}", d.raw_name, d.canonical_name))
        .collect::<Vec<_>>()
        .join("\n");
    insta::assert_snapshot!(mapping, @r"
A B -> a_b
a_b -> a_b_2
Tons (2019) -> tons_2019
Empty -> empty
");
}

#[test]
fn lower_threshold_coerces_partial_columns() {
    let config = CoercionConfig {
        coercion_threshold: 0.6,
    };
    let outcome = clean_table(&raw_table(), &config).unwrap();
    let tons = outcome.table.column_index("tons_2019").unwrap();

    assert_eq!(outcome.table.columns()[tons].dtype, ColumnType::Numeric);
    assert_eq!(outcome.table.cell(1, tons), Some(&CellValue::Missing));
    assert_eq!(outcome.duplicates_removed, 1);
}

#[test]
fn input_is_not_mutated() {
    let input = raw_table();
    let before = input.clone();
    let _ = clean_table(&input, &CoercionConfig::default()).unwrap();
    assert_eq!(input, before);
}

#[test]
fn zero_column_table_is_rejected() {
    let empty = Table::new(vec![]).unwrap();
    let err = clean_table(&empty, &CoercionConfig::default()).unwrap_err();
    assert!(matches!(err, CleanError::NoColumns));
}

#[test]
fn cleaning_is_deterministic() {
    let a = clean_table(&raw_table(), &CoercionConfig::default()).unwrap();
    let b = clean_table(&raw_table(), &CoercionConfig::default()).unwrap();
    assert_eq!(a.table, b.table);
}
