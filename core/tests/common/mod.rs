//! Shared helpers for the integration tests

#![allow(dead_code)]

use dualgrid_core::{ColumnType, Table, TableConfig, Value};

/// Route `log` output through the test harness
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Configuration that re-checks every invariant after each mutation
pub fn strict_config() -> TableConfig {
    TableConfig {
        verify_invariants: true,
        ..TableConfig::default()
    }
}

/// Empty table with columns `name: Text` and `age: Integer`
pub fn people() -> Table {
    init_logging();
    let mut table = Table::with_config("people", strict_config());
    table.add_column("name", ColumnType::Text).unwrap();
    table.add_column("age", ColumnType::Integer).unwrap();
    table
}

/// Table of `rows` rows over `columns` integer columns
///
/// The cell at row `r`, column `c` holds `r * 100 + c`.
pub fn grid(columns: usize, rows: usize) -> Table {
    init_logging();
    let mut table = Table::with_config("grid", strict_config());
    for c in 0..columns {
        table.add_column(format!("c{}", c), ColumnType::BigInt).unwrap();
    }
    for r in 0..rows {
        table.add_row((0..columns).map(|c| cell(r, c))).unwrap();
    }
    table
}

/// Value stored by [`grid`] at row `r`, column `c`
pub fn cell(r: usize, c: usize) -> Value {
    Value::BigInt((r * 100 + c) as i64)
}

/// Values of every column, in table order
pub fn columns_of(table: &Table) -> Vec<Vec<Value>> {
    table
        .columns()
        .map(|column| column.values().cloned().collect())
        .collect()
}

/// Values of every row, in table order
pub fn rows_of(table: &Table) -> Vec<Vec<Value>> {
    table
        .rows()
        .map(|row| row.values().cloned().collect())
        .collect()
}
