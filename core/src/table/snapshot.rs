//! Point-in-time export of a table
//!
//! A [`TableSnapshot`] records every identity, position and value of a table.
//! Two snapshots compare equal exactly when the tables they were taken from
//! are structurally identical, which makes them the tool of choice for
//! checking that a rejected mutation changed nothing.

use serde::{Serialize, Deserialize};

use crate::error::Result;
use crate::id::{CellId, ColumnId, RowId};
use crate::models::{ColumnDefinition, Value};
use super::Table;

/// Column entry of a [`TableSnapshot`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSnapshot {
    /// Identity of the column
    pub id: ColumnId,

    /// Cached position of the column
    pub index: usize,

    /// Definition of the column
    pub definition: ColumnDefinition,

    /// Cells of the column in row order
    pub cells: Vec<CellId>,
}

/// Row entry of a [`TableSnapshot`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowSnapshot {
    /// Identity of the row
    pub id: RowId,

    /// Cached position of the row
    pub index: usize,

    /// Optional name of the row
    pub name: Option<String>,

    /// Cells of the row in column order
    pub cells: Vec<CellId>,

    /// Values of the row in column order
    pub values: Vec<Value>,
}

/// Structure and content of a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot {
    /// Name of the table
    pub name: String,

    /// Columns in table order
    pub columns: Vec<ColumnSnapshot>,

    /// Rows in table order
    pub rows: Vec<RowSnapshot>,
}

impl TableSnapshot {
    /// Capture `table`
    pub fn capture(table: &Table) -> Self {
        let columns = table
            .columns()
            .map(|column| ColumnSnapshot {
                id: column.id(),
                index: column.index(),
                definition: column.definition().clone(),
                cells: column.cells().map(|cell| cell.id()).collect(),
            })
            .collect();
        let rows = table
            .rows()
            .map(|row| RowSnapshot {
                id: row.id(),
                index: row.index(),
                name: row.name().map(str::to_string),
                cells: row.cells().map(|cell| cell.id()).collect(),
                values: row.values().cloned().collect(),
            })
            .collect();

        TableSnapshot {
            name: table.name().to_string(),
            columns,
            rows,
        }
    }

    /// Column names in table order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns
            .iter()
            .map(|column| column.definition.name.as_str())
            .collect()
    }

    /// Serialize the snapshot as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a snapshot from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
