//! Read-only views over a table
//!
//! Views pair a record with the table that owns it, so a column can walk its
//! cells and a cell can report its coordinates without the caller threading
//! the cell arena around.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use crate::chain::ChainResult;
use crate::id::{CellId, ColumnId, RowId};
use crate::models::{Column, ColumnDefinition, ColumnFacet, ColumnType, CrossCell, FacetView, Row, RowFacet, Value};
use super::Table;

/// A column together with its table
#[derive(Clone, Copy)]
pub struct ColumnRef<'a> {
    table: &'a Table,
    column: &'a Column,
}

impl<'a> ColumnRef<'a> {
    pub(crate) fn new(table: &'a Table, column: &'a Column) -> Self {
        ColumnRef { table, column }
    }

    /// Identity of the column
    pub fn id(&self) -> ColumnId {
        self.column.id()
    }

    /// Name of the column
    pub fn name(&self) -> &'a str {
        self.column.name()
    }

    /// Definition of the column
    pub fn definition(&self) -> &'a ColumnDefinition {
        self.column.definition()
    }

    /// Declared type of the column
    pub fn column_type(&self) -> ColumnType {
        self.column.definition().column_type
    }

    /// Position of the column in the table
    pub fn index(&self) -> usize {
        self.column.index()
    }

    /// Number of cells, always the table's row count
    pub fn len(&self) -> usize {
        self.column.cells().len()
    }

    /// Whether the column has no cells
    pub fn is_empty(&self) -> bool {
        self.column.cells().is_empty()
    }

    /// Cells of the column in row order
    pub fn cells(self) -> impl Iterator<Item = CellRef<'a>> + 'a {
        let table = self.table;
        self.column
            .cells()
            .walk(FacetView::<ColumnFacet>::new(&table.cells))
            .map(move |id| CellRef::new(table, &table.cells[id]))
    }

    /// Values of the column in row order
    pub fn values(self) -> impl Iterator<Item = &'a Value> + 'a {
        self.cells().map(|cell| cell.value())
    }

    /// Cell at row position `index`
    pub fn cell(&self, index: usize) -> ChainResult<CellRef<'a>> {
        let view = FacetView::<ColumnFacet>::new(&self.table.cells);
        let id = self.column.cells().node_at(&view, index)?;
        Ok(CellRef::new(self.table, &self.table.cells[id]))
    }

    /// Row position of the first cell holding `value`
    pub fn position_of(&self, value: &Value) -> Option<usize> {
        let cells = &self.table.cells;
        self.column
            .cells()
            .position(&FacetView::<ColumnFacet>::new(cells), |id| cells[id].value() == value)
    }

    /// Whether any cell holds `value`
    pub fn contains(&self, value: &Value) -> bool {
        self.position_of(value).is_some()
    }
}

impl Debug for ColumnRef<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ColumnRef")
            .field("id", &self.id())
            .field("name", &self.name())
            .field("index", &self.index())
            .field("type", &self.column_type())
            .finish()
    }
}

/// A row together with its table
#[derive(Clone, Copy)]
pub struct RowRef<'a> {
    table: &'a Table,
    row: &'a Row,
}

impl<'a> RowRef<'a> {
    pub(crate) fn new(table: &'a Table, row: &'a Row) -> Self {
        RowRef { table, row }
    }

    /// Identity of the row
    pub fn id(&self) -> RowId {
        self.row.id()
    }

    /// Optional name of the row
    pub fn name(&self) -> Option<&'a str> {
        self.row.name()
    }

    /// Position of the row in the table
    pub fn index(&self) -> usize {
        self.row.index()
    }

    /// Number of cells, always the table's column count
    pub fn len(&self) -> usize {
        self.row.cells().len()
    }

    /// Whether the row has no cells
    pub fn is_empty(&self) -> bool {
        self.row.cells().is_empty()
    }

    /// Cells of the row in column order
    pub fn cells(self) -> impl Iterator<Item = CellRef<'a>> + 'a {
        let table = self.table;
        self.row
            .cells()
            .walk(FacetView::<RowFacet>::new(&table.cells))
            .map(move |id| CellRef::new(table, &table.cells[id]))
    }

    /// Values of the row in column order
    pub fn values(self) -> impl Iterator<Item = &'a Value> + 'a {
        self.cells().map(|cell| cell.value())
    }

    /// Cell at column position `index`
    pub fn cell(&self, index: usize) -> ChainResult<CellRef<'a>> {
        let view = FacetView::<RowFacet>::new(&self.table.cells);
        let id = self.row.cells().node_at(&view, index)?;
        Ok(CellRef::new(self.table, &self.table.cells[id]))
    }

    /// Value in the column named `name`
    pub fn get(&self, name: &str) -> Option<&'a Value> {
        let column = self.table.column_by_name(name)?;
        self.cell(column.index()).ok().map(|cell| cell.value())
    }

    /// Column position of the first cell holding `value`
    pub fn position_of(&self, value: &Value) -> Option<usize> {
        let cells = &self.table.cells;
        self.row
            .cells()
            .position(&FacetView::<RowFacet>::new(cells), |id| cells[id].value() == value)
    }

    /// Whether any cell holds `value`
    pub fn contains(&self, value: &Value) -> bool {
        self.position_of(value).is_some()
    }
}

impl Debug for RowRef<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("RowRef")
            .field("id", &self.id())
            .field("name", &self.name())
            .field("index", &self.index())
            .finish()
    }
}

/// A cell together with its table
#[derive(Clone, Copy)]
pub struct CellRef<'a> {
    table: &'a Table,
    cell: &'a CrossCell,
}

impl<'a> CellRef<'a> {
    fn new(table: &'a Table, cell: &'a CrossCell) -> Self {
        CellRef { table, cell }
    }

    /// Identity of the cell
    pub fn id(&self) -> CellId {
        self.cell.id()
    }

    /// Payload of the cell
    pub fn value(&self) -> &'a Value {
        self.cell.value()
    }

    /// Identity of the owning column
    pub fn column_id(&self) -> ColumnId {
        self.cell.column()
    }

    /// Identity of the owning row
    pub fn row_id(&self) -> RowId {
        self.cell.row()
    }

    /// Position of the owning row, read from the column chain
    pub fn row_index(&self) -> usize {
        self.cell.column_links().index()
    }

    /// Position of the owning column, read from the row chain
    pub fn column_index(&self) -> usize {
        self.cell.row_links().index()
    }

    /// Owning column
    pub fn column(&self) -> Option<ColumnRef<'a>> {
        self.table.column(self.cell.column())
    }

    /// Owning row
    pub fn row(&self) -> Option<RowRef<'a>> {
        self.table.row(self.cell.row())
    }
}

impl Debug for CellRef<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CellRef")
            .field("id", &self.id())
            .field("row", &self.row_index())
            .field("column", &self.column_index())
            .field("value", self.value())
            .finish()
    }
}
