//! Dual-chain table
//!
//! A [`Table`] keeps two chains of records, one of columns and one of rows,
//! and a single arena of cells. Every cell sits on its column's cell chain and
//! on its row's cell chain at once, through the column and row facets of
//! [`CrossCell`]. The table maintains rectangular completeness: every column
//! has one cell per row, every row one cell per column, and the k-th cell of
//! a row belongs to the k-th column (and vice versa).
//!
//! Rows and columns are validated in full before anything is allocated or
//! linked, so a rejected mutation leaves the table exactly as it was.

mod error;
mod snapshot;
pub mod validate;
mod view;

pub use error::{TableError, TableResult};
pub use snapshot::{ColumnSnapshot, RowSnapshot, TableSnapshot};
pub use view::{CellRef, ColumnRef, RowRef};

use log::{debug, warn};

use crate::chain::{Arena, Chain, ChainResult, Handle, NodeStoreMut};
use crate::config::TableConfig;
use crate::id::{CellId, ColumnId, IdAllocator, RowId};
use crate::models::{
    CellArena, Column, ColumnDefinition, ColumnFacet, ColumnType, CrossCell, FacetView,
    FacetViewMut, Row, RowFacet, Value,
};

/// Link `item` so that it ends up at `position`, appending when the position
/// is one past the tail
fn splice_at<H: Handle, S: NodeStoreMut<H>>(
    chain: &mut Chain<H>,
    store: &mut S,
    position: usize,
    item: H,
) -> ChainResult<()> {
    if position == chain.len() {
        chain.append(store, item);
        Ok(())
    } else {
        chain.insert(store, position, item)
    }
}

/// In-memory table of cross-linked cells
#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    config: TableConfig,
    ids: IdAllocator,
    columns: Arena<ColumnId, Column>,
    rows: Arena<RowId, Row>,
    cells: CellArena,
    column_chain: Chain<ColumnId>,
    row_chain: Chain<RowId>,
}

impl Table {
    /// Create an empty table with the default configuration
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, TableConfig::default())
    }

    /// Create an empty table
    pub fn with_config(name: impl Into<String>, config: TableConfig) -> Self {
        Table {
            name: name.into(),
            config,
            ids: IdAllocator::new(),
            columns: Arena::new(),
            rows: Arena::new(),
            cells: CellArena::new(),
            column_chain: Chain::new(),
            row_chain: Chain::new(),
        }
    }

    /// Name of the table
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Configuration of the table
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.column_chain.len()
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.row_chain.len()
    }

    /// Number of cells, always rows times columns
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.row_chain.is_empty()
    }

    /// Append a non-nullable column to a table without rows
    ///
    /// Fails with [`TableError::BackfillRequired`] once rows exist; use
    /// [`Table::add_column_with_default`] then.
    pub fn add_column(&mut self, name: impl Into<String>, column_type: ColumnType) -> TableResult<ColumnId> {
        self.place_column(None, ColumnDefinition::new(name, column_type), None)
    }

    /// Append a column described by `definition` to a table without rows
    pub fn add_column_definition(&mut self, definition: ColumnDefinition) -> TableResult<ColumnId> {
        self.place_column(None, definition, None)
    }

    /// Append a column, filling every existing row with `default`
    pub fn add_column_with_default(
        &mut self,
        definition: ColumnDefinition,
        default: impl Into<Value>,
    ) -> TableResult<ColumnId> {
        self.place_column(None, definition, Some(default.into()))
    }

    /// Insert a column in front of the column at `index`
    ///
    /// `default` fills every existing row and is required when the table has
    /// rows.
    pub fn insert_column(
        &mut self,
        index: usize,
        definition: ColumnDefinition,
        default: Option<Value>,
    ) -> TableResult<ColumnId> {
        self.place_column(Some(index), definition, default)
    }

    fn place_column(
        &mut self,
        index: Option<usize>,
        definition: ColumnDefinition,
        default: Option<Value>,
    ) -> TableResult<ColumnId> {
        if let Some(index) = index {
            self.column_chain.check_index(index)?;
        }
        if self.config.unique_column_names && self.column_by_name(&definition.name).is_some() {
            warn!("rejected column {}: name already taken in {}", definition.name, self.name);
            return Err(TableError::DuplicateColumnName(definition.name));
        }

        let rows = self.row_count();
        let position = index.unwrap_or_else(|| self.column_count());
        if let Some(default) = &default {
            if let Err(err) = validate::check_value(&definition, position, default) {
                warn!("rejected default for column {}: {}", definition.name, err);
                return Err(err);
            }
        } else if rows > 0 {
            warn!("rejected column {}: {} rows need a default", definition.name, rows);
            return Err(TableError::BackfillRequired {
                column: definition.name,
                rows,
            });
        }

        let id: ColumnId = self.ids.allocate();
        self.columns.insert(id, Column::new(id, definition));
        splice_at(&mut self.column_chain, &mut self.columns, position, id)?;

        if let Some(default) = default {
            for row in self.row_chain.to_vec(&self.rows) {
                let cell: CellId = self.ids.allocate();
                self.cells.insert(cell, CrossCell::new(cell, id, row, default.clone()));
                self.columns[id]
                    .cells_mut()
                    .append(&mut FacetViewMut::<ColumnFacet>::new(&mut self.cells), cell);
                splice_at(
                    self.rows[row].cells_mut(),
                    &mut FacetViewMut::<RowFacet>::new(&mut self.cells),
                    position,
                    cell,
                )?;
            }
        }

        debug!(
            "added column {} ({}) at {} in {}, backfilled {} rows",
            id, self.columns[id].name(), position, self.name, rows
        );
        self.check_invariants()?;
        Ok(id)
    }

    /// Append a row holding `values`, one per column in column order
    pub fn add_row<I, V>(&mut self, values: I) -> TableResult<RowId>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.place_row(None, values.into_iter().map(Into::into).collect())
    }

    /// Insert a row in front of the row at `index`
    pub fn insert_row<I, V>(&mut self, index: usize, values: I) -> TableResult<RowId>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.place_row(Some(index), values.into_iter().map(Into::into).collect())
    }

    fn place_row(&mut self, index: Option<usize>, values: Vec<Value>) -> TableResult<RowId> {
        if let Some(index) = index {
            self.row_chain.check_index(index)?;
        }
        let columns = self.column_chain.to_vec(&self.columns);
        {
            let definitions: Vec<&ColumnDefinition> =
                columns.iter().map(|&column| self.columns[column].definition()).collect();
            validate::check_row(&definitions, &values)?;
        }

        let id: RowId = self.ids.allocate();
        let position = index.unwrap_or_else(|| self.row_count());
        self.rows.insert(id, Row::new(id));
        splice_at(&mut self.row_chain, &mut self.rows, position, id)?;

        for (column, value) in columns.into_iter().zip(values) {
            let cell: CellId = self.ids.allocate();
            self.cells.insert(cell, CrossCell::new(cell, column, id, value));
            self.rows[id]
                .cells_mut()
                .append(&mut FacetViewMut::<RowFacet>::new(&mut self.cells), cell);
            splice_at(
                self.columns[column].cells_mut(),
                &mut FacetViewMut::<ColumnFacet>::new(&mut self.cells),
                position,
                cell,
            )?;
        }

        debug!("added row {} at {} in {}, {} rows now", id, position, self.name, self.row_count());
        self.check_invariants()?;
        Ok(id)
    }

    /// Remove the row `id`, returning its values in column order
    ///
    /// Each of the row's cells is spliced out of its column's chain; no other
    /// row is touched.
    pub fn remove_row(&mut self, id: RowId) -> TableResult<Vec<Value>> {
        let cells = match self.rows.get(id) {
            Some(row) => row.cells().to_vec(&FacetView::<RowFacet>::new(&self.cells)),
            None => return Err(TableError::RowNotFound(id)),
        };
        let position = self.rows[id].index();

        let mut values = Vec::with_capacity(cells.len());
        for cell in cells {
            let column = self.cells[cell].column();
            self.columns[column]
                .cells_mut()
                .remove(&mut FacetViewMut::<ColumnFacet>::new(&mut self.cells), cell)?;
            if let Some(record) = self.cells.remove(cell) {
                values.push(record.into_value());
            }
        }
        self.row_chain.remove(&mut self.rows, id)?;
        self.rows.remove(id);

        debug!("removed row {} from {} at {}, {} rows left", id, self.name, position, self.row_count());
        self.check_invariants()?;
        Ok(values)
    }

    /// Remove the row at `index`, returning its values in column order
    pub fn remove_row_at(&mut self, index: usize) -> TableResult<Vec<Value>> {
        let id = self.row_chain.node_at(&self.rows, index)?;
        self.remove_row(id)
    }

    /// Remove the column `id`, returning its definition
    ///
    /// Each of the column's cells is spliced out of its row's chain; no other
    /// column is touched.
    pub fn remove_column(&mut self, id: ColumnId) -> TableResult<ColumnDefinition> {
        let cells = match self.columns.get(id) {
            Some(column) => column.cells().to_vec(&FacetView::<ColumnFacet>::new(&self.cells)),
            None => return Err(TableError::ColumnNotFound(id)),
        };
        let position = self.columns[id].index();

        for cell in cells {
            let row = self.cells[cell].row();
            self.rows[row]
                .cells_mut()
                .remove(&mut FacetViewMut::<RowFacet>::new(&mut self.cells), cell)?;
            self.cells.remove(cell);
        }
        self.column_chain.remove(&mut self.columns, id)?;
        let definition = match self.columns.remove(id) {
            Some(column) => column.into_definition(),
            None => return Err(TableError::ColumnNotFound(id)),
        };

        debug!(
            "removed column {} ({}) from {} at {}, {} columns left",
            id, definition.name, self.name, position, self.column_count()
        );
        self.check_invariants()?;
        Ok(definition)
    }

    /// Remove the column at `index`, returning its definition
    pub fn remove_column_at(&mut self, index: usize) -> TableResult<ColumnDefinition> {
        let id = self.column_chain.node_at(&self.columns, index)?;
        self.remove_column(id)
    }

    /// Move the row at `from` so that it ends up at `to`
    ///
    /// The row's cell moves along in every column chain.
    pub fn move_row(&mut self, from: usize, to: usize) -> TableResult<()> {
        self.row_chain.check_index(from)?;
        self.row_chain.check_index(to)?;
        self.row_chain.move_to(&mut self.rows, from, to)?;
        for column in self.column_chain.to_vec(&self.columns) {
            self.columns[column]
                .cells_mut()
                .move_to(&mut FacetViewMut::<ColumnFacet>::new(&mut self.cells), from, to)?;
        }

        debug!("moved row {} -> {} in {}", from, to, self.name);
        self.check_invariants()
    }

    /// Move the column at `from` so that it ends up at `to`
    ///
    /// The column's cell moves along in every row chain.
    pub fn move_column(&mut self, from: usize, to: usize) -> TableResult<()> {
        self.column_chain.check_index(from)?;
        self.column_chain.check_index(to)?;
        self.column_chain.move_to(&mut self.columns, from, to)?;
        for row in self.row_chain.to_vec(&self.rows) {
            self.rows[row]
                .cells_mut()
                .move_to(&mut FacetViewMut::<RowFacet>::new(&mut self.cells), from, to)?;
        }

        debug!("moved column {} -> {} in {}", from, to, self.name);
        self.check_invariants()
    }

    /// Rename the column `id`
    pub fn rename_column(&mut self, id: ColumnId, name: impl Into<String>) -> TableResult<()> {
        let name = name.into();
        if !self.columns.contains(id) {
            return Err(TableError::ColumnNotFound(id));
        }
        if self.config.unique_column_names {
            if let Some(other) = self.column_by_name(&name) {
                if other.id() != id {
                    warn!("rejected rename of {} to {}: name already taken", id, name);
                    return Err(TableError::DuplicateColumnName(name));
                }
            }
        }
        debug!("renamed column {} to {}", id, name);
        self.columns[id].set_name(name);
        Ok(())
    }

    /// Set or clear the name of the row `id`
    pub fn set_row_name(&mut self, id: RowId, name: Option<String>) -> TableResult<()> {
        let row = self.rows.get_mut(id).ok_or(TableError::RowNotFound(id))?;
        row.set_name(name);
        Ok(())
    }

    /// Columns in table order
    pub fn columns(&self) -> impl Iterator<Item = ColumnRef<'_>> + '_ {
        self.column_chain
            .iter(&self.columns)
            .map(move |id| ColumnRef::new(self, &self.columns[id]))
    }

    /// Rows in table order
    pub fn rows(&self) -> impl Iterator<Item = RowRef<'_>> + '_ {
        self.row_chain
            .iter(&self.rows)
            .map(move |id| RowRef::new(self, &self.rows[id]))
    }

    /// Every cell, row by row
    pub fn cells(&self) -> impl Iterator<Item = CellRef<'_>> + '_ {
        self.rows().flat_map(RowRef::cells)
    }

    /// Column `id`
    pub fn column(&self, id: ColumnId) -> Option<ColumnRef<'_>> {
        self.columns.get(id).map(|column| ColumnRef::new(self, column))
    }

    /// Column at position `index`
    pub fn column_at(&self, index: usize) -> TableResult<ColumnRef<'_>> {
        let id = self.column_chain.node_at(&self.columns, index)?;
        Ok(ColumnRef::new(self, &self.columns[id]))
    }

    /// First column named `name`
    pub fn column_by_name(&self, name: &str) -> Option<ColumnRef<'_>> {
        self.columns().find(|column| column.name() == name)
    }

    /// Row `id`
    pub fn row(&self, id: RowId) -> Option<RowRef<'_>> {
        self.rows.get(id).map(|row| RowRef::new(self, row))
    }

    /// Row at position `index`
    pub fn row_at(&self, index: usize) -> TableResult<RowRef<'_>> {
        let id = self.row_chain.node_at(&self.rows, index)?;
        Ok(RowRef::new(self, &self.rows[id]))
    }

    /// First row named `name`
    pub fn row_by_name(&self, name: &str) -> Option<RowRef<'_>> {
        self.rows().find(|row| row.name() == Some(name))
    }

    /// Cell at the given row and column positions
    pub fn cell_at(&self, row: usize, column: usize) -> TableResult<CellRef<'_>> {
        Ok(self.row_at(row)?.cell(column)?)
    }

    /// Value at the given row and column positions
    pub fn value_at(&self, row: usize, column: usize) -> TableResult<&Value> {
        Ok(self.cell_at(row, column)?.value())
    }

    /// Capture ids, positions and values of the whole table
    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot::capture(self)
    }

    /// Check rectangular completeness, grid alignment and every chain
    pub fn verify(&self) -> TableResult<()> {
        let corrupted = |err: crate::chain::ChainError| TableError::InvariantViolation(err.to_string());

        self.column_chain.verify(&self.columns).map_err(corrupted)?;
        self.row_chain.verify(&self.rows).map_err(corrupted)?;

        let columns = self.column_chain.to_vec(&self.columns);
        let rows = self.row_chain.to_vec(&self.rows);
        if self.cells.len() != columns.len() * rows.len() {
            return Err(TableError::InvariantViolation(format!(
                "{} cells for {} rows and {} columns",
                self.cells.len(),
                rows.len(),
                columns.len()
            )));
        }

        let by_column = FacetView::<ColumnFacet>::new(&self.cells);
        for (position, &column) in columns.iter().enumerate() {
            let chain = self.columns[column].cells();
            chain.verify(&by_column).map_err(corrupted)?;
            if chain.len() != rows.len() {
                return Err(TableError::InvariantViolation(format!(
                    "column {} holds {} cells, table has {} rows",
                    column,
                    chain.len(),
                    rows.len()
                )));
            }
            for (cell, &row) in chain.iter(&by_column).zip(&rows) {
                let record = &self.cells[cell];
                if record.column() != column || record.row() != row {
                    return Err(TableError::InvariantViolation(format!(
                        "{} at column {} row {} belongs to {} and {}",
                        cell, position, self.rows[row].index(), record.column(), record.row()
                    )));
                }
            }
        }

        let by_row = FacetView::<RowFacet>::new(&self.cells);
        for &row in &rows {
            let chain = self.rows[row].cells();
            chain.verify(&by_row).map_err(corrupted)?;
            if chain.len() != columns.len() {
                return Err(TableError::InvariantViolation(format!(
                    "row {} holds {} cells, table has {} columns",
                    row,
                    chain.len(),
                    columns.len()
                )));
            }
            for (cell, &column) in chain.iter(&by_row).zip(&columns) {
                let record = &self.cells[cell];
                if record.row() != row || record.column() != column {
                    return Err(TableError::InvariantViolation(format!(
                        "{} on row {} belongs to {} and {}",
                        cell, row, record.column(), record.row()
                    )));
                }
            }
        }
        Ok(())
    }

    fn check_invariants(&self) -> TableResult<()> {
        if self.config.verify_invariants {
            self.verify()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::ChainError;
    use crate::models::ValueType;

    fn people() -> Table {
        let config = TableConfig {
            verify_invariants: true,
            ..TableConfig::default()
        };
        let mut table = Table::with_config("people", config);
        table.add_column("name", ColumnType::Text).unwrap();
        table.add_column("age", ColumnType::Integer).unwrap();
        table
    }

    fn column_values(table: &Table, index: usize) -> Vec<Value> {
        table.column_at(index).unwrap().values().cloned().collect()
    }

    #[test]
    fn test_add_row() {
        let mut table = people();

        let id = table.add_row(vec![Value::from("Alice"), Value::from(30)]).unwrap();

        assert_eq!(table.row_count(), 1);
        assert_eq!(table.cell_count(), 2);
        let row = table.row(id).unwrap();
        assert_eq!(row.index(), 0);
        assert_eq!(row.values().cloned().collect::<Vec<_>>(), vec![Value::from("Alice"), Value::from(30)]);
        assert_eq!(row.get("age"), Some(&Value::from(30)));
    }

    #[test]
    fn test_cells_are_row_major() {
        let mut table = people();
        table.add_row(vec![Value::from("Alice"), Value::from(30)]).unwrap();
        table.add_row(vec![Value::from("Bob"), Value::from(25)]).unwrap();

        let coordinates: Vec<(usize, usize, String)> = table
            .cells()
            .map(|cell| (cell.row_index(), cell.column_index(), cell.value().to_string()))
            .collect();

        assert_eq!(
            coordinates,
            vec![
                (0, 0, "Alice".to_string()),
                (0, 1, "30".to_string()),
                (1, 0, "Bob".to_string()),
                (1, 1, "25".to_string()),
            ]
        );
    }

    #[test]
    fn test_rejected_row_leaves_no_trace() {
        let mut table = people();
        table.add_row(vec![Value::from("Alice"), Value::from(30)]).unwrap();
        let before = table.snapshot();

        let result = table.add_row(vec![Value::from("Carol"), Value::from("thirty")]);

        assert_eq!(
            result,
            Err(TableError::TypeMismatch {
                column: "age".to_string(),
                position: 1,
                expected: ColumnType::Integer,
                actual: ValueType::Text,
            })
        );
        assert_eq!(table.snapshot(), before);
    }

    #[test]
    fn test_insert_row_aligns_columns() {
        let mut table = people();
        table.add_row(vec![Value::from("Alice"), Value::from(30)]).unwrap();
        table.add_row(vec![Value::from("Carol"), Value::from(41)]).unwrap();

        let bob = table.insert_row(1, vec![Value::from("Bob"), Value::from(25)]).unwrap();

        assert_eq!(table.row(bob).unwrap().index(), 1);
        assert_eq!(
            column_values(&table, 0),
            vec![Value::from("Alice"), Value::from("Bob"), Value::from("Carol")]
        );
        assert_eq!(column_values(&table, 1), vec![Value::from(30), Value::from(25), Value::from(41)]);
        assert_eq!(table.row_at(2).unwrap().index(), 2);
    }

    #[test]
    fn test_insert_row_out_of_range() {
        let mut table = people();

        let result = table.insert_row(0, vec![Value::from("Alice"), Value::from(30)]);

        assert_eq!(
            result,
            Err(TableError::Chain(ChainError::IndexOutOfRange { index: 0, len: 0 }))
        );
        assert_eq!(table.cell_count(), 0);
    }

    #[test]
    fn test_add_column_requires_default_once_populated() {
        let mut table = people();
        table.add_row(vec![Value::from("Alice"), Value::from(30)]).unwrap();

        let result = table.add_column("email", ColumnType::Text);

        assert_eq!(
            result,
            Err(TableError::BackfillRequired {
                column: "email".to_string(),
                rows: 1,
            })
        );
        assert_eq!(table.column_count(), 2);
    }

    #[test]
    fn test_insert_column_backfills_at_position() {
        let mut table = people();
        table.add_row(vec![Value::from("Alice"), Value::from(30)]).unwrap();
        table.add_row(vec![Value::from("Bob"), Value::from(25)]).unwrap();

        let definition = ColumnDefinition::new("active", ColumnType::Boolean);
        let id = table.insert_column(1, definition, Some(Value::from(true))).unwrap();

        assert_eq!(table.column(id).unwrap().index(), 1);
        assert_eq!(table.column_at(2).unwrap().name(), "age");
        for row in table.rows() {
            assert_eq!(row.len(), 3);
            assert_eq!(row.cell(1).unwrap().value(), &Value::from(true));
            assert_eq!(row.cell(1).unwrap().column_id(), id);
        }
    }

    #[test]
    fn test_invalid_default_is_rejected() {
        let mut table = people();
        table.add_row(vec![Value::from("Alice"), Value::from(30)]).unwrap();

        let result = table.add_column_with_default(ColumnDefinition::new("score", ColumnType::Float), "high");

        assert!(matches!(result, Err(TableError::TypeMismatch { position: 2, .. })));
        assert_eq!(table.column_count(), 2);
    }

    #[test]
    fn test_duplicate_column_names() {
        let mut table = people();
        assert_eq!(
            table.add_column("age", ColumnType::BigInt),
            Err(TableError::DuplicateColumnName("age".to_string()))
        );

        let mut lenient = Table::with_config(
            "lenient",
            TableConfig {
                unique_column_names: false,
                ..TableConfig::default()
            },
        );
        lenient.add_column("x", ColumnType::Any).unwrap();
        lenient.add_column("x", ColumnType::Any).unwrap();
        assert_eq!(lenient.column_count(), 2);
        assert_eq!(lenient.column_by_name("x").unwrap().index(), 0);
    }

    #[test]
    fn test_remove_row_splices_column_chains() {
        let mut table = people();
        for (name, age) in [("Alice", 30), ("Bob", 25), ("Carol", 41)] {
            table.add_row(vec![Value::from(name), Value::from(age)]).unwrap();
        }
        let carol = table.row_at(2).unwrap().id();

        let removed = table.remove_row_at(1).unwrap();

        assert_eq!(removed, vec![Value::from("Bob"), Value::from(25)]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.cell_count(), 4);
        assert_eq!(table.row(carol).unwrap().index(), 1);
        assert_eq!(column_values(&table, 1), vec![Value::from(30), Value::from(41)]);
        assert_eq!(table.remove_row_at(2), Err(TableError::Chain(ChainError::IndexOutOfRange { index: 2, len: 2 })));
    }

    #[test]
    fn test_remove_column_splices_row_chains() {
        let mut table = people();
        table.add_row(vec![Value::from("Alice"), Value::from(30)]).unwrap();
        let name = table.column_at(0).unwrap().id();

        let definition = table.remove_column(name).unwrap();

        assert_eq!(definition.name, "name");
        assert_eq!(table.column_count(), 1);
        let row = table.row_at(0).unwrap();
        assert_eq!(row.len(), 1);
        assert_eq!(row.cell(0).unwrap().column_index(), 0);
        assert_eq!(table.value_at(0, 0), Ok(&Value::from(30)));
        assert_eq!(table.remove_column(name), Err(TableError::ColumnNotFound(name)));
    }

    #[test]
    fn test_move_row_moves_cells() {
        let mut table = people();
        for (name, age) in [("Alice", 30), ("Bob", 25), ("Carol", 41)] {
            table.add_row(vec![Value::from(name), Value::from(age)]).unwrap();
        }

        table.move_row(0, 2).unwrap();

        assert_eq!(
            column_values(&table, 0),
            vec![Value::from("Bob"), Value::from("Carol"), Value::from("Alice")]
        );
        assert_eq!(table.value_at(2, 1), Ok(&Value::from(30)));
        assert!(table.move_row(0, 3).is_err());
    }

    #[test]
    fn test_move_column_moves_cells() {
        let mut table = people();
        table.add_row(vec![Value::from("Alice"), Value::from(30)]).unwrap();

        table.move_column(1, 0).unwrap();

        assert_eq!(table.column_at(0).unwrap().name(), "age");
        assert_eq!(
            table.row_at(0).unwrap().values().cloned().collect::<Vec<_>>(),
            vec![Value::from(30), Value::from("Alice")]
        );
        let cell = table.cell_at(0, 1).unwrap();
        assert_eq!(cell.column().unwrap().name(), "name");
    }

    #[test]
    fn test_names() {
        let mut table = people();
        let id = table.add_row(vec![Value::from("Alice"), Value::from(30)]).unwrap();
        let age = table.column_by_name("age").unwrap().id();

        table.rename_column(age, "years").unwrap();
        table.rename_column(age, "years").unwrap();
        table.set_row_name(id, Some("first".to_string())).unwrap();

        assert!(table.column_by_name("age").is_none());
        assert_eq!(table.column_by_name("years").unwrap().id(), age);
        assert_eq!(
            table.rename_column(age, "name"),
            Err(TableError::DuplicateColumnName("name".to_string()))
        );
        assert_eq!(table.row_by_name("first").unwrap().id(), id);
    }

    #[test]
    fn test_position_lookup() {
        let mut table = people();
        table.add_row(vec![Value::from("Alice"), Value::from(30)]).unwrap();
        table.add_row(vec![Value::from("Bob"), Value::from(30)]).unwrap();

        let ages = table.column_at(1).unwrap();
        assert_eq!(ages.position_of(&Value::from(30)), Some(0));
        assert!(!ages.contains(&Value::from(31)));

        let bob = table.row_at(1).unwrap();
        assert_eq!(bob.position_of(&Value::from(30)), Some(1));
    }

    #[test]
    fn test_unknown_ids() {
        let mut table = people();
        let stray = RowId::from(999);

        assert_eq!(table.remove_row(stray), Err(TableError::RowNotFound(stray)));
        assert_eq!(table.set_row_name(stray, None), Err(TableError::RowNotFound(stray)));
        assert!(table.row(stray).is_none());
    }

    #[test]
    fn test_verify_detects_misaligned_cell() {
        let mut table = people();
        table.add_row(vec![Value::from("Alice"), Value::from(30)]).unwrap();
        table.add_row(vec![Value::from("Bob"), Value::from(25)]).unwrap();

        // Reorder one column's cells without touching the rows.
        let age = table.column_at(1).unwrap().id();
        table.columns[age]
            .cells_mut()
            .move_to(&mut FacetViewMut::<ColumnFacet>::new(&mut table.cells), 0, 1)
            .unwrap();

        assert!(matches!(table.verify(), Err(TableError::InvariantViolation(_))));
    }
}
