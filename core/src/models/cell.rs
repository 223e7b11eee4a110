//! Cross-linked cells
//!
//! A [`CrossCell`] is stored once, in the table's cell arena, yet sits on two
//! chains: its column's chain and its row's chain. It keeps one [`Links`]
//! record per chain. A facet view selects one of the two records, so a chain
//! operating through [`FacetViewMut<ColumnFacet>`] can only ever touch column
//! links, and one operating through [`FacetViewMut<RowFacet>`] only row links.

use std::marker::PhantomData;

use crate::chain::{Arena, Links, NodeStore, NodeStoreMut};
use crate::id::{CellId, ColumnId, RowId};
use super::value::Value;

/// Arena holding every cell of a table
pub type CellArena = Arena<CellId, CrossCell>;

/// One value, reachable from both its column and its row
#[derive(Debug, Clone)]
pub struct CrossCell {
    id: CellId,
    column: ColumnId,
    row: RowId,
    value: Value,
    column_links: Links<CellId>,
    row_links: Links<CellId>,
}

impl CrossCell {
    pub(crate) fn new(id: CellId, column: ColumnId, row: RowId, value: Value) -> Self {
        CrossCell {
            id,
            column,
            row,
            value,
            column_links: Links::default(),
            row_links: Links::default(),
        }
    }

    /// Identity of the cell
    pub fn id(&self) -> CellId {
        self.id
    }

    /// Column owning the cell
    pub fn column(&self) -> ColumnId {
        self.column
    }

    /// Row owning the cell
    pub fn row(&self) -> RowId {
        self.row
    }

    /// Payload of the cell
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub(crate) fn into_value(self) -> Value {
        self.value
    }

    /// Links on the column's chain; the index is the row position
    pub fn column_links(&self) -> &Links<CellId> {
        &self.column_links
    }

    /// Links on the row's chain; the index is the column position
    pub fn row_links(&self) -> &Links<CellId> {
        &self.row_links
    }
}

/// Selects which link record of a [`CrossCell`] a view exposes
pub trait Facet {
    /// Link record of this facet
    fn links(cell: &CrossCell) -> &Links<CellId>;

    /// Mutable link record of this facet
    fn links_mut(cell: &mut CrossCell) -> &mut Links<CellId>;
}

/// Membership of a cell in its column's chain
#[derive(Debug, Clone, Copy)]
pub enum ColumnFacet {}

/// Membership of a cell in its row's chain
#[derive(Debug, Clone, Copy)]
pub enum RowFacet {}

impl Facet for ColumnFacet {
    fn links(cell: &CrossCell) -> &Links<CellId> {
        &cell.column_links
    }

    fn links_mut(cell: &mut CrossCell) -> &mut Links<CellId> {
        &mut cell.column_links
    }
}

impl Facet for RowFacet {
    fn links(cell: &CrossCell) -> &Links<CellId> {
        &cell.row_links
    }

    fn links_mut(cell: &mut CrossCell) -> &mut Links<CellId> {
        &mut cell.row_links
    }
}

/// Read-only store view of one facet of every cell
#[derive(Debug, Clone, Copy)]
pub struct FacetView<'a, F> {
    cells: &'a CellArena,
    facet: PhantomData<F>,
}

impl<'a, F: Facet> FacetView<'a, F> {
    /// View `cells` through facet `F`
    pub fn new(cells: &'a CellArena) -> Self {
        FacetView {
            cells,
            facet: PhantomData,
        }
    }
}

impl<F: Facet> NodeStore<CellId> for FacetView<'_, F> {
    fn links(&self, node: CellId) -> &Links<CellId> {
        F::links(&self.cells[node])
    }

    fn same_value(&self, a: CellId, b: CellId) -> bool {
        self.cells[a].value == self.cells[b].value
    }
}

/// Mutable store view of one facet of every cell
#[derive(Debug)]
pub struct FacetViewMut<'a, F> {
    cells: &'a mut CellArena,
    facet: PhantomData<F>,
}

impl<'a, F: Facet> FacetViewMut<'a, F> {
    /// View `cells` mutably through facet `F`
    pub fn new(cells: &'a mut CellArena) -> Self {
        FacetViewMut {
            cells,
            facet: PhantomData,
        }
    }
}

impl<F: Facet> NodeStore<CellId> for FacetViewMut<'_, F> {
    fn links(&self, node: CellId) -> &Links<CellId> {
        F::links(&self.cells[node])
    }

    fn same_value(&self, a: CellId, b: CellId) -> bool {
        self.cells[a].value == self.cells[b].value
    }
}

impl<F: Facet> NodeStoreMut<CellId> for FacetViewMut<'_, F> {
    fn links_mut(&mut self, node: CellId) -> &mut Links<CellId> {
        F::links_mut(&mut self.cells[node])
    }
}
