//! Row records

use crate::chain::{Chain, Links, Node};
use crate::id::{CellId, RowId};

/// Row record on the table's row chain
#[derive(Debug, Clone)]
pub struct Row {
    id: RowId,
    name: Option<String>,
    cells: Chain<CellId>,
    links: Links<RowId>,
}

impl Row {
    pub(crate) fn new(id: RowId) -> Self {
        Row {
            id,
            name: None,
            cells: Chain::new(),
            links: Links::default(),
        }
    }

    /// Identity of the row
    pub fn id(&self) -> RowId {
        self.id
    }

    /// Optional display name of the row
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Position of the row in its table
    pub fn index(&self) -> usize {
        self.links.index()
    }

    /// Chain of this row's cells, in column order
    pub fn cells(&self) -> &Chain<CellId> {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut Chain<CellId> {
        &mut self.cells
    }

    pub(crate) fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }
}

impl Node<RowId> for Row {
    fn id(&self) -> RowId {
        self.id
    }

    fn links(&self) -> &Links<RowId> {
        &self.links
    }

    fn links_mut(&mut self) -> &mut Links<RowId> {
        &mut self.links
    }

    fn same_value(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
