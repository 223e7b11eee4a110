//! Data models for the dual-chain table
//!
//! This module provides the records the table is built from: values and
//! their types, column definitions and column records, row records, and the
//! cross-linked cells shared between a column chain and a row chain.

mod cell;
mod column;
mod row;
mod value;

pub use cell::{CellArena, ColumnFacet, CrossCell, Facet, FacetView, FacetViewMut, RowFacet};
pub use column::{Column, ColumnDefinition, ColumnType, Incompatibility};
pub use row::Row;
pub use value::{Value, ValueType};
