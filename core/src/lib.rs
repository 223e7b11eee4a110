//! # Dual-chain table core
//!
//! Core data structures for an in-memory rectangular table whose cells sit on
//! two chains at once: their column's chain and their row's chain.
//! This crate provides the chain engine, the cross-linked cell model and the
//! [`Table`] that keeps both orders consistent.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod chain;
pub mod config;
pub mod error;
pub mod id;
pub mod models;
pub mod table;

/// Re-export common types for ease of use
pub use chain::{Chain, ChainError, NodeList};
pub use config::{CoreConfig, TableConfig};
pub use error::{CoreError, Result};
pub use id::{CellId, ColumnId, NodeId, RowId};
pub use models::{ColumnDefinition, ColumnType, Value, ValueType};
pub use table::{CellRef, ColumnRef, RowRef, Table, TableError, TableResult, TableSnapshot};

/// Version of the core crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
