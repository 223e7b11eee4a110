//! Table errors

use thiserror::Error;

use crate::chain::ChainError;
use crate::id::{ColumnId, RowId};
use crate::models::{ColumnType, ValueType};

/// Table error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// A row supplied more values than the table has columns
    #[error("Too many values: expected {expected}, got {actual}")]
    TooManyValues {
        /// Column count of the table
        expected: usize,
        /// Number of supplied values
        actual: usize,
    },

    /// A row supplied fewer values than the table has columns
    #[error("Too few values: expected {expected}, got {actual}")]
    TooFewValues {
        /// Column count of the table
        expected: usize,
        /// Number of supplied values
        actual: usize,
    },

    /// A value does not match its column's declared type
    #[error("Type mismatch for column {column} at position {position}: expected {expected}, got {actual}")]
    TypeMismatch {
        /// Name of the offending column
        column: String,
        /// Position of the offending column
        position: usize,
        /// Declared column type
        expected: ColumnType,
        /// Observed value type
        actual: ValueType,
    },

    /// A text value exceeds its column's length bound
    #[error("Value too long for column {column} at position {position}: at most {max} characters, got {actual}")]
    ValueTooLong {
        /// Name of the offending column
        column: String,
        /// Position of the offending column
        position: usize,
        /// Declared maximum
        max: usize,
        /// Observed length
        actual: usize,
    },

    /// A column was added to a populated table without a default value
    #[error("Column {column} needs a default value to fill {rows} existing rows")]
    BackfillRequired {
        /// Name of the new column
        column: String,
        /// Number of existing rows
        rows: usize,
    },

    /// Column name already taken
    #[error("Column {0} already exists")]
    DuplicateColumnName(String),

    /// Column does not belong to the table
    #[error("Column {0} not found")]
    ColumnNotFound(ColumnId),

    /// Row does not belong to the table
    #[error("Row {0} not found")]
    RowNotFound(RowId),

    /// Table structure is inconsistent
    #[error("Table invariant violated: {0}")]
    InvariantViolation(String),

    /// Chain operation error
    #[error(transparent)]
    Chain(#[from] ChainError),
}

/// Table result type
pub type TableResult<T> = Result<T, TableError>;
