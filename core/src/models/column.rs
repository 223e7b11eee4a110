//! Column definitions and column records
//!
//! A [`ColumnDefinition`] declares what a column may hold; a [`Column`] is the
//! live record on the table's column chain, owning the chain of its cells.

use std::fmt::{Display, Formatter, Result as FmtResult};
use serde::{Serialize, Deserialize};

use crate::chain::{Chain, Links, Node};
use crate::id::{CellId, ColumnId};
use super::value::{Value, ValueType};

/// Declared type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    /// Integer (32-bit)
    Integer,

    /// Big integer (64-bit)
    BigInt,

    /// Floating point (64-bit)
    Float,

    /// Variable-length text string, at most the given number of characters
    VarChar(usize),

    /// Fixed-width text string, at most the given number of characters
    Char(usize),

    /// Text (unlimited length)
    Text,

    /// Binary data
    Binary,

    /// Boolean
    Boolean,

    /// UUID
    Uuid,

    /// Timestamp
    Timestamp,

    /// JSON data
    Json,

    /// Any value of any type
    Any,
}

impl ColumnType {
    /// Value type stored by this column type, `None` for [`ColumnType::Any`]
    pub fn value_type(&self) -> Option<ValueType> {
        let value_type = match self {
            ColumnType::Integer => ValueType::Integer,
            ColumnType::BigInt => ValueType::BigInt,
            ColumnType::Float => ValueType::Float,
            ColumnType::VarChar(_) | ColumnType::Char(_) | ColumnType::Text => ValueType::Text,
            ColumnType::Binary => ValueType::Binary,
            ColumnType::Boolean => ValueType::Boolean,
            ColumnType::Uuid => ValueType::Uuid,
            ColumnType::Timestamp => ValueType::Timestamp,
            ColumnType::Json => ValueType::Json,
            ColumnType::Any => return None,
        };
        Some(value_type)
    }

    /// Maximum text length in characters, if the type is bounded
    pub fn max_length(&self) -> Option<usize> {
        match self {
            ColumnType::VarChar(max) | ColumnType::Char(max) => Some(*max),
            _ => None,
        }
    }
}

impl Display for ColumnType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ColumnType::VarChar(max) => write!(f, "varchar({})", max),
            ColumnType::Char(max) => write!(f, "char({})", max),
            ColumnType::Any => f.write_str("any"),
            other => match other.value_type() {
                Some(value_type) => write!(f, "{}", value_type),
                None => f.write_str("any"),
            },
        }
    }
}

/// Why a value cannot be stored in a column
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Incompatibility {
    /// The value's type differs from the declared type
    WrongType {
        /// Declared column type
        expected: ColumnType,
        /// Observed value type
        actual: ValueType,
    },

    /// Text longer than the declared bound
    TooLong {
        /// Declared maximum in characters
        max: usize,
        /// Observed length in characters
        actual: usize,
    },
}

/// Definition of a column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    /// Name of the column
    pub name: String,

    /// Type of the column
    pub column_type: ColumnType,

    /// Whether the column can hold null
    pub nullable: bool,
}

impl ColumnDefinition {
    /// Define a non-nullable column
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        ColumnDefinition {
            name: name.into(),
            column_type,
            nullable: false,
        }
    }

    /// Allow null in this column
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Check that `value` may be stored in this column
    pub fn validate(&self, value: &Value) -> Result<(), Incompatibility> {
        if self.column_type == ColumnType::Any {
            return Ok(());
        }
        if value.is_null() {
            if self.nullable {
                return Ok(());
            }
            return Err(Incompatibility::WrongType {
                expected: self.column_type,
                actual: ValueType::Null,
            });
        }
        if self.column_type.value_type() != Some(value.value_type()) {
            return Err(Incompatibility::WrongType {
                expected: self.column_type,
                actual: value.value_type(),
            });
        }
        if let (Some(max), Some(text)) = (self.column_type.max_length(), value.as_text()) {
            let actual = text.chars().count();
            if actual > max {
                return Err(Incompatibility::TooLong { max, actual });
            }
        }
        Ok(())
    }

    /// Whether `value` may be stored in this column
    pub fn accepts(&self, value: &Value) -> bool {
        self.validate(value).is_ok()
    }
}

/// Column record on the table's column chain
#[derive(Debug, Clone)]
pub struct Column {
    id: ColumnId,
    definition: ColumnDefinition,
    cells: Chain<CellId>,
    links: Links<ColumnId>,
}

impl Column {
    pub(crate) fn new(id: ColumnId, definition: ColumnDefinition) -> Self {
        Column {
            id,
            definition,
            cells: Chain::new(),
            links: Links::default(),
        }
    }

    /// Identity of the column
    pub fn id(&self) -> ColumnId {
        self.id
    }

    /// Display name of the column
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    /// Definition of the column
    pub fn definition(&self) -> &ColumnDefinition {
        &self.definition
    }

    /// Position of the column in its table
    pub fn index(&self) -> usize {
        self.links.index()
    }

    /// Chain of this column's cells, in row order
    pub fn cells(&self) -> &Chain<CellId> {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut Chain<CellId> {
        &mut self.cells
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.definition.name = name;
    }

    pub(crate) fn into_definition(self) -> ColumnDefinition {
        self.definition
    }
}

impl Node<ColumnId> for Column {
    fn id(&self) -> ColumnId {
        self.id
    }

    fn links(&self) -> &Links<ColumnId> {
        &self.links
    }

    fn links_mut(&mut self) -> &mut Links<ColumnId> {
        &mut self.links
    }

    fn same_value(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
