//! Identity tokens
//!
//! Every column, row and cell of a table is identified by a token drawn from a
//! single per-table counter, so tokens are unique across all three kinds within
//! one table and are never reused after removal. Plain list nodes draw from
//! their own list's counter.

use std::fmt::{Display, Formatter, Result as FmtResult};
use serde::{Serialize, Deserialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Raw counter value of this token
            pub fn raw(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                $name(raw)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }
    };
}

define_id!(
    /// Identity of a column within its table
    ColumnId, "col"
);

define_id!(
    /// Identity of a row within its table
    RowId, "row"
);

define_id!(
    /// Identity of a cell within its table
    CellId, "cell"
);

define_id!(
    /// Identity of a plain node within its list
    NodeId, "node"
);

/// Monotonic token allocator
///
/// Tokens start at 1 and increase by one per allocation. The allocator never
/// hands out the same value twice, regardless of which id kind requested it.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    last: u64,
}

impl IdAllocator {
    /// Create an allocator that has handed out nothing yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next token as the requested id kind
    pub fn allocate<T: From<u64>>(&mut self) -> T {
        self.last += 1;
        T::from(self.last)
    }

    /// Number of tokens allocated so far
    pub fn allocated(&self) -> u64 {
        self.last
    }
}
