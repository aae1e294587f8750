//! Zero-indexed cell references.
//!
//! Backends address individual cells by zero-based column/row pairs, the
//! same convention the service uses for grid indices. Conversion to and from
//! A1 notation goes through the 1-based column codec.
//!
//! # Examples
//!
//! ```
//! use handysheet_range::CellRef;
//!
//! let cell: CellRef = "B3".parse().unwrap();
//! assert_eq!(cell.col, 1);
//! assert_eq!(cell.row, 2);
//! assert_eq!(cell.to_string(), "B3");
//! ```

use std::fmt;

use super::column::column_to_letters;
use super::error::{RangeError, Result};
use super::numeric::parse_cell_token;

/// A reference to a cell by column and row indices (0-indexed).
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct CellRef {
    pub row: u32,
    pub col: u32,
}

impl CellRef {
    pub fn new(col: u32, row: u32) -> CellRef {
        CellRef { row, col }
    }

    /// Parse a single cell in A1 notation ("A1", "b2", "AA10").
    pub fn parse(name: &str) -> Result<CellRef> {
        let (column, row) = parse_cell_token(name.trim())?;
        let row = row
            .checked_sub(1)
            .ok_or_else(|| RangeError::InvalidFormat(format!("row 0 in cell {name:?}")))?;
        Ok(CellRef::new(column - 1, row))
    }

    /// Column letters for this cell (0 -> A).
    pub fn col_letters(&self) -> String {
        column_to_letters(self.col.saturating_add(1))
    }
}

impl std::str::FromStr for CellRef {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.col_letters(), u64::from(self.row) + 1)
    }
}
