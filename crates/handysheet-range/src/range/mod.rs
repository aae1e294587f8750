//! Range notation API.
//!
//! - [`column_to_letters`] / [`letters_to_column`] - column letters ↔ 1-based indices
//! - [`NumericRange`] - four 1-based inclusive bounds, with its A1 literal form
//! - [`SheetRange`] - a numeric range qualified by a tab name (`Sheet1!A1:C3`)
//! - [`CellRef`] - zero-based single cell reference

mod address;
mod cell_ref;
mod column;
mod error;
mod numeric;

pub use address::{SheetRange, sheet_address};
pub use cell_ref::CellRef;
pub use column::{column_to_letters, letters_to_column};
pub use error::{RangeError, Result};
pub use numeric::{NumericRange, literal_range_to_numeric, numeric_range_to_literal};
