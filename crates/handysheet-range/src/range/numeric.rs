//! Numeric ranges and their A1 literal form.
//!
//! A [`NumericRange`] holds four 1-based, inclusive bounds: `A1:C3` is
//! `NumericRange::new(1, 1, 3, 3)`. Row numbers pass through unchanged in both
//! directions; only columns are re-encoded as letters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use super::column::{column_to_letters, letters_to_column};
use super::error::{RangeError, Result};

/// A rectangular block of cells addressed by 1-based inclusive bounds.
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumericRange {
    pub start_column: u32,
    pub start_row: u32,
    pub end_column: u32,
    pub end_row: u32,
}

impl NumericRange {
    pub fn new(start_column: u32, start_row: u32, end_column: u32, end_row: u32) -> NumericRange {
        NumericRange {
            start_column,
            start_row,
            end_column,
            end_row,
        }
    }

    /// Parse a literal range such as `"B2:D4"`.
    pub fn parse(literal: &str) -> Result<NumericRange> {
        literal_range_to_numeric(literal)
    }

    /// Render as a literal range such as `"B2:D4"`.
    pub fn to_literal(&self) -> String {
        numeric_range_to_literal(self.start_column, self.start_row, self.end_column, self.end_row)
    }

    pub fn columns(&self) -> RangeInclusive<u32> {
        self.start_column..=self.end_column
    }

    pub fn rows(&self) -> RangeInclusive<u32> {
        self.start_row..=self.end_row
    }

    /// True when both start bounds are no greater than the matching end bounds.
    pub fn is_ordered(&self) -> bool {
        self.start_column <= self.end_column && self.start_row <= self.end_row
    }

    /// True when any bound is 0, which no literal cell can name.
    pub fn contains_zero(&self) -> bool {
        self.start_column == 0 || self.start_row == 0 || self.end_column == 0 || self.end_row == 0
    }

    pub fn width(&self) -> u32 {
        self.end_column.saturating_sub(self.start_column) + 1
    }

    pub fn height(&self) -> u32 {
        self.end_row.saturating_sub(self.start_row) + 1
    }
}

impl fmt::Display for NumericRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_literal())
    }
}

impl FromStr for NumericRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self> {
        literal_range_to_numeric(s)
    }
}

/// Format four bounds as a literal range: `(1, 1, 3, 3)` -> `"A1:C3"`.
pub fn numeric_range_to_literal(
    start_column: u32,
    start_row: u32,
    end_column: u32,
    end_row: u32,
) -> String {
    format!(
        "{}{}:{}{}",
        column_to_letters(start_column),
        start_row,
        column_to_letters(end_column),
        end_row
    )
}

/// Parse a literal range (`"A1:C3"`) into its numeric bounds.
///
/// The string must hold exactly two `:`-separated tokens. Single cells and
/// tab prefixes are not accepted here; see [`super::SheetRange`] for the
/// latter.
pub fn literal_range_to_numeric(range: &str) -> Result<NumericRange> {
    let range = range.trim();
    let Some((start, end)) = range.split_once(':') else {
        return Err(RangeError::InvalidFormat(format!(
            "expected two cells separated by ':' in {range:?}"
        )));
    };
    if end.contains(':') {
        return Err(RangeError::InvalidFormat(format!(
            "too many ':' separators in {range:?}"
        )));
    }

    let (start_column, start_row) = parse_cell_token(start)?;
    let (end_column, end_row) = parse_cell_token(end)?;
    Ok(NumericRange::new(start_column, start_row, end_column, end_row))
}

/// Split a cell token into its column and row numbers.
///
/// Letters and digits are collected wherever they appear in the token, so
/// the split point is not assumed. Any other character is rejected.
pub(crate) fn parse_cell_token(token: &str) -> Result<(u32, u32)> {
    let mut letters = String::new();
    let mut digits = String::new();
    for c in token.chars() {
        if c.is_ascii_alphabetic() {
            letters.push(c);
        } else if c.is_ascii_digit() {
            digits.push(c);
        } else {
            return Err(RangeError::InvalidFormat(format!(
                "unexpected character {c:?} in cell {token:?}"
            )));
        }
    }
    if letters.is_empty() || digits.is_empty() {
        return Err(RangeError::InvalidFormat(format!(
            "cell {token:?} needs both column letters and a row number"
        )));
    }

    let column = letters_to_column(&letters)?;
    let row = digits
        .parse::<u32>()
        .map_err(|_| RangeError::InvalidFormat(format!("row out of range in {token:?}")))?;
    Ok((column, row))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_serde_field_names() {
        let range = NumericRange::new(2, 3, 4, 10);
        let json = serde_json::to_value(range).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"startColumn": 2, "startRow": 3, "endColumn": 4, "endRow": 10})
        );
        let back: NumericRange = serde_json::from_value(json).unwrap();
        assert_eq!(back, range);
    }

    #[test]
    fn test_numeric_to_literal() {
        assert_eq!(numeric_range_to_literal(1, 1, 3, 3), "A1:C3");
        assert_eq!(numeric_range_to_literal(2, 2, 4, 4), "B2:D4");
        assert_eq!(numeric_range_to_literal(27, 10, 28, 100), "AA10:AB100");
    }

    #[test]
    fn test_literal_to_numeric() {
        assert_eq!(literal_range_to_numeric("A1:C3").unwrap(), NumericRange::new(1, 1, 3, 3));
        assert_eq!(
            literal_range_to_numeric("aa10:ab100").unwrap(),
            NumericRange::new(27, 10, 28, 100)
        );
        assert_eq!(literal_range_to_numeric(" B2:D4 ").unwrap(), NumericRange::new(2, 2, 4, 4));
    }

    #[test]
    fn test_literal_scanning_is_order_independent() {
        assert_eq!(literal_range_to_numeric("1A:3C").unwrap(), NumericRange::new(1, 1, 3, 3));
    }

    #[test]
    fn test_literal_rejects_malformed() {
        for bad in ["A1C3", "A1:", ":C3", "A:C3", "1:C3", "A1:C3:D4", "A 1:C3", "A1:C-3", ""] {
            assert!(
                matches!(literal_range_to_numeric(bad), Err(RangeError::InvalidFormat(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_row_overflow_rejected() {
        assert!(literal_range_to_numeric("A1:A99999999999").is_err());
    }

    #[test]
    fn test_display_and_from_str() {
        let range: NumericRange = "B2:D4".parse().unwrap();
        assert_eq!(range.to_string(), "B2:D4");
        assert_eq!(range.width(), 3);
        assert_eq!(range.height(), 3);
        assert_eq!(range.columns(), 2..=4);
    }

    #[test]
    fn test_bounds_checks() {
        assert!(NumericRange::new(1, 1, 3, 3).is_ordered());
        assert!(!NumericRange::new(3, 1, 1, 3).is_ordered());
        assert!(!NumericRange::new(1, 3, 3, 1).is_ordered());
        assert!(NumericRange::new(0, 1, 3, 3).contains_zero());
        assert!(!NumericRange::new(1, 1, 1, 1).contains_zero());
    }
}
