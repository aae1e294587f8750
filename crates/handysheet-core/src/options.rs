//! Closed option sets understood by the spreadsheet service.
//!
//! Every variant knows its wire tag (`as_str`), and parses back from it
//! case-insensitively so configuration files can name them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whole rows or whole columns of a sheet.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Dimension {
    Rows,
    Columns,
}

impl Dimension {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Rows => "ROWS",
            Dimension::Columns => "COLUMNS",
        }
    }
}

/// How written values are interpreted.
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueInputOption {
    /// Stored as-is, never parsed.
    Raw,
    /// Parsed as if typed into the UI: numbers, booleans and dates are inferred.
    #[default]
    UserEntered,
}

impl ValueInputOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueInputOption::Raw => "RAW",
            ValueInputOption::UserEntered => "USER_ENTERED",
        }
    }
}

/// Shape of the merges created over a block.
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MergeType {
    /// One merge covering the whole block
    #[default]
    MergeAll,
    /// One merge per column
    MergeColumns,
    /// One merge per row
    MergeRows,
}

impl MergeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MergeType::MergeAll => "MERGE_ALL",
            MergeType::MergeColumns => "MERGE_COLUMNS",
            MergeType::MergeRows => "MERGE_ROWS",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ASCENDING",
            SortOrder::Descending => "DESCENDING",
        }
    }
}

macro_rules! wire_tag_impls {
    ($ty:ident, $what:literal, [$($variant:ident),+]) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                $(
                    if s.eq_ignore_ascii_case($ty::$variant.as_str()) {
                        return Ok($ty::$variant);
                    }
                )+
                Err(format!("Unknown {}: {}", $what, s))
            }
        }
    };
}

wire_tag_impls!(Dimension, "dimension", [Rows, Columns]);
wire_tag_impls!(ValueInputOption, "value input option", [Raw, UserEntered]);
wire_tag_impls!(MergeType, "merge type", [MergeAll, MergeColumns, MergeRows]);
wire_tag_impls!(SortOrder, "sort order", [Ascending, Descending]);
