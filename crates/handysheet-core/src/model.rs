//! Request and response payloads exchanged with a [`crate::Backend`].
//!
//! These are logical shapes only. Field names follow the service's camelCase
//! wire names so a transport backend can serialize them as they are; tabs are
//! referred to by title and resolving a title to the service's numeric sheet
//! id is left to the backend.

use handysheet_range::NumericRange;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::options::{Dimension, MergeType, SortOrder};

/// Contents of one cell.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
}

/// Row-major cell values.
pub type Rows = Vec<Vec<CellValue>>;

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Interpret text the way the service does for user-entered input.
    pub fn user_entered(text: &str) -> CellValue {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return CellValue::Empty;
        }
        if trimmed.eq_ignore_ascii_case("TRUE") {
            return CellValue::Bool(true);
        }
        if trimmed.eq_ignore_ascii_case("FALSE") {
            return CellValue::Bool(false);
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => CellValue::Number(n),
            _ => CellValue::Text(text.to_string()),
        }
    }

    /// Sort order used by the service: numbers, then booleans, then text,
    /// with empty cells always last.
    pub fn compare(&self, other: &CellValue) -> Ordering {
        fn rank(v: &CellValue) -> u8 {
            match v {
                CellValue::Number(_) => 0,
                CellValue::Bool(_) => 1,
                CellValue::Text(s) if !s.is_empty() => 2,
                _ => 3,
            }
        }
        match (self, other) {
            (CellValue::Number(a), CellValue::Number(b)) => a.total_cmp(b),
            (CellValue::Bool(a), CellValue::Bool(b)) => a.cmp(b),
            (CellValue::Text(a), CellValue::Text(b)) if !a.is_empty() && !b.is_empty() => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b)),
            _ => rank(self).cmp(&rank(other)),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Bool(true) => f.write_str("TRUE"),
            CellValue::Bool(false) => f.write_str("FALSE"),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

/// Collect nested iterables into [`Rows`].
pub fn to_rows<R, C>(values: impl IntoIterator<Item = R>) -> Rows
where
    R: IntoIterator<Item = C>,
    C: Into<CellValue>,
{
    values
        .into_iter()
        .map(|row| row.into_iter().map(Into::into).collect())
        .collect()
}

/// A span of whole rows or columns. Zero-based, `end_index` exclusive.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet: Option<String>,
    pub dimension: Dimension,
    pub start_index: u32,
    pub end_index: u32,
}

impl DimensionRange {
    pub fn len(&self) -> u32 {
        self.end_index.saturating_sub(self.start_index)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A rectangular block. Zero-based, end indices exclusive.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet: Option<String>,
    pub start_row_index: u32,
    pub end_row_index: u32,
    pub start_column_index: u32,
    pub end_column_index: u32,
}

impl GridRange {
    /// Convert 1-based inclusive bounds (`B2:D4`) to grid indices (`rows 1..4, columns 1..4`).
    pub fn from_numeric(sheet: Option<String>, range: &NumericRange) -> GridRange {
        GridRange {
            sheet,
            start_row_index: range.start_row.saturating_sub(1),
            end_row_index: range.end_row,
            start_column_index: range.start_column.saturating_sub(1),
            end_column_index: range.end_column,
        }
    }

    pub fn to_numeric(&self) -> NumericRange {
        NumericRange::new(
            self.start_column_index + 1,
            self.start_row_index + 1,
            self.end_column_index,
            self.end_row_index,
        )
    }

    pub fn contains(&self, col: u32, row: u32) -> bool {
        (self.start_column_index..self.end_column_index).contains(&col)
            && (self.start_row_index..self.end_row_index).contains(&row)
    }

    pub fn intersects(&self, other: &GridRange) -> bool {
        self.start_row_index < other.end_row_index
            && other.start_row_index < self.end_row_index
            && self.start_column_index < other.end_column_index
            && other.start_column_index < self.end_column_index
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertDimensionRequest {
    pub range: DimensionRange,
    pub inherit_from_before: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteDimensionRequest {
    pub range: DimensionRange,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeCellsRequest {
    pub range: GridRange,
    pub merge_type: MergeType,
}

/// One sort key: the zero-based row or column index compared, and its order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortSpec {
    pub dimension_index: u32,
    pub sort_order: SortOrder,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortRangeRequest {
    pub range: GridRange,
    /// `Rows` reorders rows by a key column, `Columns` reorders columns by a key row.
    pub dimension: Dimension,
    pub sort_specs: Vec<SortSpec>,
}

/// A single structured mutation in a batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Request {
    InsertDimension(InsertDimensionRequest),
    DeleteDimension(DeleteDimensionRequest),
    MergeCells(MergeCellsRequest),
    SortRange(SortRangeRequest),
}

impl Request {
    /// Wire name of the request, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Request::InsertDimension(_) => "insertDimension",
            Request::DeleteDimension(_) => "deleteDimension",
            Request::MergeCells(_) => "mergeCells",
            Request::SortRange(_) => "sortRange",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSummary {
    pub updated_range: String,
    pub updated_rows: u32,
    pub updated_columns: u32,
    pub updated_cells: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendSummary {
    /// The table the values were appended to, if one was found.
    pub table_range: Option<String>,
    pub updates: UpdateSummary,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub spreadsheet_id: String,
    pub replies: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabInfo {
    pub sheet_id: u32,
    pub title: String,
    pub index: u32,
    pub row_count: u32,
    pub column_count: u32,
}
