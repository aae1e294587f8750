//! Builder state and its resolution into validated ranges.
//!
//! Setters only record what they are given; every check happens here, when a
//! terminal operation asks for a cell block or a dimension span.

use handysheet_range::{NumericRange, RangeError, SheetRange};

use crate::error::{HandySheetError, Result};
use crate::model::{DimensionRange, GridRange};
use crate::options::{Dimension, MergeType, SortOrder, ValueInputOption};

/// How the cell block was last specified.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum CellTarget {
    #[default]
    Unset,
    /// A literal range, possibly tab-prefixed (`"Sheet1!A1:C3"`)
    Literal(String),
    /// 1-based inclusive (column, row) corners
    Corners {
        start: Option<(u32, u32)>,
        end: Option<(u32, u32)>,
    },
}

/// Everything accumulated by the builder's setters.
#[derive(Clone, Debug, Default)]
pub struct OperationContext {
    pub(crate) spreadsheet_id: Option<String>,
    pub(crate) sheet: Option<String>,
    pub(crate) cells: CellTarget,
    pub(crate) dimension: Option<Dimension>,
    pub(crate) start_index: Option<u32>,
    pub(crate) end_index: Option<u32>,
    pub(crate) value_input_option: ValueInputOption,
    pub(crate) merge_type: MergeType,
    pub(crate) sort_order: SortOrder,
    pub(crate) inherit_from_before: bool,
}

impl OperationContext {
    pub fn spreadsheet_id(&self) -> Option<&str> {
        self.spreadsheet_id.as_deref()
    }

    pub fn sheet(&self) -> Option<&str> {
        self.sheet.as_deref()
    }

    pub fn dimension(&self) -> Option<Dimension> {
        self.dimension
    }

    pub fn value_input_option(&self) -> ValueInputOption {
        self.value_input_option
    }

    pub fn merge_type(&self) -> MergeType {
        self.merge_type
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn inherits_from_before(&self) -> bool {
        self.inherit_from_before
    }

    pub(crate) fn require_id(&self) -> Result<&str> {
        self.spreadsheet_id
            .as_deref()
            .ok_or(HandySheetError::MissingConfiguration("spreadsheet id"))
    }

    /// Resolve the configured block to a tab (if any) and validated numeric bounds.
    ///
    /// A tab prefix inside a literal range takes precedence over `on_sheet`.
    pub(crate) fn resolve_cells(&self) -> Result<SheetRange> {
        let resolved = match &self.cells {
            CellTarget::Unset => return Err(HandySheetError::MissingConfiguration("range")),
            CellTarget::Literal(literal) => {
                let parsed = SheetRange::parse(literal)?;
                SheetRange::new(parsed.sheet.or_else(|| self.sheet.clone()), parsed.range)
            }
            CellTarget::Corners { start, end } => {
                let (start_column, start_row) =
                    start.ok_or(HandySheetError::MissingConfiguration("range start cell"))?;
                let (end_column, end_row) =
                    end.ok_or(HandySheetError::MissingConfiguration("range end cell"))?;
                SheetRange::new(
                    self.sheet.clone(),
                    NumericRange::new(start_column, start_row, end_column, end_row),
                )
            }
        };
        check_sheet(resolved.sheet.as_deref())?;
        check_cells(&resolved.range)?;
        Ok(resolved)
    }

    /// Resolve a block that must live on a named tab; returns the tab and the wire address.
    pub(crate) fn resolve_address(&self) -> Result<(String, SheetRange)> {
        let resolved = self.resolve_cells()?;
        let Some(sheet) = resolved.sheet.clone() else {
            return Err(HandySheetError::MissingConfiguration("sheet"));
        };
        Ok((sheet, resolved))
    }

    pub(crate) fn grid_range(&self) -> Result<GridRange> {
        let resolved = self.resolve_cells()?;
        Ok(GridRange::from_numeric(resolved.sheet, &resolved.range))
    }

    pub(crate) fn dimension_range(&self) -> Result<DimensionRange> {
        let dimension = self
            .dimension
            .ok_or(HandySheetError::MissingConfiguration("dimension"))?;
        let start_index = self
            .start_index
            .ok_or(HandySheetError::MissingConfiguration("start index"))?;
        let end_index = self
            .end_index
            .ok_or(HandySheetError::MissingConfiguration("end index"))?;
        check_sheet(self.sheet.as_deref())?;
        if start_index >= end_index {
            return Err(HandySheetError::InvalidBounds(format!(
                "start index {} must be less than end index {}",
                start_index, end_index
            )));
        }
        Ok(DimensionRange {
            sheet: self.sheet.clone(),
            dimension,
            start_index,
            end_index,
        })
    }
}

/// Wire addresses are unquoted, so a `!` in a tab title would be read as the separator.
fn check_sheet(sheet: Option<&str>) -> Result<()> {
    match sheet {
        Some(title) if title.contains('!') => Err(RangeError::InvalidFormat(format!(
            "tab title '{}' contains '!'",
            title
        ))
        .into()),
        _ => Ok(()),
    }
}

fn check_cells(range: &NumericRange) -> Result<()> {
    if range.contains_zero() {
        return Err(HandySheetError::InvalidBounds(format!(
            "rows and columns start at 1, got {:?}",
            range
        )));
    }
    if !range.is_ordered() {
        return Err(HandySheetError::InvalidBounds(format!(
            "range {} ends before it starts",
            range
        )));
    }
    Ok(())
}
