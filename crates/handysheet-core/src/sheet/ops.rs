//! Terminal operations: each one resolves the builder state and issues a
//! single backend call.

use super::SpreadSheet;
use crate::backend::Backend;
use crate::error::{HandySheetError, Result};
use crate::model::{
    AppendSummary, BatchSummary, CellValue, DeleteDimensionRequest, InsertDimensionRequest,
    MergeCellsRequest, Request, Rows, SortRangeRequest, SortSpec, UpdateSummary, to_rows,
};
use crate::options::Dimension;

impl<B: Backend + ?Sized> SpreadSheet<'_, B> {
    /// Read the configured range. Rows are in order, and trailing empty cells
    /// of each row are left out.
    pub fn read_values(&self) -> Result<Rows> {
        let id = self.context.require_id()?;
        let (_, address) = self.context.resolve_address()?;
        let address = address.address();
        log::debug!("get {} {}", id, address);

        let mut rows = self.backend.get(id, &address)?;
        for row in &mut rows {
            while row.last().is_some_and(CellValue::is_empty) {
                row.pop();
            }
        }
        Ok(rows)
    }

    /// Overwrite the configured range with row-major `values`.
    pub fn write_values<R, C>(&self, values: impl IntoIterator<Item = R>) -> Result<UpdateSummary>
    where
        R: IntoIterator<Item = C>,
        C: Into<CellValue>,
    {
        let id = self.context.require_id()?;
        let (_, address) = self.context.resolve_address()?;
        let address = address.address();
        let values = to_rows(values);
        let input = self.context.value_input_option;
        log::debug!("update {} {} ({} rows, {})", id, address, values.len(), input);

        Ok(self.backend.update(id, &address, &values, input)?)
    }

    /// Append rows after the last non-empty row of the table in the configured range.
    pub fn append_values<R, C>(&self, values: impl IntoIterator<Item = R>) -> Result<AppendSummary>
    where
        R: IntoIterator<Item = C>,
        C: Into<CellValue>,
    {
        let id = self.context.require_id()?;
        let (_, address) = self.context.resolve_address()?;
        let address = address.address();
        let values = to_rows(values);
        let input = self.context.value_input_option;
        log::debug!("append {} {} ({} rows, {})", id, address, values.len(), input);

        Ok(self.backend.append(id, &address, &values, input)?)
    }

    /// Insert empty rows/columns over `[from, to)`, pushing existing ones
    /// further down/right.
    pub fn insert_empty(&self) -> Result<BatchSummary> {
        let id = self.context.require_id()?;
        let range = self.context.dimension_range()?;
        if self.context.inherit_from_before && range.start_index == 0 {
            return Err(HandySheetError::InvalidBounds(
                "cannot inherit from before when inserting at index 0".to_string(),
            ));
        }
        self.dispatch(
            id,
            Request::InsertDimension(InsertDimensionRequest {
                range,
                inherit_from_before: self.context.inherit_from_before,
            }),
        )
    }

    /// Delete rows/columns `[from, to)`, pulling later ones up/left.
    pub fn delete(&self) -> Result<BatchSummary> {
        let id = self.context.require_id()?;
        let range = self.context.dimension_range()?;
        self.dispatch(id, Request::DeleteDimension(DeleteDimensionRequest { range }))
    }

    /// Merge the configured cell block according to the merge type.
    pub fn merge_cells(&self) -> Result<BatchSummary> {
        let id = self.context.require_id()?;
        let range = self.context.grid_range()?;
        self.dispatch(
            id,
            Request::MergeCells(MergeCellsRequest {
                range,
                merge_type: self.context.merge_type,
            }),
        )
    }

    /// Sort the rows (or columns) of the configured block by its first
    /// column (or row).
    pub fn sort(&self) -> Result<BatchSummary> {
        let id = self.context.require_id()?;
        let dimension = self
            .context
            .dimension
            .ok_or(HandySheetError::MissingConfiguration("dimension"))?;
        let range = self.context.grid_range()?;
        let dimension_index = match dimension {
            Dimension::Rows => range.start_column_index,
            Dimension::Columns => range.start_row_index,
        };
        self.dispatch(
            id,
            Request::SortRange(SortRangeRequest {
                range,
                dimension,
                sort_specs: vec![SortSpec {
                    dimension_index,
                    sort_order: self.context.sort_order,
                }],
            }),
        )
    }

    /// Titles of all tabs, in tab order.
    pub fn list_tabs(&self) -> Result<Vec<String>> {
        let id = self.context.require_id()?;
        log::debug!("list tabs {}", id);
        let tabs = self.backend.list_tabs(id)?;
        Ok(tabs.into_iter().map(|tab| tab.title).collect())
    }

    /// Insert empty rows `[start, end)`.
    pub fn insert_rows(&self, start: u32, end: u32, inherit_from_before: bool) -> Result<BatchSummary> {
        self.insert_span(Dimension::Rows, start, end, inherit_from_before)
    }

    /// Insert empty columns `[start, end)`.
    pub fn insert_columns(
        &self,
        start: u32,
        end: u32,
        inherit_from_before: bool,
    ) -> Result<BatchSummary> {
        self.insert_span(Dimension::Columns, start, end, inherit_from_before)
    }

    fn insert_span(
        &self,
        dimension: Dimension,
        start: u32,
        end: u32,
        inherit_from_before: bool,
    ) -> Result<BatchSummary> {
        self.clone()
            .select(dimension)
            .from(start)
            .to(end)
            .inherit_from_before(inherit_from_before)
            .insert_empty()
    }

    fn dispatch(&self, id: &str, request: Request) -> Result<BatchSummary> {
        log::debug!("batch update {} {}", id, request.kind());
        Ok(self.backend.batch_update(id, &[request])?)
    }
}
