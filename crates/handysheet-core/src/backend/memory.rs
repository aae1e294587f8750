//! In-memory spreadsheet service.
//!
//! Behaves like the remote service for everything the builder can send:
//! value reads and writes, appends, dimension inserts/deletes, merges, sorts
//! and tab listing. Useful for tests and offline demos.

use dashmap::DashMap;
use handysheet_range::{CellRef, NumericRange, SheetRange, sheet_address};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use super::{Backend, BackendError};
use crate::model::{
    AppendSummary, BatchSummary, CellValue, DeleteDimensionRequest, DimensionRange, GridRange,
    InsertDimensionRequest, MergeCellsRequest, Request, Rows, SortRangeRequest, TabInfo,
    UpdateSummary,
};
use crate::options::{Dimension, MergeType, SortOrder, ValueInputOption};

/// Grid size of a freshly added tab, matching the service's default.
pub const DEFAULT_ROW_COUNT: u32 = 1000;
pub const DEFAULT_COLUMN_COUNT: u32 = 26;

type BackendResult<T> = std::result::Result<T, BackendError>;

#[derive(Clone, Debug)]
struct Tab {
    sheet_id: u32,
    title: String,
    row_count: u32,
    column_count: u32,
    /// Only non-empty cells are stored
    cells: HashMap<CellRef, CellValue>,
    merges: Vec<GridRange>,
}

impl Tab {
    fn new(sheet_id: u32, title: &str) -> Tab {
        Tab {
            sheet_id,
            title: title.to_string(),
            row_count: DEFAULT_ROW_COUNT,
            column_count: DEFAULT_COLUMN_COUNT,
            cells: HashMap::new(),
            merges: Vec::new(),
        }
    }

    fn count(&self, dim: Dimension) -> u32 {
        match dim {
            Dimension::Rows => self.row_count,
            Dimension::Columns => self.column_count,
        }
    }

    fn set_count(&mut self, dim: Dimension, count: u32) {
        match dim {
            Dimension::Rows => self.row_count = count,
            Dimension::Columns => self.column_count = count,
        }
    }

    fn value(&self, col: u32, row: u32) -> CellValue {
        self.cells
            .get(&CellRef::new(col, row))
            .cloned()
            .unwrap_or_default()
    }

    fn set_value(&mut self, col: u32, row: u32, value: CellValue) {
        let cell_ref = CellRef::new(col, row);
        if value.is_empty() {
            self.cells.remove(&cell_ref);
        } else {
            self.cells.insert(cell_ref, value);
        }
    }

    /// Reject ranges that reach outside the grid.
    fn check_bounds(&self, range: &NumericRange) -> BackendResult<()> {
        if range.contains_zero() || !range.is_ordered() {
            return Err(BackendError::Rejected(format!("invalid range {}", range)));
        }
        if range.end_row > self.row_count || range.end_column > self.column_count {
            return Err(BackendError::Rejected(format!(
                "range {} exceeds grid limits of '{}' ({} rows, {} columns)",
                range, self.title, self.row_count, self.column_count
            )));
        }
        Ok(())
    }

    fn info(&self, index: usize) -> TabInfo {
        TabInfo {
            sheet_id: self.sheet_id,
            title: self.title.clone(),
            index: index as u32,
            row_count: self.row_count,
            column_count: self.column_count,
        }
    }
}

#[derive(Clone, Debug, Default)]
struct Workbook {
    tabs: Vec<Tab>,
    next_sheet_id: u32,
}

impl Workbook {
    fn tab(&self, sheet: Option<&str>) -> BackendResult<&Tab> {
        let found = match sheet {
            Some(title) => self.tabs.iter().find(|t| t.title == title),
            None => self.tabs.first(),
        };
        found.ok_or_else(|| missing_tab(sheet))
    }

    fn tab_mut(&mut self, sheet: Option<&str>) -> BackendResult<&mut Tab> {
        let found = match sheet {
            Some(title) => self.tabs.iter_mut().find(|t| t.title == title),
            None => self.tabs.first_mut(),
        };
        found.ok_or_else(|| missing_tab(sheet))
    }

    fn add_tab(&mut self, title: &str) -> BackendResult<TabInfo> {
        if self.tabs.iter().any(|t| t.title == title) {
            return Err(BackendError::Rejected(format!(
                "a tab named '{}' already exists",
                title
            )));
        }
        let tab = Tab::new(self.next_sheet_id, title);
        self.next_sheet_id += 1;
        self.tabs.push(tab);
        let index = self.tabs.len() - 1;
        Ok(self.tabs[index].info(index))
    }
}

fn missing_tab(sheet: Option<&str>) -> BackendError {
    match sheet {
        Some(title) => BackendError::NotFound(format!("tab '{}'", title)),
        None => BackendError::NotFound("spreadsheet has no tabs".to_string()),
    }
}

/// An in-memory [`Backend`]. Clones share the same spreadsheets.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    spreadsheets: Arc<DashMap<String, Workbook>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create (or replace) a spreadsheet holding empty tabs with the given titles.
    pub fn add_spreadsheet(&self, spreadsheet_id: &str, tabs: &[&str]) -> BackendResult<()> {
        let mut workbook = Workbook::default();
        for title in tabs {
            workbook.add_tab(title)?;
        }
        self.spreadsheets.insert(spreadsheet_id.to_string(), workbook);
        Ok(())
    }

    /// Add an empty tab at the end of an existing spreadsheet.
    pub fn add_tab(&self, spreadsheet_id: &str, title: &str) -> BackendResult<TabInfo> {
        let mut workbook = self.workbook_mut(spreadsheet_id)?;
        workbook.add_tab(title)
    }

    /// The used area of a tab, from A1 to the last non-empty cell.
    pub fn snapshot(&self, spreadsheet_id: &str, sheet: &str) -> BackendResult<Rows> {
        let workbook = self.workbook(spreadsheet_id)?;
        let tab = workbook.tab(Some(sheet))?;
        let Some(max_row) = tab.cells.keys().map(|c| c.row).max() else {
            return Ok(Vec::new());
        };
        let max_col = tab.cells.keys().map(|c| c.col).max().unwrap_or(0);
        let rows = (0..=max_row)
            .map(|row| {
                let mut line: Vec<CellValue> =
                    (0..=max_col).map(|col| tab.value(col, row)).collect();
                trim_trailing_empty(&mut line);
                line
            })
            .collect();
        Ok(rows)
    }

    /// Merged blocks of a tab, in creation order.
    pub fn merges(&self, spreadsheet_id: &str, sheet: &str) -> BackendResult<Vec<GridRange>> {
        let workbook = self.workbook(spreadsheet_id)?;
        Ok(workbook.tab(Some(sheet))?.merges.clone())
    }

    fn workbook(
        &self,
        spreadsheet_id: &str,
    ) -> BackendResult<dashmap::mapref::one::Ref<'_, String, Workbook>> {
        self.spreadsheets
            .get(spreadsheet_id)
            .ok_or_else(|| BackendError::NotFound(format!("spreadsheet '{}'", spreadsheet_id)))
    }

    fn workbook_mut(
        &self,
        spreadsheet_id: &str,
    ) -> BackendResult<dashmap::mapref::one::RefMut<'_, String, Workbook>> {
        self.spreadsheets
            .get_mut(spreadsheet_id)
            .ok_or_else(|| BackendError::NotFound(format!("spreadsheet '{}'", spreadsheet_id)))
    }
}

fn parse_address(range: &str) -> BackendResult<SheetRange> {
    SheetRange::parse(range)
        .map_err(|e| BackendError::Rejected(format!("unable to parse range {}: {}", range, e)))
}

fn trim_trailing_empty(line: &mut Vec<CellValue>) {
    while line.last().is_some_and(CellValue::is_empty) {
        line.pop();
    }
}

fn input_value(value: &CellValue, input: ValueInputOption) -> CellValue {
    match (input, value) {
        (ValueInputOption::UserEntered, CellValue::Text(s)) => CellValue::user_entered(s),
        _ => value.clone(),
    }
}

/// Write `values` with their top-left corner at (`col`, `row`), zero-based.
fn write_block(
    tab: &mut Tab,
    col: u32,
    row: u32,
    values: &Rows,
    input: ValueInputOption,
) -> UpdateSummary {
    let mut cells = 0u32;
    let mut width = 0u32;
    for (r, line) in values.iter().enumerate() {
        for (c, value) in line.iter().enumerate() {
            tab.set_value(col + c as u32, row + r as u32, input_value(value, input));
            cells += 1;
        }
        width = width.max(line.len() as u32);
    }
    let height = values.len() as u32;
    let written = NumericRange::new(col + 1, row + 1, col + width.max(1), row + height.max(1));
    UpdateSummary {
        updated_range: sheet_address(&tab.title, &written),
        updated_rows: height,
        updated_columns: width,
        updated_cells: cells,
    }
}

impl Backend for MemoryBackend {
    fn get(&self, spreadsheet_id: &str, range: &str) -> BackendResult<Rows> {
        log::trace!("memory get {} {}", spreadsheet_id, range);
        let address = parse_address(range)?;
        let workbook = self.workbook(spreadsheet_id)?;
        let tab = workbook.tab(address.sheet.as_deref())?;
        let area = address.range;
        tab.check_bounds(&area)?;

        let mut rows: Rows = area
            .rows()
            .map(|row| {
                let mut line: Vec<CellValue> =
                    area.columns().map(|col| tab.value(col - 1, row - 1)).collect();
                trim_trailing_empty(&mut line);
                line
            })
            .collect();
        while rows.last().is_some_and(Vec::is_empty) {
            rows.pop();
        }
        Ok(rows)
    }

    fn update(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: &Rows,
        input: ValueInputOption,
    ) -> BackendResult<UpdateSummary> {
        log::trace!("memory update {} {} ({} rows)", spreadsheet_id, range, values.len());
        let address = parse_address(range)?;
        let mut workbook = self.workbook_mut(spreadsheet_id)?;
        let tab = workbook.tab_mut(address.sheet.as_deref())?;
        let area = address.range;
        tab.check_bounds(&area)?;

        let widest = values.iter().map(Vec::len).max().unwrap_or(0) as u32;
        if values.len() as u32 > area.height() || widest > area.width() {
            return Err(BackendError::Rejected(format!(
                "{} rows x {} columns of values do not fit in {}",
                values.len(),
                widest,
                area
            )));
        }
        Ok(write_block(
            tab,
            area.start_column - 1,
            area.start_row - 1,
            values,
            input,
        ))
    }

    fn append(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: &Rows,
        input: ValueInputOption,
    ) -> BackendResult<AppendSummary> {
        log::trace!("memory append {} {} ({} rows)", spreadsheet_id, range, values.len());
        let address = parse_address(range)?;
        let mut workbook = self.workbook_mut(spreadsheet_id)?;
        let tab = workbook.tab_mut(address.sheet.as_deref())?;
        let area = address.range;
        tab.check_bounds(&area)?;

        let first_col = area.start_column - 1;
        let last_col = area.end_column - 1;
        let top = area.start_row - 1;
        let occupied: Vec<u32> = tab
            .cells
            .keys()
            .filter(|c| c.row >= top && (first_col..=last_col).contains(&c.col))
            .map(|c| c.row)
            .collect();

        let (table_range, next_row) = match (occupied.iter().min(), occupied.iter().max()) {
            (Some(&first), Some(&last)) => {
                let table = NumericRange::new(area.start_column, first + 1, area.end_column, last + 1);
                (Some(sheet_address(&tab.title, &table)), last + 1)
            }
            _ => (None, top),
        };

        let widest = values.iter().map(Vec::len).max().unwrap_or(0) as u32;
        if first_col + widest > tab.column_count {
            return Err(BackendError::Rejected(format!(
                "appended values exceed the {} columns of '{}'",
                tab.column_count, tab.title
            )));
        }
        let needed_rows = next_row + values.len() as u32;
        if needed_rows > tab.row_count {
            tab.row_count = needed_rows;
        }

        let updates = write_block(tab, first_col, next_row, values, input);
        Ok(AppendSummary {
            table_range,
            updates,
        })
    }

    fn batch_update(&self, spreadsheet_id: &str, requests: &[Request]) -> BackendResult<BatchSummary> {
        let mut workbook = self.workbook_mut(spreadsheet_id)?;

        // Requests apply to a copy so a failing batch leaves nothing behind.
        let mut staged = workbook.clone();
        for request in requests {
            log::trace!("memory batch {} {}", spreadsheet_id, request.kind());
            match request {
                Request::InsertDimension(req) => insert_dimension(&mut staged, req)?,
                Request::DeleteDimension(req) => delete_dimension(&mut staged, req)?,
                Request::MergeCells(req) => merge_cells(&mut staged, req)?,
                Request::SortRange(req) => sort_range(&mut staged, req)?,
            }
        }
        *workbook = staged;

        log::debug!("applied {} requests to {}", requests.len(), spreadsheet_id);
        Ok(BatchSummary {
            spreadsheet_id: spreadsheet_id.to_string(),
            replies: requests.len(),
        })
    }

    fn list_tabs(&self, spreadsheet_id: &str) -> BackendResult<Vec<TabInfo>> {
        let workbook = self.workbook(spreadsheet_id)?;
        Ok(workbook
            .tabs
            .iter()
            .enumerate()
            .map(|(index, tab)| tab.info(index))
            .collect())
    }
}

/// Coordinate of a cell along a dimension
fn coord(dim: Dimension, cell_ref: &CellRef) -> u32 {
    match dim {
        Dimension::Rows => cell_ref.row,
        Dimension::Columns => cell_ref.col,
    }
}

/// The same cell moved to `new_coord` along a dimension
fn with_coord(dim: Dimension, cell_ref: &CellRef, new_coord: u32) -> CellRef {
    match dim {
        Dimension::Rows => CellRef::new(cell_ref.col, new_coord),
        Dimension::Columns => CellRef::new(new_coord, cell_ref.row),
    }
}

/// Start/end indices of a merge along a dimension
fn merge_span(dim: Dimension, merge: &mut GridRange) -> (&mut u32, &mut u32) {
    match dim {
        Dimension::Rows => (&mut merge.start_row_index, &mut merge.end_row_index),
        Dimension::Columns => (&mut merge.start_column_index, &mut merge.end_column_index),
    }
}

fn check_dimension_range(range: &DimensionRange) -> BackendResult<()> {
    if range.start_index >= range.end_index {
        return Err(BackendError::Rejected(format!(
            "empty {} span {}..{}",
            range.dimension, range.start_index, range.end_index
        )));
    }
    Ok(())
}

fn insert_dimension(workbook: &mut Workbook, req: &InsertDimensionRequest) -> BackendResult<()> {
    let range = &req.range;
    check_dimension_range(range)?;
    if req.inherit_from_before && range.start_index == 0 {
        return Err(BackendError::Rejected(
            "cannot inherit from before when inserting at index 0".to_string(),
        ));
    }
    let tab = workbook.tab_mut(range.sheet.as_deref())?;
    let dim = range.dimension;
    let count = tab.count(dim);
    if range.start_index > count {
        return Err(BackendError::Rejected(format!(
            "insert at {} is past the {} {} of '{}'",
            range.start_index,
            count,
            dim.as_str().to_lowercase(),
            tab.title
        )));
    }
    let shift = range.len();
    let new_count = count.checked_add(shift).ok_or_else(|| too_large(dim, &tab.title))?;
    let furthest_cell = tab
        .cells
        .keys()
        .map(|cell_ref| coord(dim, cell_ref))
        .filter(|&i| i >= range.start_index)
        .max();
    let furthest_merge = tab
        .merges
        .iter()
        .map(|merge| match dim {
            Dimension::Rows => merge.end_row_index,
            Dimension::Columns => merge.end_column_index,
        })
        .filter(|&end| end > range.start_index)
        .max();
    let fits = |i: Option<u32>| i.is_none_or(|i| i.checked_add(shift).is_some());
    if !fits(furthest_cell) || !fits(furthest_merge) {
        return Err(too_large(dim, &tab.title));
    }

    let cells_to_move: Vec<(CellRef, CellValue)> = tab
        .cells
        .iter()
        .filter(|(cell_ref, _)| coord(dim, cell_ref) >= range.start_index)
        .map(|(cell_ref, value)| (*cell_ref, value.clone()))
        .collect();
    for (cell_ref, _) in &cells_to_move {
        tab.cells.remove(cell_ref);
    }
    for (cell_ref, value) in cells_to_move {
        let moved = with_coord(dim, &cell_ref, coord(dim, &cell_ref) + shift);
        tab.cells.insert(moved, value);
    }

    for merge in &mut tab.merges {
        let (start, end) = merge_span(dim, merge);
        if *start >= range.start_index {
            *start += shift;
            *end += shift;
        } else if *end > range.start_index {
            // Inserting inside a merge widens it.
            *end += shift;
        }
    }

    tab.set_count(dim, new_count);
    Ok(())
}

fn too_large(dim: Dimension, title: &str) -> BackendError {
    BackendError::Rejected(format!(
        "insert would grow the {} of '{}' past {}",
        dim.as_str().to_lowercase(),
        title,
        u32::MAX
    ))
}

fn delete_dimension(workbook: &mut Workbook, req: &DeleteDimensionRequest) -> BackendResult<()> {
    let range = &req.range;
    check_dimension_range(range)?;
    let tab = workbook.tab_mut(range.sheet.as_deref())?;
    let dim = range.dimension;
    let count = tab.count(dim);
    if range.end_index > count {
        return Err(BackendError::Rejected(format!(
            "delete of {}..{} is past the {} {} of '{}'",
            range.start_index,
            range.end_index,
            count,
            dim.as_str().to_lowercase(),
            tab.title
        )));
    }
    let removed = range.len();
    if removed >= count {
        return Err(BackendError::Rejected(format!(
            "cannot delete all {} of '{}'",
            dim.as_str().to_lowercase(),
            tab.title
        )));
    }

    tab.cells
        .retain(|cell_ref, _| !(range.start_index..range.end_index).contains(&coord(dim, cell_ref)));
    let cells_to_move: Vec<(CellRef, CellValue)> = tab
        .cells
        .iter()
        .filter(|(cell_ref, _)| coord(dim, cell_ref) >= range.end_index)
        .map(|(cell_ref, value)| (*cell_ref, value.clone()))
        .collect();
    for (cell_ref, _) in &cells_to_move {
        tab.cells.remove(cell_ref);
    }
    for (cell_ref, value) in cells_to_move {
        let moved = with_coord(dim, &cell_ref, coord(dim, &cell_ref) - removed);
        tab.cells.insert(moved, value);
    }

    // Boundaries inside the deleted span collapse onto its start.
    let remap = |i: u32| {
        if i <= range.start_index {
            i
        } else if i >= range.end_index {
            i - removed
        } else {
            range.start_index
        }
    };
    for merge in &mut tab.merges {
        let (start, end) = merge_span(dim, merge);
        *start = remap(*start);
        *end = remap(*end);
    }
    tab.merges.retain(|m| {
        let rows = m.end_row_index - m.start_row_index;
        let cols = m.end_column_index - m.start_column_index;
        rows > 0 && cols > 0 && (rows > 1 || cols > 1)
    });

    tab.set_count(dim, count - removed);
    Ok(())
}

fn merge_cells(workbook: &mut Workbook, req: &MergeCellsRequest) -> BackendResult<()> {
    let tab = workbook.tab_mut(req.range.sheet.as_deref())?;
    let block = req.range.to_numeric();
    tab.check_bounds(&block)?;

    let grid = &req.range;
    let merges: Vec<GridRange> = match req.merge_type {
        MergeType::MergeAll => vec![grid.clone()],
        MergeType::MergeRows => (grid.start_row_index..grid.end_row_index)
            .map(|row| GridRange {
                start_row_index: row,
                end_row_index: row + 1,
                ..grid.clone()
            })
            .collect(),
        MergeType::MergeColumns => (grid.start_column_index..grid.end_column_index)
            .map(|col| GridRange {
                start_column_index: col,
                end_column_index: col + 1,
                ..grid.clone()
            })
            .collect(),
    };

    for merge in merges {
        let rows = merge.end_row_index - merge.start_row_index;
        let cols = merge.end_column_index - merge.start_column_index;
        if rows <= 1 && cols <= 1 {
            continue;
        }
        if let Some(existing) = tab.merges.iter().find(|m| m.intersects(&merge)) {
            return Err(BackendError::Rejected(format!(
                "merge {} overlaps existing merge {}",
                merge.to_numeric(),
                existing.to_numeric()
            )));
        }
        // A merged block keeps only its top-left value.
        tab.cells.retain(|cell_ref, _| {
            !merge.contains(cell_ref.col, cell_ref.row)
                || (cell_ref.col == merge.start_column_index && cell_ref.row == merge.start_row_index)
        });
        tab.merges.push(GridRange {
            sheet: None,
            ..merge
        });
    }
    Ok(())
}

fn ordered(a: &CellValue, b: &CellValue, order: SortOrder) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        _ => match order {
            SortOrder::Ascending => a.compare(b),
            SortOrder::Descending => b.compare(a),
        },
    }
}

fn sort_range(workbook: &mut Workbook, req: &SortRangeRequest) -> BackendResult<()> {
    let tab = workbook.tab_mut(req.range.sheet.as_deref())?;
    let block = req.range.to_numeric();
    tab.check_bounds(&block)?;
    let grid = &req.range;

    // Lines are the units being reordered; positions run across each line.
    let (lines, positions) = match req.dimension {
        Dimension::Rows => (
            grid.start_row_index..grid.end_row_index,
            grid.start_column_index..grid.end_column_index,
        ),
        Dimension::Columns => (
            grid.start_column_index..grid.end_column_index,
            grid.start_row_index..grid.end_row_index,
        ),
    };
    let cell_at = |line: u32, pos: u32| match req.dimension {
        Dimension::Rows => (pos, line),
        Dimension::Columns => (line, pos),
    };

    let mut keys = Vec::with_capacity(req.sort_specs.len());
    for spec in &req.sort_specs {
        if !positions.contains(&spec.dimension_index) {
            return Err(BackendError::Rejected(format!(
                "sort key {} lies outside {}",
                spec.dimension_index, block
            )));
        }
        keys.push(((spec.dimension_index - positions.start) as usize, spec.sort_order));
    }

    let mut table: Vec<Vec<CellValue>> = lines
        .clone()
        .map(|line| {
            positions
                .clone()
                .map(|pos| {
                    let (col, row) = cell_at(line, pos);
                    tab.value(col, row)
                })
                .collect()
        })
        .collect();

    table.sort_by(|a, b| {
        keys.iter()
            .map(|&(key, order)| ordered(&a[key], &b[key], order))
            .find(|o| *o != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    });

    for (line, values) in lines.zip(table) {
        for (pos, value) in positions.clone().zip(values) {
            let (col, row) = cell_at(line, pos);
            tab.set_value(col, row, value);
        }
    }
    Ok(())
}
