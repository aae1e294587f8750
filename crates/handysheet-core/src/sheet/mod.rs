//! Fluent operation builder.
//!
//! A [`SpreadSheet`] accumulates where and how an operation applies, then a
//! terminal call (`read_values`, `insert_empty`, `merge_cells`, ...) turns that
//! state into one backend request.
//!
//! Setters consume the builder and hand back the updated value, so each
//! chain owns its own state. Terminal calls borrow it, so a configured
//! builder can be cloned or run again:
//!
//! ```
//! use handysheet_core::{Dimension, MemoryBackend, SpreadSheet};
//!
//! let backend = MemoryBackend::new();
//! backend.add_spreadsheet("doc", &["Sheet1"]).unwrap();
//! let doc = SpreadSheet::new(&backend).with_id("doc").on_sheet("Sheet1");
//!
//! doc.clone().to_range("A1:B2").write_values([["A1", "B1"], ["A2", "B2"]]).unwrap();
//! doc.clone().select(Dimension::Rows).from(0).to(1).insert_empty().unwrap();
//! assert_eq!(doc.to_range("A2:B2").read_values().unwrap()[0][0].to_string(), "A1");
//! ```
//!
//! A builder is plain single-owner data: it is not meant to be shared between
//! threads. Build one per operation sequence.
//!
//! Index conventions:
//! - cell corners (`from_cell`/`to_cell`) are 1-based and inclusive, the same
//!   numbers a literal range encodes (`B2:D4` is `(2, 2)` to `(4, 4)`);
//! - dimension indices (`from`/`to`) are 0-based and `to` is exclusive:
//!   `select(Dimension::Rows).from(0).to(1)` addresses the first row only.

mod context;
mod ops;

pub use context::OperationContext;

use context::CellTarget;

use crate::options::{Dimension, MergeType, SortOrder, ValueInputOption};

/// Builder for operations on one spreadsheet, dispatching through a backend.
pub struct SpreadSheet<'b, B: ?Sized> {
    backend: &'b B,
    context: OperationContext,
}

impl<B: ?Sized> Clone for SpreadSheet<'_, B> {
    fn clone(&self) -> Self {
        SpreadSheet {
            backend: self.backend,
            context: self.context.clone(),
        }
    }
}

impl<'b, B: ?Sized> SpreadSheet<'b, B> {
    /// Start with an empty configuration.
    pub fn new(backend: &'b B) -> Self {
        SpreadSheet {
            backend,
            context: OperationContext::default(),
        }
    }

    /// Start from an existing configuration.
    pub fn with_context(backend: &'b B, context: OperationContext) -> Self {
        SpreadSheet { backend, context }
    }

    pub fn context(&self) -> &OperationContext {
        &self.context
    }

    pub fn with_id(mut self, spreadsheet_id: impl Into<String>) -> Self {
        self.context.spreadsheet_id = Some(spreadsheet_id.into());
        self
    }

    /// Tab the operation applies to. Titles containing `!` are rejected with
    /// `InvalidFormat` when a terminal operation runs.
    pub fn on_sheet(mut self, sheet: impl Into<String>) -> Self {
        self.context.sheet = Some(sheet.into());
        self
    }

    /// Cell block as a literal range (`"A1:C3"` or `"Sheet1!A1:C3"`).
    ///
    /// The literal is checked when a terminal operation runs.
    pub fn to_range(mut self, range: impl Into<String>) -> Self {
        self.context.cells = CellTarget::Literal(range.into());
        self
    }

    /// Top-left corner of the cell block (1-based column, row).
    pub fn from_cell(mut self, column: u32, row: u32) -> Self {
        let end = match self.context.cells {
            CellTarget::Corners { end, .. } => end,
            _ => None,
        };
        self.context.cells = CellTarget::Corners {
            start: Some((column, row)),
            end,
        };
        self
    }

    /// Bottom-right corner of the cell block (1-based column, row), inclusive.
    pub fn to_cell(mut self, column: u32, row: u32) -> Self {
        let start = match self.context.cells {
            CellTarget::Corners { start, .. } => start,
            _ => None,
        };
        self.context.cells = CellTarget::Corners {
            start,
            end: Some((column, row)),
        };
        self
    }

    pub fn select(mut self, dimension: Dimension) -> Self {
        self.context.dimension = Some(dimension);
        self
    }

    /// First row/column index of a dimension span (0-based).
    pub fn from(mut self, start_index: u32) -> Self {
        self.context.start_index = Some(start_index);
        self
    }

    /// End of a dimension span (0-based, exclusive).
    pub fn to(mut self, end_index: u32) -> Self {
        self.context.end_index = Some(end_index);
        self
    }

    pub fn with_value_input_option(mut self, option: ValueInputOption) -> Self {
        self.context.value_input_option = option;
        self
    }

    pub fn with_merge_type(mut self, merge_type: MergeType) -> Self {
        self.context.merge_type = merge_type;
        self
    }

    pub fn with_sort_order(mut self, order: SortOrder) -> Self {
        self.context.sort_order = order;
        self
    }

    /// Inserted rows/columns take their formatting from the span before
    /// (`true`) or after (`false`) them. `true` cannot be used at index 0.
    pub fn inherit_from_before(mut self, inherit: bool) -> Self {
        self.context.inherit_from_before = inherit;
        self
    }
}
