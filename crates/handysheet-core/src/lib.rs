//! handysheet-core - fluent operations over a spreadsheet service.
//!
//! The [`SpreadSheet`] builder turns chained configuration into requests for
//! a [`Backend`]; [`MemoryBackend`] is a complete in-process backend.

pub mod backend;
pub mod error;
pub mod model;
pub mod options;
pub mod sheet;

pub use backend::{Backend, BackendError, MemoryBackend};
pub use error::{HandySheetError, Result};
pub use model::{
    AppendSummary, BatchSummary, CellValue, DimensionRange, GridRange, Request, Rows, TabInfo,
    UpdateSummary,
};
pub use options::{Dimension, MergeType, SortOrder, ValueInputOption};
pub use sheet::{OperationContext, SpreadSheet};

pub use handysheet_range::{NumericRange, SheetRange};
