//! The spreadsheet service seen from the builder.
//!
//! A [`Backend`] owns everything below the logical request: credentials,
//! transport, serialization, retries. Calls are blocking and return once the
//! service has answered.

mod memory;

pub use memory::MemoryBackend;

use thiserror::Error;

use crate::model::{AppendSummary, BatchSummary, Request, Rows, TabInfo, UpdateSummary};
use crate::options::ValueInputOption;

/// Failures reported by a backend. The builder passes these through untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Quota exceeded: {0}")]
    Quota(String),

    #[error("Request rejected: {0}")]
    Rejected(String),
}

/// Capabilities a spreadsheet service must provide.
///
/// `range` arguments are wire addresses of the form `<tab>!<literal range>`.
pub trait Backend {
    /// Cell values of the range, row-major.
    fn get(&self, spreadsheet_id: &str, range: &str) -> Result<Rows, BackendError>;

    /// Overwrite the range with `values`.
    fn update(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: &Rows,
        input: ValueInputOption,
    ) -> Result<UpdateSummary, BackendError>;

    /// Append `values` after the last non-empty row of the table found in the range.
    fn append(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: &Rows,
        input: ValueInputOption,
    ) -> Result<AppendSummary, BackendError>;

    /// Apply structured mutations in order.
    fn batch_update(
        &self,
        spreadsheet_id: &str,
        requests: &[Request],
    ) -> Result<BatchSummary, BackendError>;

    fn list_tabs(&self, spreadsheet_id: &str) -> Result<Vec<TabInfo>, BackendError>;
}

impl<B: Backend + ?Sized> Backend for &B {
    fn get(&self, spreadsheet_id: &str, range: &str) -> Result<Rows, BackendError> {
        (**self).get(spreadsheet_id, range)
    }

    fn update(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: &Rows,
        input: ValueInputOption,
    ) -> Result<UpdateSummary, BackendError> {
        (**self).update(spreadsheet_id, range, values, input)
    }

    fn append(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: &Rows,
        input: ValueInputOption,
    ) -> Result<AppendSummary, BackendError> {
        (**self).append(spreadsheet_id, range, values, input)
    }

    fn batch_update(
        &self,
        spreadsheet_id: &str,
        requests: &[Request],
    ) -> Result<BatchSummary, BackendError> {
        (**self).batch_update(spreadsheet_id, requests)
    }

    fn list_tabs(&self, spreadsheet_id: &str) -> Result<Vec<TabInfo>, BackendError> {
        (**self).list_tabs(spreadsheet_id)
    }
}

impl<B: Backend + ?Sized> Backend for Box<B> {
    fn get(&self, spreadsheet_id: &str, range: &str) -> Result<Rows, BackendError> {
        (**self).get(spreadsheet_id, range)
    }

    fn update(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: &Rows,
        input: ValueInputOption,
    ) -> Result<UpdateSummary, BackendError> {
        (**self).update(spreadsheet_id, range, values, input)
    }

    fn append(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: &Rows,
        input: ValueInputOption,
    ) -> Result<AppendSummary, BackendError> {
        (**self).append(spreadsheet_id, range, values, input)
    }

    fn batch_update(
        &self,
        spreadsheet_id: &str,
        requests: &[Request],
    ) -> Result<BatchSummary, BackendError> {
        (**self).batch_update(spreadsheet_id, requests)
    }

    fn list_tabs(&self, spreadsheet_id: &str) -> Result<Vec<TabInfo>, BackendError> {
        (**self).list_tabs(spreadsheet_id)
    }
}
