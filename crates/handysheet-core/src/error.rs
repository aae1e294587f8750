//! Error types for handysheet core.

use thiserror::Error;

use crate::backend::BackendError;
use handysheet_range::RangeError;

/// Errors raised by the operation builder
#[derive(Error, Debug)]
pub enum HandySheetError {
    #[error(transparent)]
    InvalidFormat(#[from] RangeError),

    #[error("Missing configuration: {0} must be set before this operation")]
    MissingConfiguration(&'static str),

    #[error("Invalid bounds: {0}")]
    InvalidBounds(String),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}

pub type Result<T> = std::result::Result<T, HandySheetError>;
