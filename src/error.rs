//! Error types for the handysheet demo

use handysheet_core::{BackendError, HandySheetError};
use thiserror::Error;

/// Errors that can occur while running the demo
#[derive(Error, Debug)]
pub enum DemoError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Spreadsheet operation failed at step '{step}': {source}")]
    Step {
        step: &'static str,
        #[source]
        source: HandySheetError,
    },

    #[error("Backend setup failed: {0}")]
    Setup(#[from] BackendError),
}

pub type Result<T> = std::result::Result<T, DemoError>;
