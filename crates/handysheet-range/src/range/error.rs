//! Error types for range parsing.

use thiserror::Error;

/// Errors produced while decoding range notation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("Invalid range format: {0}")]
    InvalidFormat(String),
}

pub type Result<T> = std::result::Result<T, RangeError>;
