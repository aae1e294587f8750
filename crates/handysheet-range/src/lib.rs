//! handysheet_range - A1 range notation codec.

pub mod range;

pub use range::*;
